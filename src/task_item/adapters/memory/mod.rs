//! In-memory repository for task item tests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::task_item::{
    domain::{ParentTaskId, PdfName, TaskItem, TaskItemFields, TaskItemId, TaskItemStatus},
    ports::{TaskItemRepository, TaskItemRepositoryError, TaskItemRepositoryResult},
};

/// Thread-safe in-memory task item repository.
///
/// The PDF-name index plays the role of the store's unique constraint: the
/// duplicate check and the insert happen under one write lock.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskItemRepository {
    state: Arc<RwLock<InMemoryTaskItemState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskItemState {
    items: HashMap<TaskItemId, TaskItem>,
    pdf_name_index: HashMap<PdfName, TaskItemId>,
}

impl InMemoryTaskItemRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> TaskItemRepositoryResult<RwLockReadGuard<'_, InMemoryTaskItemState>> {
        self.state.read().map_err(|err| {
            TaskItemRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write(&self) -> TaskItemRepositoryResult<RwLockWriteGuard<'_, InMemoryTaskItemState>> {
        self.state.write().map_err(|err| {
            TaskItemRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

#[async_trait]
impl TaskItemRepository for InMemoryTaskItemRepository {
    async fn list_all(&self) -> TaskItemRepositoryResult<Vec<TaskItem>> {
        let state = self.read()?;
        Ok(state.items.values().cloned().collect())
    }

    async fn find_by_id(&self, id: TaskItemId) -> TaskItemRepositoryResult<Vec<TaskItem>> {
        let state = self.read()?;
        Ok(state.items.get(&id).cloned().into_iter().collect())
    }

    async fn find_by_task_and_status(
        &self,
        task_id: &ParentTaskId,
        status: &TaskItemStatus,
    ) -> TaskItemRepositoryResult<Vec<TaskItem>> {
        let state = self.read()?;
        let matching: Vec<TaskItem> = state
            .items
            .values()
            .filter(|item| item.task_id() == task_id && item.status() == status)
            .cloned()
            .collect();
        if matching.is_empty() {
            return Err(TaskItemRepositoryError::NoMatchingItems {
                task_id: task_id.clone(),
                status: status.clone(),
            });
        }
        Ok(matching)
    }

    async fn insert_if_absent(&self, item: &TaskItem) -> TaskItemRepositoryResult<TaskItem> {
        let mut state = self.write()?;
        if state.pdf_name_index.contains_key(item.pdf_name()) {
            return Err(TaskItemRepositoryError::DuplicatePdfName(
                item.pdf_name().clone(),
            ));
        }

        state
            .pdf_name_index
            .insert(item.pdf_name().clone(), item.id());
        state.items.insert(item.id(), item.clone());
        Ok(item.clone())
    }

    async fn update_full(
        &self,
        id: TaskItemId,
        fields: &TaskItemFields,
        updated_at: DateTime<Utc>,
    ) -> TaskItemRepositoryResult<()> {
        let mut state = self.write()?;
        let old_name = state
            .items
            .get(&id)
            .ok_or(TaskItemRepositoryError::NotFound(id))?
            .pdf_name()
            .clone();

        if old_name != fields.pdf_name {
            if state.pdf_name_index.contains_key(&fields.pdf_name) {
                return Err(TaskItemRepositoryError::DuplicatePdfName(
                    fields.pdf_name.clone(),
                ));
            }
            state.pdf_name_index.remove(&old_name);
            state.pdf_name_index.insert(fields.pdf_name.clone(), id);
        }

        if let Some(item) = state.items.get_mut(&id) {
            item.replace_fields(fields.clone(), updated_at);
        }
        Ok(())
    }

    async fn update_status_bulk(
        &self,
        ids: &[TaskItemId],
        status: &TaskItemStatus,
        updated_at: DateTime<Utc>,
    ) -> TaskItemRepositoryResult<u64> {
        let mut state = self.write()?;
        let unique_ids: HashSet<TaskItemId> = ids.iter().copied().collect();
        let mut updated: u64 = 0;
        for id in unique_ids {
            if let Some(item) = state.items.get_mut(&id) {
                if item.set_status(status, updated_at) {
                    updated += 1;
                }
            }
        }
        Ok(updated)
    }

    async fn delete_by_id(&self, id: TaskItemId) -> TaskItemRepositoryResult<()> {
        let mut state = self.write()?;
        let removed = state
            .items
            .remove(&id)
            .ok_or(TaskItemRepositoryError::NotFound(id))?;
        state.pdf_name_index.remove(removed.pdf_name());
        Ok(())
    }
}
