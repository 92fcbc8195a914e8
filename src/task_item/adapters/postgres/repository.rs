//! `PostgreSQL` repository implementation for task item storage.

use super::{
    models::{NewTaskItemRow, TaskItemChangeset, TaskItemRow},
    schema::task_item,
};
use crate::storage::PgPool;
use crate::task_item::{
    domain::{
        ParentTaskId, PdfName, PersistedTaskItemData, TaskItem, TaskItemFields, TaskItemId,
        TaskItemStatus,
    },
    ports::{TaskItemRepository, TaskItemRepositoryError, TaskItemRepositoryResult},
};
use crate::user::domain::UserId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};

/// Name of the unique index backing PDF-name de-duplication.
const PDF_NAME_UNIQUE_INDEX: &str = "idx_task_item_pdf_name_unique";

/// `PostgreSQL`-backed task item repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskItemRepository {
    pool: PgPool,
}

impl PostgresTaskItemRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskItemRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskItemRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskItemRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskItemRepositoryError::persistence)?
    }
}

#[async_trait]
impl TaskItemRepository for PostgresTaskItemRepository {
    async fn list_all(&self) -> TaskItemRepositoryResult<Vec<TaskItem>> {
        self.run_blocking(move |connection| {
            let rows = task_item::table
                .select(TaskItemRow::as_select())
                .load::<TaskItemRow>(connection)
                .map_err(TaskItemRepositoryError::persistence)?;
            rows.into_iter().map(row_to_item).collect()
        })
        .await
    }

    async fn find_by_id(&self, id: TaskItemId) -> TaskItemRepositoryResult<Vec<TaskItem>> {
        self.run_blocking(move |connection| {
            let rows = task_item::table
                .filter(task_item::id.eq(id.into_inner()))
                .select(TaskItemRow::as_select())
                .load::<TaskItemRow>(connection)
                .map_err(TaskItemRepositoryError::persistence)?;
            rows.into_iter().map(row_to_item).collect()
        })
        .await
    }

    async fn find_by_task_and_status(
        &self,
        task_id: &ParentTaskId,
        status: &TaskItemStatus,
    ) -> TaskItemRepositoryResult<Vec<TaskItem>> {
        let lookup_task = task_id.clone();
        let lookup_status = status.clone();
        self.run_blocking(move |connection| {
            let rows = task_item::table
                .filter(task_item::task_id.eq(lookup_task.as_str()))
                .filter(task_item::status.eq(lookup_status.as_str()))
                .select(TaskItemRow::as_select())
                .load::<TaskItemRow>(connection)
                .map_err(TaskItemRepositoryError::persistence)?;
            if rows.is_empty() {
                return Err(TaskItemRepositoryError::NoMatchingItems {
                    task_id: lookup_task,
                    status: lookup_status,
                });
            }
            rows.into_iter().map(row_to_item).collect()
        })
        .await
    }

    async fn insert_if_absent(&self, item: &TaskItem) -> TaskItemRepositoryResult<TaskItem> {
        let pdf_name = item.pdf_name().clone();
        let new_row = to_new_row(item);

        self.run_blocking(move |connection| {
            // Early exit only. The unique index settles races between the
            // lookup and the insert.
            let existing = task_item::table
                .filter(task_item::pdf_name.eq(pdf_name.as_str()))
                .select(task_item::id)
                .first::<uuid::Uuid>(connection)
                .optional()
                .map_err(TaskItemRepositoryError::persistence)?;
            if existing.is_some() {
                return Err(TaskItemRepositoryError::DuplicatePdfName(pdf_name));
            }

            let row = diesel::insert_into(task_item::table)
                .values(&new_row)
                .returning(TaskItemRow::as_returning())
                .get_result::<TaskItemRow>(connection)
                .map_err(|err| map_write_error(err, &pdf_name))?;
            row_to_item(row)
        })
        .await
    }

    async fn update_full(
        &self,
        id: TaskItemId,
        fields: &TaskItemFields,
        updated_at: DateTime<Utc>,
    ) -> TaskItemRepositoryResult<()> {
        let pdf_name = fields.pdf_name.clone();
        let changeset = to_changeset(fields, updated_at);

        self.run_blocking(move |connection| {
            let updated_count =
                diesel::update(task_item::table.filter(task_item::id.eq(id.into_inner())))
                    .set(&changeset)
                    .execute(connection)
                    .map_err(|err| map_write_error(err, &pdf_name))?;

            if updated_count == 0 {
                return Err(TaskItemRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn update_status_bulk(
        &self,
        ids: &[TaskItemId],
        status: &TaskItemStatus,
        updated_at: DateTime<Utc>,
    ) -> TaskItemRepositoryResult<u64> {
        let uuids: Vec<uuid::Uuid> = ids.iter().map(|id| id.into_inner()).collect();
        let target = status.as_str().to_owned();

        self.run_blocking(move |connection| {
            let updated_count = diesel::update(
                task_item::table
                    .filter(task_item::id.eq_any(uuids))
                    .filter(task_item::status.ne(target.as_str())),
            )
            .set((
                task_item::status.eq(target.as_str()),
                task_item::updated_at.eq(updated_at),
            ))
            .execute(connection)
            .map_err(TaskItemRepositoryError::persistence)?;

            u64::try_from(updated_count).map_err(TaskItemRepositoryError::persistence)
        })
        .await
    }

    async fn delete_by_id(&self, id: TaskItemId) -> TaskItemRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let deleted_count =
                diesel::delete(task_item::table.filter(task_item::id.eq(id.into_inner())))
                    .execute(connection)
                    .map_err(TaskItemRepositoryError::persistence)?;

            if deleted_count == 0 {
                return Err(TaskItemRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }
}

fn to_new_row(item: &TaskItem) -> NewTaskItemRow {
    let fields = item.fields();
    NewTaskItemRow {
        id: item.id().into_inner(),
        machine_name: fields.machine_name.clone(),
        pdf_file_path: fields.pdf_file_path.clone(),
        pdf_name: fields.pdf_name.as_str().to_owned(),
        status: fields.status.as_str().to_owned(),
        owner_user_id: fields.owner_user_id.as_str().to_owned(),
        task_id: fields.task_id.as_str().to_owned(),
        data: fields.data.clone(),
        performer_data: fields.performer_data.clone(),
        updated_at: item.updated_at(),
    }
}

fn to_changeset(fields: &TaskItemFields, updated_at: DateTime<Utc>) -> TaskItemChangeset {
    TaskItemChangeset {
        machine_name: fields.machine_name.clone(),
        pdf_file_path: fields.pdf_file_path.clone(),
        pdf_name: fields.pdf_name.as_str().to_owned(),
        status: fields.status.as_str().to_owned(),
        owner_user_id: fields.owner_user_id.as_str().to_owned(),
        task_id: fields.task_id.as_str().to_owned(),
        data: fields.data.clone(),
        performer_data: fields.performer_data.clone(),
        updated_at,
    }
}

fn row_to_item(row: TaskItemRow) -> TaskItemRepositoryResult<TaskItem> {
    let TaskItemRow {
        id,
        machine_name,
        pdf_file_path,
        pdf_name,
        status,
        owner_user_id,
        task_id,
        data,
        performer_data,
        updated_at,
    } = row;

    let fields = TaskItemFields {
        machine_name,
        pdf_file_path,
        pdf_name: PdfName::new(pdf_name)
            .map_err(TaskItemRepositoryError::invalid_persisted_data)?,
        status: TaskItemStatus::new(status)
            .map_err(TaskItemRepositoryError::invalid_persisted_data)?,
        owner_user_id: UserId::new(owner_user_id)
            .map_err(TaskItemRepositoryError::invalid_persisted_data)?,
        task_id: ParentTaskId::new(task_id)
            .map_err(TaskItemRepositoryError::invalid_persisted_data)?,
        data,
        performer_data,
    };

    Ok(TaskItem::from_persisted(PersistedTaskItemData {
        id: TaskItemId::from_uuid(id),
        fields,
        updated_at,
    }))
}

fn map_write_error(err: DieselError, pdf_name: &PdfName) -> TaskItemRepositoryError {
    match err {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
            if is_pdf_name_unique_violation(info.as_ref()) =>
        {
            TaskItemRepositoryError::DuplicatePdfName(pdf_name.clone())
        }
        _ => TaskItemRepositoryError::persistence(err),
    }
}

fn is_pdf_name_unique_violation(info: &dyn DatabaseErrorInformation) -> bool {
    info.constraint_name()
        .is_some_and(|name| name == PDF_NAME_UNIQUE_INDEX)
}
