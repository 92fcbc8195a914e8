//! Diesel row models for task item persistence.

use super::schema::task_item;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;

/// Query result row for task item records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = task_item)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskItemRow {
    /// Internal task item identifier.
    pub id: uuid::Uuid,
    /// Producing worker or machine label.
    pub machine_name: String,
    /// Source location of the artifact.
    pub pdf_file_path: String,
    /// Artifact name.
    pub pdf_name: String,
    /// Processing status label.
    pub status: String,
    /// Owning user reference.
    pub owner_user_id: String,
    /// Parent task reference.
    pub task_id: String,
    /// Upstream processing payload.
    pub data: Value,
    /// Performer payload.
    pub performer_data: Value,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for task item records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = task_item)]
pub struct NewTaskItemRow {
    /// Internal task item identifier.
    pub id: uuid::Uuid,
    /// Producing worker or machine label.
    pub machine_name: String,
    /// Source location of the artifact.
    pub pdf_file_path: String,
    /// Artifact name.
    pub pdf_name: String,
    /// Processing status label.
    pub status: String,
    /// Owning user reference.
    pub owner_user_id: String,
    /// Parent task reference.
    pub task_id: String,
    /// Upstream processing payload.
    pub data: Value,
    /// Performer payload.
    pub performer_data: Value,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Changeset applied by a full update.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = task_item)]
pub struct TaskItemChangeset {
    /// Producing worker or machine label.
    pub machine_name: String,
    /// Source location of the artifact.
    pub pdf_file_path: String,
    /// Artifact name.
    pub pdf_name: String,
    /// Processing status label.
    pub status: String,
    /// Owning user reference.
    pub owner_user_id: String,
    /// Parent task reference.
    pub task_id: String,
    /// Upstream processing payload.
    pub data: Value,
    /// Performer payload.
    pub performer_data: Value,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}
