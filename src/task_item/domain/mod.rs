//! Domain model for task item records.
//!
//! Task items are units of tracked work tied to a parent task. Each carries a
//! free-form processing status and a reference to the PDF artifact it
//! produced. Infrastructure concerns stay outside this boundary.

mod error;
mod ids;
mod item;
mod status;

pub use error::TaskItemDomainError;
pub(crate) use ids::required_text;
pub use ids::{ParentTaskId, PdfName, TaskItemId};
pub use item::{PersistedTaskItemData, TaskItem, TaskItemFields};
pub use status::TaskItemStatus;
