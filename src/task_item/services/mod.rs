//! Application services for task item orchestration.

mod handoff;
mod lifecycle;

pub use handoff::{
    CompletedHandoff, HandoffError, HandoffRequest, HandoffResult, TaskItemHandoffService,
};
pub use lifecycle::{
    CreateTaskItemOutcome, StatusTransition, TaskItemRequest, TaskItemService,
    TaskItemServiceError, TaskItemServiceResult, TransitionStatusRequest,
};
