//! Domain model for task records.
//!
//! The task domain models the task record shape, its validation rules, and
//! the partial-update merge semantics. All infrastructure concerns are kept
//! outside the domain boundary: identity and durable state belong to the
//! store, time comes from an injected clock.

mod error;
mod ids;
mod status;
mod task;
mod title;

pub use error::{ParseTaskStatusError, TaskDomainError};
pub use ids::TaskId;
pub use status::TaskStatus;
pub use task::{PersistedTaskData, Task, TaskDraft, TaskPatch};
pub use title::TaskTitle;
