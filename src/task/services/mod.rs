//! Application services for task record orchestration.

mod catalog;

pub use catalog::{
    CreateTaskRequest, TaskService, TaskServiceError, TaskServiceResult, UpdateTaskRequest,
};
