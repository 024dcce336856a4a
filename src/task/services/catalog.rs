//! Service layer for task record creation, retrieval, and mutation.
//!
//! Provides [`TaskService`], the single entry point a transport adapter
//! calls. The service owns request-shape validation and clock-driven
//! timestamping; merge semantics and identity assignment stay inside the
//! repository. A missing record is reported as `Ok(None)` so the adapter
//! can render its not-found response uniformly.

use crate::task::{
    domain::{Task, TaskDomainError, TaskDraft, TaskId, TaskPatch, TaskStatus, TaskTitle},
    ports::{Page, TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating a task record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    title: String,
    description: Option<String>,
}

impl CreateTaskRequest {
    /// Creates a request with the required title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
        }
    }

    /// Sets the task description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Request payload for partially updating a task record.
///
/// Only fields explicitly set on the request are changed; everything else
/// is left untouched. Clearing the description is distinct from omitting it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateTaskRequest {
    title: Option<String>,
    description: Option<Option<String>>,
    status: Option<TaskStatus>,
}

impl UpdateTaskRequest {
    /// Creates a request touching no fields.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a replacement title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets a replacement description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(Some(description.into()));
        self
    }

    /// Explicitly clears the description.
    #[must_use]
    pub fn clearing_description(mut self) -> Self {
        self.description = Some(None);
        self
    }

    /// Sets a replacement status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Validates the request into a domain patch.
    ///
    /// An explicitly supplied title must pass the same validation as at
    /// creation, so a record can never be updated into an empty title.
    fn into_patch(self) -> Result<TaskPatch, TaskDomainError> {
        let Self {
            title,
            description,
            status,
        } = self;

        let mut patch = TaskPatch::new();
        if let Some(raw_title) = title {
            patch = patch.with_title(TaskTitle::new(raw_title)?);
        }
        match description {
            Some(Some(text)) => patch = patch.with_description(text),
            Some(None) => patch = patch.clearing_description(),
            None => {}
        }
        if let Some(new_status) = status {
            patch = patch.with_status(new_status);
        }
        Ok(patch)
    }
}

/// Service-level errors for task record operations.
#[derive(Debug, Error)]
pub enum TaskServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
}

/// Result type for task service operations.
pub type TaskServiceResult<T> = Result<T, TaskServiceError>;

/// Task record orchestration service.
#[derive(Clone)]
pub struct TaskService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> TaskService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Creates a new task record with [`TaskStatus::Created`] status.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Domain`] when the title is empty after
    /// trimming or too long (nothing is persisted in that case), or
    /// [`TaskServiceError::Repository`] when the store rejects the insert.
    pub async fn create_task(&self, request: CreateTaskRequest) -> TaskServiceResult<Task> {
        let CreateTaskRequest { title, description } = request;
        let validated_title = TaskTitle::new(title)?;
        let draft = TaskDraft::new(validated_title, description, &*self.clock);
        Ok(self.repository.create(draft).await?)
    }

    /// Retrieves a task record by identifier.
    ///
    /// Returns `Ok(None)` when no record has the given id.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] when persistence lookup
    /// fails.
    pub async fn get_task(&self, id: TaskId) -> TaskServiceResult<Option<Task>> {
        Ok(self.repository.find_by_id(id).await?)
    }

    /// Lists task records in id order within the pagination window.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] when persistence lookup
    /// fails.
    pub async fn list_tasks(&self, page: Page) -> TaskServiceResult<Vec<Task>> {
        Ok(self.repository.list(page).await?)
    }

    /// Applies a partial update to a task record.
    ///
    /// Fields omitted from the request are left unchanged; `updated_at` is
    /// refreshed on every successful update, including one that touches no
    /// fields. Returns `Ok(None)` when no record has the given id.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Domain`] when an explicitly supplied
    /// title fails validation, or [`TaskServiceError::Repository`] when the
    /// store rejects the write.
    pub async fn update_task(
        &self,
        id: TaskId,
        request: UpdateTaskRequest,
    ) -> TaskServiceResult<Option<Task>> {
        let patch = request.into_patch()?;
        let updated_at = self.clock.utc();
        Ok(self.repository.update(id, patch, updated_at).await?)
    }

    /// Permanently deletes a task record.
    ///
    /// Returns the record as it was immediately before deletion, or
    /// `Ok(None)` when no record has the given id. Deleting the same id
    /// twice is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] when the store rejects the
    /// delete.
    pub async fn delete_task(&self, id: TaskId) -> TaskServiceResult<Option<Task>> {
        Ok(self.repository.delete(id).await?)
    }
}
