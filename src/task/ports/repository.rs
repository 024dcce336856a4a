//! Repository port for task record persistence.

use crate::task::domain::{Task, TaskDraft, TaskId, TaskPatch};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Pagination window for listing task records.
///
/// `offset` records are skipped before up to `limit` records are returned in
/// id order. The default window (offset 0, limit 10) matches the transport
/// adapter's documented defaults; the core enforces no upper bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    offset: u32,
    limit: u32,
}

impl Page {
    /// Creates a pagination window.
    #[must_use]
    pub const fn new(offset: u32, limit: u32) -> Self {
        Self { offset, limit }
    }

    /// Returns the number of records to skip.
    #[must_use]
    pub const fn offset(self) -> u32 {
        self.offset
    }

    /// Returns the maximum number of records to return.
    #[must_use]
    pub const fn limit(self) -> u32 {
        self.limit
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(0, 10)
    }
}

/// Task record persistence contract.
///
/// Implementations own identity assignment (unique, monotonically
/// increasing, never reused after deletion) and durable state. A missing
/// record is a normal outcome reported as `Ok(None)`, never an error;
/// [`TaskRepositoryError`] is reserved for backing-medium failures.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Inserts a draft, assigning a fresh identifier, and returns the
    /// persisted record.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] when the backing medium
    /// rejects the insert.
    async fn create(&self, draft: TaskDraft) -> TaskRepositoryResult<Task>;

    /// Finds a task record by identifier.
    ///
    /// Returns `None` when the record does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Returns task records in id order within the pagination window.
    ///
    /// An empty result is valid, not an error.
    async fn list(&self, page: Page) -> TaskRepositoryResult<Vec<Task>>;

    /// Applies a partial update to an existing record.
    ///
    /// Only fields present in the patch change; `updated_at` is set to the
    /// supplied timestamp even when the patch is empty. Returns the updated
    /// record, or `None` when no record exists for `id`.
    async fn update(
        &self,
        id: TaskId,
        patch: TaskPatch,
        updated_at: DateTime<Utc>,
    ) -> TaskRepositoryResult<Option<Task>>;

    /// Permanently removes a record.
    ///
    /// Returns the record as it was immediately before deletion, or `None`
    /// when no record exists for `id`. The identifier is never reassigned.
    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// Persisted data could not be reconstructed into domain types.
    #[error("invalid persisted data: {0}")]
    InvalidPersistedData(Arc<dyn std::error::Error + Send + Sync>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a data-quality or deserialization error from persisted rows.
    pub fn invalid_persisted_data(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidPersistedData(Arc::new(err))
    }

    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
