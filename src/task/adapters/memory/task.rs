//! In-memory repository for task records.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::{Task, TaskDraft, TaskId, TaskPatch},
    ports::{Page, TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory task repository.
///
/// Records are kept in a `BTreeMap` so listings come back in id order. The
/// identifier counter only ever advances, so a deleted id is never handed
/// out again, matching the durable adapter's auto-increment semantics.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: BTreeMap<TaskId, Task>,
    next_id: i64,
}

impl InMemoryTaskState {
    fn assign_id(&mut self) -> TaskId {
        self.next_id += 1;
        TaskId::from_i64(self.next_id)
    }
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned(err: impl std::fmt::Display) -> TaskRepositoryError {
    TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn create(&self, draft: TaskDraft) -> TaskRepositoryResult<Task> {
        let mut state = self.state.write().map_err(poisoned)?;
        let id = state.assign_id();
        let task = draft.into_task(id);
        state.tasks.insert(id, task.clone());
        Ok(task)
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn list(&self, page: Page) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(poisoned)?;
        let tasks = state
            .tasks
            .values()
            .skip(usize::try_from(page.offset()).unwrap_or(usize::MAX))
            .take(usize::try_from(page.limit()).unwrap_or(usize::MAX))
            .cloned()
            .collect();
        Ok(tasks)
    }

    async fn update(
        &self,
        id: TaskId,
        patch: TaskPatch,
        updated_at: DateTime<Utc>,
    ) -> TaskRepositoryResult<Option<Task>> {
        let mut state = self.state.write().map_err(poisoned)?;
        let Some(task) = state.tasks.get_mut(&id) else {
            return Ok(None);
        };
        task.apply(patch, updated_at);
        Ok(Some(task.clone()))
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let mut state = self.state.write().map_err(poisoned)?;
        Ok(state.tasks.remove(&id))
    }
}
