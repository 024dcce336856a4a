//! End-to-end service flows over a real `SQLite` backing store.
//!
//! Exercises [`TaskService`] wired the way a process would wire it at
//! startup: an explicitly constructed repository injected into the service,
//! with every operation going through the store.

#![expect(
    clippy::expect_used,
    reason = "Test code uses expect for assertion clarity"
)]

use std::sync::Arc;

use diesel::r2d2::{ConnectionManager, Pool};
use mockable::DefaultClock;
use taskdesk::task::{
    adapters::sqlite::{SqliteTaskRepository, TaskSqlitePool, ensure_schema},
    domain::{TaskDomainError, TaskId, TaskStatus},
    ports::Page,
    services::{CreateTaskRequest, TaskService, TaskServiceError, UpdateTaskRequest},
};

type SqliteService = TaskService<SqliteTaskRepository, DefaultClock>;

fn memory_pool() -> TaskSqlitePool {
    let pool = Pool::builder()
        .max_size(1)
        .build(ConnectionManager::new(":memory:"))
        .expect("failed to build pool");
    ensure_schema(&pool).expect("failed to create schema");
    pool
}

fn service() -> SqliteService {
    TaskService::new(
        Arc::new(SqliteTaskRepository::new(memory_pool())),
        Arc::new(DefaultClock),
    )
}

#[tokio::test(flavor = "multi_thread")]
async fn create_then_get_round_trips_through_the_store() {
    let svc = service();

    let created = svc
        .create_task(CreateTaskRequest::new("Test Task").with_description("This is a test task"))
        .await
        .expect("creation should succeed");

    let fetched = svc
        .get_task(created.id())
        .await
        .expect("lookup should succeed")
        .expect("record should exist");

    assert_eq!(fetched.title().as_str(), "Test Task");
    assert_eq!(fetched.description(), Some("This is a test task"));
    assert_eq!(fetched.status(), TaskStatus::Created);
    assert!(fetched.created_at() <= fetched.updated_at());
}

#[tokio::test(flavor = "multi_thread")]
async fn invalid_creation_leaves_the_store_empty() {
    let svc = service();

    let result = svc.create_task(CreateTaskRequest::new("   ")).await;
    assert!(matches!(
        result,
        Err(TaskServiceError::Domain(TaskDomainError::EmptyTitle))
    ));

    let listed = svc
        .list_tasks(Page::default())
        .await
        .expect("listing should succeed");
    assert!(listed.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn patch_merges_into_the_persisted_row() {
    let svc = service();

    let created = svc
        .create_task(CreateTaskRequest::new("Old Title"))
        .await
        .expect("creation should succeed");

    let updated = svc
        .update_task(
            created.id(),
            UpdateTaskRequest::new().with_status(TaskStatus::InProgress),
        )
        .await
        .expect("update should succeed")
        .expect("record should exist");

    assert_eq!(updated.title().as_str(), "Old Title");
    assert_eq!(updated.status(), TaskStatus::InProgress);

    // The store is the single source of truth: re-read and compare.
    let reread = svc
        .get_task(created.id())
        .await
        .expect("lookup should succeed")
        .expect("record should exist");
    assert_eq!(reread, updated);
}

#[tokio::test(flavor = "multi_thread")]
async fn not_found_paths_are_uniform_across_operations() {
    let svc = service();
    let missing = TaskId::from_i64(99_999);

    assert!(
        svc.get_task(missing)
            .await
            .expect("lookup should succeed")
            .is_none()
    );
    assert!(
        svc.update_task(missing, UpdateTaskRequest::new().with_title("renamed"))
            .await
            .expect("update should succeed")
            .is_none()
    );
    assert!(
        svc.delete_task(missing)
            .await
            .expect("deletion should succeed")
            .is_none()
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn listing_two_tasks_returns_both() {
    let svc = service();

    let first = svc
        .create_task(CreateTaskRequest::new("first"))
        .await
        .expect("creation should succeed");
    let second = svc
        .create_task(CreateTaskRequest::new("second"))
        .await
        .expect("creation should succeed");

    let listed = svc
        .list_tasks(Page::default())
        .await
        .expect("listing should succeed");

    assert!(listed.len() >= 2);
    assert!(listed.contains(&first));
    assert!(listed.contains(&second));
}
