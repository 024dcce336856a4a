//! Behavioural integration tests for [`InMemoryTaskRepository`].
//!
//! These tests exercise the in-memory repository in realistic higher-level
//! flows, verifying that it correctly implements the repository contract
//! when driven the way a transport adapter would drive it.

#![expect(
    clippy::expect_used,
    reason = "Test code uses expect for assertion clarity"
)]
#![expect(
    clippy::indexing_slicing,
    reason = "Test code uses indexing after length checks"
)]
#![expect(
    clippy::cognitive_complexity,
    reason = "Test functions may have higher complexity for full scenario coverage"
)]

use chrono::{Duration, Utc};
use mockable::{Clock, DefaultClock};
use taskdesk::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{TaskDraft, TaskId, TaskPatch, TaskStatus, TaskTitle},
    ports::{Page, TaskRepository},
};
use tokio::runtime::Runtime;

/// Creates a tokio runtime for async operations in tests.
fn test_runtime() -> Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("failed to create test runtime")
}

fn draft(title: &str, description: Option<&str>) -> TaskDraft {
    let clock = DefaultClock;
    TaskDraft::new(
        TaskTitle::new(title).expect("valid title"),
        description.map(ToOwned::to_owned),
        &clock,
    )
}

/// Walks a record through its whole life: create, read, patch, delete, and
/// verify the id stays dead afterwards.
#[test]
fn full_record_lifecycle_through_repository() {
    let rt = test_runtime();
    let repo = InMemoryTaskRepository::new();

    let created = rt
        .block_on(repo.create(draft("Write the report", Some("Quarterly numbers"))))
        .expect("create");
    assert_eq!(created.status(), TaskStatus::Created);
    assert_eq!(created.created_at(), created.updated_at());

    let fetched = rt
        .block_on(repo.find_by_id(created.id()))
        .expect("find")
        .expect("present");
    assert_eq!(fetched, created);

    let later = created.updated_at() + Duration::seconds(1);
    let updated = rt
        .block_on(repo.update(
            created.id(),
            TaskPatch::new().with_status(TaskStatus::InProgress),
            later,
        ))
        .expect("update")
        .expect("present");
    assert_eq!(updated.title().as_str(), "Write the report");
    assert_eq!(updated.description(), Some("Quarterly numbers"));
    assert_eq!(updated.status(), TaskStatus::InProgress);
    assert_eq!(updated.updated_at(), later);
    assert!(updated.created_at() <= updated.updated_at());

    let deleted = rt
        .block_on(repo.delete(created.id()))
        .expect("delete")
        .expect("present");
    assert_eq!(deleted, updated);

    let gone = rt.block_on(repo.find_by_id(created.id())).expect("find");
    assert!(gone.is_none());

    let second_delete = rt.block_on(repo.delete(created.id())).expect("delete");
    assert!(second_delete.is_none());
}

/// Identifiers advance monotonically and a deleted id is never handed out
/// again, even when the deleted record was the latest one.
#[test]
fn identifiers_survive_deletion_without_reuse() {
    let rt = test_runtime();
    let repo = InMemoryTaskRepository::new();

    let first = rt.block_on(repo.create(draft("first", None))).expect("create");
    let second = rt
        .block_on(repo.create(draft("second", None)))
        .expect("create");
    assert!(second.id() > first.id());

    rt.block_on(repo.delete(second.id()))
        .expect("delete")
        .expect("present");

    let third = rt.block_on(repo.create(draft("third", None))).expect("create");
    assert!(third.id() > second.id());
}

/// Listing paginates over insertion order and tolerates windows past the
/// end of the data.
#[test]
fn listing_pages_through_records_in_id_order() {
    let rt = test_runtime();
    let repo = InMemoryTaskRepository::new();

    for index in 1..=5 {
        rt.block_on(repo.create(draft(&format!("task {index}"), None)))
            .expect("create");
    }

    let all = rt.block_on(repo.list(Page::new(0, 10))).expect("list");
    assert_eq!(all.len(), 5);
    for pair in all.windows(2) {
        assert!(pair[0].id() < pair[1].id());
    }

    let middle = rt.block_on(repo.list(Page::new(2, 2))).expect("list");
    assert_eq!(middle.len(), 2);
    assert_eq!(middle[0].id(), all[2].id());
    assert_eq!(middle[1].id(), all[3].id());

    let past_the_end = rt.block_on(repo.list(Page::new(50, 10))).expect("list");
    assert!(past_the_end.is_empty());
}

/// Concurrent updates to the same record interleave with last-write-wins
/// semantics and leave the record internally consistent.
#[test]
fn concurrent_updates_leave_a_consistent_record() {
    let rt = test_runtime();
    let repo = InMemoryTaskRepository::new();
    let clock = DefaultClock;

    let created = rt
        .block_on(repo.create(draft("shared", None)))
        .expect("create");

    rt.block_on(async {
        let status_update = repo.update(
            created.id(),
            TaskPatch::new().with_status(TaskStatus::InProgress),
            clock.utc(),
        );
        let description_update = repo.update(
            created.id(),
            TaskPatch::new().with_description("written concurrently"),
            clock.utc(),
        );
        let (status_result, description_result) =
            tokio::join!(status_update, description_update);
        status_result.expect("status update").expect("present");
        description_result
            .expect("description update")
            .expect("present");
    });

    let merged = rt
        .block_on(repo.find_by_id(created.id()))
        .expect("find")
        .expect("present");
    assert_eq!(merged.status(), TaskStatus::InProgress);
    assert_eq!(merged.description(), Some("written concurrently"));
    assert!(merged.created_at() <= merged.updated_at());
}

/// Repositories are independent: records created in one are invisible in
/// another, and an unknown id never errors.
#[test]
fn unknown_ids_are_not_found_rather_than_errors() {
    let rt = test_runtime();
    let repo = InMemoryTaskRepository::new();
    let missing = TaskId::from_i64(99_999);

    assert!(rt.block_on(repo.find_by_id(missing)).expect("find").is_none());
    assert!(
        rt.block_on(repo.update(missing, TaskPatch::new(), Utc::now()))
            .expect("update")
            .is_none()
    );
    assert!(rt.block_on(repo.delete(missing)).expect("delete").is_none());
}
