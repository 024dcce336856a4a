//! In-memory adapters for task record persistence.

mod task;

pub use task::InMemoryTaskRepository;
