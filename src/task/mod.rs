//! Task record management for Taskdesk.
//!
//! This module implements the task CRUD core: creating, reading, listing,
//! updating, and deleting task records against a durable store, with
//! partial-update merge semantics. The module follows hexagonal
//! architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
