//! Taskdesk: task record management core.
//!
//! This crate provides the persistence and domain-logic layer for a small
//! task management service: the task entity model and its validation rules,
//! the durable storage contract with partial-update semantics, and the
//! service operations a transport adapter calls.
//!
//! # Architecture
//!
//! Taskdesk follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, in-memory)
//!
//! # Modules
//!
//! - [`task`]: Task records, their storage contract, and CRUD services

pub mod task;
