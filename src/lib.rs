//! Taskboard: a single-user kanban board core.
//!
//! This crate provides the data side of a kanban board: six fixed workflow
//! columns holding ordered tasks, a completed-task archive, drag-and-drop
//! reconciliation, and persistence against a remote document store with a
//! local snapshot cache as fallback.
//!
//! # Architecture
//!
//! Taskboard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure board logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (in-memory, filesystem)
//!
//! # Modules
//!
//! - [`board`]: Tasks, columns, ordering, completion and persistence policy
//! - [`auth`]: Credential validation and auth-provider integration
//! - [`session`]: Sign-in/sign-out lifecycle of a board session
//! - [`config`]: Storage and authentication configuration

pub mod auth;
pub mod board;
pub mod config;
pub mod session;
