//! Kanban board management for Taskboard.
//!
//! This module keeps one ordered task list per workflow column plus an
//! archive of completed tasks, reconciles drag-and-drop gestures into list
//! mutations, and persists every change to a remote document store with a
//! local snapshot cache as fallback. The module follows hexagonal
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
