//! Authentication for Taskboard.
//!
//! Credentials are validated before any provider call; provider failures
//! are categorised into user-readable messages and never end the session.
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
