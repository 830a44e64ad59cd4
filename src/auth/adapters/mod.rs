//! Adapter implementations for auth ports.

pub mod memory;
