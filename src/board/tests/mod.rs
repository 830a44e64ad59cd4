//! Unit tests for the board module.
//!
//! Tests are organised by concern: column model and drop reconciliation,
//! document and snapshot parsing, and the board service with its fallback
//! policy.
