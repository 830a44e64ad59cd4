//! Step definitions for board lifecycle scenarios.

mod given;
mod then;
mod when;
pub mod world;
