//! In-memory auth adapters.

mod provider;

pub use provider::InMemoryAuthProvider;
