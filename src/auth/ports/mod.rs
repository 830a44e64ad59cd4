//! Port contracts for authentication.

pub mod provider;

pub use provider::{AuthProvider, AuthProviderError, AuthProviderResult};
