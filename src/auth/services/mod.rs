//! Application services for authentication.

mod service;

pub use service::{AuthError, AuthResult, AuthService};
