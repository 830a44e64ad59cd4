//! Auth provider port.

use crate::auth::domain::{AuthFailure, AuthUser, Credentials};
use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::watch;

/// Result type for auth provider operations.
pub type AuthProviderResult<T> = Result<T, AuthProviderError>;

/// External identity provider contract.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Signs an existing user in.
    ///
    /// # Errors
    ///
    /// Returns [`AuthProviderError`] when the provider rejects the
    /// credentials or cannot be reached.
    async fn sign_in(&self, credentials: &Credentials) -> AuthProviderResult<AuthUser>;

    /// Creates an account and signs it in.
    ///
    /// # Errors
    ///
    /// Returns [`AuthProviderError`] when the provider rejects the account or
    /// cannot be reached.
    async fn sign_up(&self, credentials: &Credentials) -> AuthProviderResult<AuthUser>;

    /// Signs the current user out.
    ///
    /// # Errors
    ///
    /// Returns [`AuthProviderError`] when the provider cannot be reached.
    async fn sign_out(&self) -> AuthProviderResult<()>;

    /// Observes the current user; the receiver sees every auth-state
    /// transition, `None` meaning signed out.
    fn subscribe(&self) -> watch::Receiver<Option<AuthUser>>;
}

/// Errors returned by auth providers.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthProviderError {
    /// The provider refused the request with an error code.
    #[error("auth request rejected: {code}")]
    Rejected {
        /// Provider error code, such as `auth/wrong-password`.
        code: String,
    },

    /// The provider could not be reached.
    #[error("auth provider unavailable: {0}")]
    Unavailable(String),
}

impl AuthProviderError {
    /// Creates a rejection with a provider error code.
    #[must_use]
    pub fn rejected(code: impl Into<String>) -> Self {
        Self::Rejected { code: code.into() }
    }

    /// Categorises the error for user display.
    #[must_use]
    pub fn failure(&self) -> AuthFailure {
        match self {
            Self::Rejected { code } => AuthFailure::from_code(code),
            Self::Unavailable(_) => AuthFailure::Unavailable,
        }
    }
}
