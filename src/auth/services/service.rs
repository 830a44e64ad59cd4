//! Service layer for sign-in, sign-up and sign-out.

use crate::auth::{
    domain::{AuthAction, AuthFailure, AuthUser, AuthValidationError, Credentials},
    ports::{AuthProvider, AuthProviderError},
};
use crate::config::AuthConfig;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::watch;
use tracing::{info, warn};

/// Service-level errors for auth operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    /// Input validation failed; the provider was not contacted.
    #[error(transparent)]
    Validation(#[from] AuthValidationError),

    /// The provider refused or failed the request.
    #[error("{action:?} failed: {source}")]
    Provider {
        /// The operation that failed.
        action: AuthAction,
        /// Categorised provider failure.
        failure: AuthFailure,
        /// Underlying provider error.
        source: AuthProviderError,
    },
}

impl AuthError {
    fn provider(action: AuthAction, source: AuthProviderError) -> Self {
        warn!(?action, error = %source, "auth provider request failed");
        Self::Provider {
            action,
            failure: source.failure(),
            source,
        }
    }

    /// Returns the message shown inline to the user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(err) => err.to_string(),
            Self::Provider {
                action, failure, ..
            } => failure.user_message(*action).to_owned(),
        }
    }
}

/// Result type for auth service operations.
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth orchestration service.
#[derive(Clone)]
pub struct AuthService<A>
where
    A: AuthProvider,
{
    provider: Arc<A>,
    config: AuthConfig,
}

impl<A> AuthService<A>
where
    A: AuthProvider,
{
    /// Creates a new auth service.
    #[must_use]
    pub const fn new(provider: Arc<A>, config: AuthConfig) -> Self {
        Self { provider, config }
    }

    /// Signs a user in.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Validation`] for blank input and
    /// [`AuthError::Provider`] when the provider refuses.
    pub async fn sign_in(&self, email: &str, password: &str) -> AuthResult<AuthUser> {
        let credentials = Credentials::for_sign_in(email, password)?;
        let user = self
            .provider
            .sign_in(&credentials)
            .await
            .map_err(|err| AuthError::provider(AuthAction::SignIn, err))?;
        info!(user = %user.id(), "signed in");
        Ok(user)
    }

    /// Creates an account.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Validation`] for blank, mismatched or short
    /// passwords and [`AuthError::Provider`] when the provider refuses.
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        confirmation: &str,
    ) -> AuthResult<AuthUser> {
        let credentials = Credentials::for_sign_up(email, password, confirmation, &self.config)?;
        let user = self
            .provider
            .sign_up(&credentials)
            .await
            .map_err(|err| AuthError::provider(AuthAction::SignUp, err))?;
        info!(user = %user.id(), "account created");
        Ok(user)
    }

    /// Signs the current user out.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Provider`] when the provider cannot be reached.
    pub async fn sign_out(&self) -> AuthResult<()> {
        self.provider
            .sign_out()
            .await
            .map_err(|err| AuthError::provider(AuthAction::SignOut, err))?;
        info!("signed out");
        Ok(())
    }

    /// Observes auth-state transitions.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<AuthUser>> {
        self.provider.subscribe()
    }
}
