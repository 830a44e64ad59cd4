//! In-memory auth provider with account lockout.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::watch;

use crate::auth::{
    domain::{AuthUser, Credentials, Password},
    ports::{AuthProvider, AuthProviderError, AuthProviderResult},
};
use crate::board::domain::UserId;
use crate::config::AuthConfig;

#[derive(Debug)]
struct Account {
    user: AuthUser,
    password: Password,
    failed_attempts: u32,
}

#[derive(Debug, Default)]
struct AuthState {
    accounts: HashMap<String, Account>,
    next_user: u64,
    offline: bool,
}

/// Thread-safe in-memory auth provider.
///
/// Accounts are keyed by lower-cased email. An account locks after the
/// configured number of consecutive failed sign-ins.
#[derive(Debug, Clone)]
pub struct InMemoryAuthProvider {
    state: Arc<Mutex<AuthState>>,
    current: Arc<watch::Sender<Option<AuthUser>>>,
    config: AuthConfig,
}

impl Default for InMemoryAuthProvider {
    fn default() -> Self {
        Self::new(AuthConfig::default())
    }
}

fn poisoned(err: &impl std::fmt::Display) -> AuthProviderError {
    AuthProviderError::Unavailable(err.to_string())
}

impl InMemoryAuthProvider {
    /// Creates a provider with no accounts.
    #[must_use]
    pub fn new(config: AuthConfig) -> Self {
        let (current, _) = watch::channel(None);
        Self {
            state: Arc::new(Mutex::new(AuthState::default())),
            current: Arc::new(current),
            config,
        }
    }

    /// Switches the provider on or off; while offline every call fails.
    pub fn set_offline(&self, offline: bool) {
        if let Ok(mut state) = self.state.lock() {
            state.offline = offline;
        }
    }

    /// Returns the signed-in user, if any.
    #[must_use]
    pub fn current_user(&self) -> Option<AuthUser> {
        self.current.borrow().clone()
    }
}

fn check_online(state: &AuthState) -> AuthProviderResult<()> {
    if state.offline {
        return Err(AuthProviderError::Unavailable(
            "auth provider is offline".to_owned(),
        ));
    }
    Ok(())
}

#[async_trait]
impl AuthProvider for InMemoryAuthProvider {
    async fn sign_in(&self, credentials: &Credentials) -> AuthProviderResult<AuthUser> {
        let mut state = self.state.lock().map_err(|err| poisoned(&err))?;
        check_online(&state)?;
        let key = credentials.email().as_str().to_lowercase();
        let account = state
            .accounts
            .get_mut(&key)
            .ok_or_else(|| AuthProviderError::rejected("auth/user-not-found"))?;
        if account.failed_attempts >= self.config.max_failed_sign_ins {
            return Err(AuthProviderError::rejected("auth/too-many-requests"));
        }
        if &account.password != credentials.password() {
            account.failed_attempts += 1;
            return Err(AuthProviderError::rejected("auth/wrong-password"));
        }
        account.failed_attempts = 0;
        let user = account.user.clone();
        drop(state);
        self.current.send_replace(Some(user.clone()));
        Ok(user)
    }

    async fn sign_up(&self, credentials: &Credentials) -> AuthProviderResult<AuthUser> {
        let mut state = self.state.lock().map_err(|err| poisoned(&err))?;
        check_online(&state)?;
        let email = credentials.email();
        if !email.as_str().contains('@') {
            return Err(AuthProviderError::rejected("auth/invalid-email"));
        }
        let key = email.as_str().to_lowercase();
        if state.accounts.contains_key(&key) {
            return Err(AuthProviderError::rejected("auth/email-already-in-use"));
        }
        if credentials.password().char_count() < self.config.min_password_length {
            return Err(AuthProviderError::rejected("auth/weak-password"));
        }

        state.next_user += 1;
        let id = UserId::new(format!("user-{}", state.next_user))
            .map_err(|err| AuthProviderError::Unavailable(err.to_string()))?;
        let user = AuthUser::new(id, email.clone());
        state.accounts.insert(
            key,
            Account {
                user: user.clone(),
                password: credentials.password().clone(),
                failed_attempts: 0,
            },
        );
        drop(state);
        self.current.send_replace(Some(user.clone()));
        Ok(user)
    }

    async fn sign_out(&self) -> AuthProviderResult<()> {
        {
            let state = self.state.lock().map_err(|err| poisoned(&err))?;
            check_online(&state)?;
        }
        self.current.send_replace(None);
        Ok(())
    }

    fn subscribe(&self) -> watch::Receiver<Option<AuthUser>> {
        self.current.subscribe()
    }
}
