//! Session lifecycle: one board per signed-in user.
//!
//! A [`SessionManager`] owns the active [`BoardService`]. Signing in (or an
//! observed sign-in) opens the user's board, signing up starts an empty
//! board, and signing out drops all in-memory board state. The local cache
//! is left in place so the next session can fall back to it.

use crate::auth::{
    domain::AuthUser,
    ports::AuthProvider,
    services::{AuthResult, AuthService},
};
use crate::board::{
    ports::{BoardPresenter, DocumentStore, LocalCache, Notification, Severity},
    services::{BoardPorts, BoardService},
};
use crate::config::BoardConfig;
use mockable::Clock;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::info;

/// Couples authentication with the board of the signed-in user.
pub struct SessionManager<A, S, L, P, C>
where
    A: AuthProvider,
    S: DocumentStore,
    L: LocalCache,
    P: BoardPresenter,
    C: Clock + Send + Sync,
{
    auth: AuthService<A>,
    ports: BoardPorts<S, L, P, C>,
    config: BoardConfig,
    board: Option<BoardService<S, L, P, C>>,
}

impl<A, S, L, P, C> SessionManager<A, S, L, P, C>
where
    A: AuthProvider,
    S: DocumentStore,
    L: LocalCache,
    P: BoardPresenter,
    C: Clock + Send + Sync,
{
    /// Creates a signed-out session manager.
    #[must_use]
    pub const fn new(
        provider: Arc<A>,
        ports: BoardPorts<S, L, P, C>,
        config: BoardConfig,
    ) -> Self {
        Self {
            auth: AuthService::new(provider, config.auth),
            ports,
            config,
            board: None,
        }
    }

    /// Returns the active board, if a user is signed in.
    #[must_use]
    pub const fn board(&self) -> Option<&BoardService<S, L, P, C>> {
        self.board.as_ref()
    }

    /// Returns the active board mutably, if a user is signed in.
    pub const fn board_mut(&mut self) -> Option<&mut BoardService<S, L, P, C>> {
        self.board.as_mut()
    }

    /// Returns whether a board session is open.
    #[must_use]
    pub const fn is_signed_in(&self) -> bool {
        self.board.is_some()
    }

    /// Signs in and opens the user's board.
    ///
    /// # Errors
    ///
    /// Returns [`crate::auth::services::AuthError`] when validation or the
    /// provider fails; the session is unchanged.
    pub async fn sign_in(&mut self, email: &str, password: &str) -> AuthResult<AuthUser> {
        let user = self.auth.sign_in(email, password).await?;
        self.open_board(&user).await;
        Ok(user)
    }

    /// Creates an account and starts it on an empty board.
    ///
    /// # Errors
    ///
    /// Returns [`crate::auth::services::AuthError`] when validation or the
    /// provider fails; the session is unchanged.
    pub async fn sign_up(
        &mut self,
        email: &str,
        password: &str,
        confirmation: &str,
    ) -> AuthResult<AuthUser> {
        let user = self.auth.sign_up(email, password, confirmation).await?;
        info!(user = %user.id(), "initialising empty board");
        self.board = Some(BoardService::initialize_empty(
            user.id().clone(),
            self.ports.clone(),
            &self.config.storage,
        ));
        Ok(user)
    }

    /// Signs out and tears the board session down.
    ///
    /// When the provider fails the session stays open and an error
    /// notification is shown.
    ///
    /// # Errors
    ///
    /// Returns [`crate::auth::services::AuthError`] when the provider fails.
    pub async fn sign_out(&mut self) -> AuthResult<()> {
        match self.auth.sign_out().await {
            Ok(()) => {
                self.teardown();
                self.ports
                    .presenter
                    .notify(&Notification::new("Logged out successfully", Severity::Success));
                Ok(())
            }
            Err(err) => {
                self.ports
                    .presenter
                    .notify(&Notification::new(err.user_message(), Severity::Error));
                Err(err)
            }
        }
    }

    /// Applies an observed auth-state transition.
    ///
    /// Observing the user whose board is already open does nothing.
    pub async fn handle_auth_change(&mut self, user: Option<AuthUser>) {
        match user {
            Some(user) => {
                let already_open = self
                    .board
                    .as_ref()
                    .is_some_and(|board| board.user() == user.id());
                if !already_open {
                    self.open_board(&user).await;
                }
            }
            None => self.teardown(),
        }
    }

    /// Observes auth-state transitions from the provider.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<AuthUser>> {
        self.auth.subscribe()
    }

    /// Follows auth-state transitions until the provider goes away.
    pub async fn follow(&mut self, mut receiver: watch::Receiver<Option<AuthUser>>) {
        while receiver.changed().await.is_ok() {
            let user = receiver.borrow_and_update().clone();
            self.handle_auth_change(user).await;
        }
    }

    async fn open_board(&mut self, user: &AuthUser) {
        info!(user = %user.id(), "opening board session");
        self.board = None;
        let board =
            BoardService::open(user.id().clone(), self.ports.clone(), &self.config.storage).await;
        self.board = Some(board);
    }

    fn teardown(&mut self) {
        if let Some(board) = self.board.take() {
            info!(user = %board.user(), "board session closed");
        }
    }
}
