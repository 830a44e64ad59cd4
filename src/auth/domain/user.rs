//! Signed-in user.

use super::Email;
use crate::board::domain::UserId;

/// A user known to the auth provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AuthUser {
    id: UserId,
    email: Email,
}

impl AuthUser {
    /// Creates a user record.
    #[must_use]
    pub const fn new(id: UserId, email: Email) -> Self {
        Self { id, email }
    }

    /// Returns the user's partition key.
    #[must_use]
    pub const fn id(&self) -> &UserId {
        &self.id
    }

    /// Returns the user's email.
    #[must_use]
    pub const fn email(&self) -> &Email {
        &self.email
    }
}
