//! Validation errors and provider failure categories.

use thiserror::Error;

/// Credential problems detected before contacting the provider.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum AuthValidationError {
    /// Email or password left blank.
    #[error("Please enter both email and password")]
    MissingCredentials,

    /// Sign-up password and confirmation differ.
    #[error("Passwords do not match")]
    PasswordMismatch,

    /// Sign-up password shorter than the configured minimum.
    #[error("Password must be at least {min} characters")]
    PasswordTooShort {
        /// Minimum accepted length.
        min: usize,
    },
}

/// The auth operation that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthAction {
    /// Signing in.
    SignIn,
    /// Creating an account.
    SignUp,
    /// Signing out.
    SignOut,
}

/// Category of a provider-side auth failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthFailure {
    /// Unknown user or wrong password.
    InvalidCredentials,
    /// The account is temporarily locked after repeated failures.
    TooManyAttempts,
    /// Sign-up with an email that already has an account.
    EmailInUse,
    /// The email address is malformed.
    InvalidEmail,
    /// The provider rejected the password as too weak.
    WeakPassword,
    /// The provider could not be reached.
    Unavailable,
    /// Any other provider failure.
    Other,
}

impl AuthFailure {
    /// Categorises a provider error code.
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        match code {
            "auth/user-not-found" | "auth/wrong-password" | "auth/invalid-credential" => {
                Self::InvalidCredentials
            }
            "auth/too-many-requests" => Self::TooManyAttempts,
            "auth/email-already-in-use" => Self::EmailInUse,
            "auth/invalid-email" => Self::InvalidEmail,
            "auth/weak-password" => Self::WeakPassword,
            "auth/network-request-failed" => Self::Unavailable,
            _ => Self::Other,
        }
    }

    /// Returns the message shown to the user for this failure.
    #[must_use]
    pub const fn user_message(self, action: AuthAction) -> &'static str {
        match (self, action) {
            (Self::InvalidCredentials, _) => "Invalid email or password",
            (Self::TooManyAttempts, _) => {
                "Too many failed login attempts. Please try again later."
            }
            (Self::EmailInUse, _) => "This email is already in use",
            (Self::InvalidEmail, _) => "Please enter a valid email address",
            (Self::WeakPassword, _) => "Password is too weak",
            (Self::Unavailable | Self::Other, AuthAction::SignIn) => {
                "Error signing in. Please try again."
            }
            (Self::Unavailable | Self::Other, AuthAction::SignUp) => {
                "Error creating account. Please try again."
            }
            (Self::Unavailable | Self::Other, AuthAction::SignOut) => "Error logging out",
        }
    }
}
