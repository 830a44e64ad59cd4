//! Validated sign-in and sign-up credentials.

use super::AuthValidationError;
use crate::config::AuthConfig;
use std::fmt;

/// Trimmed, non-empty email address.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    /// Creates a trimmed email address.
    ///
    /// # Errors
    ///
    /// Returns [`AuthValidationError::MissingCredentials`] when blank.
    pub fn new(value: &str) -> Result<Self, AuthValidationError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(AuthValidationError::MissingCredentials);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the address as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Non-empty password. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    /// Returns the secret for comparison by a provider.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Returns the length in characters.
    #[must_use]
    pub fn char_count(&self) -> usize {
        self.0.chars().count()
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

/// Email and password pair ready to send to a provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    email: Email,
    password: Password,
}

impl Credentials {
    /// Validates sign-in input.
    ///
    /// # Errors
    ///
    /// Returns [`AuthValidationError::MissingCredentials`] when either value
    /// is blank.
    pub fn for_sign_in(email: &str, password: &str) -> Result<Self, AuthValidationError> {
        let email = Email::new(email)?;
        if password.is_empty() {
            return Err(AuthValidationError::MissingCredentials);
        }
        Ok(Self {
            email,
            password: Password(password.to_owned()),
        })
    }

    /// Validates sign-up input.
    ///
    /// # Errors
    ///
    /// Returns [`AuthValidationError`] when a value is blank, the
    /// confirmation differs, or the password is shorter than the policy
    /// minimum, checked in that order.
    pub fn for_sign_up(
        email: &str,
        password: &str,
        confirmation: &str,
        policy: &AuthConfig,
    ) -> Result<Self, AuthValidationError> {
        let credentials = Self::for_sign_in(email, password)?;
        if password != confirmation {
            return Err(AuthValidationError::PasswordMismatch);
        }
        if credentials.password.char_count() < policy.min_password_length {
            return Err(AuthValidationError::PasswordTooShort {
                min: policy.min_password_length,
            });
        }
        Ok(credentials)
    }

    /// Returns the email.
    #[must_use]
    pub const fn email(&self) -> &Email {
        &self.email
    }

    /// Returns the password.
    #[must_use]
    pub const fn password(&self) -> &Password {
        &self.password
    }
}
