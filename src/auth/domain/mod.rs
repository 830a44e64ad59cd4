//! Domain model for authentication.

mod credentials;
mod error;
mod user;

pub use credentials::{Credentials, Email, Password};
pub use error::{AuthAction, AuthFailure, AuthValidationError};
pub use user::AuthUser;
