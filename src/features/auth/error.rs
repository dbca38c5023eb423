//! Gate-level failures. Every variant is terminal at the UI boundary and maps
//! to a navigation decision rather than an in-place error.

use crate::app_lib::AppError;
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthError {
    /// The callback fragment carried no `session_id`.
    MissingToken,
    /// The backend refused the one-time token (expired, reused, rejected).
    ExchangeFailed(AppError),
    /// `whoAmI` did not return a user.
    Unauthorized(AppError),
    /// Email/password sign-in or registration was refused.
    LoginFailed(AppError),
    /// The server did not acknowledge logout; callers ignore this.
    LogoutFailed(AppError),
}

impl AuthError {
    fn source_error(&self) -> Option<&AppError> {
        match self {
            AuthError::MissingToken => None,
            AuthError::ExchangeFailed(err)
            | AuthError::Unauthorized(err)
            | AuthError::LoginFailed(err)
            | AuthError::LogoutFailed(err) => Some(err),
        }
    }

    /// True when the request never reached a verdict (offline, timeout).
    pub fn is_transient(&self) -> bool {
        self.source_error().is_some_and(AppError::is_transient)
    }

    /// True when the server explicitly answered 401.
    pub fn is_unauthorized(&self) -> bool {
        self.source_error().is_some_and(AppError::is_unauthorized)
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::MissingToken => write!(formatter, "Sign-in callback is missing its token"),
            AuthError::ExchangeFailed(err) => write!(formatter, "Session exchange failed: {err}"),
            AuthError::Unauthorized(err) => write!(formatter, "Not signed in: {err}"),
            AuthError::LoginFailed(err) => write!(formatter, "Sign-in failed: {err}"),
            AuthError::LogoutFailed(err) => write!(formatter, "Sign-out failed: {err}"),
        }
    }
}

impl std::error::Error for AuthError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source_error()
            .map(|err| err as &(dyn std::error::Error + 'static))
    }
}
