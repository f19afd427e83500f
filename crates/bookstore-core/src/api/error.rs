//! API Errors
//!
//! Every failed call ends up as an `ApiError` carrying one of a fixed set of
//! codes, a message fit for a snackbar, and the HTTP status when there was one.

use serde::{Serialize, Serializer};
use thiserror::Error;

use crate::domain::normalize_key;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    NoToken,
    TokenExpired,
    Unauthorized,
    Forbidden,
    NotFound,
    Validation,
    Conflict,
    ServerError,
    FetchFailed,
    NetworkError,
    ParseError,
    Timeout,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::NoToken => "NO_TOKEN",
            ErrorCode::TokenExpired => "TOKEN_EXPIRED",
            ErrorCode::Unauthorized => "UNAUTHORIZED",
            ErrorCode::Forbidden => "FORBIDDEN",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::Validation => "VALIDATION",
            ErrorCode::Conflict => "CONFLICT",
            ErrorCode::ServerError => "SERVER_ERROR",
            ErrorCode::FetchFailed => "FETCH_FAILED",
            ErrorCode::NetworkError => "NETWORK_ERROR",
            ErrorCode::ParseError => "PARSE_ERROR",
            ErrorCode::Timeout => "TIMEOUT",
        }
    }

    /// Read a code sent by the backend. Unknown codes yield `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        Some(match normalize_key(raw).as_str() {
            "notoken" => ErrorCode::NoToken,
            "tokenexpired" | "expiredtoken" => ErrorCode::TokenExpired,
            "unauthorized" | "unauthenticated" | "invalidtoken" => ErrorCode::Unauthorized,
            "forbidden" | "accessdenied" => ErrorCode::Forbidden,
            "notfound" => ErrorCode::NotFound,
            "validation" | "validationerror" | "invalidinput" => ErrorCode::Validation,
            "conflict" | "duplicate" => ErrorCode::Conflict,
            "servererror" | "internalerror" => ErrorCode::ServerError,
            "fetchfailed" => ErrorCode::FetchFailed,
            "networkerror" => ErrorCode::NetworkError,
            "parseerror" => ErrorCode::ParseError,
            "timeout" => ErrorCode::Timeout,
            _ => return None,
        })
    }

    pub fn from_status(status: u16) -> Self {
        match status {
            401 => ErrorCode::Unauthorized,
            403 => ErrorCode::Forbidden,
            404 => ErrorCode::NotFound,
            409 => ErrorCode::Conflict,
            422 => ErrorCode::Validation,
            500..=599 => ErrorCode::ServerError,
            _ => ErrorCode::FetchFailed,
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ErrorCode {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
    pub status: Option<u16>,
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            status: None,
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    pub fn no_token() -> Self {
        Self::new(ErrorCode::NoToken, "Please sign in to continue")
    }

    pub fn token_expired() -> Self {
        Self::new(ErrorCode::TokenExpired, "Your session has expired, please sign in again")
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Validation, message)
    }

    pub fn parse(err: impl std::fmt::Display) -> Self {
        Self::new(ErrorCode::ParseError, format!("Unexpected response from server: {}", err))
    }

    /// The user has to sign in (again) before retrying makes sense.
    pub fn is_auth_failure(&self) -> bool {
        matches!(
            self.code,
            ErrorCode::NoToken | ErrorCode::TokenExpired | ErrorCode::Unauthorized
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ErrorCode::from_status(401), ErrorCode::Unauthorized);
        assert_eq!(ErrorCode::from_status(422), ErrorCode::Validation);
        assert_eq!(ErrorCode::from_status(503), ErrorCode::ServerError);
        assert_eq!(ErrorCode::from_status(418), ErrorCode::FetchFailed);
        assert_eq!(ErrorCode::from_status(400), ErrorCode::FetchFailed);
        assert_eq!(ErrorCode::from_status(408), ErrorCode::FetchFailed);
        assert_eq!(ErrorCode::from_status(504), ErrorCode::ServerError);
    }

    #[test]
    fn test_backend_code_spellings() {
        assert_eq!(ErrorCode::parse("NO_TOKEN"), Some(ErrorCode::NoToken));
        assert_eq!(ErrorCode::parse("tokenExpired"), Some(ErrorCode::TokenExpired));
        assert_eq!(ErrorCode::parse("SOMETHING_ELSE"), None);
    }

    #[test]
    fn test_display_is_message() {
        let err = ApiError::validation("Title is required").with_status(422);
        assert_eq!(err.to_string(), "Title is required");
        assert_eq!(err.status, Some(422));
        assert!(!err.is_auth_failure());
        assert!(ApiError::no_token().is_auth_failure());
    }
}
