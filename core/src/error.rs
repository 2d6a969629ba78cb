//! Error types for the Hacker News API client.
//!
//! # Design
//! `NotFound` gets a dedicated variant because callers frequently distinguish
//! "the item or user does not exist" from "the request failed." Other non-2xx
//! responses land in `HttpError` with the status code and a bounded excerpt of
//! the body. `TypeMismatch` is raised when an item exists but its `type`
//! discriminant is not the one the accessor asked for.

use std::fmt;

/// Longest body excerpt carried inside an error, in characters.
pub const BODY_EXCERPT_LIMIT: usize = 200;

/// Errors returned by `HnClient` operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The request never produced a response (DNS, refused connection,
    /// timeout, unreadable body, malformed URL).
    TransportError(String),

    /// The server returned 404, or answered `null` for the requested id.
    NotFound,

    /// The server returned a non-2xx status other than 404.
    HttpError { status: u16, body: String },

    /// The response body could not be decoded into the expected shape.
    DecodeError { reason: String, body: String },

    /// The user id contains characters that cannot appear in a user name.
    InvalidUserId(String),

    /// The item exists but is of a different kind than requested.
    TypeMismatch {
        id: u64,
        operation: &'static str,
        actual: String,
    },
}

impl ApiError {
    pub(crate) fn decode(reason: impl fmt::Display, body: &str) -> Self {
        ApiError::DecodeError {
            reason: reason.to_string(),
            body: excerpt(body),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::TransportError(msg) => write!(f, "transport failed: {msg}"),
            ApiError::NotFound => write!(f, "resource not found"),
            ApiError::HttpError { status, body } => {
                write!(f, "HTTP {status}: {body}")
            }
            ApiError::DecodeError { reason, body } => {
                write!(f, "decoding failed: {reason} (body: {body:?})")
            }
            ApiError::InvalidUserId(id) => write!(f, "invalid user id {id:?}"),
            ApiError::TypeMismatch {
                id,
                operation,
                actual,
            } => write!(
                f,
                "called {operation} on item #{id}, which is of type `{actual}`"
            ),
        }
    }
}

impl std::error::Error for ApiError {}

/// Truncate a response body to `BODY_EXCERPT_LIMIT` characters.
pub(crate) fn excerpt(body: &str) -> String {
    match body.char_indices().nth(BODY_EXCERPT_LIMIT) {
        Some((cut, _)) => format!("{}…", &body[..cut]),
        None => body.to_string(),
    }
}
