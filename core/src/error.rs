//! Error types for the record catalog client.
//!
//! # Design
//! Failures are first classified into a `Failure` (what went wrong) and then
//! collapsed into an `ApiError` (what the user is told). Every operation of
//! the client funnels through `Failure::into` so callers only ever see one
//! error type carrying a display-ready message. The fieldless `ErrorKind`
//! stays attached for callers that branch on "not found" without parsing
//! the message.

use crate::transport::TransportError;

pub const MSG_UNREACHABLE: &str = "Could not connect to the server";
pub const MSG_NOT_FOUND: &str = "Record not found";
pub const MSG_SERVER_ERROR: &str = "Server error";

/// Classified failure, before normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Failure {
    /// No response reached the client (connection refused, DNS, abort).
    TransportUnreachable,
    /// The server returned 404.
    NotFound,
    /// The server returned 500.
    ServerError,
    /// The request failed before it was sent.
    ClientSide(String),
    /// Any other non-success status.
    HttpStatus { status: u16, status_text: String },
}

/// Coarse category of an `ApiError`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    TransportUnreachable,
    NotFound,
    ServerError,
    ClientSide,
    OtherHttpStatus,
}

impl Failure {
    /// Classify a status code. Status 0 is how aborted or blocked requests
    /// surface, so it counts as unreachable.
    pub fn from_status(status: u16, status_text: &str) -> Self {
        match status {
            0 => Failure::TransportUnreachable,
            404 => Failure::NotFound,
            500 => Failure::ServerError,
            _ => Failure::HttpStatus {
                status,
                status_text: status_text.to_string(),
            },
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Failure::TransportUnreachable => ErrorKind::TransportUnreachable,
            Failure::NotFound => ErrorKind::NotFound,
            Failure::ServerError => ErrorKind::ServerError,
            Failure::ClientSide(_) => ErrorKind::ClientSide,
            Failure::HttpStatus { .. } => ErrorKind::OtherHttpStatus,
        }
    }

    /// The user-facing message for this failure.
    pub fn message(&self) -> String {
        match self {
            Failure::TransportUnreachable => MSG_UNREACHABLE.to_string(),
            Failure::NotFound => MSG_NOT_FOUND.to_string(),
            Failure::ServerError => MSG_SERVER_ERROR.to_string(),
            Failure::ClientSide(msg) => format!("Error: {msg}"),
            Failure::HttpStatus { status, status_text } if status_text.trim().is_empty() => {
                format!("Error {status}")
            }
            Failure::HttpStatus {
                status,
                status_text,
            } => format!("Error {status}: {status_text}"),
        }
    }
}

impl From<TransportError> for Failure {
    fn from(e: TransportError) -> Self {
        match e {
            TransportError::Unreachable(_) => Failure::TransportUnreachable,
            TransportError::Request(msg) => Failure::ClientSide(msg),
        }
    }
}

/// Normalized failure returned by every client operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ApiError {
    kind: ErrorKind,
    message: String,
}

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_not_found(&self) -> bool {
        self.kind == ErrorKind::NotFound
    }
}

impl From<Failure> for ApiError {
    fn from(failure: Failure) -> Self {
        Self {
            kind: failure.kind(),
            message: failure.message(),
        }
    }
}

impl From<TransportError> for ApiError {
    fn from(e: TransportError) -> Self {
        Failure::from(e).into()
    }
}
