//! Error types for slot-engine operations and their transport mapping.
//!
//! The engine itself only ever produces [`SlotError::InvalidArgument`] and
//! [`SlotError::ConfigParse`]. The remaining variants are the domain kinds
//! raised by the booking layer around the engine; they live here so the
//! status mapping exists exactly once.

use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;

/// Errors raised by the engine and by the booking layer around it.
#[derive(Error, Debug)]
pub enum SlotError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("Resource not found: {0}")]
    ResourceNotFound(String),

    #[error("Business rule violated: {0}")]
    InvalidBusinessRule(String),

    #[error("Duplicate resource: {0}")]
    DuplicateResource(String),

    #[error("Unauthorized operation: {0}")]
    UnauthorizedOperation(String),

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),
}

pub type Result<T> = std::result::Result<T, SlotError>;

/// Closed set of error kinds, each with one transport status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidArgument,
    ResourceNotFound,
    InvalidBusinessRule,
    DuplicateResource,
    UnauthorizedOperation,
    AuthenticationFailed,
}

impl ErrorKind {
    /// HTTP status code for this kind.
    pub fn status_code(self) -> u16 {
        match self {
            ErrorKind::InvalidArgument => 400,
            ErrorKind::AuthenticationFailed => 401,
            ErrorKind::UnauthorizedOperation => 403,
            ErrorKind::ResourceNotFound => 404,
            ErrorKind::DuplicateResource => 409,
            ErrorKind::InvalidBusinessRule => 422,
        }
    }

    /// Short human-readable title rendered in the `error` field.
    pub fn title(self) -> &'static str {
        match self {
            ErrorKind::InvalidArgument => "Bad Request",
            ErrorKind::AuthenticationFailed => "Unauthorized",
            ErrorKind::UnauthorizedOperation => "Forbidden",
            ErrorKind::ResourceNotFound => "Not Found",
            ErrorKind::DuplicateResource => "Conflict",
            ErrorKind::InvalidBusinessRule => "Unprocessable Entity",
        }
    }
}

impl SlotError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            // A malformed config is a bad caller input as far as the boundary is concerned.
            SlotError::InvalidArgument(_) | SlotError::ConfigParse(_) => ErrorKind::InvalidArgument,
            SlotError::ResourceNotFound(_) => ErrorKind::ResourceNotFound,
            SlotError::InvalidBusinessRule(_) => ErrorKind::InvalidBusinessRule,
            SlotError::DuplicateResource(_) => ErrorKind::DuplicateResource,
            SlotError::UnauthorizedOperation(_) => ErrorKind::UnauthorizedOperation,
            SlotError::AuthenticationFailed(_) => ErrorKind::AuthenticationFailed,
        }
    }

    pub fn status_code(&self) -> u16 {
        self.kind().status_code()
    }
}

/// Uniform error body handed to the transport layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub status: u16,
    pub error: String,
    pub message: String,
    pub path: String,
    /// Field-level validation details, omitted when empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<BTreeMap<String, String>>,
}

impl ErrorBody {
    pub fn new(err: &SlotError, path: &str) -> Self {
        let kind = err.kind();
        Self {
            status: kind.status_code(),
            error: kind.title().to_string(),
            message: err.to_string(),
            path: path.to_string(),
            details: None,
        }
    }

    /// Attach a field-level detail. Later entries for the same field win.
    pub fn with_detail(mut self, field: &str, message: &str) -> Self {
        self.details
            .get_or_insert_with(BTreeMap::new)
            .insert(field.to_string(), message.to_string());
        self
    }
}
