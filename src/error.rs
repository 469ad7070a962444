//! Error types for the data-access layer
//!
//! Every failure that reaches a caller is a [`ClassifiedError`]: an immutable
//! value with one of four kinds, a message meant for direct display, and the
//! structured faults reported by the remote service when there are any.

use std::fmt;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;

// == Error Kind ==
/// Fixed failure taxonomy used for retry decisions and user-facing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Admission denied locally; no network attempt was made
    RateLimited,
    /// Transport or connectivity failure
    Network,
    /// The remote service executed the request but reported faults
    Protocol,
    /// Anything not matching the other kinds
    Unknown,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::RateLimited => "rate_limited",
            ErrorKind::Network => "network",
            ErrorKind::Protocol => "protocol",
            ErrorKind::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// == Service Faults ==
/// Source position attached to a service-reported fault.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaultLocation {
    pub line: u32,
    pub column: u32,
}

/// One entry of the `errors` list returned by the remote service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceFault {
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub locations: Vec<FaultLocation>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub path: Vec<serde_json::Value>,
}

impl ServiceFault {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            locations: Vec::new(),
            path: Vec::new(),
        }
    }
}

// == Classified Error ==
/// A typed, immutable failure value carried from the API client to the caller.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[error("{kind} error: {message}")]
pub struct ClassifiedError {
    kind: ErrorKind,
    message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    faults: Vec<ServiceFault>,
}

impl ClassifiedError {
    // == Constructors ==
    /// Creates an error of the given kind without structured faults.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            faults: Vec::new(),
        }
    }

    /// Local admission was denied by the rate limiter.
    pub fn rate_limited() -> Self {
        Self::new(
            ErrorKind::RateLimited,
            "Rate limit exceeded. Please wait before making another request.",
        )
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Network, message)
    }

    /// Builds a protocol error from the service-reported fault list.
    ///
    /// The message joins every fault message so nothing is lost when only the
    /// message is displayed.
    pub fn from_faults(faults: Vec<ServiceFault>) -> Self {
        let message = if faults.is_empty() {
            "Tarkov API reported an unspecified error".to_string()
        } else {
            faults
                .iter()
                .map(|fault| fault.message.as_str())
                .collect::<Vec<_>>()
                .join("; ")
        };

        Self {
            kind: ErrorKind::Protocol,
            message,
            faults,
        }
    }

    pub fn protocol(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Protocol, message)
    }

    pub fn unknown(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unknown, message)
    }

    /// An in-flight fetch was aborted before it produced a result.
    pub fn cancelled() -> Self {
        Self::unknown("Request was cancelled")
    }

    // == Accessors ==
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn faults(&self) -> &[ServiceFault] {
        &self.faults
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ClassifiedError {
    fn into_response(self) -> Response {
        let status = match self.kind {
            ErrorKind::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            ErrorKind::Network => StatusCode::SERVICE_UNAVAILABLE,
            ErrorKind::Protocol => StatusCode::BAD_GATEWAY,
            ErrorKind::Unknown => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self
        }));

        (status, body).into_response()
    }
}

// == Config Error ==
/// Rejected deployment configuration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

impl ConfigError {
    pub fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            name,
            reason: reason.into(),
        }
    }
}

// == Result Type Alias ==
/// Convenience Result type for data-access operations.
pub type Result<T> = std::result::Result<T, ClassifiedError>;
