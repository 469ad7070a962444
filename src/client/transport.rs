//! Transport Module
//!
//! The seam between the API client and the network. Failures come back as
//! typed [`TransportError`] values so classification never has to inspect
//! error text.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::{ConfigError, ServiceFault};

// == Wire Types ==
/// One request to the remote service: an opaque operation document plus its
/// variables.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphQlRequest {
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<Value>,
}

impl GraphQlRequest {
    pub fn new(query: impl Into<String>, variables: Option<Value>) -> Self {
        Self {
            query: query.into(),
            variables,
        }
    }
}

/// Decoded response body. Either field may be present alone or with the other.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct GraphQlResponse {
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub errors: Option<Vec<ServiceFault>>,
}

// == Transport Error ==
/// Failure signals produced below the API client.
#[derive(Debug, Clone, PartialEq)]
pub enum TransportError {
    /// Connection refused, reset, or name resolution failed
    Connect(String),
    /// The request did not complete within the timeout
    Timeout(String),
    /// Sending the request or reading the body failed mid-stream
    Request(String),
    /// Non-success HTTP status, with any faults found in the body
    Status { status: u16, faults: Vec<ServiceFault> },
    /// The body was not a valid response document
    Decode(String),
    /// Anything else the transport reports
    Other(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        let detail = err.to_string();
        if err.is_timeout() {
            TransportError::Timeout(detail)
        } else if err.is_connect() {
            TransportError::Connect(detail)
        } else if err.is_decode() {
            TransportError::Decode(detail)
        } else if err.is_request() || err.is_body() {
            TransportError::Request(detail)
        } else {
            TransportError::Other(detail)
        }
    }
}

// == Transport Trait ==
/// Issues one remote call. Implementations must not retry on their own.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: &GraphQlRequest) -> Result<GraphQlResponse, TransportError>;
}

// == HTTP Transport ==
/// Production transport: JSON POST over HTTPS with reqwest.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpTransport {
    /// Creates a transport for `endpoint` with a per-request timeout.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, ConfigError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("tarkov_gateway/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ConfigError::invalid("http client", e.to_string()))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: &GraphQlRequest) -> Result<GraphQlResponse, TransportError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let bytes = response.bytes().await?;
        debug!(status = status.as_u16(), bytes = bytes.len(), "Tarkov API responded");

        if status.is_success() {
            return serde_json::from_slice::<GraphQlResponse>(&bytes)
                .map_err(|e| TransportError::Decode(e.to_string()));
        }

        let faults = serde_json::from_slice::<GraphQlResponse>(&bytes)
            .ok()
            .and_then(|body| body.errors)
            .unwrap_or_default();

        Err(TransportError::Status {
            status: status.as_u16(),
            faults,
        })
    }
}
