//! API Client Module
//!
//! Issues one remote call per invocation: admission through the rate limiter,
//! then the transport, then classification of whatever came back.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use crate::client::rate_limiter::RateLimiter;
use crate::client::transport::{GraphQlRequest, GraphQlResponse, Transport, TransportError};
use crate::error::{ClassifiedError, Result};

/// Message shown for every connectivity failure.
pub const NETWORK_ERROR_MESSAGE: &str = "Network error: Unable to connect to Tarkov API";

// == API Client ==
/// Rate-limited client for the remote query service.
#[derive(Clone)]
pub struct ApiClient {
    limiter: Arc<RateLimiter>,
    transport: Arc<dyn Transport>,
}

impl ApiClient {
    pub fn new(limiter: Arc<RateLimiter>, transport: Arc<dyn Transport>) -> Self {
        Self { limiter, transport }
    }

    // == Fetch ==
    /// Runs `operation` with `variables` and returns the `data` payload.
    ///
    /// A rejected admission fails with `RateLimited` before any network
    /// activity. Otherwise exactly one token is spent, whatever the outcome.
    pub async fn fetch(&self, operation: &str, variables: Option<Value>) -> Result<Value> {
        if !self.limiter.try_acquire() {
            warn!("Rate limit exceeded, request rejected locally");
            return Err(ClassifiedError::rate_limited());
        }

        let request = GraphQlRequest::new(operation, variables);
        debug!("Sending request to Tarkov API");

        let outcome = match self.transport.execute(&request).await {
            Ok(response) => interpret(response),
            Err(failure) => Err(classify(failure)),
        };

        if let Err(err) = &outcome {
            warn!(kind = %err.kind(), message = err.message(), "Tarkov API request failed");
        }
        outcome
    }

    pub fn limiter(&self) -> &RateLimiter {
        &self.limiter
    }
}

// == Classification ==
/// Maps a transport failure onto the error taxonomy.
pub fn classify(failure: TransportError) -> ClassifiedError {
    match failure {
        TransportError::Connect(_) | TransportError::Timeout(_) | TransportError::Request(_) => {
            ClassifiedError::network(NETWORK_ERROR_MESSAGE)
        }
        TransportError::Status { faults, .. } if !faults.is_empty() => {
            ClassifiedError::from_faults(faults)
        }
        TransportError::Status { status, .. } => {
            ClassifiedError::protocol(format!("Tarkov API responded with HTTP {}", status))
        }
        TransportError::Decode(detail) => {
            ClassifiedError::unknown(format!("Unreadable response from Tarkov API: {}", detail))
        }
        TransportError::Other(detail) => {
            ClassifiedError::unknown(format!("An unexpected error occurred: {}", detail))
        }
    }
}

/// Turns a decoded response into its payload.
///
/// Service-reported faults win over data that came alongside them.
pub fn interpret(response: GraphQlResponse) -> Result<Value> {
    match response {
        GraphQlResponse {
            errors: Some(faults),
            ..
        } if !faults.is_empty() => Err(ClassifiedError::from_faults(faults)),
        GraphQlResponse {
            data: Some(data), ..
        } => Ok(data),
        _ => Err(ClassifiedError::unknown(
            "Tarkov API returned neither data nor errors",
        )),
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::testing::ScriptedTransport;
    use crate::error::{ErrorKind, ServiceFault};
    use serde_json::json;

    fn client_with(limiter: RateLimiter, transport: Arc<ScriptedTransport>) -> ApiClient {
        ApiClient::new(Arc::new(limiter), transport)
    }

    #[tokio::test]
    async fn test_fetch_returns_data() {
        let transport = Arc::new(ScriptedTransport::data(json!({ "maps": [] })));
        let client = client_with(RateLimiter::new(10.0, 1.0).unwrap(), transport.clone());

        let value = client.fetch("query { maps { id } }", None).await.unwrap();

        assert_eq!(value, json!({ "maps": [] }));
        assert_eq!(transport.calls(), 1);
        assert_eq!(transport.requests()[0].query, "query { maps { id } }");
    }

    #[tokio::test(start_paused = true)]
    async fn test_rate_limited_makes_no_network_attempt() {
        let transport = Arc::new(ScriptedTransport::data(json!({})));
        let client = client_with(RateLimiter::new(1.0, 1.0).unwrap(), transport.clone());

        assert!(client.fetch("q", None).await.is_ok());
        let err = client.fetch("q", None).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::RateLimited);
        assert_eq!(transport.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_one_token_per_call_regardless_of_outcome() {
        let transport = Arc::new(ScriptedTransport::sequence(vec![
            Err(TransportError::Connect("refused".into())),
            Ok(GraphQlResponse {
                data: None,
                errors: Some(vec![ServiceFault::new("bad field")]),
            }),
            Ok(GraphQlResponse {
                data: Some(json!({})),
                errors: None,
            }),
        ]));
        let limiter = RateLimiter::new(3.0, 0.001).unwrap();
        let client = client_with(limiter, transport.clone());

        assert!(client.fetch("q", None).await.is_err());
        assert!(client.fetch("q", None).await.is_err());
        assert!(client.fetch("q", None).await.is_ok());
        assert!(client.limiter().available_tokens() < 1.0);

        let err = client.fetch("q", None).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RateLimited);
        assert_eq!(transport.calls(), 3);
    }

    #[test]
    fn test_classify_connectivity_failures_as_network() {
        for failure in [
            TransportError::Connect("dns error".into()),
            TransportError::Timeout("operation timed out".into()),
            TransportError::Request("connection reset".into()),
        ] {
            let err = classify(failure);
            assert_eq!(err.kind(), ErrorKind::Network);
            assert_eq!(err.message(), NETWORK_ERROR_MESSAGE);
        }
    }

    #[test]
    fn test_classify_status_with_faults_as_protocol() {
        let err = classify(TransportError::Status {
            status: 400,
            faults: vec![ServiceFault::new("Syntax Error: Unexpected Name")],
        });

        assert_eq!(err.kind(), ErrorKind::Protocol);
        assert_eq!(err.message(), "Syntax Error: Unexpected Name");
        assert_eq!(err.faults().len(), 1);
    }

    #[test]
    fn test_classify_bare_status_as_protocol() {
        let err = classify(TransportError::Status {
            status: 500,
            faults: Vec::new(),
        });
        assert_eq!(err.kind(), ErrorKind::Protocol);
        assert!(err.message().contains("500"));
    }

    #[test]
    fn test_classify_unrecognized_as_unknown() {
        assert_eq!(
            classify(TransportError::Decode("expected value".into())).kind(),
            ErrorKind::Unknown
        );
        assert_eq!(
            classify(TransportError::Other("builder error".into())).kind(),
            ErrorKind::Unknown
        );
    }

    #[test]
    fn test_interpret_faults_alongside_data() {
        let err = interpret(GraphQlResponse {
            data: Some(json!({ "map": null })),
            errors: Some(vec![ServiceFault::new("partial failure")]),
        })
        .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Protocol);
        assert_eq!(err.faults()[0].message, "partial failure");
    }

    #[test]
    fn test_interpret_empty_error_list_uses_data() {
        let value = interpret(GraphQlResponse {
            data: Some(json!({ "items": [] })),
            errors: Some(Vec::new()),
        })
        .unwrap();
        assert_eq!(value, json!({ "items": [] }));
    }

    #[test]
    fn test_interpret_empty_response() {
        let err = interpret(GraphQlResponse::default()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unknown);
    }
}
