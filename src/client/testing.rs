//! Scripted transport for unit tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::client::transport::{GraphQlRequest, GraphQlResponse, Transport, TransportError};

type Reply = Result<GraphQlResponse, TransportError>;

/// Replays a fixed list of replies; the last one repeats forever.
pub(crate) struct ScriptedTransport {
    replies: Mutex<VecDeque<Reply>>,
    requests: Mutex<Vec<GraphQlRequest>>,
    calls: AtomicUsize,
    delay: Duration,
}

impl ScriptedTransport {
    pub(crate) fn sequence(replies: Vec<Reply>) -> Self {
        assert!(!replies.is_empty(), "script needs at least one reply");
        Self {
            replies: Mutex::new(replies.into()),
            requests: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
            delay: Duration::ZERO,
        }
    }

    /// Holds every reply back by `delay`.
    pub(crate) fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub(crate) fn data(data: Value) -> Self {
        Self::sequence(vec![Ok(GraphQlResponse {
            data: Some(data),
            errors: None,
        })])
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn requests(&self) -> Vec<GraphQlRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn execute(&self, request: &GraphQlRequest) -> Result<GraphQlResponse, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let mut replies = self.replies.lock().unwrap();
        if replies.len() > 1 {
            replies.pop_front().unwrap()
        } else {
            replies.front().cloned().unwrap()
        }
    }
}
