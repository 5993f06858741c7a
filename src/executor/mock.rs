//! Mock query executor for testing.
//!
//! Serves canned provider bodies through the same decoding path as the HTTP
//! executor, so projection and error handling are exercised without a network.

use async_trait::async_trait;
use reqwest::StatusCode;
use std::sync::Mutex;
use std::time::Duration;

use crate::error::{ExplorerError, Result};
use crate::executor::QueryExecutor;
use crate::wire::{decode_response, RawResponse, WireVariant};

/// What the mock answers for a matching query.
#[derive(Debug, Clone)]
pub enum MockReply {
    /// An HTTP exchange that completed with this status and body.
    Body { status: u16, body: String },
    /// The request ran past the timeout.
    Timeout(Duration),
    /// The endpoint could not be reached.
    Unreachable,
}

impl MockReply {
    /// A 200 reply carrying `body`.
    pub fn ok(body: impl Into<String>) -> Self {
        Self::Body {
            status: 200,
            body: body.into(),
        }
    }
}

/// A mock executor that returns predefined replies based on query patterns.
#[derive(Debug)]
pub struct MockExecutor {
    variant: WireVariant,
    replies: Vec<(String, MockReply)>,
    fallback: MockReply,
    executed: Mutex<Vec<String>>,
}

impl MockExecutor {
    /// Creates a mock that answers every query with an empty result.
    pub fn new(variant: WireVariant) -> Self {
        let empty = match variant {
            WireVariant::Query => r#"{"data":{"fields":[],"values":[]}}"#,
            WireVariant::Transaction => r#"{"results":[{"columns":[],"data":[]}],"errors":[]}"#,
        };
        Self {
            variant,
            replies: Vec::new(),
            fallback: MockReply::ok(empty),
            executed: Mutex::new(Vec::new()),
        }
    }

    /// Answers queries containing `pattern` (case-insensitive) with a 200 `body`.
    pub fn with_response(self, pattern: impl Into<String>, body: impl Into<String>) -> Self {
        self.with_reply(pattern, MockReply::ok(body))
    }

    /// Answers queries containing `pattern` (case-insensitive) with `reply`.
    pub fn with_reply(mut self, pattern: impl Into<String>, reply: MockReply) -> Self {
        self.replies.push((pattern.into(), reply));
        self
    }

    /// Replaces the reply used when no pattern matches.
    pub fn with_fallback(mut self, reply: MockReply) -> Self {
        self.fallback = reply;
        self
    }

    /// Queries received so far, in order.
    pub fn executed(&self) -> Vec<String> {
        self.executed
            .lock()
            .map(|queries| queries.clone())
            .unwrap_or_default()
    }

    fn reply_for(&self, query: &str) -> &MockReply {
        let query_lower = query.to_lowercase();
        self.replies
            .iter()
            .find(|(pattern, _)| query_lower.contains(&pattern.to_lowercase()))
            .map(|(_, reply)| reply)
            .unwrap_or(&self.fallback)
    }
}

#[async_trait]
impl QueryExecutor for MockExecutor {
    async fn execute(&self, query: &str) -> Result<RawResponse> {
        if let Ok(mut executed) = self.executed.lock() {
            executed.push(query.to_string());
        }

        match self.reply_for(query) {
            MockReply::Body { status, body } => {
                let status = StatusCode::from_u16(*status).map_err(|e| {
                    ExplorerError::internal(format!("Invalid mock status {status}: {e}"))
                })?;
                decode_response(self.variant, status, body)
            }
            MockReply::Timeout(after) => Err(ExplorerError::Timeout(*after)),
            MockReply::Unreachable => Err(ExplorerError::transport("Mock endpoint unreachable")),
        }
    }

    fn variant(&self) -> WireVariant {
        self.variant
    }
}
