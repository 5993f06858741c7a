//! HTTP query executor backed by reqwest.

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::debug;

use crate::config::ProviderConfig;
use crate::error::{ExplorerError, Result};
use crate::executor::QueryExecutor;
use crate::wire::{
    decode_response, QueryRequest, RawResponse, TxRequest, WireVariant, QUERY_API_MEDIA_TYPE,
};

/// Executor that POSTs queries to a remote endpoint.
#[derive(Debug, Clone)]
pub struct HttpExecutor {
    endpoint: String,
    variant: WireVariant,
    timeout: Duration,
    client: Client,
}

impl HttpExecutor {
    /// Creates an executor from validated provider settings.
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        config.validate()?;

        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ExplorerError::internal(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            endpoint: config.endpoint().to_string(),
            variant: config.variant,
            timeout: config.timeout(),
            client,
        })
    }

    /// Returns the endpoint queries are sent to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn map_request_error(&self, error: reqwest::Error) -> ExplorerError {
        if error.is_timeout() {
            ExplorerError::Timeout(self.timeout)
        } else if error.is_connect() {
            ExplorerError::transport(format!("Failed to connect to {}: {error}", self.endpoint))
        } else {
            ExplorerError::transport(format!("Request failed: {error}"))
        }
    }
}

#[async_trait]
impl QueryExecutor for HttpExecutor {
    async fn execute(&self, query: &str) -> Result<RawResponse> {
        let request = match self.variant {
            WireVariant::Query => self
                .client
                .post(&self.endpoint)
                .header(ACCEPT, QUERY_API_MEDIA_TYPE)
                .json(&QueryRequest::new(query)),
            WireVariant::Transaction => self
                .client
                .post(&self.endpoint)
                .header(ACCEPT, "application/json")
                .json(&TxRequest::new(query)),
        };

        let started = Instant::now();
        let response = request
            .send()
            .await
            .map_err(|e| self.map_request_error(e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| self.map_request_error(e))?;

        let raw = decode_response(self.variant, status, &body)?;
        debug!(
            "{} API replied {} with {} rows ({} bytes) in {:?}",
            self.variant,
            status,
            raw.row_count(),
            body.len(),
            started.elapsed()
        );

        Ok(raw)
    }

    fn variant(&self) -> WireVariant {
        self.variant
    }
}
