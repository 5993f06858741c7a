//! Query execution against a graph query provider.
//!
//! Provides a trait-based interface so the HTTP client can be swapped for a
//! canned-response mock in tests.

mod http;
mod mock;

pub use http::HttpExecutor;
pub use mock::{MockExecutor, MockReply};

use async_trait::async_trait;

use crate::error::Result;
use crate::wire::{RawResponse, WireVariant};

/// Trait defining the interface for query executors.
///
/// A provider-side rejection surfaces as `ExplorerError::Provider`; network
/// failures as `Transport` or `Timeout`.
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    /// Sends one query and decodes the provider's reply.
    async fn execute(&self, query: &str) -> Result<RawResponse>;

    /// The wire variant this executor speaks.
    fn variant(&self) -> WireVariant;
}
