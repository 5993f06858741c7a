//! Wire formats spoken by graph query providers.
//!
//! Two incompatible response shapes exist: the legacy transaction API
//! (column-indexed rows plus a `graph` envelope) and the Query API (typed
//! values tagged with `$type`). Both decode into [`RawResponse`].

pub mod transaction;
pub mod typed;

pub use transaction::{TxGraph, TxNode, TxRelationship, TxRequest, TxResult, TxRow};
pub use typed::{QueryData, QueryRequest, TypedNode, TypedRelationship, TypedValue};

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::error::{ExplorerError, Result};

/// Media type the Query API expects in the `Accept` header.
pub const QUERY_API_MEDIA_TYPE: &str = "application/vnd.neo4j.query";

/// Longest slice of an unexpected body quoted in error messages.
const MAX_QUOTED_BODY: usize = 512;

/// Which provider envelope to send and which response shape to expect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WireVariant {
    /// Query API: `{"statement": ...}` answered with typed values.
    #[default]
    Query,
    /// Legacy transaction API: `{"statements": [...]}` answered with row and graph data.
    Transaction,
}

impl WireVariant {
    /// Returns the variant as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Query => "query",
            Self::Transaction => "transaction",
        }
    }
}

impl FromStr for WireVariant {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "query" | "typed" => Ok(Self::Query),
            "transaction" | "tx" | "legacy" => Ok(Self::Transaction),
            _ => Err(format!(
                "Unknown wire variant: {s}. Expected: query or transaction"
            )),
        }
    }
}

impl fmt::Display for WireVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A decoded provider response, tagged by the wire variant that produced it.
#[derive(Debug, Clone)]
pub enum RawResponse {
    /// Rows from the legacy transaction API.
    Transaction(TxResult),
    /// Rows from the Query API.
    Query(QueryData),
}

impl RawResponse {
    /// Returns the wire variant this response came from.
    pub fn variant(&self) -> WireVariant {
        match self {
            Self::Transaction(_) => WireVariant::Transaction,
            Self::Query(_) => WireVariant::Query,
        }
    }

    /// Number of rows in the response.
    pub fn row_count(&self) -> usize {
        match self {
            Self::Transaction(result) => result.data.len(),
            Self::Query(data) => data.values.len(),
        }
    }

    /// Returns every row as plain JSON values, with type tags removed.
    ///
    /// Nodes and relationships become their property maps.
    pub fn plain_rows(&self) -> Vec<Vec<Value>> {
        match self {
            Self::Transaction(result) => result.data.iter().map(|row| row.row.clone()).collect(),
            Self::Query(data) => data
                .values
                .iter()
                .map(|row| row.iter().map(TypedValue::to_plain).collect())
                .collect(),
        }
    }
}

/// One entry of a provider's `errors` list.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderErrorBody {
    /// Neo4j status code, e.g. `Neo.ClientError.Statement.SyntaxError`.
    #[serde(default)]
    pub code: Option<String>,
    /// Human-readable message.
    pub message: String,
}

/// Decodes a provider HTTP reply into a [`RawResponse`].
///
/// An embedded `errors` payload wins over the HTTP status: the Query API
/// reports rejected statements with 4xx, the transaction API with 200.
pub fn decode_response(
    variant: WireVariant,
    status: StatusCode,
    body: &str,
) -> Result<RawResponse> {
    let json: Value = match serde_json::from_str(body) {
        Ok(json) => json,
        Err(e) if status.is_success() => {
            return Err(ExplorerError::malformed(format!(
                "Response is not valid JSON: {e}"
            )));
        }
        Err(_) => {
            return Err(ExplorerError::transport(format!(
                "Provider returned {status}: {}",
                quote_body(body)
            )));
        }
    };

    if let Some(message) = provider_error_message(&json) {
        return Err(ExplorerError::provider(message));
    }

    if !status.is_success() {
        return Err(ExplorerError::transport(format!(
            "Provider returned {status}: {}",
            quote_body(body)
        )));
    }

    match variant {
        WireVariant::Transaction => transaction::decode(json).map(RawResponse::Transaction),
        WireVariant::Query => typed::decode(json).map(RawResponse::Query),
    }
}

/// Extracts the first provider error message from an `errors` list or object.
fn provider_error_message(json: &Value) -> Option<String> {
    let first = match json.get("errors")? {
        Value::Array(errors) => errors.first()?,
        Value::Null => return None,
        other => other,
    };

    match serde_json::from_value::<ProviderErrorBody>(first.clone()) {
        Ok(error) => Some(error.message),
        Err(_) => Some(first.to_string()),
    }
}

fn quote_body(body: &str) -> &str {
    match body.char_indices().nth(MAX_QUOTED_BODY) {
        Some((end, _)) => &body[..end],
        None => body,
    }
}
