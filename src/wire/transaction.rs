//! Legacy transaction API envelope and response types.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::{ExplorerError, Result};

/// Request body for the transaction API.
#[derive(Debug, Clone, Serialize)]
pub struct TxRequest {
    pub statements: Vec<TxStatement>,
}

/// One statement in a transaction request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TxStatement {
    pub statement: String,
    pub result_data_contents: Vec<String>,
}

impl TxRequest {
    /// Wraps a single query, asking for both row and graph result data.
    pub fn new(query: &str) -> Self {
        Self {
            statements: vec![TxStatement {
                statement: query.to_string(),
                result_data_contents: vec!["row".to_string(), "graph".to_string()],
            }],
        }
    }
}

#[derive(Debug, Deserialize)]
struct TxResponse {
    #[serde(default)]
    results: Vec<TxResult>,
}

/// Result set of one statement.
#[derive(Debug, Clone, Deserialize)]
pub struct TxResult {
    /// Returned column names. May be empty on some deployments.
    #[serde(default)]
    pub columns: Vec<String>,
    /// One entry per returned row.
    pub data: Vec<TxRow>,
}

/// A row in the mixed row/graph envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct TxRow {
    /// Column-indexed values. Nodes and relationships appear as property maps.
    #[serde(default)]
    pub row: Vec<Value>,
    /// Per-column type metadata, parallel to `row`.
    #[serde(default)]
    pub meta: Vec<Value>,
    /// Nodes and relationships referenced anywhere in the row.
    #[serde(default)]
    pub graph: Option<TxGraph>,
}

/// Graph section of a row.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TxGraph {
    #[serde(default)]
    pub nodes: Vec<TxNode>,
    #[serde(default)]
    pub relationships: Vec<TxRelationship>,
}

/// A node in the legacy graph envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct TxNode {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(rename = "elementId", default)]
    pub element_id: Option<String>,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub properties: Map<String, Value>,
}

impl TxNode {
    /// Element id when the server sends one, legacy numeric id otherwise.
    pub fn identity(&self) -> &str {
        self.element_id.as_deref().unwrap_or(&self.id)
    }
}

/// A relationship in the legacy graph envelope.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TxRelationship {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub element_id: Option<String>,
    #[serde(rename = "type")]
    pub rel_type: String,
    #[serde(deserialize_with = "string_or_number")]
    pub start_node: String,
    #[serde(deserialize_with = "string_or_number")]
    pub end_node: String,
    #[serde(default)]
    pub start_node_element_id: Option<String>,
    #[serde(default)]
    pub end_node_element_id: Option<String>,
    #[serde(default)]
    pub properties: Map<String, Value>,
}

impl TxRelationship {
    /// Identity, preferring the element id like [`TxNode::identity`].
    pub fn identity(&self) -> &str {
        self.element_id.as_deref().unwrap_or(&self.id)
    }

    /// Start node identity in the same id space as [`TxNode::identity`].
    pub fn from(&self) -> &str {
        self.start_node_element_id
            .as_deref()
            .unwrap_or(&self.start_node)
    }

    /// End node identity in the same id space as [`TxNode::identity`].
    pub fn to(&self) -> &str {
        self.end_node_element_id.as_deref().unwrap_or(&self.end_node)
    }
}

/// Decodes the first statement result from a transaction API body.
pub(crate) fn decode(json: Value) -> Result<TxResult> {
    let response: TxResponse = serde_json::from_value(json).map_err(|e| {
        ExplorerError::malformed(format!("Unexpected transaction API response: {e}"))
    })?;

    response
        .results
        .into_iter()
        .next()
        .ok_or_else(|| ExplorerError::malformed("Transaction API response carries no results"))
}

/// Older servers send numeric ids, newer ones strings.
fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number id, got {other}"
        ))),
    }
}
