//! Query API request and typed-value response types.
//!
//! Every value in a Query API response is wrapped as
//! `{"$type": T, "_value": V}`. Composite values (lists, maps, nodes,
//! relationships, paths) wrap further typed values inside `_value`.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Number, Value};

use crate::error::{ExplorerError, Result};

/// Request body for the Query API.
#[derive(Debug, Clone, Serialize)]
pub struct QueryRequest<'a> {
    pub statement: &'a str,
}

impl<'a> QueryRequest<'a> {
    pub fn new(statement: &'a str) -> Self {
        Self { statement }
    }
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    data: QueryData,
}

/// Header and rows of a Query API result.
#[derive(Debug, Clone, Deserialize)]
pub struct QueryData {
    /// Returned column names, in order.
    pub fields: Vec<String>,
    /// One entry per row, positionally aligned with `fields`.
    pub values: Vec<Vec<TypedValue>>,
}

/// Ordered property list, as declared by the provider.
pub type Properties = Vec<(String, TypedValue)>;

/// A decoded `{"$type", "_value"}` value.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "TaggedValue")]
pub enum TypedValue {
    Null,
    Boolean(bool),
    /// Integers arrive as decimal strings to survive 64-bit precision.
    Integer(Value),
    /// Floats arrive as strings so NaN and infinities can be expressed.
    Float(Value),
    String(String),
    List(Vec<TypedValue>),
    Map(Properties),
    Node(TypedNode),
    Relationship(TypedRelationship),
    /// Alternating nodes and relationships.
    Path(Vec<TypedValue>),
    /// Temporal, spatial, duration and binary values, kept as sent.
    Other { kind: String, value: Value },
}

/// A node inside a typed value.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TypedNode {
    #[serde(rename = "_element_id")]
    pub element_id: String,
    #[serde(rename = "_labels", default)]
    pub labels: Vec<String>,
    #[serde(
        rename = "_properties",
        default,
        deserialize_with = "deserialize_properties"
    )]
    pub properties: Properties,
}

/// A relationship inside a typed value.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TypedRelationship {
    #[serde(rename = "_element_id")]
    pub element_id: String,
    #[serde(rename = "_start_node_element_id")]
    pub start_node_element_id: String,
    #[serde(rename = "_end_node_element_id")]
    pub end_node_element_id: String,
    #[serde(rename = "_type")]
    pub rel_type: String,
    #[serde(
        rename = "_properties",
        default,
        deserialize_with = "deserialize_properties"
    )]
    pub properties: Properties,
}

#[derive(Debug, Deserialize)]
struct TaggedValue {
    #[serde(rename = "$type")]
    kind: String,
    #[serde(rename = "_value", default)]
    value: Value,
}

impl TryFrom<TaggedValue> for TypedValue {
    type Error = String;

    fn try_from(tagged: TaggedValue) -> std::result::Result<Self, Self::Error> {
        let TaggedValue { kind, value } = tagged;
        let typed = match kind.as_str() {
            "Null" => Self::Null,
            "Boolean" => Self::Boolean(
                value
                    .as_bool()
                    .ok_or_else(|| mismatch(&kind, &value))?,
            ),
            "Integer" => Self::Integer(value),
            "Float" => Self::Float(value),
            "String" => match value {
                Value::String(s) => Self::String(s),
                other => return Err(mismatch(&kind, &other)),
            },
            "List" => Self::List(serde_json::from_value(value).map_err(|e| e.to_string())?),
            "Map" => match value {
                Value::Object(entries) => Self::Map(decode_entries(entries)?),
                other => return Err(mismatch(&kind, &other)),
            },
            "Node" => Self::Node(serde_json::from_value(value).map_err(|e| e.to_string())?),
            "Relationship" => {
                Self::Relationship(serde_json::from_value(value).map_err(|e| e.to_string())?)
            }
            "Path" => Self::Path(serde_json::from_value(value).map_err(|e| e.to_string())?),
            _ => Self::Other { kind, value },
        };
        Ok(typed)
    }
}

fn mismatch(kind: &str, value: &Value) -> String {
    format!("unexpected _value for {kind}: {value}")
}

fn decode_entries(entries: Map<String, Value>) -> std::result::Result<Properties, String> {
    entries
        .into_iter()
        .map(|(key, value)| {
            serde_json::from_value(value)
                .map(|typed| (key, typed))
                .map_err(|e| e.to_string())
        })
        .collect()
}

fn deserialize_properties<'de, D>(deserializer: D) -> std::result::Result<Properties, D::Error>
where
    D: Deserializer<'de>,
{
    let entries = Map::<String, Value>::deserialize(deserializer)?;
    decode_entries(entries).map_err(serde::de::Error::custom)
}

impl TypedValue {
    /// Converts to plain JSON for display, dropping type tags.
    ///
    /// Nodes and relationships become their property maps. Paths become the
    /// list of their nodes' property maps; relationships along a path are
    /// left out of this form.
    pub fn to_plain(&self) -> Value {
        match self {
            Self::Null => Value::Null,
            Self::Boolean(b) => Value::Bool(*b),
            Self::Integer(raw) => integer_value(raw),
            Self::Float(raw) => float_value(raw),
            Self::String(s) => Value::String(s.clone()),
            Self::List(items) => Value::Array(items.iter().map(Self::to_plain).collect()),
            Self::Map(entries) => Value::Object(plain_properties(entries)),
            Self::Node(node) => Value::Object(plain_properties(&node.properties)),
            Self::Relationship(rel) => Value::Object(plain_properties(&rel.properties)),
            Self::Path(parts) => Value::Array(
                parts
                    .iter()
                    .filter_map(|part| match part {
                        Self::Node(node) => Some(Value::Object(plain_properties(&node.properties))),
                        _ => None,
                    })
                    .collect(),
            ),
            Self::Other { value, .. } => value.clone(),
        }
    }

    /// Returns the `$type` tag this value was decoded from.
    pub fn kind(&self) -> &str {
        match self {
            Self::Null => "Null",
            Self::Boolean(_) => "Boolean",
            Self::Integer(_) => "Integer",
            Self::Float(_) => "Float",
            Self::String(_) => "String",
            Self::List(_) => "List",
            Self::Map(_) => "Map",
            Self::Node(_) => "Node",
            Self::Relationship(_) => "Relationship",
            Self::Path(_) => "Path",
            Self::Other { kind, .. } => kind,
        }
    }
}

/// Unwraps an ordered property list into a plain JSON object.
pub fn plain_properties(properties: &Properties) -> Map<String, Value> {
    properties
        .iter()
        .map(|(key, value)| (key.clone(), value.to_plain()))
        .collect()
}

fn integer_value(raw: &Value) -> Value {
    match raw {
        Value::String(s) => s
            .parse::<i64>()
            .map(Value::from)
            .unwrap_or_else(|_| raw.clone()),
        other => other.clone(),
    }
}

fn float_value(raw: &Value) -> Value {
    match raw {
        Value::String(s) => s
            .parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .map(Value::Number)
            .unwrap_or_else(|| raw.clone()),
        other => other.clone(),
    }
}

/// Decodes the `data` section of a Query API body.
pub(crate) fn decode(json: Value) -> Result<QueryData> {
    serde_json::from_value::<QueryResponse>(json)
        .map(|response| response.data)
        .map_err(|e| ExplorerError::malformed(format!("Unexpected Query API response: {e}")))
}
