//! Database schema introspection.
//!
//! Summarizes which properties each node label and relationship type carries
//! and which labels each relationship type connects, verified against the
//! live data. The summary is exported as JSON for prompting the query
//! assistant.

use futures::stream::{self, StreamExt, TryStreamExt};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use tracing::{debug, info};

use crate::error::{ExplorerError, Result};
use crate::explorer::Explorer;
use crate::projection::{project_graph, GraphView};

const NODE_TYPE_PROPERTIES: &str = "
CALL db.schema.nodeTypeProperties()
YIELD nodeLabels, propertyName
WITH head(nodeLabels) AS label, collect(propertyName) AS properties
RETURN {labels: label, properties: properties} AS output";

const REL_TYPE_PROPERTIES: &str = r#"
CALL db.schema.relTypeProperties()
YIELD relType, propertyName
WITH replace(replace(relType, ":`", ""), "`", "") AS type, collect(propertyName) AS properties
RETURN {type: type, properties: properties} AS output"#;

const SCHEMA_VISUALIZATION: &str = "CALL db.schema.visualization()";

/// Existence checks in flight at once against the provider.
const MAX_CONCURRENT_CHECKS: usize = 4;

/// Verified schema summary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphSchema {
    /// Node label → properties present on at least one node.
    pub node_properties: BTreeMap<String, Vec<String>>,
    /// Relationship type → properties present on at least one relationship.
    pub relationship_properties: BTreeMap<String, Vec<String>>,
    /// Source label → relationship type → labels found at the other end.
    pub schema: BTreeMap<String, BTreeMap<String, Vec<String>>>,
}

impl GraphSchema {
    /// Writes the schema as pretty-printed JSON.
    pub fn export(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| ExplorerError::internal(format!("Failed to serialize schema: {e}")))?;
        std::fs::write(path, json).map_err(|e| {
            ExplorerError::internal(format!("Failed to write {}: {e}", path.display()))
        })
    }
}

#[derive(Debug, Deserialize)]
struct LabelProperties {
    labels: Option<String>,
    #[serde(default)]
    properties: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct TypeProperties {
    #[serde(rename = "type")]
    rel_type: Option<String>,
    #[serde(default)]
    properties: Vec<String>,
}

/// Runs the schema procedures and existence checks through an [`Explorer`].
pub struct SchemaIntrospector<'a> {
    explorer: &'a Explorer,
}

impl<'a> SchemaIntrospector<'a> {
    pub fn new(explorer: &'a Explorer) -> Self {
        Self { explorer }
    }

    /// Builds the full schema summary.
    pub async fn generate(&self) -> Result<GraphSchema> {
        let schema = GraphSchema {
            node_properties: self.node_properties().await?,
            relationship_properties: self.relationship_properties().await?,
            schema: self.relationship_schema().await?,
        };
        info!(
            "Schema covers {} labels, {} relationship types",
            schema.node_properties.len(),
            schema.relationship_properties.len()
        );
        Ok(schema)
    }

    /// Label → verified property names.
    pub async fn node_properties(&self) -> Result<BTreeMap<String, Vec<String>>> {
        let mut result = BTreeMap::new();

        for entry in self.outputs::<LabelProperties>(NODE_TYPE_PROPERTIES).await? {
            let Some(label) = entry.labels else { continue };
            let pattern = format!("(n:{})", escape(&label));

            let exists =
                format!("MATCH {pattern} WHERE n IS NOT NULL RETURN COUNT(n) > 0 AS node_exists");
            if !self.exists(&exists).await? {
                debug!("Skipping empty label {}", label);
                continue;
            }

            let properties = self
                .verified_properties(&entry.properties, |prop| {
                    format!(
                        "MATCH {pattern} WHERE n.{} IS NOT NULL RETURN COUNT(n) > 0 AS node_property_exists",
                        escape(prop)
                    )
                })
                .await?;
            result.insert(label, properties);
        }

        Ok(result)
    }

    /// Relationship type → verified property names.
    pub async fn relationship_properties(&self) -> Result<BTreeMap<String, Vec<String>>> {
        let mut result = BTreeMap::new();

        for entry in self.outputs::<TypeProperties>(REL_TYPE_PROPERTIES).await? {
            let Some(rel_type) = entry.rel_type else { continue };
            let pattern = format!("()-[r:{}]-()", escape(&rel_type));

            let exists = format!(
                "MATCH {pattern} WHERE r IS NOT NULL RETURN COUNT(r) > 0 AS relationship_exists"
            );
            if !self.exists(&exists).await? {
                debug!("Skipping empty relationship type {}", rel_type);
                continue;
            }

            let properties = self
                .verified_properties(&entry.properties, |prop| {
                    format!(
                        "MATCH {pattern} WHERE r.{} IS NOT NULL RETURN COUNT(r) > 0 AS relationship_property_exists",
                        escape(prop)
                    )
                })
                .await?;
            result.insert(rel_type, properties);
        }

        Ok(result)
    }

    /// Source label → relationship type → verified target labels.
    pub async fn relationship_schema(
        &self,
    ) -> Result<BTreeMap<String, BTreeMap<String, Vec<String>>>> {
        let raw = self.explorer.fetch(SCHEMA_VISUALIZATION).await?;
        let candidates = endpoint_candidates(&project_graph(&raw));

        let mut result: BTreeMap<String, BTreeMap<String, Vec<String>>> = BTreeMap::new();
        for ((source, rel_type), targets) in candidates {
            let checks = targets.iter().map(|target| {
                let query = format!(
                    "MATCH (n1:{})-[r:{}]-(n2:{}) WHERE n1 IS NOT NULL AND r IS NOT NULL AND n2 IS NOT NULL \
                     RETURN (COUNT(n1) > 0 AND COUNT(r) > 0 AND COUNT(n2) > 0) AS relationship_schema_exists",
                    escape(&source),
                    escape(&rel_type),
                    escape(target)
                );
                async move { self.exists(&query).await }
            });
            let verdicts: Vec<bool> = stream::iter(checks)
                .buffered(MAX_CONCURRENT_CHECKS)
                .try_collect()
                .await?;

            let verified: Vec<String> = targets
                .into_iter()
                .zip(verdicts)
                .filter_map(|(target, exists)| exists.then_some(target))
                .collect();
            if !verified.is_empty() {
                result.entry(source).or_default().insert(rel_type, verified);
            }
        }

        Ok(result)
    }

    /// Keeps the properties whose existence query returns true, sorted.
    async fn verified_properties<F>(
        &self,
        properties: &[String],
        query_for: F,
    ) -> Result<Vec<String>>
    where
        F: Fn(&str) -> String,
    {
        let checks = properties.iter().map(|prop| {
            let query = query_for(prop.as_str());
            async move { self.exists(&query).await }
        });
        let verdicts: Vec<bool> = stream::iter(checks)
            .buffered(MAX_CONCURRENT_CHECKS)
            .try_collect()
            .await?;

        let mut verified: Vec<String> = properties
            .iter()
            .zip(verdicts)
            .filter_map(|(prop, exists)| exists.then(|| prop.clone()))
            .collect();
        verified.sort();
        verified.dedup();
        Ok(verified)
    }

    /// Runs a query returning a single `output` map column and decodes each row.
    async fn outputs<T: for<'de> Deserialize<'de>>(&self, query: &str) -> Result<Vec<T>> {
        let raw = self.explorer.fetch(query).await?;
        raw.plain_rows()
            .into_iter()
            .filter_map(|row| row.into_iter().next())
            .map(|output| {
                serde_json::from_value(output).map_err(|e| {
                    ExplorerError::malformed(format!("Unexpected schema procedure output: {e}"))
                })
            })
            .collect()
    }

    /// Runs a query whose first cell is a boolean.
    async fn exists(&self, query: &str) -> Result<bool> {
        let raw = self.explorer.fetch(query).await?;
        Ok(raw
            .plain_rows()
            .first()
            .and_then(|row| row.first())
            .and_then(Value::as_bool)
            .unwrap_or(false))
    }
}

/// Pairs every `(label, relationship type)` with the labels seen at the other
/// end, in both directions.
fn endpoint_candidates(graph: &GraphView) -> BTreeMap<(String, String), BTreeSet<String>> {
    let name_of = |id: &str| {
        graph
            .node(id)
            .and_then(|node| node.properties.get("name"))
            .and_then(Value::as_str)
            .map(String::from)
    };

    let mut candidates: BTreeMap<(String, String), BTreeSet<String>> = BTreeMap::new();
    for rel in &graph.relationships {
        let (Some(source), Some(target)) = (name_of(&rel.from), name_of(&rel.to)) else {
            continue;
        };
        candidates
            .entry((source.clone(), rel.rel_type.clone()))
            .or_default()
            .insert(target.clone());
        candidates
            .entry((target, rel.rel_type.clone()))
            .or_default()
            .insert(source);
    }
    candidates
}

/// Quotes a label, type or property name for interpolation into Cypher.
fn escape(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}
