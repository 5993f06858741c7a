//! Projection of legacy transaction API rows.

use serde_json::Value;

use super::columns::HeaderColumns;
use super::graph::GraphBuilder;
use super::RowProjector;
use crate::wire::TxResult;

impl RowProjector for TxResult {
    fn project_graph_into(&self, graph: &mut GraphBuilder<'_>) {
        for envelope in self.data.iter().filter_map(|row| row.graph.as_ref()) {
            for node in &envelope.nodes {
                graph.push_node(node.identity(), &node.labels, node.properties.clone());
            }
            for rel in &envelope.relationships {
                graph.push_relationship(
                    rel.identity(),
                    rel.from(),
                    rel.to(),
                    &rel.rel_type,
                    rel.properties.clone(),
                );
            }
        }
    }

    fn header(&self) -> Option<HeaderColumns> {
        if self.columns.is_empty() {
            None
        } else {
            Some(HeaderColumns::new(self.columns.clone()))
        }
    }

    fn display_rows(&self) -> Vec<Vec<String>> {
        self.data
            .iter()
            .map(|row| {
                row.row
                    .iter()
                    .enumerate()
                    .map(|(i, value)| display_value(value, row.meta.get(i)))
                    .collect()
            })
            .collect()
    }
}

/// Renders a row value, reducing paths to their nodes' property maps.
fn display_value(value: &Value, meta: Option<&Value>) -> String {
    plain_value(value, meta).to_string()
}

/// Walks `value` and its parallel `meta` together.
///
/// The row format already flattens nodes and relationships to property maps,
/// so a path is only recognizable through its meta entries: strictly
/// alternating node, relationship, node. Nested lists are reduced per element.
fn plain_value(value: &Value, meta: Option<&Value>) -> Value {
    let (Value::Array(items), Some(Value::Array(entries))) = (value, meta) else {
        return value.clone();
    };

    if items.len() == entries.len() && is_path_meta(entries) {
        return Value::Array(items.iter().step_by(2).cloned().collect());
    }

    Value::Array(
        items
            .iter()
            .enumerate()
            .map(|(i, item)| plain_value(item, entries.get(i)))
            .collect(),
    )
}

fn element_kind(entry: &Value) -> Option<&str> {
    entry.get("type").and_then(Value::as_str)
}

fn is_path_meta(entries: &[Value]) -> bool {
    entries.len() % 2 == 1
        && entries.iter().enumerate().all(|(i, entry)| {
            let expected = if i % 2 == 0 { "node" } else { "relationship" };
            element_kind(entry) == Some(expected)
        })
}
