//! Projection of Query API typed-value rows.

use super::columns::HeaderColumns;
use super::graph::GraphBuilder;
use super::RowProjector;
use crate::wire::typed::plain_properties;
use crate::wire::{QueryData, TypedValue};

impl RowProjector for QueryData {
    fn project_graph_into(&self, graph: &mut GraphBuilder<'_>) {
        for value in self.values.iter().flatten() {
            collect_elements(value, graph);
        }
    }

    fn header(&self) -> Option<HeaderColumns> {
        Some(HeaderColumns::new(self.fields.clone()))
    }

    fn display_rows(&self) -> Vec<Vec<String>> {
        self.values
            .iter()
            .map(|row| row.iter().map(|value| value.to_plain().to_string()).collect())
            .collect()
    }
}

/// Walks a value and adds every node and relationship it contains.
fn collect_elements(value: &TypedValue, graph: &mut GraphBuilder<'_>) {
    match value {
        TypedValue::Node(node) => {
            graph.push_node(
                &node.element_id,
                &node.labels,
                plain_properties(&node.properties),
            );
        }
        TypedValue::Relationship(rel) => {
            graph.push_relationship(
                &rel.element_id,
                &rel.start_node_element_id,
                &rel.end_node_element_id,
                &rel.rel_type,
                plain_properties(&rel.properties),
            );
        }
        TypedValue::Path(parts) | TypedValue::List(parts) => {
            for part in parts {
                collect_elements(part, graph);
            }
        }
        TypedValue::Map(entries) => {
            for (_, entry) in entries {
                collect_elements(entry, graph);
            }
        }
        _ => {}
    }
}
