//! Graph view model: deduplicated nodes and relationships ready for rendering.

use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashSet;

use super::color::LabelColors;

/// A node as shown in the graph view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphNode {
    /// Provider element id.
    pub id: String,
    /// Display text: the first declared property value.
    pub caption: String,
    /// Color shared by every node with the same type.
    pub color: String,
    pub properties: Map<String, Value>,
    /// First label, or empty for unlabeled nodes.
    #[serde(rename = "type")]
    pub node_type: String,
    pub selected: bool,
}

/// A relationship as shown in the graph view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphRelationship {
    pub id: String,
    pub from: String,
    pub to: String,
    pub caption: String,
    pub properties: Map<String, Value>,
    #[serde(rename = "type")]
    pub rel_type: String,
}

/// Nodes and relationships of one result set, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GraphView {
    pub nodes: Vec<GraphNode>,
    pub relationships: Vec<GraphRelationship>,
}

impl GraphView {
    /// Returns true if there is nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.relationships.is_empty()
    }

    /// Looks up a node by element id.
    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|node| node.id == id)
    }
}

/// Accumulates a [`GraphView`], skipping elements whose id was already added.
pub struct GraphBuilder<'a> {
    colors: &'a mut LabelColors,
    view: GraphView,
    seen_nodes: HashSet<String>,
    seen_relationships: HashSet<String>,
}

impl<'a> GraphBuilder<'a> {
    pub fn new(colors: &'a mut LabelColors) -> Self {
        Self {
            colors,
            view: GraphView::default(),
            seen_nodes: HashSet::new(),
            seen_relationships: HashSet::new(),
        }
    }

    /// Adds a node unless one with the same id is already present.
    pub fn push_node(&mut self, id: &str, labels: &[String], properties: Map<String, Value>) {
        if !self.seen_nodes.insert(id.to_string()) {
            return;
        }

        let node_type = labels.first().cloned().unwrap_or_default();
        let color = self.colors.color_for(&node_type);
        let caption = properties.values().next().map(caption_text).unwrap_or_default();

        self.view.nodes.push(GraphNode {
            id: id.to_string(),
            caption,
            color,
            properties,
            node_type,
            selected: false,
        });
    }

    /// Adds a relationship unless one with the same id is already present.
    pub fn push_relationship(
        &mut self,
        id: &str,
        from: &str,
        to: &str,
        rel_type: &str,
        properties: Map<String, Value>,
    ) {
        if !self.seen_relationships.insert(id.to_string()) {
            return;
        }

        self.view.relationships.push(GraphRelationship {
            id: id.to_string(),
            from: from.to_string(),
            to: to.to_string(),
            caption: rel_type.to_string(),
            properties,
            rel_type: rel_type.to_string(),
        });
    }

    pub fn finish(self) -> GraphView {
        self.view
    }
}

/// Renders a property value the way a caption shows it: strings bare,
/// arrays comma-joined, everything else as JSON.
fn caption_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(caption_text)
            .collect::<Vec<_>>()
            .join(","),
        other => other.to_string(),
    }
}
