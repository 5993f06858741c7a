//! Reshaping of raw provider rows into graph and table view models.
//!
//! Each wire variant implements [`RowProjector`]; the free functions here
//! dispatch on [`RawResponse`] so callers never branch on the variant.

mod color;
mod columns;
mod graph;
mod table;
mod transaction;
mod typed;

pub use color::LabelColors;
pub use columns::{ColumnSchemaSource, HeaderColumns, ReturnClauseColumns};
pub use graph::{GraphBuilder, GraphNode, GraphRelationship, GraphView};
pub use table::{TableColumn, TableRow, TableView, INDEX_COLUMN};

use crate::error::Result;
use crate::wire::RawResponse;

/// Shared interface of the per-variant projections.
pub trait RowProjector {
    /// Adds every node and relationship found in the rows to `graph`.
    fn project_graph_into(&self, graph: &mut GraphBuilder<'_>);

    /// Column names declared by the payload itself, if any.
    fn header(&self) -> Option<HeaderColumns>;

    /// Display strings for each row, positionally aligned with the columns.
    fn display_rows(&self) -> Vec<Vec<String>>;
}

impl RawResponse {
    fn projector(&self) -> &dyn RowProjector {
        match self {
            Self::Transaction(result) => result,
            Self::Query(data) => data,
        }
    }
}

/// Projects the graph view with a fresh color map.
pub fn project_graph(raw: &RawResponse) -> GraphView {
    let mut colors = LabelColors::new();
    project_graph_with(raw, &mut colors)
}

/// Projects the graph view, assigning colors from `colors`.
pub fn project_graph_with(raw: &RawResponse, colors: &mut LabelColors) -> GraphView {
    let mut builder = GraphBuilder::new(colors);
    raw.projector().project_graph_into(&mut builder);
    builder.finish()
}

/// Projects the table view using the given column schema.
pub fn project_table(schema: &dyn ColumnSchemaSource, raw: &RawResponse) -> Result<TableView> {
    let names = schema.column_names()?;
    Ok(TableView::assemble(names, raw.projector().display_rows()))
}

/// Picks the payload's own header, or falls back to parsing `query`.
pub fn column_schema_for<'a>(
    raw: &RawResponse,
    query: &'a str,
) -> Box<dyn ColumnSchemaSource + 'a> {
    match raw.projector().header() {
        Some(header) => Box::new(header),
        None => Box::new(ReturnClauseColumns::new(query)),
    }
}
