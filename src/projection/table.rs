//! Table view model: a column schema plus display-ready rows.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use tracing::warn;

/// Name of the synthetic row-number column.
pub const INDEX_COLUMN: &str = "index";

/// A column definition for the grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableColumn {
    pub name: String,
    pub label: String,
    pub field: String,
    pub align: String,
}

impl TableColumn {
    /// A left-aligned column whose name, label and field are all `name`.
    pub fn returned(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            label: name.clone(),
            field: name.clone(),
            name,
            align: "left".to_string(),
        }
    }

    /// The leading 1-based row number column.
    pub fn index() -> Self {
        Self {
            name: INDEX_COLUMN.to_string(),
            label: "#".to_string(),
            field: INDEX_COLUMN.to_string(),
            align: "left".to_string(),
        }
    }
}

/// One grid row. Serializes as an object keyed by column name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    /// 1-based position of the row in the provider response.
    pub index: usize,
    /// `(column name, display string)` pairs in column order.
    pub cells: Vec<(String, String)>,
}

impl TableRow {
    /// Looks up a cell's display string by column name.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value.as_str())
    }

    /// Number of fields including the index.
    pub fn field_count(&self) -> usize {
        self.cells.len() + 1
    }
}

impl Serialize for TableRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.field_count()))?;
        map.serialize_entry(INDEX_COLUMN, &self.index)?;
        for (name, value) in &self.cells {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Columns and rows of one result set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TableView {
    pub columns: Vec<TableColumn>,
    pub rows: Vec<TableRow>,
}

impl TableView {
    /// Pairs returned column names with per-row display strings.
    ///
    /// Without returned columns the table is empty, index column included.
    /// Rows whose arity differs from the header are dropped; their index
    /// number is not reused.
    pub fn assemble(names: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        if names.is_empty() {
            return Self::default();
        }

        let table_rows = rows
            .into_iter()
            .enumerate()
            .filter_map(|(position, values)| {
                let index = position + 1;
                if values.len() != names.len() {
                    warn!(
                        "Dropping row {}: {} values for {} columns",
                        index,
                        values.len(),
                        names.len()
                    );
                    return None;
                }
                Some(TableRow {
                    index,
                    cells: names.iter().cloned().zip(values).collect(),
                })
            })
            .collect();

        let columns = std::iter::once(TableColumn::index())
            .chain(names.into_iter().map(TableColumn::returned))
            .collect();

        Self {
            columns,
            rows: table_rows,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
