//! Where the table's column names come from.

use regex::Regex;
use std::sync::OnceLock;

use crate::error::{ExplorerError, Result};

/// Supplies the names of the returned columns, in order.
pub trait ColumnSchemaSource {
    fn column_names(&self) -> Result<Vec<String>>;
}

/// Column names the provider declared explicitly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderColumns(Vec<String>);

impl HeaderColumns {
    pub fn new(names: Vec<String>) -> Self {
        Self(names)
    }
}

impl ColumnSchemaSource for HeaderColumns {
    fn column_names(&self) -> Result<Vec<String>> {
        Ok(self.0.clone())
    }
}

/// Degraded fallback that reads column names out of the query text.
///
/// Takes everything after the last `RETURN` keyword and splits it on commas.
/// Commas inside function calls, maps or list literals, trailing `ORDER BY`
/// and `LIMIT` clauses, and `AS` aliases all produce wrong names. Only used
/// when the provider sends no header.
#[derive(Debug, Clone, Copy)]
pub struct ReturnClauseColumns<'a> {
    query: &'a str,
}

impl<'a> ReturnClauseColumns<'a> {
    pub fn new(query: &'a str) -> Self {
        Self { query }
    }
}

fn return_keyword() -> Result<&'static Regex> {
    static RETURN_KEYWORD: OnceLock<std::result::Result<Regex, regex::Error>> = OnceLock::new();
    RETURN_KEYWORD
        .get_or_init(|| Regex::new(r"(?i)\bRETURN\b"))
        .as_ref()
        .map_err(|e| ExplorerError::internal(format!("Invalid RETURN pattern: {e}")))
}

impl ColumnSchemaSource for ReturnClauseColumns<'_> {
    fn column_names(&self) -> Result<Vec<String>> {
        let Some(keyword) = return_keyword()?.find_iter(self.query).last() else {
            return Ok(Vec::new());
        };

        Ok(self.query[keyword.end()..]
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(String::from)
            .collect())
    }
}
