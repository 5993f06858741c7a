//! Query facade: executes a query and projects both view models.

use serde::Serialize;
use std::time::Instant;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::{ExplorerError, Result};
use crate::executor::{HttpExecutor, QueryExecutor};
use crate::projection::{column_schema_for, project_graph, project_table, GraphView, TableView};
use crate::wire::RawResponse;

/// Outcome of one query submission.
///
/// Either both views are present, or only `error` is. Absent parts are left
/// out when serialized.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultBundle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub graph: Option<GraphView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table: Option<TableView>,
    /// The provider's rejection message, verbatim.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ResultBundle {
    pub fn success(graph: GraphView, table: TableView) -> Self {
        Self {
            graph: Some(graph),
            table: Some(table),
            error: None,
        }
    }

    pub fn provider_error(message: impl Into<String>) -> Self {
        Self {
            graph: None,
            table: None,
            error: Some(message.into()),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Entry point used by the host UI.
pub struct Explorer {
    executor: Box<dyn QueryExecutor>,
}

impl Explorer {
    /// Creates an explorer over any executor.
    pub fn new(executor: Box<dyn QueryExecutor>) -> Self {
        Self { executor }
    }

    /// Creates an explorer talking HTTP to the configured provider.
    pub fn from_config(config: &Config) -> Result<Self> {
        info!("Using provider {}", config.provider.display_string());
        Ok(Self::new(Box::new(HttpExecutor::new(&config.provider)?)))
    }

    /// Executes `query` and returns the decoded payload without projecting it.
    pub async fn fetch(&self, query: &str) -> Result<RawResponse> {
        if query.trim().is_empty() {
            return Err(ExplorerError::query("Query is empty"));
        }
        self.executor.execute(query).await
    }

    /// Runs `query` and projects the graph and table views.
    ///
    /// Provider rejections come back as `Ok` with only `error` set. Network,
    /// timeout and malformed-response failures are returned as `Err`.
    pub async fn run(&self, query: &str) -> Result<ResultBundle> {
        let started = Instant::now();

        let raw = match self.fetch(query).await {
            Ok(raw) => raw,
            Err(ExplorerError::Provider(message)) => {
                warn!("Provider rejected query: {}", message);
                return Ok(ResultBundle::provider_error(message));
            }
            Err(e) => return Err(e),
        };

        let graph = project_graph(&raw);
        let schema = column_schema_for(&raw, query);
        let table = project_table(schema.as_ref(), &raw)?;

        info!(
            "Query returned {} rows ({} nodes, {} relationships) in {:?}",
            raw.row_count(),
            graph.nodes.len(),
            graph.relationships.len(),
            started.elapsed()
        );

        Ok(ResultBundle::success(graph, table))
    }
}
