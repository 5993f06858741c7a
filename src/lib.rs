//! IYP Explorer - query client and result projection for graph exploration.
//!
//! Sends Cypher queries to a Neo4j-compatible HTTP endpoint and reshapes the
//! response into a graph view and a table view.

pub mod assistant;
pub mod config;
pub mod error;
pub mod executor;
pub mod explorer;
pub mod logging;
pub mod projection;
pub mod schema;
pub mod wire;

pub use config::{Config, ProviderConfig};
pub use error::{ExplorerError, Result};
pub use explorer::{Explorer, ResultBundle};
pub use wire::{RawResponse, WireVariant};
