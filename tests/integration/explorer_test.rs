//! End-to-end runs through `Explorer` backed by `MockExecutor`.

use iyp_explorer::executor::{MockExecutor, MockReply};
use iyp_explorer::projection::INDEX_COLUMN;
use iyp_explorer::{Explorer, ExplorerError, WireVariant};
use pretty_assertions::assert_eq;
use std::time::Duration;

use super::fixtures::*;

const AS_NAME_QUERY: &str = "MATCH p = (:AS {asn:2497})--(:Name) RETURN p";

fn column_names(bundle: &iyp_explorer::ResultBundle) -> Vec<String> {
    bundle
        .table
        .as_ref()
        .unwrap()
        .columns
        .iter()
        .map(|c| c.name.clone())
        .collect()
}

#[tokio::test]
async fn test_as_name_path_query_api() {
    let mock =
        MockExecutor::new(WireVariant::Query).with_response("asn:2497", QUERY_API_AS_NAME_PATH);
    let explorer = Explorer::new(Box::new(mock));

    let bundle = explorer.run(AS_NAME_QUERY).await.unwrap();
    assert!(!bundle.is_error());

    let graph = bundle.graph.as_ref().unwrap();
    assert_eq!(graph.nodes.len(), 2);
    assert_eq!(graph.relationships.len(), 1);

    let as_node = graph.node("4:0a1b:2511").unwrap();
    assert_eq!(as_node.node_type, "AS");
    assert_eq!(as_node.caption, "2497");
    assert!(!as_node.selected);

    let name_node = graph.node("4:0a1b:7001").unwrap();
    assert_eq!(name_node.node_type, "Name");
    assert_eq!(name_node.caption, "IIJ");
    assert_ne!(as_node.color, name_node.color);

    let rel = &graph.relationships[0];
    assert_eq!(rel.from, "4:0a1b:2511");
    assert_eq!(rel.to, "4:0a1b:7001");
    assert_eq!(rel.rel_type, "NAME");
    assert_eq!(rel.caption, "NAME");

    let table = bundle.table.as_ref().unwrap();
    assert_eq!(column_names(&bundle), vec![INDEX_COLUMN.to_string(), "p".to_string()]);
    assert_eq!(table.rows.len(), 1);
    assert_eq!(table.rows[0].index, 1);

    let cell = table.rows[0].get("p").unwrap();
    assert!(cell.contains("IIJ"));
    assert!(cell.contains("2497"));
    assert!(!cell.contains("BGP.Tools"));
}

#[tokio::test]
async fn test_as_name_path_transaction_api() {
    let mock = MockExecutor::new(WireVariant::Transaction)
        .with_response("asn:2497", TRANSACTION_API_AS_NAME_PATH);
    let explorer = Explorer::new(Box::new(mock));

    let bundle = explorer.run(AS_NAME_QUERY).await.unwrap();
    let graph = bundle.graph.as_ref().unwrap();

    assert_eq!(graph.nodes.len(), 2);
    assert_eq!(graph.relationships.len(), 1);
    assert_eq!(graph.relationships[0].from, graph.nodes[0].id);
    assert_eq!(graph.relationships[0].to, graph.nodes[1].id);

    let table = bundle.table.as_ref().unwrap();
    assert_eq!(column_names(&bundle), vec![INDEX_COLUMN.to_string(), "p".to_string()]);
    assert_eq!(table.rows.len(), 1);

    let cell = table.rows[0].get("p").unwrap();
    assert!(cell.contains("IIJ"));
    assert!(!cell.contains("BGP.Tools"));
}

#[tokio::test]
async fn test_repeated_node_is_drawn_once() {
    let mock = MockExecutor::new(WireVariant::Query)
        .with_response("RETURN a, cc", QUERY_API_REPEATED_NODE);
    let explorer = Explorer::new(Box::new(mock));

    let bundle = explorer
        .run("MATCH (a:AS)-[:COUNTRY]-(c:Country) RETURN a, cc")
        .await
        .unwrap();

    assert_eq!(bundle.graph.as_ref().unwrap().nodes.len(), 1);

    let table = bundle.table.as_ref().unwrap();
    assert_eq!(table.rows.len(), 2);
    assert_eq!(table.rows[0].get("cc"), Some(r#""JP""#));
    assert_eq!(table.rows[1].get("cc"), Some(r#""US""#));
    assert_eq!(table.rows[1].index, 2);
}

#[tokio::test]
async fn test_provider_error_is_isolated_per_query() {
    let mock = MockExecutor::new(WireVariant::Transaction)
        .with_response("RETRN", TRANSACTION_API_SYNTAX_ERROR)
        .with_response("asn:2497", TRANSACTION_API_AS_NAME_PATH);
    let explorer = Explorer::new(Box::new(mock));

    let failed = explorer.run("MATCH (a:AS) RETRN a").await.unwrap();
    assert_eq!(failed.error.as_deref(), Some("Invalid input 'RETRN'"));
    assert!(failed.graph.is_none());
    assert!(failed.table.is_none());

    let next = explorer.run(AS_NAME_QUERY).await.unwrap();
    assert!(!next.is_error());
    assert_eq!(next.graph.unwrap().nodes.len(), 2);
}

#[tokio::test]
async fn test_transport_failures_are_errors() {
    let mock = MockExecutor::new(WireVariant::Query)
        .with_reply("slow", MockReply::Timeout(Duration::from_millis(50)))
        .with_fallback(MockReply::Unreachable);
    let explorer = Explorer::new(Box::new(mock));

    let timeout = explorer.run("MATCH (slow) RETURN slow").await.unwrap_err();
    assert!(matches!(timeout, ExplorerError::Timeout(_)));
    assert!(timeout.is_retryable());

    let unreachable = explorer.run("RETURN 1").await.unwrap_err();
    assert!(matches!(unreachable, ExplorerError::Transport(_)));
}

#[tokio::test]
async fn test_malformed_body_is_error() {
    let mock = MockExecutor::new(WireVariant::Query)
        .with_fallback(MockReply::ok("<html>gateway</html>"));
    let explorer = Explorer::new(Box::new(mock));

    let err = explorer.run("RETURN 1").await.unwrap_err();
    assert!(matches!(err, ExplorerError::MalformedResponse(_)));
}

#[tokio::test]
async fn test_bundle_serializes_for_host() {
    let mock =
        MockExecutor::new(WireVariant::Query).with_response("asn:2497", QUERY_API_AS_NAME_PATH);
    let explorer = Explorer::new(Box::new(mock));

    let bundle = explorer.run(AS_NAME_QUERY).await.unwrap();
    let json = serde_json::to_value(&bundle).unwrap();

    assert!(json.get("error").is_none());
    assert_eq!(json["graph"]["nodes"][0]["type"], "AS");
    assert_eq!(json["graph"]["relationships"][0]["type"], "NAME");
    assert_eq!(json["table"]["columns"][0]["name"], "index");
    assert_eq!(json["table"]["columns"][1]["align"], "left");
    assert_eq!(json["table"]["rows"][0]["index"], 1);
}
