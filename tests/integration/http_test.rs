//! `HttpExecutor` against a local stub provider.

use iyp_explorer::executor::{HttpExecutor, QueryExecutor};
use iyp_explorer::{Explorer, ExplorerError, ProviderConfig, WireVariant};
use pretty_assertions::assert_eq;
use std::time::Duration;

use super::fixtures::*;
use super::stub::{serve, serve_silently};

fn request_body(raw: &str) -> serde_json::Value {
    let (_, body) = raw.split_once("\r\n\r\n").unwrap();
    serde_json::from_str(body).unwrap()
}

#[tokio::test]
async fn test_query_api_request_and_projection() {
    let server = serve(200, QUERY_API_AS_NAME_PATH).await;
    let config = ProviderConfig::new(WireVariant::Query).with_base_url(server.url.clone());
    let explorer = Explorer::new(Box::new(HttpExecutor::new(&config).unwrap()));

    let query = "MATCH p = (:AS {asn:2497})--(:Name) RETURN p";
    let bundle = explorer.run(query).await.unwrap();

    assert_eq!(bundle.graph.as_ref().unwrap().nodes.len(), 2);
    assert_eq!(bundle.table.as_ref().unwrap().rows.len(), 1);

    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    let head = requests[0].to_lowercase();
    assert!(head.starts_with("post /db/neo4j/query/v2"));
    assert!(head.contains("accept: application/vnd.neo4j.query"));
    assert_eq!(request_body(&requests[0]), serde_json::json!({ "statement": query }));
}

#[tokio::test]
async fn test_transaction_api_request_envelope() {
    let server = serve(200, TRANSACTION_API_AS_NAME_PATH).await;
    let config = ProviderConfig::new(WireVariant::Transaction).with_base_url(server.url.clone());
    let executor = HttpExecutor::new(&config).unwrap();

    let raw = executor.execute("MATCH p = (:AS)--(:Name) RETURN p").await.unwrap();
    assert_eq!(raw.variant(), WireVariant::Transaction);
    assert_eq!(raw.row_count(), 1);

    let body = request_body(&server.requests()[0]);
    assert_eq!(
        body["statements"][0]["statement"],
        "MATCH p = (:AS)--(:Name) RETURN p"
    );
    assert_eq!(
        body["statements"][0]["resultDataContents"],
        serde_json::json!(["row", "graph"])
    );
}

#[tokio::test]
async fn test_provider_rejection_is_reported_in_bundle() {
    let server = serve(400, QUERY_API_SYNTAX_ERROR).await;
    let config = ProviderConfig::new(WireVariant::Query).with_base_url(server.url.clone());
    let explorer = Explorer::new(Box::new(HttpExecutor::new(&config).unwrap()));

    let bundle = explorer.run("MATCH (a:AS) RETRN a").await.unwrap();
    assert!(bundle.is_error());
    assert!(bundle.error.unwrap().starts_with("Invalid input 'RETRN'"));
    assert!(bundle.graph.is_none());
}

#[tokio::test]
async fn test_server_error_without_payload_is_transport_error() {
    let server = serve(502, "Bad Gateway").await;
    let config = ProviderConfig::new(WireVariant::Query).with_base_url(server.url.clone());
    let executor = HttpExecutor::new(&config).unwrap();

    let err = executor.execute("RETURN 1").await.unwrap_err();
    assert!(
        matches!(err, ExplorerError::Transport(_)),
        "Expected Transport error, got {err:?}"
    );
}

#[tokio::test]
async fn test_silent_provider_times_out() {
    let url = serve_silently().await;
    let config = ProviderConfig::new(WireVariant::Query)
        .with_base_url(url)
        .with_timeout_ms(200);
    let executor = HttpExecutor::new(&config).unwrap();

    let err = executor.execute("RETURN 1").await.unwrap_err();
    match err {
        ExplorerError::Timeout(after) => assert_eq!(after, Duration::from_millis(200)),
        other => panic!("Expected Timeout error, got {other:?}"),
    }
}
