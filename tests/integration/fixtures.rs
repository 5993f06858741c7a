//! Canned provider bodies shared by the integration tests.

/// The AS2497 → Name path as returned by the Query API.
pub const QUERY_API_AS_NAME_PATH: &str = r#"{
  "data": {
    "fields": ["p"],
    "values": [[{
      "$type": "Path",
      "_value": [
        {"$type": "Node", "_value": {
          "_element_id": "4:0a1b:2511",
          "_labels": ["AS"],
          "_properties": {"asn": {"$type": "Integer", "_value": "2497"}}
        }},
        {"$type": "Relationship", "_value": {
          "_element_id": "5:0a1b:90210",
          "_start_node_element_id": "4:0a1b:2511",
          "_end_node_element_id": "4:0a1b:7001",
          "_type": "NAME",
          "_properties": {
            "reference_org": {"$type": "String", "_value": "BGP.Tools"},
            "reference_time_fetch": {"$type": "OffsetDateTime", "_value": "2024-05-01T00:00:00Z"}
          }
        }},
        {"$type": "Node", "_value": {
          "_element_id": "4:0a1b:7001",
          "_labels": ["Name"],
          "_properties": {"name": {"$type": "String", "_value": "IIJ"}}
        }}
      ]
    }]]
  },
  "bookmarks": ["FB:kcwQ"]
}"#;

/// The same path as returned by the transaction API with row and graph data.
pub const TRANSACTION_API_AS_NAME_PATH: &str = r#"{
  "results": [{
    "columns": ["p"],
    "data": [{
      "row": [[{"asn": 2497}, {"reference_org": "BGP.Tools"}, {"name": "IIJ"}]],
      "meta": [[
        {"id": 2511, "elementId": "4:0a1b:2511", "type": "node", "deleted": false},
        {"id": 90210, "elementId": "5:0a1b:90210", "type": "relationship", "deleted": false},
        {"id": 7001, "elementId": "4:0a1b:7001", "type": "node", "deleted": false}
      ]],
      "graph": {
        "nodes": [
          {"id": "2511", "elementId": "4:0a1b:2511", "labels": ["AS"], "properties": {"asn": 2497}},
          {"id": "7001", "elementId": "4:0a1b:7001", "labels": ["Name"], "properties": {"name": "IIJ"}}
        ],
        "relationships": [{
          "id": "90210", "elementId": "5:0a1b:90210", "type": "NAME",
          "startNode": "2511", "endNode": "7001",
          "startNodeElementId": "4:0a1b:2511", "endNodeElementId": "4:0a1b:7001",
          "properties": {"reference_org": "BGP.Tools"}
        }]
      }
    }]
  }],
  "errors": []
}"#;

/// A Query API syntax error (sent with HTTP 400).
pub const QUERY_API_SYNTAX_ERROR: &str = r#"{"errors":[{"code":"Neo.ClientError.Statement.SyntaxError","message":"Invalid input 'RETRN': expected 'RETURN' (line 1, column 33 (offset: 32))"}]}"#;

/// A transaction API syntax error (sent with HTTP 200).
pub const TRANSACTION_API_SYNTAX_ERROR: &str = r#"{"results":[],"errors":[{"code":"Neo.ClientError.Statement.SyntaxError","message":"Invalid input 'RETRN'"}]}"#;

/// Two rows mentioning the same AS node.
pub const QUERY_API_REPEATED_NODE: &str = r#"{"data":{"fields":["a","cc"],"values":[
  [{"$type":"Node","_value":{"_element_id":"4:0a1b:2511","_labels":["AS"],"_properties":{"asn":{"$type":"Integer","_value":"2497"}}}},{"$type":"String","_value":"JP"}],
  [{"$type":"Node","_value":{"_element_id":"4:0a1b:2511","_labels":["AS"],"_properties":{"asn":{"$type":"Integer","_value":"2497"}}}},{"$type":"String","_value":"US"}]
]}}"#;
