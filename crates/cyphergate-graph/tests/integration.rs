//! Integration tests for cyphergate-graph against a live Neo4j instance.
//!
//! Connection settings come from NEO4J_URI / NEO4J_USERNAME / NEO4J_PASSWORD /
//! NEO4J_DATABASE, falling back to the gateway defaults.
//! Run with: cargo test --package cyphergate-graph --test integration -- --ignored
//!
//! Skipped automatically if Neo4j is not available.

use cyphergate_core::{GatewayError, GraphStore, GraphValue, Query, QueryExecutor};
use cyphergate_graph::{GraphClient, GraphConfig};

use std::sync::Arc;

fn test_config() -> GraphConfig {
    let mut config = GraphConfig::default();
    if let Ok(uri) = std::env::var("NEO4J_URI") {
        config.uri = uri;
    }
    if let Ok(user) = std::env::var("NEO4J_USERNAME") {
        config.user = user;
    }
    if let Ok(password) = std::env::var("NEO4J_PASSWORD") {
        config.password = password;
    }
    if let Ok(database) = std::env::var("NEO4J_DATABASE") {
        config.database = database;
    }
    config
}

async fn connect_or_skip() -> Option<GraphClient> {
    match GraphClient::connect(&test_config()) {
        Ok(client) => match client.ping().await {
            Ok(()) => Some(client),
            Err(e) => {
                eprintln!("Skipping integration test (Neo4j not answering): {e}");
                None
            }
        },
        Err(e) => {
            eprintln!("Skipping integration test (Neo4j not available): {e}");
            None
        }
    }
}

/// WARNING: deletes every Person node. Only run against a dedicated database.
async fn reset_people(client: &GraphClient) {
    let _ = client
        .execute_write(&Query::new("MATCH (n:Person) DETACH DELETE n"))
        .await;
}

async fn seed_people(client: &GraphClient) {
    reset_people(client).await;
    for (name, age) in [("Alice", 30), ("Bob", 25), ("Charlie", 35)] {
        client
            .execute_write(
                &Query::new("CREATE (:Person {name: $name, age: $age})")
                    .param("name", name)
                    .param("age", age),
            )
            .await
            .unwrap();
    }
    client
        .execute_write(&Query::new(
            "MATCH (a:Person {name: 'Alice'}), (b:Person {name: 'Bob'}) CREATE (a)-[:FRIEND]->(b)",
        ))
        .await
        .unwrap();
}

#[tokio::test]
#[ignore = "requires live Neo4j; run with: cargo test --package cyphergate-graph --test integration -- --ignored"]
async fn test_count_nodes_by_label() {
    let Some(client) = connect_or_skip().await else {
        return;
    };
    seed_people(&client).await;

    let records = client
        .execute_read(&Query::new("MATCH (n:Person) RETURN count(n) AS count"))
        .await
        .unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].len(), 1);
    assert_eq!(records[0].get("count").and_then(GraphValue::as_i64), Some(3));

    reset_people(&client).await;
}

#[tokio::test]
#[ignore = "requires live Neo4j"]
async fn test_write_reports_counters() {
    let Some(client) = connect_or_skip().await else {
        return;
    };
    reset_people(&client).await;

    let summary = client
        .execute_write(&Query::new("CREATE (:Person {name: 'Dana', age: 41})"))
        .await
        .unwrap();
    assert_eq!(summary.nodes_created, 1);
    assert_eq!(summary.labels_added, 1);
    assert_eq!(summary.properties_set, 2);
    assert!(summary.contains_updates);

    reset_people(&client).await;
}

#[tokio::test]
#[ignore = "requires live Neo4j"]
async fn test_read_transaction_refuses_writes() {
    let Some(client) = connect_or_skip().await else {
        return;
    };
    reset_people(&client).await;

    // Bypasses the executor's classification on purpose.
    let err = client
        .execute_read(&Query::new("CREATE (:Person {name: 'Ghost'}) RETURN 1"))
        .await
        .unwrap_err();
    assert!(matches!(err, GatewayError::Store(_)), "{err}");

    let records = client
        .execute_read(&Query::new("MATCH (n:Person {name: 'Ghost'}) RETURN count(n) AS count"))
        .await
        .unwrap();
    assert_eq!(records[0].get("count").and_then(GraphValue::as_i64), Some(0));
}

#[tokio::test]
#[ignore = "requires live Neo4j"]
async fn test_nodes_and_relationships_convert() {
    let Some(client) = connect_or_skip().await else {
        return;
    };
    seed_people(&client).await;

    let records = client
        .execute_read(&Query::new(
            "MATCH (a:Person {name: 'Alice'})-[r:FRIEND]->(b:Person) RETURN a, r, b.name AS friend",
        ))
        .await
        .unwrap();
    assert_eq!(records.len(), 1);

    let columns: Vec<_> = records[0].columns().iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(columns, vec!["a", "friend", "r"]);

    match records[0].get("a") {
        Some(GraphValue::Node(node)) => {
            assert_eq!(node.labels, vec!["Person".to_string()]);
            assert!(node
                .properties
                .iter()
                .any(|(k, v)| k == "name" && v.as_str() == Some("Alice")));
        }
        other => panic!("expected node, got {other:?}"),
    }
    match records[0].get("r") {
        Some(GraphValue::Relationship(rel)) => {
            assert_eq!(rel.rel_type, "FRIEND");
            assert!(rel.start.is_some() && rel.end.is_some());
        }
        other => panic!("expected relationship, got {other:?}"),
    }
    assert_eq!(records[0].get("friend").and_then(GraphValue::as_str), Some("Bob"));

    reset_people(&client).await;
}

#[tokio::test]
#[ignore = "requires live Neo4j"]
async fn test_parameters_are_bound() {
    let Some(client) = connect_or_skip().await else {
        return;
    };
    seed_people(&client).await;

    let executor = QueryExecutor::new(Arc::new(client.clone()));
    let records = executor
        .read(
            &Query::new("MATCH (n:Person) WHERE n.age > $min RETURN n.name AS name ORDER BY name")
                .param("min", 26),
        )
        .await
        .unwrap();
    let names: Vec<_> = records
        .iter()
        .filter_map(|r| r.get("name").and_then(GraphValue::as_str))
        .collect();
    assert_eq!(names, vec!["Alice", "Charlie"]);

    reset_people(&client).await;
}

#[tokio::test]
#[ignore = "requires live Neo4j"]
async fn test_temporal_values_are_iso_text() {
    let Some(client) = connect_or_skip().await else {
        return;
    };

    let records = client
        .execute_read(&Query::new(
            "RETURN date('2024-05-01') AS day, localdatetime('2024-05-01T08:30:00') AS at",
        ))
        .await
        .unwrap();
    assert_eq!(
        records[0].get("day"),
        Some(&GraphValue::Other("2024-05-01".to_string()))
    );
    assert_eq!(
        records[0].get("at"),
        Some(&GraphValue::Other("2024-05-01T08:30:00".to_string()))
    );
}
