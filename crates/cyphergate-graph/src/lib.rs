//! cyphergate-graph: Neo4j client for the gateway.
//!
//! Implements the core [`GraphStore`](cyphergate_core::GraphStore) capability
//! on top of `neo4rs`: reads run in transactions that are rolled back after
//! the rows are drained, writes run in committed transactions that report
//! update counters. Also provides the startup connectivity guard.

pub mod client;
pub mod convert;
pub mod health;
pub mod mutations;
pub mod queries;

pub use client::{GraphClient, GraphConfig, GraphError};
pub use health::{wait_until_ready, ConnectivityGuard};
