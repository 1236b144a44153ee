//! cyphergate-core: query model, classification, execution, and result
//! normalization for the cyphergate MCP gateway.
//!
//! This crate provides everything the tool layer needs that does not depend
//! on a concrete database driver:
//! - The query and graph value model
//! - Read/write classification of Cypher text
//! - The intent-checked executor over the [`GraphStore`] capability
//! - JSON normalization of records
//! - Configuration management
//! - Common error types

pub mod classify;
pub mod config;
pub mod error;
pub mod executor;
pub mod normalize;
pub mod store;
pub mod types;

pub use classify::classify;
pub use error::{GatewayError, Result};
pub use executor::QueryExecutor;
pub use store::GraphStore;
pub use types::{
    ExecutionResult, GraphNode, GraphPath, GraphRelationship, GraphValue, MutationSummary, Query,
    QueryIntent, Record,
};
