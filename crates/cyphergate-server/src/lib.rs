//! cyphergate-server: MCP tools over a Neo4j graph.
//!
//! Exposes a fixed set of Cypher tools through rmcp, dispatching each call
//! through the core executor and normalizer.

pub mod config;
pub mod error;
pub mod registry;
pub mod server;
pub mod tools;

pub use server::CypherServer;
pub use tools::{GatewayTools, ToolOutput};
