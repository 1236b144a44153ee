//! CLI entry point for the cyphergate MCP server.

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use cyphergate_core::config::{GatewayConfig, Transport};
use cyphergate_graph::{wait_until_ready, GraphClient, GraphConfig};
use cyphergate_server::config::Cli;
use cyphergate_server::{CypherServer, GatewayTools};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdout belongs to the stdio transport.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .json()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.apply(GatewayConfig::load(&cli.config)?);
    tracing::info!("Starting cyphergate MCP server");

    let graph_config = GraphConfig::from(config.neo4j.clone());
    let graph = GraphClient::connect(&graph_config)?;

    let attempts = wait_until_ready(&graph, &config.health).await?;
    tracing::info!(attempts, "Neo4j ready");

    let tools = GatewayTools::new(Arc::new(graph), config.server.read_only);
    let server = CypherServer::new(tools);

    match config.server.transport {
        Transport::Stdio => server.serve_stdio().await?,
        Transport::Http => {
            server
                .serve_http(&config.server.host, config.server.port, &config.server.path)
                .await?
        }
    }

    Ok(())
}
