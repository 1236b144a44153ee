//! Neo4j connection management and the shared graph client.

use async_trait::async_trait;
use neo4rs::{ConfigBuilder, Graph};

use cyphergate_core::config::Neo4jSettings;
use cyphergate_core::{GatewayError, GraphStore, MutationSummary, Query, Record};

/// Errors from graph operations.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("Neo4j connection error: {0}")]
    Connection(String),

    #[error("{0}")]
    Query(#[from] neo4rs::Error),

    #[error("Conversion error: {0}")]
    Conversion(String),
}

impl From<GraphError> for GatewayError {
    fn from(err: GraphError) -> Self {
        GatewayError::Store(err.to_string())
    }
}

/// Configuration for connecting to Neo4j.
#[derive(Debug, Clone)]
pub struct GraphConfig {
    pub uri: String,
    pub user: String,
    pub password: String,
    pub database: String,
    pub max_connections: u32,
    pub fetch_size: usize,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Neo4jSettings::default().into()
    }
}

impl From<Neo4jSettings> for GraphConfig {
    fn from(settings: Neo4jSettings) -> Self {
        Self {
            uri: settings.uri,
            user: settings.user,
            password: settings.password,
            database: settings.database,
            max_connections: settings.max_connections,
            fetch_size: settings.fetch_size,
        }
    }
}

/// Thread-safe Neo4j graph client with connection pooling.
///
/// Every session it opens is scoped to the configured logical database.
/// Clone is cheap (inner Arc).
#[derive(Clone)]
pub struct GraphClient {
    graph: Graph,
    database: String,
}

impl GraphClient {
    /// Build the connection pool for the given configuration.
    ///
    /// No connection is opened here; the pool connects on first use. Use
    /// [`crate::health::wait_until_ready`] to confirm the server answers.
    pub fn connect(config: &GraphConfig) -> Result<Self, GraphError> {
        let neo_config = ConfigBuilder::default()
            .uri(&config.uri)
            .user(&config.user)
            .password(&config.password)
            .db(config.database.as_str())
            .max_connections(config.max_connections as usize)
            .fetch_size(config.fetch_size)
            .build()
            .map_err(|e| GraphError::Connection(e.to_string()))?;

        let graph =
            Graph::connect(neo_config).map_err(|e| GraphError::Connection(e.to_string()))?;

        tracing::info!(uri = %config.uri, database = %config.database, "Neo4j pool configured");
        Ok(Self {
            graph,
            database: config.database.clone(),
        })
    }

    /// Get a reference to the underlying neo4rs Graph for direct operations.
    pub fn inner(&self) -> &Graph {
        &self.graph
    }

    pub fn database(&self) -> &str {
        &self.database
    }
}

#[async_trait]
impl GraphStore for GraphClient {
    async fn execute_read(&self, query: &Query) -> cyphergate_core::Result<Vec<Record>> {
        Ok(self.read_records(query).await?)
    }

    async fn execute_write(&self, query: &Query) -> cyphergate_core::Result<MutationSummary> {
        Ok(self.write_summary(query).await?)
    }

    async fn ping(&self) -> cyphergate_core::Result<()> {
        self.graph
            .run(neo4rs::query("RETURN 1"))
            .await
            .map_err(GraphError::from)?;
        Ok(())
    }
}
