//! Configuration management for the gateway.
//!
//! Configuration is loaded from (in priority order):
//! 1. Environment variables (CYPHERGATE__ prefix, `__` separated)
//! 2. Config file (cyphergate.toml, or any prefix passed to [`GatewayConfig::load`])
//! 3. Defaults
//!
//! Command-line flags are applied on top by the binary.

use std::time::Duration;

use serde::Deserialize;

use crate::error::Result;

/// Top-level gateway configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GatewayConfig {
    #[serde(default)]
    pub neo4j: Neo4jSettings,

    #[serde(default)]
    pub server: ServerSettings,

    #[serde(default)]
    pub health: HealthSettings,
}

/// Connection settings for the backing Neo4j instance.
#[derive(Debug, Clone, Deserialize)]
pub struct Neo4jSettings {
    #[serde(default = "default_uri")]
    pub uri: String,

    #[serde(default = "default_user")]
    pub user: String,

    #[serde(default = "default_password")]
    pub password: String,

    /// Logical database every session is scoped to.
    #[serde(default = "default_database")]
    pub database: String,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    #[serde(default = "default_fetch_size")]
    pub fetch_size: usize,
}

/// How the MCP server is exposed.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Transport {
    #[default]
    Stdio,
    Http,
}

impl std::str::FromStr for Transport {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "stdio" => Ok(Self::Stdio),
            "http" | "streamable-http" => Ok(Self::Http),
            _ => Err(format!("Invalid transport: {s}. Choose: stdio, http")),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default)]
    pub transport: Transport,

    /// Bind host for the HTTP transport.
    #[serde(default = "default_host")]
    pub host: String,

    /// Bind port for the HTTP transport.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Mount path of the MCP endpoint for the HTTP transport.
    #[serde(default = "default_path")]
    pub path: String,

    /// Refuse the write tool.
    #[serde(default)]
    pub read_only: bool,
}

/// Startup connectivity probe.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthSettings {
    #[serde(default = "default_attempts")]
    pub attempts: u32,

    #[serde(default = "default_initial_wait")]
    pub initial_wait_secs: u64,

    /// Unit of the growing backoff; the n-th failure waits `(1 + n) * unit`.
    #[serde(default = "default_backoff")]
    pub backoff_secs: u64,
}

impl HealthSettings {
    pub fn initial_wait(&self) -> Duration {
        Duration::from_secs(self.initial_wait_secs)
    }

    pub fn backoff_unit(&self) -> Duration {
        Duration::from_secs(self.backoff_secs)
    }
}

impl GatewayConfig {
    /// Load configuration from an optional file named `file_prefix` and
    /// `CYPHERGATE__` environment variables.
    pub fn load(file_prefix: &str) -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::File::with_name(file_prefix).required(false))
            .add_source(
                config::Environment::with_prefix("CYPHERGATE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(cfg.try_deserialize()?)
    }
}

fn default_uri() -> String {
    "bolt://localhost:7687".to_string()
}

fn default_user() -> String {
    "neo4j".to_string()
}

fn default_password() -> String {
    "password".to_string()
}

fn default_database() -> String {
    "neo4j".to_string()
}

fn default_max_connections() -> u32 {
    16
}

fn default_fetch_size() -> usize {
    256
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_path() -> String {
    "/mcp".to_string()
}

fn default_attempts() -> u32 {
    3
}

fn default_initial_wait() -> u64 {
    3
}

fn default_backoff() -> u64 {
    2
}

impl Default for Neo4jSettings {
    fn default() -> Self {
        Self {
            uri: default_uri(),
            user: default_user(),
            password: default_password(),
            database: default_database(),
            max_connections: default_max_connections(),
            fetch_size: default_fetch_size(),
        }
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            transport: Transport::default(),
            host: default_host(),
            port: default_port(),
            path: default_path(),
            read_only: false,
        }
    }
}

impl Default for HealthSettings {
    fn default() -> Self {
        Self {
            attempts: default_attempts(),
            initial_wait_secs: default_initial_wait(),
            backoff_secs: default_backoff(),
        }
    }
}
