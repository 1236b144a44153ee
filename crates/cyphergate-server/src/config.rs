//! Command-line overrides for the gateway configuration.
//!
//! Every flag can also be set through the environment variable names the
//! gateway has always honored (NEO4J_URI, FASTMCP_PORT, ...). Flags win over
//! `cyphergate.toml` and `CYPHERGATE__` variables.

use clap::Parser;

use cyphergate_core::config::{GatewayConfig, Transport};

#[derive(Debug, Parser)]
#[command(name = "cyphergate")]
#[command(about = "MCP server exposing Cypher tools over a Neo4j graph")]
pub struct Cli {
    /// Config file prefix (default: cyphergate).
    #[arg(short, long, default_value = "cyphergate")]
    pub config: String,

    /// Neo4j connection URI.
    #[arg(long, env = "NEO4J_URI")]
    pub db_url: Option<String>,

    /// Neo4j user name.
    #[arg(long, env = "NEO4J_USERNAME")]
    pub username: Option<String>,

    /// Neo4j password.
    #[arg(long, env = "NEO4J_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Logical database to run every query against.
    #[arg(long, env = "NEO4J_DATABASE")]
    pub database: Option<String>,

    /// Transport: stdio or http.
    #[arg(long, env = "MCP_TRANSPORT")]
    pub transport: Option<Transport>,

    /// Bind host for the HTTP transport.
    #[arg(long, env = "FASTMCP_HOST")]
    pub host: Option<String>,

    /// Bind port for the HTTP transport.
    #[arg(long, env = "FASTMCP_PORT")]
    pub port: Option<u16>,

    /// Disable the write tool.
    #[arg(long)]
    pub read_only: bool,
}

impl Cli {
    /// Overlay the flags that were given onto `config`.
    pub fn apply(&self, mut config: GatewayConfig) -> GatewayConfig {
        if let Some(uri) = &self.db_url {
            config.neo4j.uri = uri.clone();
        }
        if let Some(user) = &self.username {
            config.neo4j.user = user.clone();
        }
        if let Some(password) = &self.password {
            config.neo4j.password = password.clone();
        }
        if let Some(database) = &self.database {
            config.neo4j.database = database.clone();
        }
        if let Some(transport) = self.transport {
            config.server.transport = transport;
        }
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if self.read_only {
            config.server.read_only = true;
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::parse_from([
            "cyphergate",
            "--db-url",
            "neo4j://db:7687",
            "--database",
            "movies",
            "--transport",
            "http",
            "--port",
            "9000",
            "--read-only",
        ]);
        let config = cli.apply(GatewayConfig::default());
        assert_eq!(config.neo4j.uri, "neo4j://db:7687");
        assert_eq!(config.neo4j.database, "movies");
        assert_eq!(config.server.transport, Transport::Http);
        assert_eq!(config.server.port, 9000);
        assert!(config.server.read_only);
    }

    #[test]
    fn test_absent_flags_keep_config() {
        let mut base = GatewayConfig::default();
        base.neo4j.user = "reader".to_string();
        base.server.host = "0.0.0.0".to_string();

        let cli = Cli {
            config: "cyphergate".to_string(),
            db_url: None,
            username: None,
            password: None,
            database: None,
            transport: None,
            host: None,
            port: None,
            read_only: false,
        };
        let config = cli.apply(base);
        assert_eq!(config.neo4j.user, "reader");
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.transport, Transport::Stdio);
        assert!(!config.server.read_only);
    }

    #[test]
    fn test_rejects_unknown_transport() {
        assert!(Cli::try_parse_from(["cyphergate", "--transport", "sse"]).is_err());
    }
}
