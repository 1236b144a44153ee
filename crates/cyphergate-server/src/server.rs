//! MCP server adapter over rmcp.
//!
//! Serves `tools/list` from the static registry and forwards `tools/call`
//! to [`GatewayTools`]. Two transports: stdio and streamable HTTP.

use std::sync::Arc;

use rmcp::model::{
    CallToolRequestParam, CallToolResult, Content, Implementation, ListToolsResult,
    PaginatedRequestParam, ServerCapabilities, ServerInfo, Tool,
};
use rmcp::service::RequestContext;
use rmcp::transport::streamable_http_server::session::local::LocalSessionManager;
use rmcp::transport::streamable_http_server::{StreamableHttpServerConfig, StreamableHttpService};
use rmcp::{ErrorData as McpError, RoleServer, ServerHandler, ServiceExt};

use crate::error::{Result, ServerError};
use crate::registry::{ToolDescriptor, TOOLS};
use crate::tools::GatewayTools;

/// The gateway's MCP server. Clone is cheap.
#[derive(Clone)]
pub struct CypherServer {
    tools: GatewayTools,
}

impl CypherServer {
    pub fn new(tools: GatewayTools) -> Self {
        Self { tools }
    }

    /// Serve on stdin/stdout until the client disconnects.
    pub async fn serve_stdio(self) -> Result<()> {
        tracing::info!("Serving MCP over stdio");
        let service = self
            .serve(rmcp::transport::stdio())
            .await
            .map_err(|e| ServerError::Transport(e.to_string()))?;
        service
            .waiting()
            .await
            .map_err(|e| ServerError::Transport(e.to_string()))?;
        Ok(())
    }

    /// Serve streamable HTTP on `host:port`, mounted at `path`, until Ctrl-C.
    pub async fn serve_http(self, host: &str, port: u16, path: &str) -> Result<()> {
        let service = StreamableHttpService::new(
            move || Ok(self.clone()),
            LocalSessionManager::default().into(),
            StreamableHttpServerConfig::default(),
        );

        let router = if path.is_empty() || path == "/" {
            axum::Router::new().fallback_service(service)
        } else {
            axum::Router::new().nest_service(path, service)
        };

        let listener = tokio::net::TcpListener::bind((host, port)).await?;
        tracing::info!(%host, port, %path, "Serving MCP over streamable HTTP");

        axum::serve(listener, router)
            .with_graceful_shutdown(async {
                let _ = tokio::signal::ctrl_c().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;
        Ok(())
    }
}

fn to_mcp_tool(descriptor: &ToolDescriptor) -> Tool {
    Tool::new(
        descriptor.name,
        descriptor.description,
        Arc::new(descriptor.input_schema()),
    )
}

impl ServerHandler for CypherServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Cypher tools over a Neo4j graph. Call get_graph_labels first: label arguments \
                 of the other tools must be labels it returned."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: env!("CARGO_PKG_NAME").into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListToolsResult, McpError> {
        Ok(ListToolsResult::with_all_items(
            TOOLS.iter().map(to_mcp_tool).collect(),
        ))
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<CallToolResult, McpError> {
        let output = self
            .tools
            .call(&request.name, request.arguments.unwrap_or_default())
            .await;

        let content = vec![Content::text(output.text)];
        Ok(if output.is_error {
            CallToolResult::error(content)
        } else {
            CallToolResult::success(content)
        })
    }
}
