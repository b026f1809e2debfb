//! MCP server handler implementation.
//!
//! This module defines the main server handler that
//! routes tool calls to the appropriate implementations.
use crate::tools::fetch_web_content::{FetchWebContentParams, fetch_impl};
use crate::tools::query_docs::{QueryDocsParams, query_impl};

use std::sync::Arc;

use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::{
        tool::{ToolCallContext, ToolRouter},
        wrapper::Parameters,
    },
    model::{
        CallToolRequestParam, CallToolResult, Implementation, ListToolsResult, PaginatedRequestParam, ProtocolVersion,
        ServerCapabilities, ServerInfo,
    },
    service::{RequestContext, RoleServer},
    tool, tool_router,
};
use sourcetap_client::{DownloadClient, FetchConfig, ReaderClient};
use sourcetap_core::{AppConfig, CacheDb, Error};

/// The main MCP server handler for sourcetap.
#[derive(Clone)]
pub struct SourceTapServer {
    db: CacheDb,
    reader: Arc<ReaderClient>,
    downloader: Arc<DownloadClient>,
    max_results: usize,
    tool_router: ToolRouter<Self>,
}

/// Tool router implementation using the #[tool_router] macro.
///
/// This macro generates the routing logic that maps tool names to handler methods.
#[tool_router]
impl SourceTapServer {
    /// Create a new server handler sharing one cache handle.
    pub fn new(config: AppConfig, db: CacheDb) -> Result<Self, Error> {
        let fetch_config = FetchConfig {
            user_agent: config.user_agent.clone(),
            reader_base_url: config.reader_base_url.clone(),
            timeout: config.timeout(),
        };

        let reader = Arc::new(ReaderClient::new(fetch_config.clone())?);
        let downloader = Arc::new(DownloadClient::new(&fetch_config)?);

        Ok(Self {
            db,
            reader,
            downloader,
            max_results: config.max_results,
            tool_router: Self::tool_router(),
        })
    }

    /// Download rendered page content through the reader proxy.
    ///
    /// Transport errors and timeouts surface as tool-call failures.
    #[tool(description = "Download content of any web page using the Jina reader proxy. Returns the rendered page text.")]
    async fn fetch_web_content(&self, params: Parameters<FetchWebContentParams>) -> Result<CallToolResult, McpError> {
        fetch_impl(&self.reader, params.0).await
    }

    /// Index and search markdown documentation from a ZIP archive URL.
    ///
    /// All pipeline failures degrade to a textual diagnostic; this tool
    /// never returns a protocol-level error.
    #[tool(description = "Index and search documentation from a ZIP archive URL (e.g. a GitHub archive). Returns up to five matching markdown files.")]
    async fn query_docs(&self, params: Parameters<QueryDocsParams>) -> Result<CallToolResult, McpError> {
        query_impl(&self.db, self.downloader.as_ref(), self.max_results, params.0).await
    }
}

impl ServerHandler for SourceTapServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: "sourcetap".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self, _request: Option<PaginatedRequestParam>, _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, rmcp::model::ErrorData> {
        Ok(ListToolsResult { meta: None, tools: self.tool_router.list_all(), next_cursor: None })
    }

    async fn call_tool(
        &self, request: CallToolRequestParam, context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, rmcp::model::ErrorData> {
        self.tool_router
            .call(ToolCallContext::new(self, request, context))
            .await
    }
}
