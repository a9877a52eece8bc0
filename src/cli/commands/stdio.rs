//! Stdio MCP command implementation.

use crate::config::Settings;
use crate::mcp::McpServer;
use crate::transcript::TranscriptService;
use anyhow::Result;

/// Run the MCP server on stdin/stdout.
pub async fn run_stdio(settings: Settings) -> Result<()> {
    let service = TranscriptService::from_settings(&settings)?;
    let server = McpServer::new(settings, service);
    server.run().await
}
