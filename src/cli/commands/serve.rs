//! HTTP MCP server command.

use crate::cli::Output;
use crate::config::Settings;
use crate::http::{self, AppState};
use crate::transcript::TranscriptService;
use std::sync::Arc;

/// Run the HTTP transport.
pub async fn run_serve(host: Option<&str>, port: Option<u16>, settings: Settings) -> anyhow::Result<()> {
    let host = host.unwrap_or(&settings.server.host).to_string();
    let port = port.unwrap_or(settings.server.port);
    let auth_enabled = settings.auth.is_enabled();
    let name = settings.server.name.clone();

    let service = TranscriptService::from_settings(&settings)?;
    let state = Arc::new(AppState::new(settings, service)?);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    Output::header(&name);
    Output::success(&format!("Listening on http://{}", addr));
    eprintln!();
    eprintln!("Endpoints:");
    Output::kv("Health", "GET  /");
    Output::kv("MCP", "POST /mcp");
    if auth_enabled {
        Output::kv("Metadata", "GET  /.well-known/oauth-authorization-server");
        Output::kv("Token", "POST /oauth/token");
        Output::kv("Revoke", "POST /oauth/revoke");
    }
    Output::kv(
        "Authentication",
        if auth_enabled { "Enabled" } else { "Disabled" },
    );
    eprintln!();
    Output::info("Press Ctrl+C to stop the server.");

    http::serve(listener, state).await?;
    Output::info("Server stopped.");

    Ok(())
}
