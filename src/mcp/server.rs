//! MCP server implementation.

use super::protocol::*;
use super::tools::{
    get_resources, get_tools, server_info, GetTranscriptArgs, ListTranscriptsArgs,
    GET_TRANSCRIPT, LIST_TRANSCRIPTS, SERVER_INFO_URI,
};
use crate::config::Settings;
use crate::transcript::{FormattingOptions, TranscriptService};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, info, warn};

const PROTOCOL_VERSION: &str = "2024-11-05";

/// MCP server exposing the transcript tools.
///
/// Stateless between requests, so one instance can serve the stdio loop or be
/// shared across HTTP handlers.
pub struct McpServer {
    settings: Settings,
    service: TranscriptService,
}

impl McpServer {
    pub fn new(settings: Settings, service: TranscriptService) -> Self {
        Self { settings, service }
    }

    /// Run the MCP server (reads from stdin, writes to stdout).
    pub async fn run(&self) -> anyhow::Result<()> {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut stdout = tokio::io::stdout();

        // Logs go to stderr so they don't interfere with JSON-RPC
        info!("{} MCP server starting on stdio", self.settings.server.name);

        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }

            if let Some(response) = self.handle_message(&line).await {
                let mut payload = serde_json::to_string(&response)?;
                payload.push('\n');
                stdout.write_all(payload.as_bytes()).await?;
                stdout.flush().await?;
            }
        }

        info!("stdin closed, shutting down");
        Ok(())
    }

    /// Handle one raw JSON-RPC message. Notifications yield no response.
    pub async fn handle_message(&self, raw: &str) -> Option<JsonRpcResponse> {
        match serde_json::from_str::<JsonRpcRequest>(raw) {
            Ok(request) => self.handle_request(request).await,
            Err(e) => {
                warn!("Failed to parse request: {}", e);
                Some(JsonRpcResponse::error(None, PARSE_ERROR, "Parse error"))
            }
        }
    }

    /// Handle a single JSON-RPC request.
    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        debug!("Handling {}", request.method);

        if request.jsonrpc != "2.0" {
            return Some(JsonRpcResponse::error(
                request.id,
                INVALID_REQUEST,
                "Invalid Request: jsonrpc must be \"2.0\"",
            ));
        }

        if request.is_notification() {
            // initialized, cancelled, etc. need no answer
            return None;
        }

        let response = match request.method.as_str() {
            "initialize" => self.handle_initialize(request.id, request.params),
            "ping" => JsonRpcResponse::success(request.id, json!({})),
            "tools/list" => self.handle_tools_list(request.id),
            "tools/call" => self.handle_tools_call(request.id, request.params).await,
            "resources/list" => self.handle_resources_list(request.id),
            "resources/read" => self.handle_resources_read(request.id, request.params),
            _ => JsonRpcResponse::error(
                request.id,
                METHOD_NOT_FOUND,
                &format!("Method not found: {}", request.method),
            ),
        };

        Some(response)
    }

    /// Handle initialize request.
    fn handle_initialize(&self, id: Option<Value>, params: Option<Value>) -> JsonRpcResponse {
        let params: InitializeParams = params
            .and_then(|p| serde_json::from_value(p).ok())
            .unwrap_or_default();

        if let Some(client) = &params.client_info {
            info!(
                "Client connected: {} {} (protocol {})",
                client.name,
                client.version,
                params.protocol_version.as_deref().unwrap_or("unknown")
            );
        }

        let result = InitializeResult {
            protocol_version: PROTOCOL_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: ListChangedCapability { list_changed: false },
                resources: ListChangedCapability { list_changed: false },
            },
            server_info: ServerInfo {
                name: self.settings.server.name.clone(),
                version: self.settings.server.version.clone(),
            },
        };

        JsonRpcResponse::from_result(id, &result)
    }

    /// Handle tools/list request.
    fn handle_tools_list(&self, id: Option<Value>) -> JsonRpcResponse {
        JsonRpcResponse::from_result(id, &ToolsListResult { tools: get_tools() })
    }

    /// Handle tools/call request.
    async fn handle_tools_call(&self, id: Option<Value>, params: Option<Value>) -> JsonRpcResponse {
        let params: ToolCallParams = match parse_params(params) {
            Ok(params) => params,
            Err(message) => return JsonRpcResponse::error(id, INVALID_PARAMS, &message),
        };

        let arguments = params.arguments.unwrap_or_else(|| json!({}));

        let text = match params.name.as_str() {
            GET_TRANSCRIPT => match serde_json::from_value::<GetTranscriptArgs>(arguments) {
                Ok(args) => {
                    let options = FormattingOptions {
                        include_timestamps: args.include_timestamps,
                        language_hint: args.language,
                    };
                    self.service.get_transcript(&args.video_url, &options).await
                }
                Err(e) => return invalid_arguments(id, &params.name, e),
            },
            LIST_TRANSCRIPTS => match serde_json::from_value::<ListTranscriptsArgs>(arguments) {
                Ok(args) => self.service.list_available(&args.video_url).await,
                Err(e) => return invalid_arguments(id, &params.name, e),
            },
            _ => {
                return JsonRpcResponse::from_result(
                    id,
                    &ToolCallResult::error(format!("Unknown tool: {}", params.name)),
                )
            }
        };

        let result = if text.starts_with("Error: ") {
            ToolCallResult::error(text)
        } else {
            ToolCallResult::text(text)
        };

        JsonRpcResponse::from_result(id, &result)
    }

    /// Handle resources/list request.
    fn handle_resources_list(&self, id: Option<Value>) -> JsonRpcResponse {
        JsonRpcResponse::from_result(
            id,
            &ResourcesListResult {
                resources: get_resources(),
            },
        )
    }

    /// Handle resources/read request.
    fn handle_resources_read(&self, id: Option<Value>, params: Option<Value>) -> JsonRpcResponse {
        let params: ResourceReadParams = match parse_params(params) {
            Ok(params) => params,
            Err(message) => return JsonRpcResponse::error(id, INVALID_PARAMS, &message),
        };

        if params.uri != SERVER_INFO_URI && params.uri != "server_info" {
            return JsonRpcResponse::error(
                id,
                INVALID_PARAMS,
                &format!("Unknown resource: {}", params.uri),
            );
        }

        let text = server_info(
            &self.settings.server.name,
            self.settings.auth.is_enabled(),
        );

        JsonRpcResponse::from_result(
            id,
            &ResourceReadResult {
                contents: vec![ResourceContents {
                    uri: SERVER_INFO_URI.to_string(),
                    mime_type: "text/plain".to_string(),
                    text,
                }],
            },
        )
    }
}

fn parse_params<T: DeserializeOwned>(params: Option<Value>) -> Result<T, String> {
    let params = params.ok_or_else(|| "Missing params".to_string())?;
    serde_json::from_value(params).map_err(|e| format!("Invalid params: {}", e))
}

fn invalid_arguments(id: Option<Value>, tool: &str, err: serde_json::Error) -> JsonRpcResponse {
    JsonRpcResponse::error(
        id,
        INVALID_PARAMS,
        &format!("Invalid arguments for {}: {}", tool, err),
    )
}
