//! HTTP transport for the MCP server.
//!
//! `POST /mcp` carries one JSON-RPC message per request. When OAuth is
//! configured, `/mcp` requires a bearer token issued by `/oauth/token`.

mod auth;

pub use auth::{OAuthError, OAuthServer, TokenRequest, TokenResponse};

use crate::config::Settings;
use crate::mcp::McpServer;
use crate::transcript::TranscriptService;
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::{debug, warn};

/// Shared application state.
pub struct AppState {
    pub server_name: String,
    pub mcp: McpServer,
    pub oauth: Option<OAuthServer>,
}

impl AppState {
    pub fn new(settings: Settings, service: TranscriptService) -> crate::error::Result<Self> {
        let oauth = OAuthServer::from_settings(&settings.auth)?;
        Ok(Self {
            server_name: settings.server.name.clone(),
            mcp: McpServer::new(settings, service),
            oauth,
        })
    }
}

/// Build the HTTP router.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut app = Router::new()
        .route("/", get(health))
        .route("/mcp", post(mcp_endpoint));

    if state.oauth.is_some() {
        app = app
            .route("/.well-known/oauth-authorization-server", get(auth::metadata))
            .route("/oauth/token", post(auth::token))
            .route("/oauth/revoke", post(auth::revoke));
    }

    app.fallback(not_found).layer(cors).with_state(state)
}

/// Serve `router` on `listener` until Ctrl+C.
pub async fn serve(listener: tokio::net::TcpListener, state: Arc<AppState>) -> anyhow::Result<()> {
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
}

// === Handlers ===

async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "server": state.server_name,
        "message": "Server is running. Use /mcp endpoint for MCP protocol.",
    }))
}

async fn mcp_endpoint(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: String,
) -> Response {
    if let Some(oauth) = &state.oauth {
        let authorized = match auth::bearer_token(&headers) {
            Some(token) => oauth.validate(token).await,
            None => false,
        };
        if !authorized {
            debug!("Rejected unauthenticated MCP request");
            return auth::unauthorized();
        }
    }

    match state.mcp.handle_message(&body).await {
        Some(response) => Json(response).into_response(),
        None => StatusCode::ACCEPTED.into_response(),
    }
}

async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "Not found" })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcript::fixture::FixtureProvider;
    use axum::http::header;
    use axum::Form;
    use serde_json::Value;

    fn state(auth: bool) -> Arc<AppState> {
        let mut settings = Settings::default();
        if auth {
            settings.auth.client_id = Some("client-1".to_string());
            settings.auth.client_secret = Some("s3cret".to_string());
        }
        let service = TranscriptService::new(Arc::new(FixtureProvider::english()));
        Arc::new(AppState::new(settings, service).unwrap())
    }

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn initialize() -> String {
        json!({"jsonrpc": "2.0", "id": 1, "method": "initialize", "params": {}}).to_string()
    }

    #[tokio::test]
    async fn test_health() {
        let response = health(State(state(false))).await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["server"], "YouTube Transcript Fetcher");
    }

    #[tokio::test]
    async fn test_open_mcp_endpoint() {
        let response = mcp_endpoint(State(state(false)), HeaderMap::new(), initialize()).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["result"]["protocolVersion"], "2024-11-05");
    }

    #[tokio::test]
    async fn test_notification_is_accepted() {
        let message = json!({"jsonrpc": "2.0", "method": "notifications/initialized"});
        let response =
            mcp_endpoint(State(state(false)), HeaderMap::new(), message.to_string()).await;
        assert_eq!(response.status(), StatusCode::ACCEPTED);
    }

    #[tokio::test]
    async fn test_protected_mcp_endpoint() {
        let state = state(true);

        let response = mcp_endpoint(State(state.clone()), HeaderMap::new(), initialize()).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(response.headers()[header::WWW_AUTHENTICATE], "Bearer");

        let token_response = auth::token(
            State(state.clone()),
            Form(TokenRequest {
                grant_type: "client_credentials".to_string(),
                client_id: Some("client-1".to_string()),
                client_secret: Some("s3cret".to_string()),
                scope: None,
            }),
        )
        .await;
        assert_eq!(token_response.status(), StatusCode::OK);
        let token = body_json(token_response).await["access_token"]
            .as_str()
            .unwrap()
            .to_string();

        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            format!("Bearer {}", token).parse().unwrap(),
        );
        let response = mcp_endpoint(State(state), headers, initialize()).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_bad_credentials() {
        let response = auth::token(
            State(state(true)),
            Form(TokenRequest {
                grant_type: "client_credentials".to_string(),
                client_id: Some("client-1".to_string()),
                client_secret: Some("nope".to_string()),
                scope: None,
            }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(response).await["error"], "invalid_client");
    }

    #[test]
    fn test_client_id_without_secret_fails_startup() {
        let mut settings = Settings::default();
        settings.auth.client_id = Some("client-1".to_string());
        let service = TranscriptService::new(Arc::new(FixtureProvider::english()));
        assert!(matches!(
            AppState::new(settings, service),
            Err(crate::error::TranscriptError::Auth(_))
        ));
    }

    #[tokio::test]
    async fn test_oauth_routes_absent_without_auth() {
        let response = auth::metadata(State(state(false))).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = not_found().await.into_response();
        assert_eq!(body_json(response).await["error"], "Not found");
    }
}
