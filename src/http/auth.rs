//! OAuth client-credentials token issuance for the HTTP transport.

use super::AppState;
use crate::config::AuthSettings;
use crate::error::TranscriptError;
use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Form, Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, info};

const CLIENT_CREDENTIALS: &str = "client_credentials";

/// Token request body (`application/x-www-form-urlencoded`).
#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    pub grant_type: String,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub scope: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
    pub scope: String,
}

#[derive(Debug, Deserialize)]
pub struct RevokeRequest {
    pub token: String,
}

#[derive(Debug, Error, PartialEq)]
pub enum OAuthError {
    #[error("unsupported_grant_type")]
    UnsupportedGrantType,
    #[error("invalid_client")]
    InvalidClient,
    #[error("invalid_scope")]
    InvalidScope,
}

impl OAuthError {
    fn status(&self) -> StatusCode {
        match self {
            OAuthError::InvalidClient => StatusCode::UNAUTHORIZED,
            OAuthError::UnsupportedGrantType | OAuthError::InvalidScope => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for OAuthError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}

struct IssuedToken {
    client_id: String,
    scopes: Vec<String>,
    expires_at: Instant,
}

/// In-memory authorization server for a single configured client.
pub struct OAuthServer {
    settings: AuthSettings,
    tokens: RwLock<HashMap<String, IssuedToken>>,
}

impl OAuthServer {
    pub fn new(settings: AuthSettings) -> Self {
        Self {
            settings,
            tokens: RwLock::new(HashMap::new()),
        }
    }

    /// An authorization server, if auth is configured.
    ///
    /// A client id without a client secret is rejected.
    pub fn from_settings(settings: &AuthSettings) -> crate::error::Result<Option<Self>> {
        if !settings.is_enabled() {
            return Ok(None);
        }
        if settings.client_secret.as_deref().unwrap_or_default().is_empty() {
            return Err(TranscriptError::Auth(
                "OAuth client id is set but no client secret is configured".to_string(),
            ));
        }
        Ok(Some(Self::new(settings.clone())))
    }

    fn issuer(&self) -> &str {
        self.settings.issuer_url.trim_end_matches('/')
    }

    /// Authorization server metadata document.
    pub fn metadata(&self) -> Value {
        let issuer = self.issuer();
        json!({
            "issuer": issuer,
            "token_endpoint": format!("{}/oauth/token", issuer),
            "revocation_endpoint": format!("{}/oauth/revoke", issuer),
            "grant_types_supported": [CLIENT_CREDENTIALS],
            "token_endpoint_auth_methods_supported": ["client_secret_post"],
            "scopes_supported": [self.settings.scope],
            "response_types_supported": [],
        })
    }

    /// Issue an access token for valid client credentials.
    pub async fn issue(&self, request: &TokenRequest) -> Result<TokenResponse, OAuthError> {
        if request.grant_type != CLIENT_CREDENTIALS {
            return Err(OAuthError::UnsupportedGrantType);
        }

        let client_id = request.client_id.as_deref().unwrap_or_default();
        if self.settings.client_id.as_deref() != Some(client_id) {
            return Err(OAuthError::InvalidClient);
        }
        let secret = self
            .settings
            .client_secret
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or(OAuthError::InvalidClient)?;
        if request.client_secret.as_deref() != Some(secret) {
            return Err(OAuthError::InvalidClient);
        }

        let scopes: Vec<String> = match request.scope.as_deref() {
            Some(scope) if !scope.trim().is_empty() => {
                scope.split_whitespace().map(str::to_string).collect()
            }
            _ => vec![self.settings.scope.clone()],
        };
        if scopes.iter().any(|s| *s != self.settings.scope) {
            return Err(OAuthError::InvalidScope);
        }

        let access_token = uuid::Uuid::new_v4().simple().to_string();
        let ttl = Duration::from_secs(self.settings.token_ttl_secs);
        let now = Instant::now();

        let mut tokens = self.tokens.write().await;
        tokens.retain(|_, t| t.expires_at > now);
        tokens.insert(
            access_token.clone(),
            IssuedToken {
                client_id: client_id.to_string(),
                scopes: scopes.clone(),
                expires_at: now + ttl,
            },
        );
        info!("Issued access token to client {}", client_id);

        Ok(TokenResponse {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: self.settings.token_ttl_secs,
            scope: scopes.join(" "),
        })
    }

    /// Whether `token` is live and carries the required scope.
    pub async fn validate(&self, token: &str) -> bool {
        let tokens = self.tokens.read().await;
        match tokens.get(token) {
            Some(issued) => {
                let live = issued.expires_at > Instant::now();
                if !live {
                    debug!("Rejected expired token for client {}", issued.client_id);
                }
                live && issued.scopes.contains(&self.settings.scope)
            }
            None => false,
        }
    }

    /// Forget a token. Returns whether it existed.
    pub async fn revoke(&self, token: &str) -> bool {
        self.tokens.write().await.remove(token).is_some()
    }
}

/// Extract the token from an `Authorization: Bearer ...` header.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// 401 response asking for a bearer token.
pub fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        [(header::WWW_AUTHENTICATE, "Bearer")],
        Json(json!({ "error": "invalid_token" })),
    )
        .into_response()
}

// === Handlers ===

pub(super) async fn metadata(State(state): State<Arc<AppState>>) -> Response {
    match &state.oauth {
        Some(oauth) => Json(oauth.metadata()).into_response(),
        None => super::not_found().await.into_response(),
    }
}

pub(super) async fn token(
    State(state): State<Arc<AppState>>,
    Form(request): Form<TokenRequest>,
) -> Response {
    let Some(oauth) = &state.oauth else {
        return super::not_found().await.into_response();
    };

    match oauth.issue(&request).await {
        Ok(token) => Json(token).into_response(),
        Err(e) => e.into_response(),
    }
}

pub(super) async fn revoke(
    State(state): State<Arc<AppState>>,
    Form(request): Form<RevokeRequest>,
) -> Response {
    let Some(oauth) = &state.oauth else {
        return super::not_found().await.into_response();
    };

    oauth.revoke(&request.token).await;
    StatusCode::OK.into_response()
}
