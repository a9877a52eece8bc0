//! Configuration settings for the transcript server.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub youtube: YoutubeSettings,
    pub auth: AuthSettings,
}

/// MCP server identity and HTTP bind address.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Name reported to MCP clients.
    pub name: String,
    /// Version reported to MCP clients.
    pub version: String,
    /// Host for the HTTP transport.
    pub host: String,
    /// Port for the HTTP transport.
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            name: "YouTube Transcript Fetcher".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

/// Settings for talking to YouTube.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct YoutubeSettings {
    /// Timeout applied to every HTTP request, in seconds.
    pub request_timeout_secs: u64,
    /// User agent sent with watch page requests.
    pub user_agent: String,
    /// Accept-Language header value.
    pub accept_language: String,
    /// InnerTube client name used for the player request.
    pub innertube_client_name: String,
    /// InnerTube client version used for the player request.
    pub innertube_client_version: String,
}

impl Default for YoutubeSettings {
    fn default() -> Self {
        Self {
            request_timeout_secs: 30,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36"
                .to_string(),
            accept_language: "en-US".to_string(),
            innertube_client_name: "ANDROID".to_string(),
            innertube_client_version: "20.10.38".to_string(),
        }
    }
}

/// OAuth settings. Authentication is enabled when a client id is set.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthSettings {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    /// Public base URL advertised as the issuer.
    pub issuer_url: String,
    /// Lifetime of issued access tokens, in seconds.
    pub token_ttl_secs: u64,
    /// Scope required to call tools.
    pub scope: String,
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            client_id: None,
            client_secret: None,
            issuer_url: "http://localhost:3000".to_string(),
            token_ttl_secs: 3600,
            scope: "transcript:read".to_string(),
        }
    }
}

impl AuthSettings {
    /// Whether the authenticated variant of the server is active.
    pub fn is_enabled(&self) -> bool {
        self.client_id.as_ref().is_some_and(|id| !id.is_empty())
    }
}

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> crate::error::Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> crate::error::Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let settings: Settings = toml::from_str(&content)?;
            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Override file values with the process environment.
    pub fn apply_env(&mut self) {
        self.apply_env_from(|key| std::env::var(key).ok());
    }

    /// Override file values using `lookup` to read variables.
    pub fn apply_env_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|v| !v.is_empty());

        if let Some(name) = lookup("MCP_SERVER_NAME") {
            self.server.name = name;
        }
        if let Some(version) = lookup("MCP_SERVER_VERSION") {
            self.server.version = version;
        }
        if let Some(client_id) = lookup("OAUTH_CLIENT_ID") {
            self.auth.client_id = Some(client_id);
        }
        if let Some(secret) = lookup("OAUTH_CLIENT_SECRET") {
            self.auth.client_secret = Some(secret);
        }
        if let Some(issuer) = lookup("OAUTH_ISSUER_URL") {
            self.auth.issuer_url = issuer;
        }
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &PathBuf) -> crate::error::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::TranscriptError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("yt-transcript-mcp")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }
}
