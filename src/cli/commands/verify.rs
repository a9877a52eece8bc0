//! Verify command - smoke-test a deployed HTTP server.

use crate::cli::Output;
use anyhow::{bail, Result};
use reqwest::StatusCode;
use serde_json::{json, Value};
use std::time::Duration;

/// Check the health endpoint and the MCP endpoint of a deployment.
pub async fn run_verify(base_url: &str, token: Option<&str>) -> Result<()> {
    let base_url = base_url.trim_end_matches('/');
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .build()?;

    Output::header(&format!("Testing deployment at: {}", base_url));

    eprintln!("\n1. Health check endpoint");
    let health_ok = match client.get(base_url).send().await {
        Ok(response) if response.status() == StatusCode::OK => {
            match response.json::<Value>().await {
                Ok(body) if body["status"] == "ok" => {
                    Output::check(true, &format!("Health check passed: {}", body));
                    true
                }
                Ok(body) => {
                    Output::check(false, &format!("Unexpected response: {}", body));
                    false
                }
                Err(e) => {
                    Output::check(false, &format!("Response was not JSON: {}", e));
                    false
                }
            }
        }
        Ok(response) => {
            Output::check(false, &format!("Status code: {}", response.status()));
            false
        }
        Err(e) => {
            Output::check(false, &format!("Request failed: {}", e));
            false
        }
    };

    eprintln!("\n2. MCP endpoint");
    let mcp_url = format!("{}/mcp", base_url);
    let mut request = client.post(&mcp_url).json(&json!({
        "jsonrpc": "2.0",
        "id": 1,
        "method": "initialize",
        "params": {}
    }));
    if let Some(token) = token {
        request = request.bearer_auth(token);
    }

    let mcp_ok = match request.send().await {
        Ok(response) if response.status().is_success() => {
            let server = response
                .json::<Value>()
                .await
                .ok()
                .and_then(|body| body["result"]["serverInfo"]["name"].as_str().map(str::to_string));
            match server {
                Some(name) => Output::check(true, &format!("MCP endpoint answered as '{}'", name)),
                None => Output::check(true, "MCP endpoint is accessible"),
            }
            true
        }
        Ok(response) if response.status() == StatusCode::UNAUTHORIZED => {
            Output::check(false, "MCP endpoint requires authentication");
            Output::info("Pass --token or set MCP_ACCESS_TOKEN");
            false
        }
        Ok(response) => {
            Output::check(false, &format!("Status code: {}", response.status()));
            false
        }
        Err(e) => {
            Output::check(false, &format!("Request failed: {}", e));
            false
        }
    };

    eprintln!();
    if !(health_ok && mcp_ok) {
        bail!("deployment verification failed");
    }

    Output::success("Deployment verification complete!");
    Output::kv("MCP URL", &mcp_url);
    Ok(())
}
