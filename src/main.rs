//! yt-transcript-mcp CLI entry point.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use yt_transcript_mcp::cli::{commands, Cli, Commands};
use yt_transcript_mcp::config::Settings;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging. Always stderr: stdout carries JSON-RPC in stdio mode.
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(std::env::var("RUST_LOG").unwrap_or_else(|_| {
            format!("yt_transcript_mcp={}", log_level)
        })))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    // Load configuration, then let the environment override it
    let mut settings = match &cli.config {
        Some(path) => Settings::load_from(Some(&Settings::expand_path(path)))?,
        None => Settings::load()?,
    };
    settings.apply_env();

    match &cli.command {
        Commands::Stdio => {
            commands::run_stdio(settings).await?;
        }

        Commands::Serve { host, port } => {
            commands::run_serve(host.as_deref(), *port, settings).await?;
        }

        Commands::Transcript {
            video,
            no_timestamps,
            language,
        } => {
            commands::run_transcript(video, *no_timestamps, language.clone(), settings).await?;
        }

        Commands::List { video } => {
            commands::run_list(video, settings).await?;
        }

        Commands::Resolve { inputs } => {
            commands::run_resolve(inputs)?;
        }

        Commands::Verify { base_url, token } => {
            commands::run_verify(base_url, token.as_deref()).await?;
        }

        Commands::Config { action } => {
            commands::run_config(action, settings)?;
        }
    }

    Ok(())
}
