//! CLI module.

pub mod commands;
mod output;

pub use output::Output;

use clap::{Parser, Subcommand};

/// YouTube transcript MCP server
///
/// Serves YouTube transcripts to AI assistants over the Model Context Protocol,
/// on stdio or HTTP, and offers the same tools directly from the command line.
#[derive(Parser, Debug)]
#[command(name = "yt-transcript-mcp")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start MCP server on stdio for AI assistant integration (Claude, etc.)
    Stdio,

    /// Start MCP server over HTTP (POST /mcp)
    Serve {
        /// Host to bind to (defaults to the configured host)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (defaults to the configured port)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Fetch and print a video transcript
    Transcript {
        /// YouTube URL or video ID
        video: String,

        /// Omit [MM:SS] timestamps
        #[arg(long)]
        no_timestamps: bool,

        /// Preferred language code (e.g. en, es)
        #[arg(short, long)]
        language: Option<String>,
    },

    /// List transcript languages available for a video
    List {
        /// YouTube URL or video ID
        video: String,
    },

    /// Resolve URLs or IDs to canonical video IDs
    Resolve {
        /// Inputs to resolve
        #[arg(required = true)]
        inputs: Vec<String>,
    },

    /// Check that a deployed HTTP server responds
    Verify {
        /// Base URL of the deployment
        base_url: String,

        /// Bearer token for servers with authentication enabled
        #[arg(long, env = "MCP_ACCESS_TOKEN")]
        token: Option<String>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration (file values plus environment overrides)
    Show,

    /// Write a default config file
    Init,

    /// Show configuration file path
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_transcript_command() {
        let cli = Cli::parse_from([
            "yt-transcript-mcp",
            "-vv",
            "transcript",
            "https://youtu.be/dQw4w9WgXcQ",
            "--no-timestamps",
            "--language",
            "es",
        ]);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Transcript {
                video,
                no_timestamps,
                language,
            } => {
                assert_eq!(video, "https://youtu.be/dQw4w9WgXcQ");
                assert!(no_timestamps);
                assert_eq!(language.as_deref(), Some("es"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_resolve_requires_input() {
        assert!(Cli::try_parse_from(["yt-transcript-mcp", "resolve"]).is_err());
    }

    #[test]
    fn test_verify_command() {
        let cli = Cli::parse_from([
            "yt-transcript-mcp",
            "verify",
            "https://example.com",
            "--token",
            "abc",
        ]);
        assert!(matches!(
            cli.command,
            Commands::Verify { ref token, .. } if token.as_deref() == Some("abc")
        ));
    }
}
