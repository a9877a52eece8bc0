//! yt-transcript-mcp - YouTube transcripts for AI assistants
//!
//! An MCP server that resolves YouTube URLs to video IDs, picks the best
//! caption track, and returns it as formatted text.
//!
//! # Architecture
//!
//! - `video_id` - Resolving URLs and bare IDs to canonical video IDs
//! - `transcript` - Track model, selection, rendering, and the service facade
//! - `youtube` - Transcript provider backed by YouTube's InnerTube API
//! - `mcp` - JSON-RPC 2.0 MCP server (tools and resources)
//! - `http` - HTTP transport with optional OAuth
//! - `config` - Configuration management
//!
//! # Example
//!
//! ```rust,no_run
//! use yt_transcript_mcp::config::Settings;
//! use yt_transcript_mcp::transcript::{FormattingOptions, TranscriptService};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let service = TranscriptService::from_settings(&settings)?;
//!
//!     let text = service
//!         .get_transcript("https://youtu.be/dQw4w9WgXcQ", &FormattingOptions::default())
//!         .await;
//!     println!("{}", text);
//!
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod http;
pub mod mcp;
pub mod transcript;
pub mod video_id;
pub mod youtube;

pub use error::{Result, TranscriptError};
pub use video_id::{resolve, VideoId};
