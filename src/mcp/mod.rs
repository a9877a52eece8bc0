//! MCP (Model Context Protocol) server.
//!
//! Exposes the transcript tools and the `server_info` resource over JSON-RPC 2.0,
//! either on stdio or behind the HTTP transport in [`crate::http`].

mod protocol;
mod server;
mod tools;

pub use protocol::{JsonRpcError, JsonRpcRequest, JsonRpcResponse};
pub use server::McpServer;
pub use tools::{server_info, GET_TRANSCRIPT, LIST_TRANSCRIPTS, SERVER_INFO_URI};
