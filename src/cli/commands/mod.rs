//! CLI command implementations.

mod config;
mod resolve;
mod serve;
mod stdio;
mod transcript;
mod verify;

pub use config::run_config;
pub use resolve::run_resolve;
pub use serve::run_serve;
pub use stdio::run_stdio;
pub use transcript::{run_list, run_transcript};
pub use verify::run_verify;
