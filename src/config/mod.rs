//! Configuration module.
//!
//! Settings are read from a TOML file and then overridden by environment variables.

mod settings;

pub use settings::{AuthSettings, ServerSettings, Settings, YoutubeSettings};
