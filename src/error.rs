//! Error types for the transcript server.

use thiserror::Error;

/// Library-level error type.
#[derive(Error, Debug)]
pub enum TranscriptError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid YouTube URL or video ID: {0}")]
    InvalidInput(String),

    #[error("Transcripts are disabled for video {0}")]
    TranscriptsDisabled(String),

    #[error("Video {0} is unavailable or does not exist")]
    VideoUnavailable(String),

    #[error("No transcript found for video {0}")]
    NoTranscriptFound(String),

    /// Every selection strategy came up empty.
    #[error("No transcripts available for video {0}")]
    SelectionExhausted(String),

    #[error("Video {video_id} is not playable: {reason}")]
    VideoUnplayable { video_id: String, reason: String },

    #[error("YouTube is blocking requests for video {0}")]
    RequestBlocked(String),

    #[error("Failed to parse YouTube response: {0}")]
    Parse(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl TranscriptError {
    /// Message returned to tool callers in place of a typed error.
    pub fn tool_message(&self) -> String {
        match self {
            TranscriptError::InvalidInput(_) => {
                "Error: Invalid YouTube URL or video ID provided.".to_string()
            }
            TranscriptError::TranscriptsDisabled(_) => {
                "Error: Transcripts are disabled for this video.".to_string()
            }
            TranscriptError::VideoUnavailable(_) => {
                "Error: Video is unavailable or does not exist.".to_string()
            }
            TranscriptError::NoTranscriptFound(_) => {
                "Error: No transcript found for this video.".to_string()
            }
            TranscriptError::SelectionExhausted(_) => {
                "Error: No transcripts available for this video.".to_string()
            }
            other => format!("Error: An unexpected error occurred - {}", other),
        }
    }
}

/// Result type alias for transcript operations.
pub type Result<T> = std::result::Result<T, TranscriptError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_messages() {
        assert_eq!(
            TranscriptError::InvalidInput("x".into()).tool_message(),
            "Error: Invalid YouTube URL or video ID provided."
        );
        assert_eq!(
            TranscriptError::TranscriptsDisabled("abc".into()).tool_message(),
            "Error: Transcripts are disabled for this video."
        );
        assert_eq!(
            TranscriptError::VideoUnavailable("abc".into()).tool_message(),
            "Error: Video is unavailable or does not exist."
        );
        assert_eq!(
            TranscriptError::NoTranscriptFound("abc".into()).tool_message(),
            "Error: No transcript found for this video."
        );
        assert_eq!(
            TranscriptError::SelectionExhausted("abc".into()).tool_message(),
            "Error: No transcripts available for this video."
        );
    }

    #[test]
    fn test_unexpected_passes_message_through() {
        let err = TranscriptError::Parse("bad xml".into());
        assert_eq!(
            err.tool_message(),
            "Error: An unexpected error occurred - Failed to parse YouTube response: bad xml"
        );
    }
}
