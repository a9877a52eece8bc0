//! MCP tool and resource definitions.

use super::protocol::{Resource, Tool};
use serde::Deserialize;
use serde_json::json;

pub const GET_TRANSCRIPT: &str = "get_youtube_transcript";
pub const LIST_TRANSCRIPTS: &str = "list_available_transcripts";

pub const SERVER_INFO_URI: &str = "youtube://server/info";

/// Arguments of `get_youtube_transcript`.
#[derive(Debug, Deserialize)]
pub struct GetTranscriptArgs {
    pub video_url: String,
    #[serde(default = "default_include_timestamps")]
    pub include_timestamps: bool,
    #[serde(default)]
    pub language: Option<String>,
}

fn default_include_timestamps() -> bool {
    true
}

/// Arguments of `list_available_transcripts`.
#[derive(Debug, Deserialize)]
pub struct ListTranscriptsArgs {
    pub video_url: String,
}

/// Get all available tools.
pub fn get_tools() -> Vec<Tool> {
    vec![
        Tool {
            name: GET_TRANSCRIPT.to_string(),
            description: "Fetch the transcript of a YouTube video. \
                Prefers the requested language, then manual English, then auto-generated English, \
                then any available track. Returns the transcript text with a metadata header."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "video_url": {
                        "type": "string",
                        "description": "YouTube video URL or 11-character video ID"
                    },
                    "include_timestamps": {
                        "type": "boolean",
                        "description": "Prefix each line with an [MM:SS] timestamp",
                        "default": true
                    },
                    "language": {
                        "type": ["string", "null"],
                        "description": "Preferred language code (e.g. 'en', 'es')",
                        "default": null
                    }
                },
                "required": ["video_url"]
            }),
        },
        Tool {
            name: LIST_TRANSCRIPTS.to_string(),
            description: "List all transcript languages available for a YouTube video, \
                marking each as manual or auto-generated."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "video_url": {
                        "type": "string",
                        "description": "YouTube video URL or 11-character video ID"
                    }
                },
                "required": ["video_url"]
            }),
        },
    ]
}

/// Get all available resources.
pub fn get_resources() -> Vec<Resource> {
    vec![Resource {
        uri: SERVER_INFO_URI.to_string(),
        name: "server_info".to_string(),
        description: "Information about this MCP server".to_string(),
        mime_type: "text/plain".to_string(),
    }]
}

/// Text of the `server_info` resource.
pub fn server_info(server_name: &str, auth_enabled: bool) -> String {
    let auth_status = if auth_enabled { "Enabled" } else { "Disabled" };
    format!(
        "{server_name}

This server provides tools to fetch transcripts from YouTube videos.

Available tools:
1. {GET_TRANSCRIPT} - Fetch and format video transcripts
2. {LIST_TRANSCRIPTS} - List all available transcript languages

Features:
- Automatic video ID extraction from various YouTube URL formats
- Prioritizes manual English transcripts over auto-generated
- Falls back to other languages if English unavailable
- Optional timestamp inclusion
- Detailed error messages

Authentication: {auth_status}
"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_names() {
        let names: Vec<String> = get_tools().into_iter().map(|t| t.name).collect();
        assert_eq!(names, vec![GET_TRANSCRIPT, LIST_TRANSCRIPTS]);
    }

    #[test]
    fn test_argument_defaults() {
        let args: GetTranscriptArgs =
            serde_json::from_value(json!({"video_url": "dQw4w9WgXcQ"})).unwrap();
        assert!(args.include_timestamps);
        assert_eq!(args.language, None);

        let args: GetTranscriptArgs = serde_json::from_value(
            json!({"video_url": "x", "include_timestamps": false, "language": null}),
        )
        .unwrap();
        assert!(!args.include_timestamps);
        assert_eq!(args.language, None);
    }

    #[test]
    fn test_server_info_reports_auth() {
        let info = server_info("YouTube Transcript Fetcher", true);
        assert!(info.starts_with("YouTube Transcript Fetcher\n"));
        assert!(info.contains("1. get_youtube_transcript"));
        assert!(info.ends_with("Authentication: Enabled\n"));
        assert!(server_info("x", false).contains("Authentication: Disabled"));
    }
}
