//! Transcript and list commands.

use crate::cli::Output;
use crate::config::Settings;
use crate::transcript::{FormattingOptions, TranscriptService};
use anyhow::{bail, Result};

/// Print a transcript the way the `get_youtube_transcript` tool returns it.
pub async fn run_transcript(
    video: &str,
    no_timestamps: bool,
    language: Option<String>,
    settings: Settings,
) -> Result<()> {
    let service = TranscriptService::from_settings(&settings)?;
    let options = FormattingOptions {
        include_timestamps: !no_timestamps,
        language_hint: language,
    };

    let spinner = Output::spinner("Fetching transcript...");
    let text = service.get_transcript(video, &options).await;
    spinner.finish_and_clear();

    print_or_fail(&text)
}

/// Print the tracks available for a video.
pub async fn run_list(video: &str, settings: Settings) -> Result<()> {
    let service = TranscriptService::from_settings(&settings)?;

    let spinner = Output::spinner("Listing transcripts...");
    let text = service.list_available(video).await;
    spinner.finish_and_clear();

    print_or_fail(&text)
}

/// Print tool output, or turn an `Error: ` result into a command failure.
/// The failure is reported once, by `main`.
fn print_or_fail(text: &str) -> Result<()> {
    if let Some(message) = text.strip_prefix("Error: ") {
        bail!("{}", message);
    }
    println!("{}", text);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_text_becomes_single_failure() {
        let err = print_or_fail("Error: Transcripts are disabled for this video.").unwrap_err();
        assert_eq!(err.to_string(), "Transcripts are disabled for this video.");
        assert_eq!(err.chain().count(), 1);
    }

    #[test]
    fn test_transcript_text_is_printed() {
        assert!(print_or_fail("Video ID: dQw4w9WgXcQ").is_ok());
    }
}
