//! Resolve, select, fetch, render.

use super::{
    render_track_list, render_transcript, select_track, FormattingOptions, TranscriptProvider,
};
use crate::config::Settings;
use crate::error::{Result, TranscriptError};
use crate::video_id;
use crate::youtube::YoutubeProvider;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Entry point for both transcript tools.
///
/// Every public method returns display text; failures come back as strings
/// starting with `"Error: "`.
#[derive(Clone)]
pub struct TranscriptService {
    provider: Arc<dyn TranscriptProvider>,
}

impl TranscriptService {
    pub fn new(provider: Arc<dyn TranscriptProvider>) -> Self {
        Self { provider }
    }

    /// Service backed by YouTube itself.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let provider = YoutubeProvider::new(&settings.youtube)?;
        Ok(Self::new(Arc::new(provider)))
    }

    /// Fetch and format the best-matching transcript for a video.
    pub async fn get_transcript(&self, video_url: &str, options: &FormattingOptions) -> String {
        match self.try_get_transcript(video_url, options).await {
            Ok(text) => text,
            Err(e) => {
                warn!("Transcript request for {:?} failed: {}", video_url, e);
                e.tool_message()
            }
        }
    }

    /// List every caption track a video offers.
    pub async fn list_available(&self, video_url: &str) -> String {
        let Some(video_id) = video_id::resolve(video_url) else {
            return TranscriptError::InvalidInput(video_url.to_string()).tool_message();
        };

        match self.provider.list_transcripts(&video_id).await {
            Ok(list) => render_track_list(&list),
            Err(e) => {
                warn!("Listing transcripts for {} failed: {}", video_id, e);
                format!("Error: {}", e)
            }
        }
    }

    async fn try_get_transcript(
        &self,
        video_url: &str,
        options: &FormattingOptions,
    ) -> Result<String> {
        let video_id = video_id::resolve(video_url)
            .ok_or_else(|| TranscriptError::InvalidInput(video_url.to_string()))?;

        let list = self.provider.list_transcripts(&video_id).await?;
        debug!("{} transcript track(s) listed for {}", list.len(), video_id);

        let track = select_track(&list, options.language_hint.as_deref())
            .ok_or_else(|| TranscriptError::SelectionExhausted(video_id.to_string()))?;
        info!(
            "Selected {} track '{}' for {}",
            track.kind_label(),
            track.language_code,
            video_id
        );

        let entries = self.provider.fetch_transcript(&video_id, track).await?;
        debug!("Fetched {} entries", entries.len());

        Ok(render_transcript(
            &video_id,
            track,
            &entries,
            options.include_timestamps,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcript::fixture::{FixtureProvider, Listing};
    use crate::transcript::{TranscriptEntry, TranscriptTrack};

    fn service(provider: FixtureProvider) -> TranscriptService {
        TranscriptService::new(Arc::new(provider))
    }

    fn options(include_timestamps: bool, language: Option<&str>) -> FormattingOptions {
        FormattingOptions {
            include_timestamps,
            language_hint: language.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_end_to_end_manual_english() {
        let output = service(FixtureProvider::english())
            .get_transcript("dQw4w9WgXcQ", &FormattingOptions::default())
            .await;

        let expected = format!(
            "Video ID: dQw4w9WgXcQ\nLanguage: English (en)\nType: Manual\n{}\n\n[00:00] Hello\n[01:05] World",
            "=".repeat(50)
        );
        assert_eq!(output, expected);
    }

    #[tokio::test]
    async fn test_without_timestamps_from_url() {
        let output = service(FixtureProvider::english())
            .get_transcript("https://youtu.be/dQw4w9WgXcQ", &options(false, None))
            .await;
        assert!(output.ends_with("\n\nHello\nWorld"));
    }

    #[tokio::test]
    async fn test_language_hint_selects_track() {
        let provider = FixtureProvider::with_tracks(vec![
            (
                TranscriptTrack::new("Spanish (auto-generated)", "es", true),
                vec![TranscriptEntry::new(1.5, "Hola")],
            ),
            (
                TranscriptTrack::new("English", "en", false),
                vec![TranscriptEntry::new(1.5, "Hello")],
            ),
        ]);

        let output = service(provider)
            .get_transcript("dQw4w9WgXcQ", &options(true, Some("es")))
            .await;
        assert!(output.contains("Language: Spanish (auto-generated) (es)"));
        assert!(output.contains("Type: Auto-generated"));
        assert!(output.ends_with("[00:01] Hola"));
    }

    #[tokio::test]
    async fn test_empty_entries_body() {
        let provider = FixtureProvider::with_tracks(vec![(
            TranscriptTrack::new("English", "en", false),
            vec![],
        )]);
        let output = service(provider)
            .get_transcript("dQw4w9WgXcQ", &FormattingOptions::default())
            .await;
        assert!(output.ends_with("=\n\nNo transcript available."));
    }

    #[tokio::test]
    async fn test_error_strings() {
        let invalid = service(FixtureProvider::english())
            .get_transcript("invalid-url-x", &FormattingOptions::default())
            .await;
        assert_eq!(invalid, "Error: Invalid YouTube URL or video ID provided.");

        let exhausted = service(FixtureProvider::with_tracks(vec![]))
            .get_transcript("dQw4w9WgXcQ", &FormattingOptions::default())
            .await;
        assert_eq!(exhausted, "Error: No transcripts available for this video.");

        let disabled = service(FixtureProvider::new(Listing::Disabled))
            .get_transcript("dQw4w9WgXcQ", &FormattingOptions::default())
            .await;
        assert_eq!(disabled, "Error: Transcripts are disabled for this video.");

        let unavailable = service(FixtureProvider::new(Listing::Unavailable))
            .get_transcript("dQw4w9WgXcQ", &FormattingOptions::default())
            .await;
        assert_eq!(unavailable, "Error: Video is unavailable or does not exist.");

        let unexpected = service(FixtureProvider::new(Listing::Fails("boom".into())))
            .get_transcript("dQw4w9WgXcQ", &FormattingOptions::default())
            .await;
        assert_eq!(
            unexpected,
            "Error: An unexpected error occurred - Failed to parse YouTube response: boom"
        );
    }

    #[tokio::test]
    async fn test_list_available() {
        let provider = FixtureProvider::with_tracks(vec![
            (TranscriptTrack::new("English (auto-generated)", "en", true), vec![]),
            (TranscriptTrack::new("English", "en", false), vec![]),
        ]);
        let output = service(provider)
            .list_available("https://www.youtube.com/watch?v=dQw4w9WgXcQ")
            .await;
        assert_eq!(
            output,
            "Available transcripts for video dQw4w9WgXcQ:\n\
             - English (en) - Manual\n\
             - English (auto-generated) (en) - Auto-generated"
        );
    }

    #[tokio::test]
    async fn test_list_available_failures() {
        let svc = service(FixtureProvider::new(Listing::Disabled));
        assert_eq!(
            svc.list_available("dQw4w9WgXcQ").await,
            "Error: Transcripts are disabled for video dQw4w9WgXcQ"
        );
        assert_eq!(
            svc.list_available("not a url").await,
            "Error: Invalid YouTube URL or video ID provided."
        );
        assert_eq!(
            service(FixtureProvider::with_tracks(vec![]))
                .list_available("dQw4w9WgXcQ")
                .await,
            "No transcripts available for this video."
        );
    }
}
