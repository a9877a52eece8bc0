//! Transcript tracks, entries, and the provider abstraction.
//!
//! A [`TranscriptProvider`] lists the caption tracks of a video and fetches the
//! entries of one of them. The [`TranscriptService`] resolves user input, picks a
//! track with [`select_track`], and renders it with [`render_transcript`].

mod format;
mod select;
mod service;

pub use format::{format_timestamp, render_entries, render_header, render_track_list, render_transcript};
pub use select::{select_track, SelectionStrategy};
pub use service::TranscriptService;

use crate::error::Result;
use crate::video_id::VideoId;
use async_trait::async_trait;
use serde::Serialize;

/// One caption track available for a video.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TranscriptTrack {
    /// Display name, e.g. "English (auto-generated)".
    pub language_name: String,
    /// Language code, e.g. "en".
    pub language_code: String,
    /// Produced by speech recognition rather than authored.
    pub is_generated: bool,
    /// Where the provider downloads this track from, if it needs one.
    #[serde(skip)]
    pub source_url: Option<String>,
}

impl TranscriptTrack {
    pub fn new(language_name: &str, language_code: &str, is_generated: bool) -> Self {
        Self {
            language_name: language_name.to_string(),
            language_code: language_code.to_string(),
            is_generated,
            source_url: None,
        }
    }

    /// "Manual" or "Auto-generated".
    pub fn kind_label(&self) -> &'static str {
        if self.is_generated {
            "Auto-generated"
        } else {
            "Manual"
        }
    }
}

/// A single caption line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TranscriptEntry {
    pub start_seconds: f64,
    pub duration_seconds: f64,
    pub text: String,
}

impl TranscriptEntry {
    pub fn new(start_seconds: f64, text: &str) -> Self {
        Self {
            start_seconds,
            duration_seconds: 0.0,
            text: text.to_string(),
        }
    }
}

/// Per-call rendering options.
#[derive(Debug, Clone, PartialEq)]
pub struct FormattingOptions {
    pub include_timestamps: bool,
    /// Preferred language code, tried before the English defaults.
    pub language_hint: Option<String>,
}

impl Default for FormattingOptions {
    fn default() -> Self {
        Self {
            include_timestamps: true,
            language_hint: None,
        }
    }
}

/// The caption tracks available for one video.
///
/// Iteration yields manually authored tracks first, then generated ones, each
/// group in the order the provider reported them.
#[derive(Debug, Clone)]
pub struct TranscriptList {
    video_id: VideoId,
    tracks: Vec<TranscriptTrack>,
}

impl TranscriptList {
    pub fn new(video_id: VideoId, tracks: Vec<TranscriptTrack>) -> Self {
        let (mut ordered, generated): (Vec<_>, Vec<_>) =
            tracks.into_iter().partition(|t| !t.is_generated);
        ordered.extend(generated);

        Self {
            video_id,
            tracks: ordered,
        }
    }

    pub fn video_id(&self) -> &VideoId {
        &self.video_id
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TranscriptTrack> {
        self.tracks.iter()
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// First track in enumeration order.
    pub fn first(&self) -> Option<&TranscriptTrack> {
        self.tracks.first()
    }

    /// First track matching any of `language_codes`, in priority order.
    /// Manual tracks win over generated ones for the same code.
    pub fn find_transcript(&self, language_codes: &[&str]) -> Option<&TranscriptTrack> {
        self.find_where(language_codes, |_| true)
    }

    pub fn find_manually_created(&self, language_codes: &[&str]) -> Option<&TranscriptTrack> {
        self.find_where(language_codes, |t| !t.is_generated)
    }

    pub fn find_generated(&self, language_codes: &[&str]) -> Option<&TranscriptTrack> {
        self.find_where(language_codes, |t| t.is_generated)
    }

    fn find_where<F>(&self, language_codes: &[&str], keep: F) -> Option<&TranscriptTrack>
    where
        F: Fn(&TranscriptTrack) -> bool,
    {
        language_codes.iter().find_map(|code| {
            self.tracks
                .iter()
                .find(|t| t.language_code == *code && keep(t))
        })
    }
}

impl<'a> IntoIterator for &'a TranscriptList {
    type Item = &'a TranscriptTrack;
    type IntoIter = std::slice::Iter<'a, TranscriptTrack>;

    fn into_iter(self) -> Self::IntoIter {
        self.tracks.iter()
    }
}

/// Source of caption tracks and their entries.
#[async_trait]
pub trait TranscriptProvider: Send + Sync {
    /// List the caption tracks available for a video.
    async fn list_transcripts(&self, video_id: &VideoId) -> Result<TranscriptList>;

    /// Fetch the entries of one track, in chronological order.
    async fn fetch_transcript(
        &self,
        video_id: &VideoId,
        track: &TranscriptTrack,
    ) -> Result<Vec<TranscriptEntry>>;
}
