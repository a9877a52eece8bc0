//! Plain-text rendering of transcripts.

use super::{TranscriptEntry, TranscriptList, TranscriptTrack};
use crate::video_id::VideoId;

const SEPARATOR_WIDTH: usize = 50;
const EMPTY_BODY: &str = "No transcript available.";

/// Format seconds as `MM:SS`, truncating fractions.
pub fn format_timestamp(seconds: f64) -> String {
    let total = seconds.max(0.0) as u64;
    format!("{:02}:{:02}", total / 60, total % 60)
}

/// Render entries one per line, optionally prefixed with `[MM:SS]`.
pub fn render_entries(entries: &[TranscriptEntry], include_timestamps: bool) -> String {
    if entries.is_empty() {
        return EMPTY_BODY.to_string();
    }

    entries
        .iter()
        .map(|entry| {
            if include_timestamps {
                format!("[{}] {}", format_timestamp(entry.start_seconds), entry.text)
            } else {
                entry.text.clone()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Metadata block placed above the transcript body.
pub fn render_header(video_id: &VideoId, track: &TranscriptTrack) -> String {
    format!(
        "Video ID: {}\nLanguage: {} ({})\nType: {}\n{}\n\n",
        video_id,
        track.language_name,
        track.language_code,
        track.kind_label(),
        "=".repeat(SEPARATOR_WIDTH)
    )
}

pub fn render_transcript(
    video_id: &VideoId,
    track: &TranscriptTrack,
    entries: &[TranscriptEntry],
    include_timestamps: bool,
) -> String {
    let mut output = render_header(video_id, track);
    output.push_str(&render_entries(entries, include_timestamps));
    output
}

/// One line per available track, or a notice when there are none.
pub fn render_track_list(list: &TranscriptList) -> String {
    if list.is_empty() {
        return "No transcripts available for this video.".to_string();
    }

    let mut output = format!("Available transcripts for video {}:", list.video_id());
    for track in list {
        output.push_str(&format!(
            "\n- {} ({}) - {}",
            track.language_name,
            track.language_code,
            track.kind_label()
        ));
    }
    output
}
