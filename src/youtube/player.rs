//! InnerTube player response parsing.

use crate::error::{Result, TranscriptError};
use crate::transcript::TranscriptTrack;
use crate::video_id::VideoId;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct PlayerResponse {
    playability_status: Option<PlayabilityStatus>,
    captions: Option<Captions>,
}

#[derive(Debug, Deserialize)]
struct PlayabilityStatus {
    #[serde(default)]
    status: String,
    reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Captions {
    player_captions_tracklist_renderer: Option<CaptionTracklistRenderer>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CaptionTracklistRenderer {
    #[serde(default)]
    caption_tracks: Vec<CaptionTrack>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CaptionTrack {
    base_url: String,
    language_code: String,
    name: Option<TrackName>,
    kind: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TrackName {
    simple_text: Option<String>,
    #[serde(default)]
    runs: Vec<TextRun>,
}

#[derive(Debug, Deserialize)]
struct TextRun {
    text: String,
}

impl TrackName {
    fn text(&self) -> Option<String> {
        self.simple_text
            .clone()
            .or_else(|| self.runs.first().map(|r| r.text.clone()))
    }
}

impl PlayerResponse {
    /// Check that the video can be played at all.
    pub(super) fn assert_playable(&self, video_id: &VideoId) -> Result<()> {
        let Some(playability) = &self.playability_status else {
            return Ok(());
        };

        let reason = playability.reason.clone().unwrap_or_default();
        match playability.status.as_str() {
            "OK" | "" => Ok(()),
            "ERROR" if reason.contains("unavailable") => {
                Err(TranscriptError::VideoUnavailable(video_id.to_string()))
            }
            "LOGIN_REQUIRED" if reason.contains("not a bot") => {
                Err(TranscriptError::RequestBlocked(video_id.to_string()))
            }
            _ => Err(TranscriptError::VideoUnplayable {
                video_id: video_id.to_string(),
                reason,
            }),
        }
    }

    /// Normalize the caption tracks into [`TranscriptTrack`]s.
    pub(super) fn into_tracks(self, video_id: &VideoId) -> Result<Vec<TranscriptTrack>> {
        self.assert_playable(video_id)?;

        let caption_tracks = self
            .captions
            .and_then(|c| c.player_captions_tracklist_renderer)
            .map(|r| r.caption_tracks)
            .unwrap_or_default();

        if caption_tracks.is_empty() {
            return Err(TranscriptError::TranscriptsDisabled(video_id.to_string()));
        }

        Ok(caption_tracks
            .into_iter()
            .map(|track| {
                let language_name = track
                    .name
                    .as_ref()
                    .and_then(TrackName::text)
                    .unwrap_or_else(|| track.language_code.clone());

                TranscriptTrack {
                    language_name,
                    is_generated: track.kind.as_deref() == Some("asr"),
                    source_url: Some(track.base_url.replace("&fmt=srv3", "")),
                    language_code: track.language_code,
                }
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id() -> VideoId {
        VideoId::parse("dQw4w9WgXcQ").unwrap()
    }

    fn parse(json: &str) -> PlayerResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_tracks_from_response() {
        let response = parse(
            r#"{
                "playabilityStatus": {"status": "OK"},
                "captions": {
                    "playerCaptionsTracklistRenderer": {
                        "captionTracks": [
                            {
                                "baseUrl": "https://www.youtube.com/api/timedtext?v=dQw4w9WgXcQ&lang=en&fmt=srv3",
                                "languageCode": "en",
                                "name": {"runs": [{"text": "English"}]}
                            },
                            {
                                "baseUrl": "https://www.youtube.com/api/timedtext?v=dQw4w9WgXcQ&lang=es&kind=asr",
                                "languageCode": "es",
                                "name": {"simpleText": "Spanish (auto-generated)"},
                                "kind": "asr"
                            },
                            {
                                "baseUrl": "https://www.youtube.com/api/timedtext?v=dQw4w9WgXcQ&lang=de",
                                "languageCode": "de"
                            }
                        ]
                    }
                }
            }"#,
        );

        let tracks = response.into_tracks(&id()).unwrap();
        assert_eq!(tracks.len(), 3);

        assert_eq!(tracks[0].language_name, "English");
        assert!(!tracks[0].is_generated);
        assert_eq!(
            tracks[0].source_url.as_deref(),
            Some("https://www.youtube.com/api/timedtext?v=dQw4w9WgXcQ&lang=en")
        );

        assert_eq!(tracks[1].language_name, "Spanish (auto-generated)");
        assert!(tracks[1].is_generated);

        // Falls back to the code when no name is given
        assert_eq!(tracks[2].language_name, "de");
    }

    #[test]
    fn test_no_captions_means_disabled() {
        let response = parse(r#"{"playabilityStatus": {"status": "OK"}}"#);
        assert!(matches!(
            response.into_tracks(&id()),
            Err(TranscriptError::TranscriptsDisabled(_))
        ));

        let response = parse(
            r#"{"captions": {"playerCaptionsTracklistRenderer": {"captionTracks": []}}}"#,
        );
        assert!(matches!(
            response.into_tracks(&id()),
            Err(TranscriptError::TranscriptsDisabled(_))
        ));
    }

    #[test]
    fn test_unavailable_video() {
        let response = parse(
            r#"{"playabilityStatus": {"status": "ERROR", "reason": "This video is unavailable"}}"#,
        );
        assert!(matches!(
            response.into_tracks(&id()),
            Err(TranscriptError::VideoUnavailable(_))
        ));
    }

    #[test]
    fn test_blocked_and_unplayable() {
        let blocked = parse(
            r#"{"playabilityStatus": {"status": "LOGIN_REQUIRED", "reason": "Sign in to confirm you're not a bot"}}"#,
        );
        assert!(matches!(
            blocked.assert_playable(&id()),
            Err(TranscriptError::RequestBlocked(_))
        ));

        let private = parse(
            r#"{"playabilityStatus": {"status": "LOGIN_REQUIRED", "reason": "This video is private"}}"#,
        );
        match private.assert_playable(&id()) {
            Err(TranscriptError::VideoUnplayable { reason, .. }) => {
                assert_eq!(reason, "This video is private")
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
