//! YouTube video identifier resolution.
//!
//! Accepts a bare 11-character ID or one of the common URL shapes:
//!
//! - `https://youtu.be/ID`
//! - `https://www.youtube.com/watch?v=ID` (also `youtube.com`, `m.youtube.com`)
//! - `https://www.youtube.com/embed/ID`
//! - `https://www.youtube.com/v/ID` and `https://www.youtube.com/shorts/ID`
//!
//! Whatever is extracted from a URL must itself be a well-formed ID.

use crate::error::TranscriptError;
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;
use url::Url;

static VIDEO_ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9_-]{11}$").expect("Invalid regex"));

const SHORT_LINK_HOST: &str = "youtu.be";
const VIDEO_HOSTS: [&str; 3] = ["youtube.com", "www.youtube.com", "m.youtube.com"];
const PATH_PREFIXES: [&str; 3] = ["embed", "v", "shorts"];

/// A canonical 11-character YouTube video identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct VideoId(String);

impl VideoId {
    /// Accept `candidate` only if it is exactly a well-formed ID.
    pub fn parse(candidate: &str) -> Option<Self> {
        VIDEO_ID_PATTERN
            .is_match(candidate)
            .then(|| Self(candidate.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Canonical watch page URL.
    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.0)
    }
}

impl std::fmt::Display for VideoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for VideoId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::str::FromStr for VideoId {
    type Err = TranscriptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        resolve(s).ok_or_else(|| TranscriptError::InvalidInput(s.to_string()))
    }
}

/// Resolve a video URL or bare ID into a [`VideoId`].
pub fn resolve(input: &str) -> Option<VideoId> {
    if let Some(id) = VideoId::parse(input) {
        return Some(id);
    }

    let url = Url::parse(input).ok()?;
    let candidate = extract_candidate(&url)?;
    VideoId::parse(&candidate)
}

/// Pull the raw ID candidate out of a recognised YouTube URL.
fn extract_candidate(url: &Url) -> Option<String> {
    let host = url.host_str()?;

    if host == SHORT_LINK_HOST {
        return Some(url.path().trim_start_matches('/').to_string());
    }

    if !VIDEO_HOSTS.contains(&host) {
        return None;
    }

    if url.path() == "/watch" {
        return url
            .query_pairs()
            .find(|(key, _)| key == "v")
            .map(|(_, value)| value.into_owned());
    }

    let mut segments = url.path_segments()?;
    let prefix = segments.next()?;
    if PATH_PREFIXES.contains(&prefix) {
        return segments.next().map(str::to_string);
    }

    None
}
