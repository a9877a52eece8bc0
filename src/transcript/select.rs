//! Track selection.

use super::{TranscriptList, TranscriptTrack};

const DEFAULT_LANGUAGE: &str = "en";

/// One rule for picking a track out of a [`TranscriptList`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionStrategy {
    /// Exact language code match, manual or generated.
    Language(String),
    /// Manually authored track in the given language.
    Manual(String),
    /// Auto-generated track in the given language.
    Generated(String),
    /// Whatever the list enumerates first.
    FirstAvailable,
}

impl SelectionStrategy {
    pub fn apply<'a>(&self, list: &'a TranscriptList) -> Option<&'a TranscriptTrack> {
        match self {
            SelectionStrategy::Language(code) => list.find_transcript(&[code.as_str()]),
            SelectionStrategy::Manual(code) => list.find_manually_created(&[code.as_str()]),
            SelectionStrategy::Generated(code) => list.find_generated(&[code.as_str()]),
            SelectionStrategy::FirstAvailable => list.first(),
        }
    }

    /// The ordered chain for an optional language preference.
    pub fn chain(language: Option<&str>) -> Vec<SelectionStrategy> {
        let mut chain = Vec::with_capacity(4);
        if let Some(code) = language.filter(|c| !c.is_empty()) {
            chain.push(SelectionStrategy::Language(code.to_string()));
        }
        chain.push(SelectionStrategy::Manual(DEFAULT_LANGUAGE.to_string()));
        chain.push(SelectionStrategy::Generated(DEFAULT_LANGUAGE.to_string()));
        chain.push(SelectionStrategy::FirstAvailable);
        chain
    }
}

/// Pick a track: the preferred language, then manual English, then generated
/// English, then the first track listed.
pub fn select_track<'a>(
    list: &'a TranscriptList,
    language: Option<&str>,
) -> Option<&'a TranscriptTrack> {
    SelectionStrategy::chain(language)
        .iter()
        .find_map(|strategy| strategy.apply(list))
}
