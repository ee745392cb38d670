//! Phrase Scanner: multi-word queries answered by scanning full transcripts.

use std::{collections::BTreeMap, ops::Range};

use regex::{Regex, RegexBuilder};

use crate::{QueryError, model::Segment, store::CorpusStore};

/// Case-insensitive literal matcher for a phrase.
///
/// The phrase is escaped before compiling, so `what?!` matches the text `what?!` and nothing
/// else. An empty phrase matches nothing.
#[derive(Debug, Clone)]
pub struct PhraseMatcher {
    /// Compiled matcher, `None` for the empty phrase.
    regex: Option<Regex>,
}

impl PhraseMatcher {
    /// Compiles a matcher for `phrase`.
    pub fn new(phrase: &str) -> Result<Self, QueryError> {
        if phrase.is_empty() {
            return Ok(Self { regex: None });
        }
        let regex = RegexBuilder::new(&regex::escape(phrase))
            .case_insensitive(true)
            .build()
            .map_err(|source| QueryError::Pattern {
                phrase: phrase.to_string(),
                source,
            })?;
        Ok(Self { regex: Some(regex) })
    }

    /// Byte ranges of every non-overlapping match in `text`, left to right.
    pub fn find_iter<'a>(&'a self, text: &'a str) -> impl Iterator<Item = Range<usize>> + 'a {
        self.regex
            .iter()
            .flat_map(move |regex| regex.find_iter(text).map(|m| m.range()))
    }

    /// Number of non-overlapping matches in `text`.
    pub fn count(&self, text: &str) -> usize {
        self.regex
            .as_ref()
            .map_or(0, |regex| regex.find_iter(text).count())
    }
}

/// Scans every video's transcript for `matcher` and resolves each match to a snippet.
///
/// Videos without transcript text are skipped. Videos with no match are left out.
pub fn lookup_phrase(
    store: &CorpusStore,
    matcher: &PhraseMatcher,
) -> BTreeMap<String, Vec<Segment>> {
    let mut found = BTreeMap::new();
    for (id, video) in store.videos() {
        let Some(transcript) = video.scannable() else {
            continue;
        };
        let clips: Vec<Segment> = matcher
            .find_iter(transcript.text())
            .map(|range| transcript.resolve(range.start, range.len()))
            .collect();
        if !clips.is_empty() {
            found.insert(id.to_string(), clips);
        }
    }
    found
}
