//! The Corpus Store: per-video transcripts, segments and the word index.
//!
//! Everything here is built once by a loader and never mutated afterwards, so a store can be
//! shared across threads by reference.

use std::{
    collections::{BTreeMap, HashMap},
    iter,
};

use crate::{
    boundary::resolve_boundary,
    model::{Seconds, Segment},
};

/// A flat transcript and its sparse offset to time map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    /// Full transcript text, segments concatenated in playback order.
    text: String,
    /// Byte offsets into `text` where a token starts, mapped to playback time.
    ///
    /// Every key is a char boundary of `text` and at most `text.len()`.
    idx_to_time: BTreeMap<usize, Seconds>,
}

impl Transcript {
    /// Builds a transcript from a map keyed by character offsets, as artifacts store them.
    ///
    /// Offsets are converted to byte offsets. Offsets beyond the end of the text are dropped.
    pub fn from_char_offsets(text: String, char_offsets: BTreeMap<usize, Seconds>) -> Self {
        let idx_to_time = char_to_byte_offsets(&text, char_offsets);
        Self { text, idx_to_time }
    }

    /// The transcript text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The offset to time map, keyed by byte offset.
    pub fn idx_to_time(&self) -> &BTreeMap<usize, Seconds> {
        &self.idx_to_time
    }

    /// Whether the transcript has no text to scan.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Resolves a match at byte range `[offset, offset + len)` to a timed snippet.
    pub fn resolve(&self, offset: usize, len: usize) -> Segment {
        resolve_boundary(&self.text, &self.idx_to_time, offset, len)
    }
}

/// Re-keys a char-offset map by byte offset in a single forward pass over `text`.
fn char_to_byte_offsets(
    text: &str,
    char_offsets: BTreeMap<usize, Seconds>,
) -> BTreeMap<usize, Seconds> {
    if text.is_ascii() {
        return char_offsets
            .into_iter()
            .filter(|(offset, _)| *offset <= text.len())
            .collect();
    }

    // Char boundaries, plus the end of the text as the boundary after the last char.
    let mut boundaries = text
        .char_indices()
        .map(|(byte, _)| byte)
        .chain(iter::once(text.len()));
    let mut consumed = 0;
    let mut converted = BTreeMap::new();
    for (offset, time) in char_offsets {
        let Some(byte) = boundaries.nth(offset - consumed) else {
            break;
        };
        consumed = offset + 1;
        converted.insert(byte, time);
    }
    converted
}

/// Everything known about one video's transcript.
#[derive(Debug, Clone, Default)]
pub struct Video {
    /// Segments as originally chunked, in playback order.
    pub segments: Vec<Segment>,
    /// Full text for phrase scanning, absent when the artifact has none.
    pub transcript: Option<Transcript>,
}

impl Video {
    /// Returns the segments at the given slot indices, in slot order.
    ///
    /// Indices past the end of the segment list are skipped.
    pub fn select_segments(&self, slots: &[usize]) -> Vec<Segment> {
        slots
            .iter()
            .filter_map(|&slot| self.segments.get(slot))
            .cloned()
            .collect()
    }

    /// The transcript, if there is any text to scan.
    pub fn scannable(&self) -> Option<&Transcript> {
        self.transcript.as_ref().filter(|t| !t.is_empty())
    }
}

/// Occurrence slots for one word: video id to sorted, deduplicated segment indices.
pub type WordOccurrences = BTreeMap<String, Vec<usize>>;

/// The in-memory corpus: videos by id and the word index.
#[derive(Debug, Clone, Default)]
pub struct CorpusStore {
    /// Videos keyed by id.
    videos: BTreeMap<String, Video>,
    /// Lower-cased word to its occurrences.
    words: HashMap<String, WordOccurrences>,
}

impl CorpusStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a video.
    pub fn insert_video(&mut self, id: impl Into<String>, video: Video) {
        self.videos.insert(id.into(), video);
    }

    /// Records the occurrence slots of `word` in `video`.
    ///
    /// Words are lower-cased. Slots are kept sorted and unique, which is the order
    /// [`Video::select_segments`] relies on to return segments in playback order.
    pub fn insert_occurrences(&mut self, word: &str, video: impl Into<String>, slots: Vec<usize>) {
        let merged = self
            .words
            .entry(word.to_lowercase())
            .or_default()
            .entry(video.into())
            .or_default();
        merged.extend(slots);
        merged.sort_unstable();
        merged.dedup();
    }

    /// Looks up a video by id.
    pub fn video(&self, id: &str) -> Option<&Video> {
        self.videos.get(id)
    }

    /// Iterates videos in id order.
    pub fn videos(&self) -> impl Iterator<Item = (&str, &Video)> {
        self.videos.iter().map(|(id, video)| (id.as_str(), video))
    }

    /// Occurrences of an already normalized word.
    pub fn occurrences(&self, word: &str) -> Option<&WordOccurrences> {
        self.words.get(word)
    }

    /// Iterates the word index.
    pub fn words(&self) -> impl Iterator<Item = (&str, &WordOccurrences)> {
        self.words.iter().map(|(word, occ)| (word.as_str(), occ))
    }

    /// Number of videos.
    pub fn video_count(&self) -> usize {
        self.videos.len()
    }

    /// Number of distinct indexed words.
    pub fn word_count(&self) -> usize {
        self.words.len()
    }
}
