//! Boundary resolution: from a raw match to a timed, readable snippet.
//!
//! Timestamps are only known where a transcript token starts. A match can land anywhere, so
//! the resolver widens it to the nearest timed offset at or before its start and the nearest
//! timed offset at or after its end. The text between those two offsets is the snippet, and
//! the time at the left offset is where playback should begin.
//!
//! All offsets here are byte offsets into the transcript text.

use std::{collections::BTreeMap, ops::Range};

use crate::model::{Seconds, Segment};

/// Finds the snippet range around the match `[offset, offset + len)`.
///
/// The start is the greatest key of `idx_to_time` at or before `offset`, or 0 when there is
/// none. The end is the least key at or after `offset + len`, or the end of the text when
/// there is none. Both ends are clamped to `[0, text.len()]` and moved outwards to char
/// boundaries, so the returned range can always slice `text`.
pub fn snippet_bounds(
    text: &str,
    idx_to_time: &BTreeMap<usize, Seconds>,
    offset: usize,
    len: usize,
) -> Range<usize> {
    let text_len = text.len();
    let match_start = offset.min(text_len);
    let match_end = offset.saturating_add(len).min(text_len);

    let start = idx_to_time
        .range(..=match_start)
        .next_back()
        .map_or(0, |(&key, _)| key);
    let end = idx_to_time
        .range(match_end..)
        .next()
        .map_or(text_len, |(&key, _)| key.min(text_len));

    floor_char_boundary(text, start)..ceil_char_boundary(text, end)
}

/// Resolves a match to `(start time, trimmed snippet)`.
///
/// The start time is the time recorded at the snippet's left edge, or 0 when the left edge
/// is the start of the text and no time is recorded there.
pub fn resolve_boundary(
    text: &str,
    idx_to_time: &BTreeMap<usize, Seconds>,
    offset: usize,
    len: usize,
) -> Segment {
    let bounds = snippet_bounds(text, idx_to_time, offset, len);
    let start = idx_to_time.get(&bounds.start).copied().unwrap_or(0);
    Segment::new(start, text[bounds].trim())
}

/// Largest char boundary at or below `index`.
fn floor_char_boundary(text: &str, index: usize) -> usize {
    (0..=index.min(text.len()))
        .rev()
        .find(|&i| text.is_char_boundary(i))
        .unwrap_or(0)
}

/// Smallest char boundary at or above `index`.
fn ceil_char_boundary(text: &str, index: usize) -> usize {
    (index.min(text.len())..=text.len())
        .find(|&i| text.is_char_boundary(i))
        .unwrap_or(text.len())
}
