//! Corpus data types shared by the store, the lookups and the loaders.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::CorpusError;

/// Playback position in whole seconds from the start of a video.
pub type Seconds = u64;

/// A timestamped piece of transcript text.
///
/// Both lookup paths produce segments: word lookups return stored segments verbatim, phrase
/// lookups return resolved snippets. On the wire a segment is a two-element array
/// `[start, text]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(Seconds, String)", into = "(Seconds, String)")]
pub struct Segment {
    /// Playback time at which the text begins.
    pub start: Seconds,
    /// Transcript text.
    pub text: String,
}

impl Segment {
    /// Creates a segment.
    pub fn new(start: Seconds, text: impl Into<String>) -> Self {
        Self {
            start,
            text: text.into(),
        }
    }
}

impl From<(Seconds, String)> for Segment {
    fn from((start, text): (Seconds, String)) -> Self {
        Self { start, text }
    }
}

impl From<Segment> for (Seconds, String) {
    fn from(segment: Segment) -> Self {
        (segment.start, segment.text)
    }
}

/// Display metadata for one video.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VideoMeta {
    /// Video title.
    pub title: String,
    /// Upload date, serialized as `YYYY-MM-DD`.
    pub upload_date: NaiveDate,
}

/// The Metadata Cache: per-video display data plus the corpus build time.
#[derive(Debug, Clone, Default)]
pub struct Metadata {
    /// Video id to title and upload date, for every video in the corpus.
    pub videos: BTreeMap<String, VideoMeta>,
    /// Corpus build time, verbatim from the artifact.
    pub updated_at: String,
}

impl Metadata {
    /// Parses `updated_at` for display.
    ///
    /// The pipeline writes Python's `str(datetime.now())`, so fractional seconds are tried
    /// first. Returns `None` for any other layout; callers show the raw string instead.
    pub fn updated_at_datetime(&self) -> Option<NaiveDateTime> {
        let raw = self.updated_at.trim();
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f")
            .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S"))
            .ok()
    }
}

/// Converts an eight-digit `YYYYMMDD` value into a calendar date.
///
/// The digits are taken literally: `20230615` is June 15, 2023, with no time zone involved.
pub fn parse_upload_date(video: &str, raw: u64) -> Result<NaiveDate, CorpusError> {
    let invalid = || CorpusError::InvalidUploadDate {
        video: video.to_string(),
        value: raw.to_string(),
    };
    if !(10_000_000..=99_999_999).contains(&raw) {
        return Err(invalid());
    }

    let year = i32::try_from(raw / 10_000).map_err(|_| invalid())?;
    let month = u32::try_from(raw / 100 % 100).map_err(|_| invalid())?;
    let day = u32::try_from(raw % 100).map_err(|_| invalid())?;
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid)
}
