//! Query results and the summaries derived from them.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::{
    QueryError,
    model::{Seconds, Segment, VideoMeta},
    phrase::PhraseMatcher,
};

/// The answer to one query.
///
/// Built fresh per query. `segments` owns copies of the matched text; `meta` and
/// `updated_at` borrow from the engine. Serializes as
/// `{"word", "segments", "meta", "updatedAt"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryResult<'a> {
    /// The query term as given (trimmed by the dispatcher).
    #[serde(rename = "word")]
    pub query: String,
    /// Matching clips by video id. Videos without matches are absent.
    pub segments: BTreeMap<String, Vec<Segment>>,
    /// Metadata for every video in the corpus, matched or not.
    pub meta: &'a BTreeMap<String, VideoMeta>,
    /// Corpus build time.
    #[serde(rename = "updatedAt")]
    pub updated_at: &'a str,
}

/// Clip counts for one upload date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineDay {
    /// Upload date.
    pub date: NaiveDate,
    /// Number of clips from videos uploaded that day.
    pub clips: usize,
    /// Matching videos uploaded that day, by id.
    pub videos: Vec<String>,
}

impl QueryResult<'_> {
    /// Whether nothing matched.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Total number of clips across all videos.
    pub fn clip_count(&self) -> usize {
        self.segments.values().map(Vec::len).sum()
    }

    /// A matcher for the query term, for counting and highlighting.
    pub fn matcher(&self) -> Result<PhraseMatcher, QueryError> {
        PhraseMatcher::new(&self.query)
    }

    /// Counts literal, case-insensitive occurrences of the query inside the returned clips.
    ///
    /// A clip can hold the term several times, or (for word lookups) not literally at all,
    /// so this differs from [`Self::clip_count`].
    pub fn total_mentions(&self, matcher: &PhraseMatcher) -> usize {
        self.segments
            .values()
            .flatten()
            .map(|segment| matcher.count(&segment.text))
            .sum()
    }

    /// Upload date of a video, when its metadata is known.
    pub fn upload_date(&self, video: &str) -> Option<NaiveDate> {
        self.meta.get(video).map(|m| m.upload_date)
    }

    /// Matching video ids, newest upload first.
    ///
    /// Ties are broken by id. Videos with no metadata sort last.
    pub fn videos_by_date(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.segments.keys().map(String::as_str).collect();
        ids.sort_by(|a, b| {
            let (da, db) = (self.upload_date(a), self.upload_date(b));
            db.cmp(&da).then_with(|| a.cmp(b))
        });
        ids
    }

    /// Clip counts grouped by upload date, oldest first.
    ///
    /// Videos with no metadata have no date and are not counted.
    pub fn timeline(&self) -> Vec<TimelineDay> {
        let mut days: BTreeMap<NaiveDate, TimelineDay> = BTreeMap::new();
        for (id, clips) in &self.segments {
            let Some(date) = self.upload_date(id) else {
                continue;
            };
            let day = days.entry(date).or_insert_with(|| TimelineDay {
                date,
                clips: 0,
                videos: Vec::new(),
            });
            day.clips += clips.len();
            day.videos.push(id.clone());
        }
        days.into_values().collect()
    }
}

/// Builds a playback link for a clip.
///
/// The start is moved back by `lead_in` seconds, stopping at 0, so playback begins just
/// before the words are spoken.
pub fn clip_url(video_url: &str, video: &str, start: Seconds, lead_in: Seconds) -> String {
    format!("{video_url}{video}&t={}", start.saturating_sub(lead_in))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta() -> BTreeMap<String, VideoMeta> {
        let video = |title: &str, y, m, d| VideoMeta {
            title: title.to_string(),
            upload_date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
        };
        BTreeMap::from([
            ("a".to_string(), video("A", 2023, 1, 5)),
            ("b".to_string(), video("B", 2024, 2, 1)),
            ("c".to_string(), video("C", 2023, 1, 5)),
            ("d".to_string(), video("D", 2022, 7, 9)),
        ])
    }

    fn result(meta: &BTreeMap<String, VideoMeta>) -> QueryResult<'_> {
        QueryResult {
            query: "gg".to_string(),
            segments: BTreeMap::from([
                (
                    "a".to_string(),
                    vec![Segment::new(1, "gg gg"), Segment::new(9, "GG wp")],
                ),
                ("b".to_string(), vec![Segment::new(3, "good gg")]),
                ("c".to_string(), vec![Segment::new(4, "eggs")]),
                ("orphan".to_string(), vec![Segment::new(0, "gg")]),
            ]),
            meta,
            updated_at: "2024-03-01 00:00:00",
        }
    }

    #[test]
    fn test_counts() {
        let meta = meta();
        let result = result(&meta);
        let matcher = result.matcher().unwrap();

        assert_eq!(result.clip_count(), 5);
        assert_eq!(result.total_mentions(&matcher), 6);
        assert!(!result.is_empty());
    }

    #[test]
    fn test_videos_by_date_newest_first() {
        let meta = meta();
        let res = result(&meta);
        let order = res.videos_by_date();
        assert_eq!(order, vec!["b", "a", "c", "orphan"]);
    }

    #[test]
    fn test_timeline_oldest_first() {
        let meta = meta();
        let result = result(&meta);
        let timeline = result.timeline();

        assert_eq!(timeline.len(), 2);
        let first = NaiveDate::from_ymd_opt(2023, 1, 5).unwrap();
        assert_eq!(timeline[0].date, first);
        assert_eq!(timeline[0].clips, 3);
        assert_eq!(timeline[0].videos, vec!["a", "c"]);
        assert_eq!(timeline[1].clips, 1);
        let dated: usize = timeline.iter().map(|d| d.clips).sum();
        assert_eq!(dated, result.clip_count() - 1);
    }

    #[test]
    fn test_serialized_shape() {
        let meta = meta();
        let json = serde_json::to_value(result(&meta)).unwrap();

        assert_eq!(json["word"], "gg");
        assert_eq!(json["updatedAt"], "2024-03-01 00:00:00");
        assert_eq!(json["segments"]["b"][0][0], 3);
        assert_eq!(json["segments"]["b"][0][1], "good gg");
        assert_eq!(json["meta"]["d"]["upload_date"], "2022-07-09");
    }

    #[test]
    fn test_clip_url_lead_in() {
        let base = "https://youtube.com/watch?v=";
        let url = clip_url(base, "abc", 20, 3);
        assert_eq!(url, "https://youtube.com/watch?v=abc&t=17");
        let url = clip_url(base, "abc", 2, 3);
        assert_eq!(url, "https://youtube.com/watch?v=abc&t=0");
    }
}
