//! Rendering and JSON serialization for CLI output.

use std::process::ExitCode;

use comfy_table::{Cell, CellAlignment, Table, presets::UTF8_FULL_CONDENSED};
use serde::Serialize;
use vodsearch_config::OutputSettings;
use vodsearch_highlight::{banner, format_timestamp, mark_ranges};
pub use vodsearch_highlight::{dim, subheader, success, warning};
use vodsearch_index::{PhraseMatcher, QueryResult, Segment, clip_url};

use crate::cli::args::OutputMode;

/// Everything needed to render one query result.
pub struct ResultView<'r, 'a> {
    /// The result.
    pub result: &'r QueryResult<'a>,
    /// Matcher for the query term, used for counting and marking.
    pub matcher: &'r PhraseMatcher,
    /// `[output]` settings.
    pub settings: &'r OutputSettings,
    /// Corpus build time, ready for display.
    pub updated: String,
}

/// Prints a query result in the chosen mode.
pub fn output_query_result(view: &ResultView<'_, '_>, mode: OutputMode) -> ExitCode {
    if mode == OutputMode::Json {
        return print_json(view.result);
    }

    if view.result.is_empty() {
        println!("No results for \"{}\".", view.result.query);
        return ExitCode::SUCCESS;
    }

    match mode {
        OutputMode::List => println!("{}", format_list(view.result)),
        OutputMode::Timeline => println!("{}", format_timeline(view.result)),
        OutputMode::Full | OutputMode::Json => print!("{}", format_full(view)),
    }
    println!();
    println!("{}", summary_line(view));
    ExitCode::SUCCESS
}

/// Pretty-prints any serializable value to stdout.
pub fn print_json<T: Serialize>(value: &T) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: failed to serialize JSON: {e}");
            ExitCode::FAILURE
        }
    }
}

/// `"X" said N times in V videos. Last updated T.`
pub fn summary_line(view: &ResultView<'_, '_>) -> String {
    let mentions = view.result.total_mentions(view.matcher);
    let videos = view.result.segments.len();
    subheader(&format!(
        "\"{}\" said {} {} in {} {}. Last updated {}.",
        view.result.query,
        mentions,
        plural(mentions, "time", "times"),
        videos,
        plural(videos, "video", "videos"),
        view.updated
    ))
}

/// Picks the singular or plural noun.
fn plural(n: usize, one: &'static str, many: &'static str) -> &'static str {
    if n == 1 { one } else { many }
}

/// Clips grouped per video, newest video first.
pub fn format_full(view: &ResultView<'_, '_>) -> String {
    let result = view.result;
    let mut out = String::new();
    for id in result.videos_by_date() {
        let Some(clips) = result.segments.get(id) else {
            continue;
        };
        let title = result.meta.get(id).map_or(id, |m| m.title.as_str());
        out.push_str(&banner(title));
        out.push('\n');
        let date = result
            .upload_date(id)
            .map_or_else(|| "unknown date".to_string(), |d| d.to_string());
        out.push_str(&dim(&format!("{date} · {id}")));
        out.push('\n');
        for clip in clips {
            out.push_str(&format_clip(view, id, clip));
            out.push('\n');
        }
        out.push('\n');
    }
    out
}

/// One clip line: timestamp, snippet, playback link.
fn format_clip(view: &ResultView<'_, '_>, video: &str, clip: &Segment) -> String {
    let text = if view.settings.highlight {
        let ranges: Vec<_> = view.matcher.find_iter(&clip.text).collect();
        mark_ranges(&clip.text, &ranges)
    } else {
        clip.text.clone()
    };
    let url = clip_url(
        &view.settings.video_url,
        video,
        clip.start,
        view.settings.lead_in,
    );
    format!(
        "  {:>8}  {text}  {}",
        format_timestamp(clip.start),
        dim(&url)
    )
}

/// One row per matching video, newest first.
pub fn format_list(result: &QueryResult<'_>) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["Date", "Clips", "Video", "Title"]);
    for id in result.videos_by_date() {
        let clips = result.segments.get(id).map_or(0, Vec::len);
        let meta = result.meta.get(id);
        let date = meta.map_or_else(String::new, |m| m.upload_date.to_string());
        table.add_row(vec![
            Cell::new(date),
            Cell::new(clips).set_alignment(CellAlignment::Right),
            Cell::new(id),
            Cell::new(meta.map_or("", |m| m.title.as_str())),
        ]);
    }
    table
}

/// One row per upload date, oldest first.
pub fn format_timeline(result: &QueryResult<'_>) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["Date", "Clips", "Videos"]);
    for day in result.timeline() {
        table.add_row(vec![
            Cell::new(day.date),
            Cell::new(day.clips).set_alignment(CellAlignment::Right),
            Cell::new(day.videos.join(", ")),
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use vodsearch_index::{VideoMeta, parse_upload_date};

    use super::*;

    fn strip_ansi(input: &str) -> String {
        let mut output = String::with_capacity(input.len());
        let mut chars = input.chars();
        while let Some(ch) = chars.next() {
            if ch == '\u{1b}' {
                for c in chars.by_ref() {
                    if c == 'm' {
                        break;
                    }
                }
            } else {
                output.push(ch);
            }
        }
        output
    }

    fn meta() -> BTreeMap<String, VideoMeta> {
        BTreeMap::from([
            (
                "old".to_string(),
                VideoMeta {
                    title: "Old stream".to_string(),
                    upload_date: parse_upload_date("old", 20_230_101).unwrap(),
                },
            ),
            (
                "new".to_string(),
                VideoMeta {
                    title: "New stream".to_string(),
                    upload_date: parse_upload_date("new", 20_240_101).unwrap(),
                },
            ),
        ])
    }

    fn result(meta: &BTreeMap<String, VideoMeta>) -> QueryResult<'_> {
        QueryResult {
            query: "gg".to_string(),
            segments: BTreeMap::from([
                ("old".to_string(), vec![Segment::new(2, "gg GG")]),
                ("new".to_string(), vec![Segment::new(3725, "that was gg")]),
            ]),
            meta,
            updated_at: "2024-03-01 12:00:00",
        }
    }

    #[test]
    fn test_full_output_newest_first_with_links() {
        let meta = meta();
        let result = result(&meta);
        let matcher = PhraseMatcher::new("gg").unwrap();
        let settings = OutputSettings::default();
        let view = ResultView {
            result: &result,
            matcher: &matcher,
            settings: &settings,
            updated: "2024-03-01 12:00".to_string(),
        };

        let text = strip_ansi(&format_full(&view));
        let new_at = text.find("New stream").unwrap();
        let old_at = text.find("Old stream").unwrap();
        assert!(new_at < old_at);
        assert!(text.contains("1:02:05  that was gg"));
        assert!(text.contains("https://youtube.com/watch?v=new&t=3722"));
        assert!(text.contains("https://youtube.com/watch?v=old&t=0"));
        assert!(text.contains("2024-01-01 · new"));
    }

    #[test]
    fn test_highlight_toggle() {
        let meta = meta();
        let result = result(&meta);
        let matcher = PhraseMatcher::new("gg").unwrap();
        let marked = OutputSettings::default();
        let plain = OutputSettings {
            highlight: false,
            ..OutputSettings::default()
        };

        let view = ResultView {
            result: &result,
            matcher: &matcher,
            settings: &marked,
            updated: String::new(),
        };
        assert!(format_full(&view).contains("\x1b[1m\x1b[33mGG\x1b[0m"));

        let view = ResultView {
            settings: &plain,
            ..view
        };
        assert!(!format_full(&view).contains("\x1b[33m"));
    }

    #[test]
    fn test_summary_counts_mentions() {
        let meta = meta();
        let result = result(&meta);
        let matcher = PhraseMatcher::new("gg").unwrap();
        let settings = OutputSettings::default();
        let view = ResultView {
            result: &result,
            matcher: &matcher,
            settings: &settings,
            updated: "yesterday".to_string(),
        };
        assert_eq!(
            strip_ansi(&summary_line(&view)),
            "\"gg\" said 3 times in 2 videos. Last updated yesterday."
        );
    }

    #[test]
    fn test_list_and_timeline_tables() {
        let meta = meta();
        let result = result(&meta);

        let list = format_list(&result).to_string();
        assert!(list.contains("Old stream"));
        assert!(list.find("new").unwrap() < list.find("old").unwrap());

        let timeline = format_timeline(&result).to_string();
        let older = timeline.find("2023-01-01").unwrap();
        let newer = timeline.find("2024-01-01").unwrap();
        assert!(older < newer);
    }
}
