//! SQLite corpus loader.
//!
//! Expected schema:
//!
//! ```sql
//! CREATE TABLE videos (vid TEXT PRIMARY KEY, title TEXT, upload_date INTEGER,
//!                      segments TEXT, full_text TEXT, idx_to_time TEXT);
//! CREATE TABLE word_map (word TEXT, vid TEXT, segment_indexes TEXT, PRIMARY KEY (word, vid));
//! CREATE TABLE info (key TEXT PRIMARY KEY, value TEXT);
//! ```
//!
//! `segments`, `idx_to_time` and `segment_indexes` hold JSON. The database is opened read-only
//! and drained into memory.

use std::{collections::BTreeMap, path::Path};

use chrono::NaiveDate;
use rusqlite::{Connection, OpenFlags, OptionalExtension, Row, types::Value};
use serde::de::DeserializeOwned;

use crate::{
    CorpusError,
    engine::Engine,
    model::{Metadata, Seconds, Segment, VideoMeta, parse_upload_date},
    store::{CorpusStore, Transcript, Video},
};

/// Key of the build-time row in `info`.
const UPDATED_AT_KEY: &str = "updatedAt";

/// Columns read for every video, in `read_video` order.
const SELECT_VIDEOS: &str =
    "SELECT vid, title, upload_date, segments, full_text, idx_to_time FROM videos";

/// Loads a SQLite corpus.
pub(super) fn load(path: &Path) -> Result<Engine, CorpusError> {
    let sql_err = |source| CorpusError::Sqlite {
        path: path.to_path_buf(),
        source,
    };
    let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)
        .map_err(sql_err)?;

    let updated_at: String = conn
        .query_row(
            "SELECT value FROM info WHERE key = ?1",
            [UPDATED_AT_KEY],
            |row| row.get(0),
        )
        .optional()
        .map_err(sql_err)?
        .ok_or(CorpusError::MissingInfo {
            key: UPDATED_AT_KEY,
        })?;

    let mut store = CorpusStore::new();
    let mut meta = BTreeMap::new();

    let mut stmt = conn.prepare(SELECT_VIDEOS).map_err(sql_err)?;
    let mut rows = stmt.query([]).map_err(sql_err)?;
    while let Some(row) = rows.next().map_err(sql_err)? {
        let (id, video_meta, video) = read_video(row).map_err(|err| match err {
            RowError::Sql(source) => sql_err(source),
            RowError::Corpus(err) => err,
        })?;
        meta.insert(id.clone(), video_meta);
        store.insert_video(id, video);
    }

    let mut stmt = conn
        .prepare("SELECT word, vid, segment_indexes FROM word_map")
        .map_err(sql_err)?;
    let mut rows = stmt.query([]).map_err(sql_err)?;
    while let Some(row) = rows.next().map_err(sql_err)? {
        let word: String = row.get(0).map_err(sql_err)?;
        let vid: String = row.get(1).map_err(sql_err)?;
        let raw: String = row.get(2).map_err(sql_err)?;
        let slots: Vec<usize> = decode(&vid, "segment_indexes", &raw)?;
        store.insert_occurrences(&word, vid, slots);
    }

    Ok(Engine::new(
        store,
        Metadata {
            videos: meta,
            updated_at,
        },
    ))
}

/// Failure reading one `videos` row.
enum RowError {
    /// Column access failed.
    Sql(rusqlite::Error),
    /// Column content was invalid.
    Corpus(CorpusError),
}

impl From<rusqlite::Error> for RowError {
    fn from(err: rusqlite::Error) -> Self {
        Self::Sql(err)
    }
}

impl From<CorpusError> for RowError {
    fn from(err: CorpusError) -> Self {
        Self::Corpus(err)
    }
}

/// Decodes one `videos` row.
fn read_video(row: &Row<'_>) -> Result<(String, VideoMeta, Video), RowError> {
    let id: String = row.get(0)?;
    let title: Option<String> = row.get(1)?;
    let upload_date = upload_date(&id, row.get(2)?)?;
    let segments: Option<String> = row.get(3)?;
    let full_text: Option<String> = row.get(4)?;
    let idx_to_time: Option<String> = row.get(5)?;

    let segments: Vec<Segment> = match segments {
        Some(raw) => decode(&id, "segments", &raw)?,
        None => Vec::new(),
    };
    let transcript = match full_text {
        Some(text) => {
            let offsets: BTreeMap<usize, Seconds> = match idx_to_time {
                Some(raw) => decode(&id, "idx_to_time", &raw)?,
                None => BTreeMap::new(),
            };
            Some(Transcript::from_char_offsets(text, offsets))
        }
        None => None,
    };

    let meta = VideoMeta {
        title: title.unwrap_or_default(),
        upload_date,
    };
    let video = Video {
        segments,
        transcript,
    };
    Ok((id, meta, video))
}

/// Reads an upload date stored as an integer or as digit text.
fn upload_date(video: &str, value: Value) -> Result<NaiveDate, CorpusError> {
    let invalid = |value: String| CorpusError::InvalidUploadDate {
        video: video.to_string(),
        value,
    };
    let raw = match value {
        Value::Integer(n) => u64::try_from(n).map_err(|_| invalid(n.to_string()))?,
        Value::Text(text) => text.trim().parse().map_err(|_| invalid(text.clone()))?,
        other => return Err(invalid(format!("{other:?}"))),
    };
    parse_upload_date(video, raw)
}

/// Decodes a JSON column.
fn decode<T: DeserializeOwned>(
    video: &str,
    column: &'static str,
    raw: &str,
) -> Result<T, CorpusError> {
    serde_json::from_str(raw).map_err(|source| CorpusError::DecodeColumn {
        video: video.to_string(),
        column,
        source,
    })
}
