//! JSON corpus loader.

use std::{
    collections::{BTreeMap, HashMap},
    fs,
    path::Path,
};

use serde::{Deserialize, de::DeserializeOwned};
use serde_with::{DisplayFromStr, PickFirst, serde_as};
use tracing::warn;

use crate::{
    CorpusError,
    engine::Engine,
    model::{Metadata, Seconds, Segment, VideoMeta, parse_upload_date},
    store::{CorpusStore, Transcript, Video},
};

/// The main corpus file.
#[derive(Deserialize)]
struct RawCorpus {
    /// Segments per video.
    #[serde(default)]
    segments: HashMap<String, Vec<Segment>>,
    /// Word to video to slot indices.
    #[serde(default)]
    word_map: HashMap<String, HashMap<String, Vec<usize>>>,
    /// Title and upload date per video.
    meta: HashMap<String, RawMeta>,
    /// Build time.
    #[serde(rename = "updatedAt")]
    updated_at: String,
}

/// One `meta` entry. The pipeline has written the date both as a number and as a string.
#[serde_as]
#[derive(Deserialize)]
struct RawMeta {
    /// Display title.
    title: String,
    /// `YYYYMMDD`.
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    upload_date: u64,
}

/// One entry of the full-text companion.
#[derive(Deserialize)]
struct RawFullText {
    /// Concatenated transcript.
    #[serde(default)]
    text: String,
    /// Char offset to seconds.
    #[serde(default)]
    idx_to_time: BTreeMap<usize, Seconds>,
}

/// Reads and deserializes a JSON file.
fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, CorpusError> {
    let contents = fs::read_to_string(path).map_err(|source| CorpusError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| CorpusError::ParseJson {
        path: path.to_path_buf(),
        source,
    })
}

/// Loads a JSON corpus and, when given, its full-text companion.
pub(super) fn load(path: &Path, full_text: Option<&Path>) -> Result<Engine, CorpusError> {
    let raw: RawCorpus = read_json(path)?;
    let mut full: HashMap<String, RawFullText> = match full_text {
        Some(full_path) => read_json(full_path)?,
        None => {
            warn!(
                corpus = %path.display(),
                "no full-text file found; phrase queries will return no results"
            );
            HashMap::new()
        }
    };

    let mut videos = BTreeMap::new();
    for (id, meta) in &raw.meta {
        videos.insert(
            id.clone(),
            VideoMeta {
                title: meta.title.clone(),
                upload_date: parse_upload_date(id, meta.upload_date)?,
            },
        );
    }

    let mut store = CorpusStore::new();
    let mut segments = raw.segments;
    let ids: Vec<String> = videos
        .keys()
        .chain(segments.keys())
        .chain(full.keys())
        .cloned()
        .collect();
    for id in ids {
        if store.video(&id).is_some() {
            continue;
        }
        let transcript = full
            .remove(&id)
            .map(|f| Transcript::from_char_offsets(f.text, f.idx_to_time));
        let video = Video {
            segments: segments.remove(&id).unwrap_or_default(),
            transcript,
        };
        store.insert_video(id, video);
    }

    for (word, occurrences) in raw.word_map {
        for (video, slots) in occurrences {
            store.insert_occurrences(&word, video, slots);
        }
    }

    Ok(Engine::new(
        store,
        Metadata {
            videos,
            updated_at: raw.updated_at,
        },
    ))
}
