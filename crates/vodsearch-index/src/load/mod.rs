//! Corpus artifact loading.
//!
//! Two encodings are supported. A JSON corpus is a main file (segments, word map, metadata,
//! build time) plus an optional companion holding each video's full text and offset map. A
//! SQLite corpus keeps the same data in three tables. Either way everything is read into
//! memory once; queries never touch the disk.

mod json;
mod sqlite;

use std::{
    path::{Path, PathBuf},
    time::Instant,
};

use tracing::info;
use vodsearch_config::{Config, CorpusFormat};

use crate::{CorpusError, engine::Engine};

/// Where a corpus lives and how it is encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusSource {
    /// Corpus file or database.
    pub path: PathBuf,
    /// Full-text companion for JSON corpora, when set explicitly.
    pub full_text: Option<PathBuf>,
    /// Encoding; `Auto` is resolved from the file extension.
    pub format: CorpusFormat,
}

impl CorpusSource {
    /// A source with the format picked from the extension.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            full_text: None,
            format: CorpusFormat::Auto,
        }
    }

    /// The source described by the `[corpus]` section of a config.
    pub fn from_config(config: &Config) -> Result<Self, CorpusError> {
        let path = config
            .corpus
            .path
            .clone()
            .ok_or(CorpusError::NotConfigured)?;
        Ok(Self {
            path,
            full_text: config.corpus.full_text.clone(),
            format: config.corpus.format,
        })
    }

    /// Sets an explicit full-text companion.
    pub fn with_full_text(mut self, path: impl Into<PathBuf>) -> Self {
        self.full_text = Some(path.into());
        self
    }

    /// Forces an encoding.
    pub fn with_format(mut self, format: CorpusFormat) -> Self {
        self.format = format;
        self
    }

    /// The concrete encoding of this source.
    pub fn resolved_format(&self) -> CorpusFormat {
        self.format.resolve(&self.path)
    }

    /// The companion file a JSON corpus would read, if any.
    ///
    /// An explicit setting wins. Otherwise `<stem>_full.json` next to the corpus is used when
    /// it exists.
    pub fn full_text_path(&self) -> Option<PathBuf> {
        if let Some(explicit) = &self.full_text {
            return Some(explicit.clone());
        }
        let candidate = default_full_text_path(&self.path)?;
        candidate.is_file().then_some(candidate)
    }

    /// Reads the whole corpus into an [`Engine`].
    pub fn load(&self) -> Result<Engine, CorpusError> {
        let started = Instant::now();
        let format = self.resolved_format();
        let engine = match format {
            CorpusFormat::Sqlite => sqlite::load(&self.path)?,
            CorpusFormat::Json | CorpusFormat::Auto => {
                json::load(&self.path, self.full_text_path().as_deref())?
            }
        };

        let stats = engine.stats();
        info!(
            path = %self.path.display(),
            %format,
            videos = stats.videos,
            words = stats.words,
            with_text = stats.videos_with_text,
            elapsed_ms = started.elapsed().as_millis(),
            "corpus loaded"
        );
        Ok(engine)
    }
}

/// `<dir>/<stem>_full.json` for a corpus at `<dir>/<stem>.<ext>`.
fn default_full_text_path(corpus: &Path) -> Option<PathBuf> {
    let stem = corpus.file_stem()?.to_str()?;
    Some(corpus.with_file_name(format!("{stem}_full.json")))
}

/// Opens the corpus named by a config.
pub fn open_engine(config: &Config) -> Result<Engine, CorpusError> {
    CorpusSource::from_config(config)?.load()
}
