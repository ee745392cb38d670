//! The query engine and dispatcher.
//!
//! An [`Engine`] owns a loaded corpus and answers queries against it. It holds no interior
//! mutability, so one engine can serve any number of threads through a shared reference.

use std::{cmp::Reverse, collections::BTreeMap, fmt};

use serde::Serialize;
use tracing::debug;

use crate::{
    QueryError,
    model::{Metadata, Segment},
    phrase::{PhraseMatcher, lookup_phrase},
    result::QueryResult,
    store::CorpusStore,
    word::lookup_word,
};

/// Which lookup path a query takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKind {
    /// Single word, answered from the index.
    Word,
    /// Phrase, answered by scanning transcripts.
    Phrase,
}

impl QueryKind {
    /// Classifies a trimmed query: anything containing a space is a phrase.
    pub fn classify(query: &str) -> Self {
        if query.contains(' ') {
            Self::Phrase
        } else {
            Self::Word
        }
    }
}

impl fmt::Display for QueryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Word => "word",
            Self::Phrase => "phrase",
        })
    }
}

/// Corpus-wide counts for `vodsearch status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CorpusStats {
    /// Number of videos.
    pub videos: usize,
    /// Videos that have transcript text for phrase scanning.
    pub videos_with_text: usize,
    /// Distinct indexed words.
    pub words: usize,
    /// Stored segments across all videos.
    pub segments: usize,
    /// Corpus build time.
    #[serde(rename = "updatedAt")]
    pub updated_at: String,
}

/// An indexed word and how often it occurs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordCount {
    /// The word.
    pub word: String,
    /// Total indexed occurrences across all videos.
    pub count: usize,
}

/// A loaded corpus ready for queries.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    /// Transcripts, segments and the word index.
    store: CorpusStore,
    /// Titles, upload dates and the build time.
    metadata: Metadata,
}

impl Engine {
    /// Creates an engine over a loaded store and its metadata.
    pub fn new(store: CorpusStore, metadata: Metadata) -> Self {
        Self { store, metadata }
    }

    /// The corpus store.
    pub fn store(&self) -> &CorpusStore {
        &self.store
    }

    /// The metadata cache.
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Answers a query, routing by [`QueryKind::classify`].
    pub fn query(&self, query: &str) -> Result<QueryResult<'_>, QueryError> {
        let query = query.trim();
        self.query_as(query, QueryKind::classify(query))
    }

    /// Answers a query through a specific lookup path.
    pub fn query_as(&self, query: &str, kind: QueryKind) -> Result<QueryResult<'_>, QueryError> {
        let query = query.trim();
        debug!(%query, %kind, "dispatching query");
        match kind {
            QueryKind::Word => Ok(self.lookup_word(query)),
            QueryKind::Phrase => self.lookup_phrase(query),
        }
    }

    /// Single-word lookup. Never fails; an unknown word gives an empty result.
    pub fn lookup_word(&self, word: &str) -> QueryResult<'_> {
        self.package(word, lookup_word(&self.store, word))
    }

    /// Phrase lookup by full scan.
    pub fn lookup_phrase(&self, phrase: &str) -> Result<QueryResult<'_>, QueryError> {
        let matcher = PhraseMatcher::new(phrase)?;
        Ok(self.package(phrase, lookup_phrase(&self.store, &matcher)))
    }

    /// Attaches metadata to a lookup's segments.
    fn package(&self, query: &str, segments: BTreeMap<String, Vec<Segment>>) -> QueryResult<'_> {
        debug!(%query, videos = segments.len(), "query answered");
        QueryResult {
            query: query.to_string(),
            segments,
            meta: &self.metadata.videos,
            updated_at: &self.metadata.updated_at,
        }
    }

    /// Corpus-wide counts.
    pub fn stats(&self) -> CorpusStats {
        let mut stats = CorpusStats {
            videos: self.store.video_count(),
            videos_with_text: 0,
            words: self.store.word_count(),
            segments: 0,
            updated_at: self.metadata.updated_at.clone(),
        };
        for (_, video) in self.store.videos() {
            stats.segments += video.segments.len();
            if video.scannable().is_some() {
                stats.videos_with_text += 1;
            }
        }
        stats
    }

    /// The `limit` most frequent indexed words.
    ///
    /// Frequency is the number of recorded occurrence slots summed over videos. Ties are
    /// broken alphabetically.
    pub fn top_words(&self, limit: usize) -> Vec<WordCount> {
        let mut counts: Vec<WordCount> = self
            .store
            .words()
            .map(|(word, occurrences)| WordCount {
                word: word.to_string(),
                count: occurrences.values().map(Vec::len).sum(),
            })
            .collect();
        counts.sort_by(|a, b| {
            Reverse(a.count)
                .cmp(&Reverse(b.count))
                .then_with(|| a.word.cmp(&b.word))
        });
        counts.truncate(limit);
        counts
    }
}
