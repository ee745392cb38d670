//! Transcript retrieval engine for vodsearch.
//!
//! Finds a word or phrase in a corpus of time-coded video transcripts and returns, per video,
//! the snippets that contain it and the playback time where each snippet begins.
//!
//! The corpus is loaded once into memory and never changes afterwards:
//! - Single words are answered from a precomputed word index that points at stored segments.
//! - Phrases are answered by scanning each video's flat transcript, then widening every match
//!   to the nearest timed offsets (see [`resolve_boundary`]).
//!
//! # Example
//!
//! ```no_run
//! use vodsearch_index::CorpusSource;
//!
//! let engine = CorpusSource::new("data/squeex.db").load().unwrap();
//! let result = engine.query("love speedrunning").unwrap();
//! for (video, clips) in &result.segments {
//!     for clip in clips {
//!         println!("{video} @ {}s: {}", clip.start, clip.text);
//!     }
//! }
//! ```

#![warn(missing_docs)]

mod boundary;
mod engine;
mod error;
mod load;
mod model;
mod phrase;
mod result;
mod store;
mod word;

pub use boundary::{resolve_boundary, snippet_bounds};
pub use engine::{CorpusStats, Engine, QueryKind, WordCount};
pub use error::{CorpusError, QueryError};
pub use load::{CorpusSource, open_engine};
pub use model::{Metadata, Seconds, Segment, VideoMeta, parse_upload_date};
pub use phrase::{PhraseMatcher, lookup_phrase};
pub use result::{QueryResult, TimelineDay, clip_url};
pub use store::{CorpusStore, Transcript, Video, WordOccurrences};
pub use word::lookup_word;
