//! Word Lookup: single-word queries answered from the precomputed index.

use std::collections::BTreeMap;

use tracing::debug;

use crate::{model::Segment, store::CorpusStore};

/// Returns the stored segments in which `word` occurs, grouped by video.
///
/// The word is lower-cased before lookup. A word with no index entry yields an empty map.
/// Index entries naming a video the store does not hold are skipped, and videos whose slots
/// select nothing are left out.
pub fn lookup_word(store: &CorpusStore, word: &str) -> BTreeMap<String, Vec<Segment>> {
    let normalized = word.to_lowercase();
    let Some(occurrences) = store.occurrences(&normalized) else {
        return BTreeMap::new();
    };

    let mut found = BTreeMap::new();
    for (id, slots) in occurrences {
        let Some(video) = store.video(id) else {
            debug!(word = %normalized, video = %id, "word index names unknown video, skipping");
            continue;
        };
        let segments = video.select_segments(slots);
        if !segments.is_empty() {
            found.insert(id.clone(), segments);
        }
    }
    found
}
