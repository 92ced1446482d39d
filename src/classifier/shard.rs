//! Sharded classification
//!
//! Splits an in-memory log into contiguous shards, classifies each on its
//! own scoped thread into its own tally, then sums the tallies.

use std::sync::Arc;

use crate::grammar::Registry;
use super::{classify_stream, Tally};

/// Classify `lines` across up to `shards` worker threads
///
/// Produces the same tally as `classify_stream` over the whole input.
pub fn classify_sharded<S>(registry: Arc<Registry>, lines: &[S], shards: usize) -> Tally
where
    S: AsRef<str> + Sync,
{
    let shards = shards.max(1);
    if shards == 1 || lines.len() < 2 {
        return classify_stream(&registry, lines);
    }

    let chunk_size = (lines.len() + shards - 1) / shards;
    tracing::debug!(
        "Classifying {} lines in {} shards of up to {}",
        lines.len(),
        (lines.len() + chunk_size - 1) / chunk_size,
        chunk_size
    );

    let result = crossbeam::thread::scope(|scope| {
        let handles: Vec<_> = lines
            .chunks(chunk_size)
            .map(|chunk| {
                let registry = Arc::clone(&registry);
                scope.spawn(move |_| classify_stream(&registry, chunk))
            })
            .collect();

        handles
            .into_iter()
            .map(|handle| handle.join())
            .collect::<std::thread::Result<Vec<Tally>>>()
    });

    match result {
        Ok(Ok(tallies)) => tallies.into_iter().sum(),
        // classification does not panic; fall back to a single pass if a shard did
        _ => {
            tracing::warn!("A classification shard panicked, re-running single-threaded");
            classify_stream(&registry, lines)
        }
    }
}
