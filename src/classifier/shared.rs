//! Shared tally for live runs
//!
//! One writer records outcomes while readers take consistent snapshots.

use std::sync::Arc;

use parking_lot::RwLock;

use super::{Classifier, Outcome, Tally};

/// A tally behind a read/write lock
#[derive(Debug, Clone, Default)]
pub struct SharedTally {
    inner: Arc<RwLock<Tally>>,
}

impl SharedTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one outcome (write lock)
    pub fn record(&self, outcome: Outcome) {
        self.inner.write().record(outcome);
    }

    /// Classify one line and record it here only
    ///
    /// The classifier's own tally is left untouched.
    pub fn classify(&self, classifier: &Classifier, line: &str) -> Outcome {
        let outcome = classifier.classify_line(line);
        self.record(outcome);
        outcome
    }

    /// Fold a locally accumulated batch in (write lock)
    pub fn merge(&self, batch: &Tally) {
        self.inner.write().merge(batch);
    }

    /// Copy of the current counts (read lock)
    pub fn snapshot(&self) -> Tally {
        self.inner.read().clone()
    }

    /// Zero the counts for a new run (write lock)
    pub fn reset(&self) {
        self.inner.write().reset();
    }
}
