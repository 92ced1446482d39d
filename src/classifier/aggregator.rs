//! Classifier
//!
//! Matches lines against the registry and accumulates a tally.

use std::sync::Arc;

use crate::grammar::Registry;
use super::{Outcome, Tally};

/// Classifies lines and owns the resulting tally
pub struct Classifier {
    /// Shared, read-only grammars
    registry: Arc<Registry>,

    /// Counts for this run
    tally: Tally,

    /// Lines seen since the last reset
    lines: u64,
}

impl Classifier {
    /// Create a classifier with an empty tally
    pub fn new(registry: Arc<Registry>) -> Self {
        Self {
            registry,
            tally: Tally::new(),
            lines: 0,
        }
    }

    /// Classify one line without recording it
    ///
    /// The discard shape is checked first; the two shapes never overlap
    /// because a discard marker carries no quoted header.
    pub fn classify_line(&self, line: &str) -> Outcome {
        classify(&self.registry, line)
    }

    /// Classify one line and record the outcome
    pub fn feed(&mut self, line: &str) -> Outcome {
        let outcome = self.classify_line(line);
        self.tally.record(outcome);
        self.lines += 1;

        match outcome {
            Outcome::Unparseable => {
                tracing::trace!(line_no = self.lines, "Unparseable line: {:?}", line);
            }
            Outcome::Others => {
                tracing::trace!(line_no = self.lines, "Unrecognized command: {:?}", line);
            }
            _ => {}
        }

        outcome
    }

    /// Feed every line from an iterator
    pub fn feed_all<I, S>(&mut self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for line in lines {
            self.feed(line.as_ref());
        }
    }

    /// Counts so far
    pub fn tally(&self) -> &Tally {
        &self.tally
    }

    /// Number of lines fed since the last reset
    pub fn lines_seen(&self) -> u64 {
        self.lines
    }

    /// Finish the run and hand back its counts
    pub fn into_tally(self) -> Tally {
        self.tally
    }

    /// Start a new run
    pub fn reset(&mut self) {
        self.tally.reset();
        self.lines = 0;
    }
}

/// Classify a sequence of lines into a fresh tally
///
/// Never fails: every line lands in exactly one bucket.
pub fn classify_stream<I, S>(registry: &Registry, lines: I) -> Tally
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut tally = Tally::new();
    for line in lines {
        tally.record(classify(registry, line.as_ref()));
    }
    tally
}

pub(crate) fn classify(registry: &Registry, line: &str) -> Outcome {
    let line = line.trim();
    let grammar = registry.line();

    if let Some(marker) = grammar.parse_discard(line) {
        return Outcome::Discarded(marker.count);
    }

    match grammar.parse_entry(line) {
        Some(entry) => match registry.match_header(entry.header) {
            Some(command) => Outcome::Command(command.kind),
            None => Outcome::Others,
        },
        None => Outcome::Unparseable,
    }
}
