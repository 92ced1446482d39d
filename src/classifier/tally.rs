//! Tally definitions
//!
//! Per-category counters produced by a classification pass.

use std::fmt;
use std::iter::Sum;
use std::ops::AddAssign;
use std::str::FromStr;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::grammar::CommandKind;

/// Result of classifying a single line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Well-formed entry whose header matched a command grammar
    Command(CommandKind),

    /// Well-formed entry with an unrecognized command header
    Others,

    /// Discard marker standing in for this many dropped entries
    Discarded(u64),

    /// Line matching neither the entry nor the discard shape
    Unparseable,
}

/// A tally bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Command(CommandKind),
    Others,
    Discarded,
    Unparseable,
}

impl Category {
    /// Every bucket, in report order
    pub fn all() -> impl Iterator<Item = Category> {
        CommandKind::ALL
            .into_iter()
            .map(Category::Command)
            .chain([Category::Others, Category::Discarded, Category::Unparseable])
    }

    pub fn name(self) -> &'static str {
        match self {
            Category::Command(kind) => kind.keyword(),
            Category::Others => "others",
            Category::Discarded => "discarded",
            Category::Unparseable => "unparseable",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "others" => Ok(Category::Others),
            "discarded" => Ok(Category::Discarded),
            "unparseable" => Ok(Category::Unparseable),
            _ => CommandKind::from_keyword(s)
                .map(Category::Command)
                .ok_or_else(|| format!("unknown tally category: {}", s)),
        }
    }
}

/// Aggregate counts for one classification run
///
/// Counts only ever grow while lines are recorded; `reset` is the only way
/// back to zero. Counts are additive, so tallies of disjoint parts of an
/// input sum to the tally of the whole.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tally {
    commands: [u64; CommandKind::COUNT],
    others: u64,
    discarded: u64,
    unparseable: u64,
}

impl Tally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one classified line
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Command(kind) => self.commands[kind.index()] += 1,
            Outcome::Others => self.others += 1,
            // marker counts come straight from the input, so they may be huge
            Outcome::Discarded(count) => self.discarded = self.discarded.saturating_add(count),
            Outcome::Unparseable => self.unparseable += 1,
        }
    }

    /// Count in one bucket
    pub fn get(&self, category: Category) -> u64 {
        match category {
            Category::Command(kind) => self.commands[kind.index()],
            Category::Others => self.others,
            Category::Discarded => self.discarded,
            Category::Unparseable => self.unparseable,
        }
    }

    /// Count in the bucket with this name, if there is one
    pub fn count(&self, name: &str) -> Option<u64> {
        name.parse::<Category>().ok().map(|category| self.get(category))
    }

    /// Every bucket with its count, in report order
    pub fn iter(&self) -> impl Iterator<Item = (Category, u64)> + '_ {
        Category::all().map(move |category| (category, self.get(category)))
    }

    /// Buckets with a non-zero count
    pub fn non_zero(&self) -> impl Iterator<Item = (Category, u64)> + '_ {
        self.iter().filter(|(_, count)| *count > 0)
    }

    /// Entries that conformed to the outer shape (commands plus others)
    pub fn well_formed(&self) -> u64 {
        self.commands.iter().sum::<u64>() + self.others
    }

    pub fn others(&self) -> u64 {
        self.others
    }

    pub fn discarded(&self) -> u64 {
        self.discarded
    }

    pub fn unparseable(&self) -> u64 {
        self.unparseable
    }

    /// True when nothing has been recorded
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Add another tally's counts into this one
    pub fn merge(&mut self, other: &Tally) {
        for (mine, theirs) in self.commands.iter_mut().zip(other.commands.iter()) {
            *mine += theirs;
        }
        self.others += other.others;
        self.discarded = self.discarded.saturating_add(other.discarded);
        self.unparseable += other.unparseable;
    }

    /// Zero every bucket
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl AddAssign<&Tally> for Tally {
    fn add_assign(&mut self, other: &Tally) {
        self.merge(other);
    }
}

impl AddAssign for Tally {
    fn add_assign(&mut self, other: Tally) {
        self.merge(&other);
    }
}

impl Sum for Tally {
    fn sum<I: Iterator<Item = Tally>>(iter: I) -> Self {
        iter.fold(Tally::new(), |mut acc, tally| {
            acc += tally;
            acc
        })
    }
}

impl Serialize for Tally {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(CommandKind::COUNT + 3))?;
        for (category, count) in self.iter() {
            map.serialize_entry(category.name(), &count)?;
        }
        map.end()
    }
}
