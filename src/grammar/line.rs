//! Outer line grammar
//!
//! The two shapes a whole log line can take: a command entry or a
//! discard marker. Both are anchored at start and end of the trimmed line.

use regex::Regex;

use crate::error::Result;

/// origin, unused token, [timestamp], "header", status, size; one space apart
const ENTRY_PATTERN: &str = concat!(
    r"^(?P<origin>\S+)",
    r" \S+",
    r#" \[(?P<time>[^\]]+)\]"#,
    r#" "(?P<header>[^"]+)""#,
    r" (?P<status>[0-9]+)",
    r" (?P<size>[0-9]+)",
    r"\s*$",
);

const DISCARD_PATTERN: &str = r"^(?P<count>[0-9]+) logs discarded\s*$";

/// A line that conforms to the command-entry shape
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OuterMatch<'a> {
    /// Client address the command came from
    pub origin: &'a str,

    /// Timestamp text, kept opaque
    pub timestamp: &'a str,

    /// The logged request line
    pub header: &'a str,

    /// Status code the server recorded
    pub status: u64,

    /// Response size in bytes
    pub size: u64,
}

/// A line reporting entries the server dropped instead of logging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiscardMarker {
    pub count: u64,
}

/// Compiled outer-line patterns
#[derive(Debug, Clone)]
pub struct LineGrammar {
    entry: Regex,
    discard: Regex,
}

impl LineGrammar {
    /// Compile both line patterns
    pub fn new() -> Result<Self> {
        Ok(Self {
            entry: Regex::new(ENTRY_PATTERN)?,
            discard: Regex::new(DISCARD_PATTERN)?,
        })
    }

    /// Parse a command entry
    ///
    /// Returns `None` when any of the six fields is missing, out of order,
    /// followed by extra content, or when a numeric field overflows `u64`.
    pub fn parse_entry<'a>(&self, line: &'a str) -> Option<OuterMatch<'a>> {
        let caps = self.entry.captures(line.trim())?;

        Some(OuterMatch {
            origin: caps.name("origin")?.as_str(),
            timestamp: caps.name("time")?.as_str(),
            header: caps.name("header")?.as_str(),
            status: caps.name("status")?.as_str().parse().ok()?,
            size: caps.name("size")?.as_str().parse().ok()?,
        })
    }

    /// Parse a discard marker
    pub fn parse_discard(&self, line: &str) -> Option<DiscardMarker> {
        let caps = self.discard.captures(line.trim())?;
        let count = caps.name("count")?.as_str().parse().ok()?;
        Some(DiscardMarker { count })
    }
}
