//! Report rendering
//!
//! Presentation of a finished (or snapshotted) tally. Text output keeps
//! the column layout of the classic klog summary tool; JSON output is for
//! scripts.

use std::fmt::Write as _;
use std::io::Write;

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use crate::classifier::{Category, Tally};
use crate::error::Result;
use crate::grammar::CommandKind;

/// How a report is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

/// Aggregate view handed to the JSON renderer
#[derive(Debug, Serialize)]
pub struct Summary<'a> {
    /// Lines that conformed to the entry shape
    pub entries: u64,
    pub unparseable: u64,
    pub discarded: u64,
    pub commands: CommandCounts<'a>,
}

/// Per-keyword counts plus `others`
#[derive(Debug)]
pub struct CommandCounts<'a>(&'a Tally);

impl Serialize for CommandCounts<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(CommandKind::COUNT + 1))?;
        for category in command_rows() {
            map.serialize_entry(category.name(), &self.0.get(category))?;
        }
        map.end()
    }
}

impl<'a> Summary<'a> {
    pub fn new(tally: &'a Tally) -> Self {
        Self {
            entries: tally.well_formed(),
            unparseable: tally.unparseable(),
            discarded: tally.discarded(),
            commands: CommandCounts(tally),
        }
    }
}

fn command_rows() -> impl Iterator<Item = Category> {
    CommandKind::ALL
        .into_iter()
        .map(Category::Command)
        .chain(std::iter::once(Category::Others))
}

/// Human-readable report
pub fn render_text(tally: &Tally) -> String {
    let mut out = String::new();

    // writing into a String cannot fail
    let _ = writeln!(out, "\n===Log Summary===\n");
    let _ = writeln!(out, "{:>10} command logged", tally.well_formed());
    let _ = writeln!(out, "{:>10} lines cannot be recognized", tally.unparseable());
    let _ = writeln!(out, "{:>10} entries discarded by server", tally.discarded());

    let _ = writeln!(out, "\n===Command Summary===\n");
    for category in command_rows() {
        let _ = writeln!(
            out,
            "Number of command {:>9}: {:>10}",
            category.name(),
            tally.get(category)
        );
    }

    out
}

/// Machine-readable report
pub fn render_json(tally: &Tally) -> Result<String> {
    Ok(serde_json::to_string_pretty(&Summary::new(tally))?)
}

/// Render and write a report
pub fn write_report<W: Write>(writer: &mut W, tally: &Tally, format: ReportFormat) -> Result<()> {
    let rendered = match format {
        ReportFormat::Text => render_text(tally),
        ReportFormat::Json => {
            let mut json = render_json(tally)?;
            json.push('\n');
            json
        }
    };
    writer.write_all(rendered.as_bytes())?;
    writer.flush()?;
    Ok(())
}
