//! Line Reader
//!
//! One-shot reading of a finished log.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::Result;
use super::decode_line;

/// Iterator over the lines of a buffered reader
pub struct LineReader<R> {
    reader: R,
    buf: Vec<u8>,
}

impl<R: BufRead> LineReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
        }
    }
}

impl<R: BufRead> Iterator for LineReader<R> {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.buf.clear();
        match self.reader.read_until(b'\n', &mut self.buf) {
            Ok(0) => None,
            Ok(_) => Some(Ok(decode_line(&self.buf))),
            Err(e) => Some(Err(e.into())),
        }
    }
}

/// Open a log file for a single pass
///
/// Failing to open the file is the only fatal condition of a run.
pub fn open_lines(path: &Path) -> Result<LineReader<BufReader<File>>> {
    let file = File::open(path)?;
    tracing::debug!("Opened {} for reading", path.display());
    Ok(LineReader::new(BufReader::new(file)))
}
