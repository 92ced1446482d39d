//! Log Follower
//!
//! Tails a log the server is still writing. Lines are only handed out once
//! their newline has arrived; a shrinking file means the server truncated
//! or rotated it, and reading restarts from the top of the new file.

use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant};

use crate::error::Result;
use super::decode_line;

/// Live-tail reader for a growing log
pub struct Follower {
    /// Path being followed (reopened after truncation)
    path: PathBuf,

    /// Current handle
    reader: BufReader<File>,

    /// Bytes consumed from the current handle
    position: u64,

    /// Bytes of a line whose newline has not arrived yet
    partial: Vec<u8>,

    /// Sleep between polls at EOF
    poll_interval: Duration,

    /// Give up after this long without new bytes
    idle_timeout: Option<Duration>,

    /// When bytes last arrived
    last_data: Instant,
}

impl Follower {
    /// Start following `path` from its beginning
    pub fn open(path: &Path, poll_interval: Duration, idle_timeout: Option<Duration>) -> Result<Self> {
        let file = File::open(path)?;
        tracing::debug!("Following {}", path.display());

        Ok(Self {
            path: path.to_path_buf(),
            reader: BufReader::new(file),
            position: 0,
            partial: Vec::new(),
            poll_interval,
            idle_timeout,
            last_data: Instant::now(),
        })
    }

    /// Bytes consumed from the current file
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Block until the next complete line arrives
    ///
    /// Returns `Ok(None)` once the idle timeout elapses; a trailing line
    /// without a newline is handed out at that point.
    pub fn next_line(&mut self) -> Result<Option<String>> {
        loop {
            let read = self.reader.read_until(b'\n', &mut self.partial)?;
            if read > 0 {
                self.position += read as u64;
                self.last_data = Instant::now();

                if self.partial.ends_with(b"\n") {
                    let line = decode_line(&self.partial);
                    self.partial.clear();
                    return Ok(Some(line));
                }
                continue;
            }

            // EOF on the current handle
            self.check_truncation()?;

            if let Some(timeout) = self.idle_timeout {
                if self.last_data.elapsed() >= timeout {
                    tracing::debug!("No new data in {:?}, stop following", timeout);
                    if self.partial.is_empty() {
                        return Ok(None);
                    }
                    let line = decode_line(&self.partial);
                    self.partial.clear();
                    return Ok(Some(line));
                }
            }

            thread::sleep(self.poll_interval);
        }
    }

    /// Reopen from the top if the file is now shorter than what we consumed
    fn check_truncation(&mut self) -> Result<()> {
        let len = match fs::metadata(&self.path) {
            Ok(metadata) => metadata.len(),
            // mid-rotation the path can briefly be missing
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(e.into()),
        };

        if len < self.position {
            tracing::warn!(
                "{} shrank from {} to {} bytes, restarting from the top",
                self.path.display(),
                self.position,
                len
            );
            self.reader = BufReader::new(File::open(&self.path)?);
            self.position = 0;
            self.partial.clear();
        }

        Ok(())
    }
}

impl Iterator for Follower {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_line().transpose()
    }
}
