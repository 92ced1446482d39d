//! Configuration for klogstat
//!
//! Centralized configuration with sensible defaults. The classifier core
//! takes no configuration; everything here concerns where lines come from
//! and how the summary is presented.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::{KlogError, Result};
use crate::report::ReportFormat;

/// Main configuration for a summary run
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Input Configuration
    // -------------------------------------------------------------------------
    /// Command log to summarize
    pub log_path: PathBuf,

    /// Keep reading as the server appends, instead of stopping at EOF
    pub follow: bool,

    /// How long to sleep at EOF before polling the file again (follow mode)
    pub poll_interval_ms: u64,

    /// Stop following after this long without new data (0 = never)
    pub idle_timeout_ms: u64,

    // -------------------------------------------------------------------------
    // Processing Configuration
    // -------------------------------------------------------------------------
    /// Number of shards a one-shot pass is split across
    pub jobs: usize,

    // -------------------------------------------------------------------------
    // Output Configuration
    // -------------------------------------------------------------------------
    /// Report rendering
    pub format: ReportFormat,

    /// Print an intermediate snapshot this often while following (0 = only at the end)
    pub snapshot_interval_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_path: PathBuf::from("key.log"),
            follow: false,
            poll_interval_ms: 250,
            idle_timeout_ms: 0,
            jobs: 1,
            format: ReportFormat::Text,
            snapshot_interval_ms: 5000,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Reject combinations that cannot run
    pub fn validate(&self) -> Result<()> {
        if self.jobs == 0 {
            return Err(KlogError::Config("jobs must be at least 1".to_string()));
        }
        if self.follow && self.poll_interval_ms == 0 {
            return Err(KlogError::Config(
                "poll interval must be non-zero when following".to_string(),
            ));
        }
        if self.follow && self.jobs > 1 {
            return Err(KlogError::Config(
                "a followed log cannot be sharded across jobs".to_string(),
            ));
        }
        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// `None` when following never gives up
    pub fn idle_timeout(&self) -> Option<Duration> {
        (self.idle_timeout_ms > 0).then(|| Duration::from_millis(self.idle_timeout_ms))
    }

    /// `None` when intermediate snapshots are disabled
    pub fn snapshot_interval(&self) -> Option<Duration> {
        (self.snapshot_interval_ms > 0).then(|| Duration::from_millis(self.snapshot_interval_ms))
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the log file to read
    pub fn log_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.log_path = path.into();
        self
    }

    /// Enable or disable follow mode
    pub fn follow(mut self, follow: bool) -> Self {
        self.config.follow = follow;
        self
    }

    /// Set the EOF poll interval (in milliseconds)
    pub fn poll_interval_ms(mut self, ms: u64) -> Self {
        self.config.poll_interval_ms = ms;
        self
    }

    /// Set the idle timeout (in milliseconds)
    pub fn idle_timeout_ms(mut self, ms: u64) -> Self {
        self.config.idle_timeout_ms = ms;
        self
    }

    /// Set the number of shards
    pub fn jobs(mut self, jobs: usize) -> Self {
        self.config.jobs = jobs;
        self
    }

    /// Set the report format
    pub fn format(mut self, format: ReportFormat) -> Self {
        self.config.format = format;
        self
    }

    /// Set the snapshot interval (in milliseconds)
    pub fn snapshot_interval_ms(mut self, ms: u64) -> Self {
        self.config.snapshot_interval_ms = ms;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
