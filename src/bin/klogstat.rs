//! klogstat CLI
//!
//! Summarizes a cache-server command log.

use std::io;
use std::sync::Arc;
use std::thread::JoinHandle;

use clap::Parser;
use crossbeam::channel::{self, RecvTimeoutError};
use tracing_subscriber::{fmt, EnvFilter};

use klogstat::classifier::{classify_sharded, Classifier, SharedTally};
use klogstat::report::{write_report, ReportFormat};
use klogstat::source::{open_lines, Follower};
use klogstat::{Config, Registry, Result, Tally};

/// klogstat
#[derive(Parser, Debug)]
#[command(name = "klogstat")]
#[command(about = "Take a klog file and generate a summary report")]
#[command(version)]
struct Args {
    /// Log file name, e.g. key.log
    #[arg(short = 'f', long = "logname", value_name = "LOG FILE")]
    logname: String,

    /// Report format
    #[arg(long, value_enum, default_value = "text")]
    format: ReportFormat,

    /// Split a one-shot pass across this many threads
    #[arg(short, long, default_value = "1")]
    jobs: usize,

    /// Keep reading as the server appends to the log
    #[arg(long)]
    follow: bool,

    /// Poll interval at end of file when following (ms)
    #[arg(long, default_value = "250")]
    poll_ms: u64,

    /// Print a snapshot this often when following (ms, 0 = only at the end)
    #[arg(long, default_value = "5000")]
    interval_ms: u64,

    /// Stop following after this long without new lines (ms, 0 = never)
    #[arg(long, default_value = "0")]
    idle_ms: u64,
}

fn main() {
    // Logs go to stderr; stdout carries the report
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,klogstat=info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    tracing::info!("klogstat v{}", klogstat::VERSION);
    tracing::info!("Log file: {}", args.logname);

    let config = Config::builder()
        .log_path(&args.logname)
        .format(args.format)
        .jobs(args.jobs)
        .follow(args.follow)
        .poll_interval_ms(args.poll_ms)
        .snapshot_interval_ms(args.interval_ms)
        .idle_timeout_ms(args.idle_ms)
        .build();

    if let Err(e) = config.validate() {
        tracing::error!("{}", e);
        std::process::exit(2);
    }

    let registry = match Registry::new() {
        Ok(r) => Arc::new(r),
        Err(e) => {
            tracing::error!("Failed to build grammar registry: {}", e);
            std::process::exit(1);
        }
    };

    let result = if config.follow {
        follow(&config, registry)
    } else {
        summarize(&config, registry)
    };

    let tally = match result {
        Ok(tally) => tally,
        Err(e) => {
            tracing::error!("Failed to read {}: {}", config.log_path.display(), e);
            std::process::exit(1);
        }
    };

    tracing::info!(
        entries = tally.well_formed(),
        unparseable = tally.unparseable(),
        discarded = tally.discarded(),
        "Summary complete"
    );

    if let Err(e) = write_report(&mut io::stdout().lock(), &tally, config.format) {
        tracing::error!("Failed to write report: {}", e);
        std::process::exit(1);
    }
}

/// One pass over a finished log
fn summarize(config: &Config, registry: Arc<Registry>) -> Result<Tally> {
    let lines = open_lines(&config.log_path)?;

    if config.jobs > 1 {
        let lines = lines.collect::<Result<Vec<String>>>()?;
        return Ok(classify_sharded(registry, &lines, config.jobs));
    }

    let mut classifier = Classifier::new(registry);
    for line in lines {
        classifier.feed(&line?);
    }
    Ok(classifier.into_tally())
}

/// Tail a live log, printing snapshots until it goes idle
fn follow(config: &Config, registry: Arc<Registry>) -> Result<Tally> {
    let mut follower = Follower::open(&config.log_path, config.poll_interval(), config.idle_timeout())?;
    let classifier = Classifier::new(registry);
    let shared = SharedTally::new();

    let (stop_tx, stop_rx) = channel::bounded::<()>(0);
    let reporter = config.snapshot_interval().map(|interval| {
        let shared = shared.clone();
        let format = config.format;
        std::thread::spawn(move || loop {
            match stop_rx.recv_timeout(interval) {
                Err(RecvTimeoutError::Timeout) => {
                    let snapshot = shared.snapshot();
                    if let Err(e) = write_report(&mut io::stdout().lock(), &snapshot, format) {
                        tracing::warn!("Failed to write snapshot: {}", e);
                    }
                }
                _ => break,
            }
        })
    });

    let result = pump(&mut follower, &classifier, &shared);

    drop(stop_tx);
    if let Some(handle) = reporter {
        join_reporter(handle);
    }

    result.map(|lines| {
        tracing::debug!("Followed {} lines", lines);
        shared.snapshot()
    })
}

/// Classify followed lines straight into the shared tally
fn pump(follower: &mut Follower, classifier: &Classifier, shared: &SharedTally) -> Result<u64> {
    let mut lines = 0u64;
    while let Some(line) = follower.next_line()? {
        shared.classify(classifier, &line);
        lines += 1;
    }
    Ok(lines)
}

/// Wait for the snapshot thread; false if it panicked
fn join_reporter(handle: JoinHandle<()>) -> bool {
    match handle.join() {
        Ok(()) => true,
        Err(_) => {
            tracing::warn!("Snapshot reporter panicked");
            false
        }
    }
}
