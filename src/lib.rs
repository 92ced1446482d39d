//! # klogstat
//!
//! Decoder and command classifier for the command log ("klog") written by
//! a memcached-compatible cache server:
//! - Recognizes command entries and server-side discard markers
//! - Classifies each embedded command header against per-command grammars
//! - Aggregates per-category counts, sharded or live
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Line Source                             │
//! │             (log file / live tail of the klog)               │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ lines
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                 Classifier/Aggregator                        │
//! │        (discard marker │ command entry │ unparseable)        │
//! └──────────┬──────────────────────────────────┬───────────────┘
//!            │ lookups                          │ counts
//!            ▼                                  ▼
//!   ┌─────────────────┐                 ┌─────────────┐
//!   │ Grammar Registry│                 │    Tally    │
//!   │   (read-only)   │                 └──────┬──────┘
//!   └─────────────────┘                        │
//!                                              ▼
//!                                       ┌─────────────┐
//!                                       │   Report    │
//!                                       │ (text/json) │
//!                                       └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod grammar;
pub mod classifier;
pub mod source;
pub mod report;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{KlogError, Result};
pub use config::Config;
pub use grammar::{CommandKind, Registry};
pub use classifier::{classify_stream, Category, Classifier, Outcome, Tally};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of klogstat
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
