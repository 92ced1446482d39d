//! Classifier/Aggregator Module
//!
//! Turns a sequence of raw lines into a `Tally`.
//!
//! ## Decision Procedure (per trimmed line)
//! ```text
//!   discard marker?  ──yes──▶ discarded += N
//!        │ no
//!        ▼
//!   command entry?   ──no───▶ unparseable += 1
//!        │ yes
//!        ▼
//!   header matches a grammar? ──yes──▶ <keyword> += 1
//!        │ no
//!        ▼
//!     others += 1
//! ```
//!
//! ## Concurrency
//! Classification is synchronous and holds no state besides the tally.
//! Sharded runs give each shard its own tally and sum them afterwards;
//! live runs record into a `SharedTally` that readers snapshot.

mod tally;
mod aggregator;
mod shard;
mod shared;

pub use tally::{Category, Outcome, Tally};
pub use aggregator::{classify_stream, Classifier};
pub use shard::classify_sharded;
pub use shared::SharedTally;
