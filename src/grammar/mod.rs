//! Line Grammar Registry
//!
//! Defines, once, every line shape the decoder recognizes.
//!
//! ## Line Shapes
//! ```text
//! Command entry:
//! ┌────────┬────────┬─────────────┬────────────────┬────────┬──────┐
//! │ origin │ unused │ [timestamp] │ "command hdr"  │ status │ size │
//! └────────┴────────┴─────────────┴────────────────┴────────┴──────┘
//!   10.0.0.1 - [16/Oct/2026:..] "set k 0 0 3" 0 0
//!
//! Fields (and header tokens) are separated by exactly one space.
//!
//! Discard marker:
//!   <N> logs discarded
//! ```
//!
//! ### Command Headers
//! - cas:                        key exptime flags bytes cas-id [noreply]
//! - add/set/replace/append/prepend: key exptime flags bytes [noreply]
//! - incr/decr:                  key delta [noreply]
//! - delete:                     key [noreply]
//! - get/gets:                   key

mod command;
mod line;
mod registry;

pub use command::{CommandGrammar, CommandKind, CommandMatch, FieldKind, NOREPLY};
pub use line::{DiscardMarker, LineGrammar, OuterMatch};
pub use registry::Registry;
