//! Source Module
//!
//! Supplies raw lines to the classifier.
//!
//! ## Responsibilities
//! - Split input on `\n`, dropping the terminator (and a `\r` before it)
//! - Decode lossily so partial writes still reach the classifier
//! - Follow a log the server is still appending to

mod reader;
mod follow;

pub use reader::{open_lines, LineReader};
pub use follow::Follower;

/// Turn raw line bytes into text, without the line terminator
pub(crate) fn decode_line(bytes: &[u8]) -> String {
    let bytes = bytes.strip_suffix(b"\n").unwrap_or(bytes);
    let bytes = bytes.strip_suffix(b"\r").unwrap_or(bytes);
    String::from_utf8_lossy(bytes).into_owned()
}
