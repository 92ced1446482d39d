//! Tests for the outer line grammar
//!
//! These tests verify:
//! - Field extraction from a well-formed entry
//! - Trailing whitespace tolerance
//! - Fields separated by exactly one space
//! - Rejection of scrambled, missing or extra fields
//! - Discard marker recognition

use klogstat::grammar::{DiscardMarker, LineGrammar};

// =============================================================================
// Helper Functions
// =============================================================================

fn grammar() -> LineGrammar {
    LineGrammar::new().unwrap()
}

// =============================================================================
// Command Entry Tests
// =============================================================================

#[test]
fn test_entry_with_w3c_timestamp() {
    let line = r#"127.0.0.1:52124 - [16/Oct/2026:10:20:30 +0000] "incr counter 10" 0 2"#;
    let entry = grammar().parse_entry(line).unwrap();

    assert_eq!(entry.origin, "127.0.0.1:52124");
    assert_eq!(entry.timestamp, "16/Oct/2026:10:20:30 +0000");
    assert_eq!(entry.header, "incr counter 10");
    assert_eq!(entry.status, 0);
    assert_eq!(entry.size, 2);
}

#[test]
fn test_entry_rejects_irregular_separators() {
    let g = grammar();
    assert!(g.parse_entry("h\t-\t[t]\t\"get foo\"\t200\t3").is_none());
    assert!(g.parse_entry(r#"h  - [t] "get foo" 200 3"#).is_none());
    assert!(g.parse_entry(r#"h - [t]  "get foo" 200 3"#).is_none());
    assert!(g.parse_entry(r#"h - [t] "get foo" 200  3"#).is_none());
}

#[test]
fn test_entry_tolerates_surrounding_whitespace() {
    let line = "  h - [t] \"get foo\" 200 3 \t \r";
    assert!(grammar().parse_entry(line).is_some());
}

#[test]
fn test_unused_field_content_is_ignored() {
    let line = r#"h user@x!y [t] "get foo" 200 3"#;
    assert!(grammar().parse_entry(line).is_some());
}

#[test]
fn test_entry_rejects_trailing_content() {
    let line = r#"h - [t] "get foo" 200 3 extra"#;
    assert!(grammar().parse_entry(line).is_none());
}

#[test]
fn test_entry_rejects_missing_fields() {
    let g = grammar();
    assert!(g.parse_entry(r#"h - [t] "get foo" 200"#).is_none());
    assert!(g.parse_entry(r#"h [t] "get foo" 200 3"#).is_none());
    assert!(g.parse_entry(r#"h - "get foo" 200 3"#).is_none());
    assert!(g.parse_entry(r#"h - [t] 200 3"#).is_none());
}

#[test]
fn test_entry_rejects_scrambled_order() {
    let g = grammar();
    assert!(g.parse_entry(r#"h - "get foo" [t] 200 3"#).is_none());
    assert!(g.parse_entry(r#"h - [t] "get foo" 3 200 x"#).is_none());
    assert!(g.parse_entry(r#"[t] h - "get foo" 200 3"#).is_none());
}

#[test]
fn test_entry_rejects_non_decimal_status() {
    let g = grammar();
    assert!(g.parse_entry(r#"h - [t] "get foo" -1 3"#).is_none());
    assert!(g.parse_entry(r#"h - [t] "get foo" 2.0 3"#).is_none());
    assert!(g.parse_entry(r#"h - [t] "get foo" 200 0x10"#).is_none());
}

#[test]
fn test_entry_rejects_empty_header_and_timestamp() {
    let g = grammar();
    assert!(g.parse_entry(r#"h - [t] "" 200 3"#).is_none());
    assert!(g.parse_entry(r#"h - [] "get foo" 200 3"#).is_none());
}

#[test]
fn test_entry_rejects_embedded_quote() {
    let line = r#"h - [t] "get fo"o" 200 3"#;
    assert!(grammar().parse_entry(line).is_none());
}

#[test]
fn test_truncated_entry() {
    // crash mid-write
    let line = r#"10.0.0.1 - [16/Oct/2026:10:20:30 +0000] "set foo 0"#;
    assert!(grammar().parse_entry(line).is_none());
}

// =============================================================================
// Discard Marker Tests
// =============================================================================

#[test]
fn test_discard_marker() {
    let g = grammar();
    assert_eq!(g.parse_discard("5 logs discarded"), Some(DiscardMarker { count: 5 }));
    assert_eq!(g.parse_discard("12 logs discarded   "), Some(DiscardMarker { count: 12 }));
    assert_eq!(g.parse_discard("0 logs discarded"), Some(DiscardMarker { count: 0 }));
}

#[test]
fn test_discard_marker_rejects_variants() {
    let g = grammar();
    assert!(g.parse_discard("logs discarded").is_none());
    assert!(g.parse_discard("-5 logs discarded").is_none());
    assert!(g.parse_discard("5 log discarded").is_none());
    assert!(g.parse_discard("5 logs discarded!").is_none());
    assert!(g.parse_discard("x 5 logs discarded").is_none());
}

#[test]
fn test_shapes_are_disjoint() {
    let g = grammar();
    let entry = r#"h - [t] "get foo" 200 3"#;
    let marker = "3 logs discarded";

    assert!(g.parse_discard(entry).is_none());
    assert!(g.parse_entry(marker).is_none());
}
