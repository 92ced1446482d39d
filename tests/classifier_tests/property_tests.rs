//! Tests for tally accounting properties
//!
//! These tests verify:
//! - Valid entries built from every grammar count once for that keyword
//! - Discard markers add exactly their count
//! - Splitting an input at any point and summing gives the same tally
//! - Order does not matter
//! - Sharded runs equal a single pass

use std::sync::Arc;

use klogstat::classifier::classify_sharded;
use klogstat::grammar::{FieldKind, NOREPLY};
use klogstat::{classify_stream, Category, Registry, Tally};

// =============================================================================
// Helper Functions
// =============================================================================

fn entry(header: &str) -> String {
    format!(r#"192.168.1.9:40000 - [16/Oct/2026:11:12:13 +0000] "{}" 0 17"#, header)
}

/// A corpus that exercises every bucket
fn corpus() -> Vec<String> {
    let registry = Registry::new().unwrap();
    let mut lines = Vec::new();

    for (i, grammar) in registry.grammars().enumerate() {
        let mut header = grammar.kind.keyword().to_string();
        for field in grammar.fields {
            match field {
                FieldKind::Key => header.push_str(&format!(" key{}", i)),
                _ => header.push_str(&format!(" {}", i)),
            }
        }
        lines.push(entry(&header));
        if grammar.noreply {
            lines.push(entry(&format!("{} {}", header, NOREPLY)));
        }
    }

    lines.push(entry("verbosity 1"));
    lines.push(entry("get"));
    lines.push("7 logs discarded".to_string());
    lines.push("0 logs discarded".to_string());
    lines.push("1000 logs discarded".to_string());
    lines.push("partial line from a cra".to_string());
    lines.push(String::new());
    lines
}

// =============================================================================
// Per-Grammar Properties
// =============================================================================

#[test]
fn test_valid_entry_counts_once_for_its_keyword() {
    let registry = Registry::new().unwrap();

    for grammar in registry.grammars() {
        let mut header = grammar.kind.keyword().to_string();
        for field in grammar.fields {
            header.push_str(if *field == FieldKind::Key { " k" } else { " 1" });
        }

        let mut variants = vec![header.clone()];
        if grammar.noreply {
            variants.push(format!("{} {}", header, NOREPLY));
        }

        for variant in variants {
            let tally = classify_stream(&registry, [entry(&variant)]);
            let non_zero: Vec<_> = tally.non_zero().collect();
            assert_eq!(non_zero, vec![(Category::Command(grammar.kind), 1)], "{}", variant);
        }
    }
}

#[test]
fn test_discard_marker_adds_exactly_n() {
    let registry = Registry::new().unwrap();

    for n in [0u64, 1, 2, 17, 4096, u64::MAX] {
        let tally = classify_stream(&registry, [format!("{} logs discarded", n)]);
        assert_eq!(tally.discarded(), n);
        assert_eq!(tally.well_formed(), 0);
        assert_eq!(tally.unparseable(), 0);
    }
}

#[test]
fn test_discarded_saturates_instead_of_overflowing() {
    let registry = Registry::new().unwrap();
    let lines = [
        format!("{} logs discarded", u64::MAX),
        "10 logs discarded".to_string(),
    ];
    assert_eq!(classify_stream(&registry, lines).discarded(), u64::MAX);
}

// =============================================================================
// Additivity Properties
// =============================================================================

#[test]
fn test_split_at_any_point_sums_to_whole() {
    let registry = Registry::new().unwrap();
    let lines = corpus();
    let whole = classify_stream(&registry, &lines);

    for split in 0..=lines.len() {
        let (head, tail) = lines.split_at(split);
        let mut summed = classify_stream(&registry, head);
        summed += classify_stream(&registry, tail);
        assert_eq!(summed, whole, "split at {}", split);
    }
}

#[test]
fn test_order_does_not_matter() {
    let registry = Registry::new().unwrap();
    let lines = corpus();
    let forward = classify_stream(&registry, &lines);
    let backward = classify_stream(&registry, lines.iter().rev());

    let mut rotated = lines.clone();
    rotated.rotate_left(lines.len() / 3);

    assert_eq!(forward, backward);
    assert_eq!(forward, classify_stream(&registry, &rotated));
}

#[test]
fn test_sum_of_tallies() {
    let registry = Registry::new().unwrap();
    let lines = corpus();
    let whole = classify_stream(&registry, &lines);

    let summed: Tally = lines
        .chunks(4)
        .map(|chunk| classify_stream(&registry, chunk))
        .sum();
    assert_eq!(summed, whole);
}

#[test]
fn test_sharded_equals_single_pass() {
    let registry = Arc::new(Registry::new().unwrap());
    let lines: Vec<String> = corpus().into_iter().cycle().take(1000).collect();
    let whole = classify_stream(&registry, &lines);

    for shards in [1, 2, 3, 7, 64] {
        let sharded = classify_sharded(Arc::clone(&registry), &lines, shards);
        assert_eq!(sharded, whole, "{} shards", shards);
    }
}
