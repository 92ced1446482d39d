//! Grammar Tests
//!
//! Outer line shapes and per-command header grammars.

mod line_tests;
