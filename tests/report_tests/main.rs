//! Report Tests
