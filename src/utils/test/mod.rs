//! Test utilities for testing and benchmarking
//!
//! This module provides sample classifications and helpers that convert them
//! into artifact directories.

pub mod helpers;

// Re-export commonly used functions for convenience
pub use fixtures::{poly_hierarchy_document, sample_document, write_document};
pub use helpers::{convert_into, open_navigator, test_config};
