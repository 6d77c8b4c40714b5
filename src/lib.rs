//! A Rust library for converting a hierarchical disease classification into a
//! queryable index: an always-resident category graph plus lazily hydrated
//! disease records, with ambiguity-aware name resolution.

pub mod artifacts;
pub mod config;
pub mod converter;
pub mod error;
pub mod graph;
pub mod models;
pub mod navigator;
pub mod store;
pub mod utils;

// Re-export the most common types for easier use
// Core types
pub use config::{ConverterConfig, StoreConfig};
pub use error::{EntityKind, IndexError, Result};
pub use models::{
    CategoryNode, Classification, DiseaseInstance, IndexNode, Node, NodeKind, SourceDocument,
    SourceNode, ValidationIssue, ValidationReport,
};

// Conversion
pub use artifacts::{AggregateStatistics, RunReport};
pub use converter::{Converter, ValidationSummary, convert, statistics, validate_only};

// Loaded index
pub use graph::CategoryGraph;
pub use navigator::{CombinedNavigator, SubtreeSnapshot};
pub use store::DiseaseStore;
