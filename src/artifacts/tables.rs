//! Shapes of the persisted tables
//!
//! Persisted maps are `BTreeMap`s so the same input always produces the same
//! bytes on disk.

use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{CategoryNode, DiseaseInstance, ExtendedMetadata, Relationship, ValidationReport};

/// Category id to category node
pub type CategoryTable = BTreeMap<String, CategoryNode>;

/// Category id to relationship entry
pub type RelationshipTable = BTreeMap<String, Relationship>;

/// Disease id to full disease record
pub type DiseaseTable = BTreeMap<String, DiseaseInstance>;

/// Category id to the disease ids filed directly under it
pub type ClassificationIndex = BTreeMap<String, Vec<String>>;

/// Display name to node ids of any kind
pub type NameIndex = BTreeMap<String, Vec<String>>;

/// Disease id to extended metadata
pub type MetadataTable = BTreeMap<String, ExtendedMetadata>;

/// Informational metadata about one conversion run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionMetadata {
    /// Artifact format version; informational, not enforced
    pub format_version: String,
    /// Version string of the source release, if it carried one
    #[serde(default)]
    pub source_version: Option<String>,
    /// Release date of the source, if it carried one
    #[serde(default)]
    pub source_date: Option<String>,
    /// Source document the artifacts were built from
    pub source_path: PathBuf,
    pub generated_at: DateTime<Utc>,
    /// Depth below which nodes were forced to be categories
    pub category_depth_threshold: usize,
}

/// Category nodes and relationships in one document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryStructure {
    pub metadata: ConversionMetadata,
    pub nodes: CategoryTable,
    pub relationships: RelationshipTable,
}

/// One precomputed root-to-leaf path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathEntry {
    /// Ids from the root category down to the disease
    pub ids: Vec<String>,
    /// Display names matching `ids`
    pub names: Vec<String>,
}

/// Aggregate counts of one conversion
///
/// Contains no timestamps, so byte-identical input gives identical statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateStatistics {
    pub total_categories: usize,
    pub total_diseases: usize,
    pub root_categories: usize,
    /// Deepest category level
    pub max_depth: usize,
    pub categories_per_level: BTreeMap<usize, usize>,
    /// Diseases keyed by classification level
    pub diseases_per_level: BTreeMap<usize, usize>,
    pub categories_with_diseases: usize,
    pub name_entries: usize,
    pub ambiguous_names: usize,
    pub alias_names: usize,
    /// Diseases dropped because they had no parent category
    pub skipped_orphans: usize,
    /// Repeated disease occurrences merged into their first classification
    pub duplicate_diseases: usize,
    /// Nodes labelled as disorders but forced to categories by depth
    pub forced_categories: usize,
    pub path_entries: usize,
}

/// Name and size of a written artifact
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactInfo {
    pub name: String,
    pub bytes: u64,
}

/// Machine-readable report of a conversion run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub success: bool,
    pub source_path: PathBuf,
    pub output_dir: PathBuf,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub duration_ms: u64,
    pub artifacts: Vec<ArtifactInfo>,
    pub statistics: AggregateStatistics,
    pub validation: ValidationReport,
    /// Warnings raised during traversal (orphans, forced categories)
    #[serde(default)]
    pub warnings: Vec<String>,
}

impl RunReport {
    /// Total bytes across all written artifacts
    #[must_use]
    pub fn total_bytes(&self) -> u64 {
        self.artifacts.iter().map(|a| a.bytes).sum()
    }
}
