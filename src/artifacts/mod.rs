//! Persisted artifact set
//!
//! The converter writes every table as its own JSON file; readers load each
//! one independently. Apart from the informational version field in
//! [`tables::ConversionMetadata`] there is no cross-file negotiation.

pub mod io;
pub mod staging;
pub mod tables;

use std::path::{Path, PathBuf};

pub use io::{read_json, write_json};
pub use staging::StagedDirectory;
pub use tables::{
    AggregateStatistics, ArtifactInfo, CategoryStructure, CategoryTable, ClassificationIndex,
    ConversionMetadata, DiseaseTable, MetadataTable, NameIndex, PathEntry, RelationshipTable,
    RunReport,
};

/// Version written into the conversion metadata
pub const FORMAT_VERSION: &str = "1.0";

/// File name of the machine-readable run report
pub const RUN_REPORT: &str = "conversion_report.json";

/// Every artifact the converter produces besides the run report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Artifact {
    /// Category nodes and relationships in one document
    CategoryStructure,
    /// Category detail table
    CategoryDetails,
    /// Relationship table
    Relationships,
    /// Conversion metadata
    ConversionMetadata,
    /// Full disease records
    Diseases,
    /// Category id to disease ids
    ClassificationIndex,
    /// Display name to node ids
    NameIndex,
    /// Extended disease metadata
    DiseaseMetadata,
    /// Precomputed root-to-leaf paths
    PathCache,
    /// Aggregate statistics
    Statistics,
}

impl Artifact {
    /// All artifacts, in the order they are written
    pub const ALL: [Self; 10] = [
        Self::CategoryStructure,
        Self::CategoryDetails,
        Self::Relationships,
        Self::ConversionMetadata,
        Self::Diseases,
        Self::ClassificationIndex,
        Self::NameIndex,
        Self::DiseaseMetadata,
        Self::PathCache,
        Self::Statistics,
    ];

    /// Path relative to the artifact directory
    #[must_use]
    pub const fn relative_path(self) -> &'static str {
        match self {
            Self::CategoryStructure => "categories/structure.json",
            Self::CategoryDetails => "categories/details.json",
            Self::Relationships => "categories/relationships.json",
            Self::ConversionMetadata => "categories/metadata.json",
            Self::Diseases => "diseases/diseases.json",
            Self::ClassificationIndex => "diseases/classification_index.json",
            Self::NameIndex => "diseases/name_index.json",
            Self::DiseaseMetadata => "diseases/metadata.json",
            Self::PathCache => "cache/paths.json",
            Self::Statistics => "cache/statistics.json",
        }
    }
}

/// Resolves artifact paths below one output directory
#[derive(Debug, Clone)]
pub struct ArtifactLayout {
    root: PathBuf,
}

impl ArtifactLayout {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The artifact directory itself
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Full path of an artifact
    #[must_use]
    pub fn path(&self, artifact: Artifact) -> PathBuf {
        self.root.join(artifact.relative_path())
    }

    /// Full path of the run report
    #[must_use]
    pub fn report_path(&self) -> PathBuf {
        self.root.join(RUN_REPORT)
    }
}
