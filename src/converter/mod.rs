//! One-shot conversion of a source classification into the artifact set
//!
//! The converter walks the source tree depth-first, builds every table in
//! memory, writes them into a staging directory next to the output, validates
//! the staged artifacts and only then swaps them into place. A run that fails
//! validation leaves any previous output untouched.

pub mod builder;
pub mod report;
pub mod validation;

use std::path::Path;
use std::time::Instant;

use chrono::Utc;

use crate::artifacts::{
    AggregateStatistics, Artifact, ArtifactLayout, ConversionMetadata, FORMAT_VERSION, RunReport,
    StagedDirectory, read_json, write_json,
};
use crate::config::ConverterConfig;
use crate::error::util::validate_directory;
use crate::error::{IndexError, Result};
use crate::models::SourceDocument;
use crate::utils::logging::{finish_and_clear, progress_or_hidden};

pub use builder::{ClassificationBuild, ClassificationBuilder, derive_alias};
pub use report::aggregate_statistics;
pub use validation::{ValidationSummary, validate_artifacts};

/// Converts source classifications into artifact directories
#[derive(Debug, Clone, Default)]
pub struct Converter {
    config: ConverterConfig,
}

impl Converter {
    #[must_use]
    pub const fn new(config: ConverterConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &ConverterConfig {
        &self.config
    }

    /// Convert the source document at `source` into `output`
    ///
    /// A malformed source fails with `InvalidFormat` before anything is
    /// written. Integrity issues found in the staged artifacts fail with
    /// `ValidationFailed` and the staging directory is discarded.
    pub fn convert(&self, source: &Path, output: &Path) -> Result<RunReport> {
        log::info!("Converting {} into {}", source.display(), output.display());
        let document = SourceDocument::from_path(source)?;
        self.convert_document(&document, source, output)
    }

    /// Convert an already parsed document
    ///
    /// `source` is only recorded in the metadata and run report.
    pub fn convert_document(
        &self,
        document: &SourceDocument,
        source: &Path,
        output: &Path,
    ) -> Result<RunReport> {
        let started_at = Utc::now();
        let timer = Instant::now();

        let progress = progress_or_hidden(
            self.config.show_progress,
            document.node_count() as u64,
            Some("Traversing classification"),
        );
        let build = ClassificationBuilder::new(&self.config, started_at, progress.clone())
            .build(document);
        finish_and_clear(&progress);

        let statistics = aggregate_statistics(&build);
        log::info!(
            "Built {} categories and {} diseases (max depth {})",
            statistics.total_categories,
            statistics.total_diseases,
            statistics.max_depth
        );

        let metadata = ConversionMetadata {
            format_version: FORMAT_VERSION.to_string(),
            source_version: document.version.clone(),
            source_date: document.date.clone(),
            source_path: source.to_path_buf(),
            generated_at: started_at,
            category_depth_threshold: self.config.category_depth_threshold,
        };

        let staged = StagedDirectory::create(output)?;
        let layout = ArtifactLayout::new(staged.path());
        let artifacts = build.write(&layout, &metadata, &statistics, self.config.pretty_json)?;

        let validation = validate_artifacts(staged.path());
        for warning in validation.warnings() {
            log::warn!("{}", warning.message);
        }
        if !validation.is_valid() {
            let issues: Vec<_> = validation.integrity_issues().cloned().collect();
            for issue in &issues {
                log::error!("{}", issue.message);
            }
            return Err(IndexError::ValidationFailed(issues));
        }

        let finished_at = Utc::now();
        let report = RunReport {
            success: true,
            source_path: source.to_path_buf(),
            output_dir: output.to_path_buf(),
            started_at,
            finished_at,
            duration_ms: u64::try_from(timer.elapsed().as_millis()).unwrap_or(u64::MAX),
            artifacts,
            statistics,
            validation,
            warnings: build.warnings,
        };
        write_json(&layout.report_path(), &report, self.config.pretty_json)?;

        staged.commit()?;
        log::info!(
            "Wrote {} artifacts ({} bytes) to {} in {:?}",
            report.artifacts.len(),
            report.total_bytes(),
            output.display(),
            timer.elapsed()
        );
        Ok(report)
    }
}

/// Convert with the default configuration and environment overrides
pub fn convert(source: &Path, output: &Path) -> Result<RunReport> {
    Converter::new(ConverterConfig::from_env()).convert(source, output)
}

/// Validate an existing artifact directory without converting
pub fn validate_only(dir: &Path, max_warnings: usize) -> Result<ValidationSummary> {
    validate_directory(dir, "validating artifacts")?;
    let report = validate_artifacts(dir);
    Ok(ValidationSummary::from_report(&report, max_warnings))
}

/// Read the aggregate statistics of an artifact directory
pub fn statistics(dir: &Path) -> Result<AggregateStatistics> {
    let layout = ArtifactLayout::new(dir);
    read_json(&layout.path(Artifact::Statistics), "reading conversion statistics")
}
