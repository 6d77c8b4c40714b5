//! Post-write validation of an artifact directory

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::artifacts::{
    Artifact, ArtifactLayout, CategoryStructure, ClassificationIndex, DiseaseTable, read_json,
};
use crate::error::IndexError;
use crate::graph::find_cycles;
use crate::models::{IssueCode, ValidationIssue, ValidationReport};

/// Outcome of validating an existing artifact directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationSummary {
    pub passed: bool,
    /// Integrity issues; non-empty exactly when `passed` is false
    pub issues: Vec<ValidationIssue>,
    /// The first warnings, capped by configuration
    pub warnings: Vec<ValidationIssue>,
    /// Number of warnings before capping
    pub total_warnings: usize,
}

impl ValidationSummary {
    /// Summarise a report, keeping at most `max_warnings` warnings
    #[must_use]
    pub fn from_report(report: &ValidationReport, max_warnings: usize) -> Self {
        Self {
            passed: report.is_valid(),
            issues: report.integrity_issues().cloned().collect(),
            warnings: report.warnings().take(max_warnings).cloned().collect(),
            total_warnings: report.warning_count(),
        }
    }

    /// Process exit code for wrapping tools
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        if self.passed { 0 } else { 1 }
    }
}

/// Validate every artifact under `dir`
///
/// Missing or unparseable artifacts and category cycles are integrity
/// issues. Diseases filed under a missing category and multiple roots are
/// warnings only.
#[must_use]
pub fn validate_artifacts(dir: &Path) -> ValidationReport {
    let layout = ArtifactLayout::new(dir);
    let mut report = ValidationReport::new();

    check_artifacts_present(&layout, &mut report);

    let structure: Option<CategoryStructure> = load(&layout, Artifact::CategoryStructure, &mut report);
    let diseases: Option<DiseaseTable> = load(&layout, Artifact::Diseases, &mut report);
    let index: Option<ClassificationIndex> = load(&layout, Artifact::ClassificationIndex, &mut report);

    if let Some(structure) = &structure {
        check_cycles(structure, &mut report);
        check_roots(structure, &mut report);
        if let Some(diseases) = &diseases {
            check_disease_categories(structure, diseases, &mut report);
        }
        if let Some(index) = &index {
            let missing: Vec<String> = index
                .keys()
                .filter(|id| !structure.nodes.contains_key(*id))
                .cloned()
                .collect();
            if !missing.is_empty() {
                report.push(ValidationIssue::warning(
                    IssueCode::MissingCategory,
                    format!(
                        "classification index lists {} category id(s) with no category node",
                        missing.len()
                    ),
                    missing,
                ));
            }
        }
    }

    report
}

/// Artifacts decoded into their typed shape by [`validate_artifacts`]
const TYPED: [Artifact; 3] = [
    Artifact::CategoryStructure,
    Artifact::Diseases,
    Artifact::ClassificationIndex,
];

fn check_artifacts_present(layout: &ArtifactLayout, report: &mut ValidationReport) {
    for artifact in Artifact::ALL {
        let path = layout.path(artifact);
        if !path.is_file() {
            report.push(ValidationIssue::integrity(
                IssueCode::MissingArtifact,
                format!("artifact {} is missing", artifact.relative_path()),
                Vec::new(),
            ));
            continue;
        }
        if TYPED.contains(&artifact) {
            continue;
        }
        if let Err(e) = read_json::<serde_json::Value>(&path, "checking an artifact") {
            report.push(unparseable(artifact, &e));
        }
    }
}

/// Decode one artifact; a file that exists but does not decode is an integrity issue
fn load<T: serde::de::DeserializeOwned>(
    layout: &ArtifactLayout,
    artifact: Artifact,
    report: &mut ValidationReport,
) -> Option<T> {
    let path = layout.path(artifact);
    if !path.is_file() {
        return None;
    }
    match read_json(&path, "validating an artifact") {
        Ok(value) => Some(value),
        Err(e) => {
            report.push(unparseable(artifact, &e));
            None
        }
    }
}

fn unparseable(artifact: Artifact, error: &IndexError) -> ValidationIssue {
    ValidationIssue::integrity(
        IssueCode::UnparseableArtifact,
        format!("artifact {} cannot be parsed: {error}", artifact.relative_path()),
        Vec::new(),
    )
}

fn check_cycles(structure: &CategoryStructure, report: &mut ValidationReport) {
    let cycles = find_cycles(
        structure.relationships.keys().map(String::as_str),
        |id| {
            structure
                .relationships
                .get(id)
                .and_then(|rel| rel.parent.as_deref())
        },
    );
    for cycle in cycles {
        report.push(ValidationIssue::integrity(
            IssueCode::Cycle,
            format!("categories form a cycle: {}", cycle.join(" -> ")),
            cycle,
        ));
    }
}

fn check_roots(structure: &CategoryStructure, report: &mut ValidationReport) {
    let roots: Vec<String> = structure
        .relationships
        .iter()
        .filter(|(_, rel)| rel.parent.is_none())
        .map(|(id, _)| id.clone())
        .collect();
    if roots.len() > 1 {
        report.push(ValidationIssue::warning(
            IssueCode::MultipleRoots,
            format!("{} root categories found", roots.len()),
            roots,
        ));
    }
}

fn check_disease_categories(
    structure: &CategoryStructure,
    diseases: &DiseaseTable,
    report: &mut ValidationReport,
) {
    let orphans: Vec<String> = diseases
        .values()
        .filter(|d| !structure.nodes.contains_key(d.category_id()))
        .map(|d| d.id.clone())
        .collect();
    if !orphans.is_empty() {
        log::warn!(
            "{} disease(s) reference a category that does not exist",
            orphans.len()
        );
        report.push(ValidationIssue::warning(
            IssueCode::MissingCategory,
            format!(
                "{} disease(s) reference a category that does not exist",
                orphans.len()
            ),
            orphans,
        ));
    }
}
