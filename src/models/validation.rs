//! Validation issues and reports
//!
//! Integrity issues make a structure invalid; warnings are reported but
//! tolerated.

use serde::{Deserialize, Serialize};

/// How serious an issue is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueSeverity {
    Integrity,
    Warning,
}

/// What kind of problem was found
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCode {
    /// A relationship entry references a node absent from the node table
    MissingNode,
    /// A category participates in a cycle
    Cycle,
    /// Parent and child entries disagree about each other
    BackReferenceMismatch,
    /// A category level is not its parent's level plus one
    LevelMismatch,
    /// More than one root category
    MultipleRoots,
    /// A disease references a category absent from the graph
    MissingCategory,
    /// Classification index and disease records disagree
    IndexMismatch,
    /// The same name is used by a category and a disease
    NameCollision,
    /// An expected artifact file does not exist
    MissingArtifact,
    /// An artifact file exists but cannot be parsed
    UnparseableArtifact,
}

/// A single validation finding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub severity: IssueSeverity,
    pub code: IssueCode,
    pub message: String,
    /// Ids involved in the issue
    #[serde(default)]
    pub ids: Vec<String>,
}

impl ValidationIssue {
    #[must_use]
    pub fn integrity(code: IssueCode, message: impl Into<String>, ids: Vec<String>) -> Self {
        Self {
            severity: IssueSeverity::Integrity,
            code,
            message: message.into(),
            ids,
        }
    }

    #[must_use]
    pub fn warning(code: IssueCode, message: impl Into<String>, ids: Vec<String>) -> Self {
        Self {
            severity: IssueSeverity::Warning,
            code,
            message: message.into(),
            ids,
        }
    }

    #[must_use]
    pub fn is_integrity(&self) -> bool {
        self.severity == IssueSeverity::Integrity
    }
}

/// Collected issues of one validation pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Valid when there is no integrity issue; warnings do not count
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.issues.iter().any(ValidationIssue::is_integrity)
    }

    pub fn push(&mut self, issue: ValidationIssue) {
        self.issues.push(issue);
    }

    /// Append all issues of another report
    pub fn merge(&mut self, other: Self) {
        self.issues.extend(other.issues);
    }

    pub fn integrity_issues(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter().filter(|i| i.is_integrity())
    }

    pub fn warnings(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter().filter(|i| !i.is_integrity())
    }

    #[must_use]
    pub fn integrity_count(&self) -> usize {
        self.integrity_issues().count()
    }

    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.warnings().count()
    }

    /// Issues carrying a given code
    #[must_use]
    pub fn with_code(&self, code: IssueCode) -> Vec<&ValidationIssue> {
        self.issues.iter().filter(|i| i.code == code).collect()
    }
}
