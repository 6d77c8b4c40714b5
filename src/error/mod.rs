//! Error handling for the disease index.
//!
//! `NotFound` and `Ambiguous` are ordinary outcomes callers are expected to
//! branch on. The remaining variants abort the operation that raised them.

pub mod util;

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use crate::models::validation::ValidationIssue;

/// The kind of entity a failed lookup was looking for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    /// A category in the classification backbone
    Category,
    /// A disease leaf record
    Disease,
    /// Any node, category or disease
    Node,
    /// A display name in the name index
    Name,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Category => write!(f, "category"),
            Self::Disease => write!(f, "disease"),
            Self::Node => write!(f, "node"),
            Self::Name => write!(f, "name"),
        }
    }
}

/// Specialized error type for the disease index
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    /// Id (or name) absent from the relevant table
    #[error("{kind} not found: {id}")]
    NotFound { id: String, kind: EntityKind },

    /// A name resolved to two or more ids after filtering
    #[error("ambiguous name '{name}' matches {} nodes: {}", .candidates.len(), .candidates.join(", "))]
    Ambiguous {
        name: String,
        candidates: Vec<String>,
    },

    /// Malformed source document or persisted artifact
    #[error("invalid format in {}: {message}", .path.display())]
    InvalidFormat { path: PathBuf, message: String },

    /// Structural invariant broken inside loaded data (e.g. a category cycle)
    #[error("data integrity error: {0}")]
    DataIntegrity(String),

    /// Post-conversion validation found integrity issues
    #[error("validation failed with {} issue(s)", .0.len())]
    ValidationFailed(Vec<ValidationIssue>),

    /// Error opening, reading or writing a file
    #[error("IO error: {context}{}", .path.as_ref().map(|p| format!(" ({})", p.display())).unwrap_or_default())]
    Io {
        context: String,
        path: Option<PathBuf>,
        #[source]
        source: io::Error,
    },

    /// Error encoding JSON output
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<io::Error> for IndexError {
    fn from(error: io::Error) -> Self {
        Self::Io {
            context: error.to_string(),
            path: None,
            source: error,
        }
    }
}

impl IndexError {
    /// Create a not-found error
    pub fn not_found(id: impl Into<String>, kind: EntityKind) -> Self {
        Self::NotFound {
            id: id.into(),
            kind,
        }
    }

    /// Create an IO error carrying context about the operation
    pub fn io(context: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            context: context.into(),
            path: None,
            source,
        }
    }

    /// Create an invalid format error for a file
    pub fn invalid_format(path: &Path, message: impl Into<String>) -> Self {
        Self::InvalidFormat {
            path: path.to_path_buf(),
            message: message.into(),
        }
    }

    /// Attach a path to an IO error
    #[must_use]
    pub fn with_path(self, path: &Path) -> Self {
        match self {
            Self::Io {
                context, source, ..
            } => Self::Io {
                context,
                path: Some(path.to_path_buf()),
                source,
            },
            other => other,
        }
    }

    /// Whether this is an ordinary lookup outcome rather than a failure
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::Ambiguous { .. })
    }
}

/// Result type for disease index operations
pub type Result<T> = std::result::Result<T, IndexError>;
