//! Disease entity model
//!
//! Disease instances are the leaves of the classification. Each one is filed
//! under exactly one category, recorded in its [`Classification`].

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::node::NodeKind;

/// Placeholder used when the source carries no disorder type
pub const UNKNOWN_DISORDER_TYPE: &str = "Unknown";

/// Where a disease sits in the category backbone
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    /// Immediate parent category
    pub category_id: String,
    /// Category ids from the root down to the immediate parent
    pub path: Vec<String>,
    /// Length of `path`
    pub level: usize,
}

impl Classification {
    /// Create a classification from a root-to-parent path
    ///
    /// The level is derived from the path so the two never disagree.
    #[must_use]
    pub fn new(category_id: impl Into<String>, path: Vec<String>) -> Self {
        let level = path.len();
        Self {
            category_id: category_id.into(),
            path,
            level,
        }
    }

    /// Check the stored level against the path and the path against the category
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.level == self.path.len()
            && self.path.last().is_some_and(|last| *last == self.category_id)
    }
}

/// Metadata carried inline with each disease record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiseaseMetadata {
    /// Link to an external expert resource
    #[serde(default)]
    pub expert_link: Option<String>,
    /// When the record was last updated
    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,
    /// Disorder type label from the source (e.g. "Disease", "Malformation syndrome")
    pub disorder_type: String,
    /// Open extension fields carried over from the source
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Default for DiseaseMetadata {
    fn default() -> Self {
        Self {
            expert_link: None,
            last_updated: None,
            disorder_type: UNKNOWN_DISORDER_TYPE.to_string(),
            extra: BTreeMap::new(),
        }
    }
}

/// A single disease record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiseaseInstance {
    /// Identifier from the source classification
    pub id: String,
    /// Display name
    pub name: String,
    /// Always [`NodeKind::Disease`]
    #[serde(rename = "type", default = "disease_kind")]
    pub kind: NodeKind,
    /// Owning category and path
    pub classification: Classification,
    /// Inline metadata
    #[serde(default)]
    pub metadata: DiseaseMetadata,
}

const fn disease_kind() -> NodeKind {
    NodeKind::Disease
}

impl DiseaseInstance {
    /// Create a new disease record
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        classification: Classification,
        metadata: DiseaseMetadata,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: NodeKind::Disease,
            classification,
            metadata,
        }
    }

    /// Immediate parent category
    #[must_use]
    pub fn category_id(&self) -> &str {
        &self.classification.category_id
    }

    /// Depth of the disease (number of categories above it)
    #[must_use]
    pub const fn level(&self) -> usize {
        self.classification.level
    }
}

/// Extended metadata kept in its own lazily loaded table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtendedMetadata {
    /// Disease id
    pub id: String,
    /// Alias names registered in the name index besides the display name
    #[serde(default)]
    pub aliases: Vec<String>,
    /// Every category the disease appeared under in the source, first one owning it
    #[serde(default)]
    pub occurrences: Vec<String>,
    /// Depth of the first occurrence in the source tree
    pub source_depth: usize,
}
