//! Source document model
//!
//! The converter reads one JSON document holding the nested classification
//! tree. Every node is either a grouping node or a disorder; only `id` is
//! mandatory, other fields degrade to placeholders.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::util::safe_open_file;
use crate::error::{IndexError, Result};

/// Placeholder for nodes without a display name
pub const UNKNOWN_NAME: &str = "Unknown";

/// Explicit label a source node may carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// Pure grouping node
    Group,
    /// Disorder node
    Disorder,
}

/// One node of the source classification tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceNode {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub kind: Option<SourceKind>,
    #[serde(default)]
    pub disorder_type: Option<String>,
    #[serde(default)]
    pub expert_link: Option<String>,
    /// RFC 3339 timestamp of the last source update
    #[serde(default)]
    pub last_updated: Option<String>,
    /// Extension fields copied into the disease metadata
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, serde_json::Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<SourceNode>,
}

impl SourceNode {
    /// Create a grouping node
    #[must_use]
    pub fn group(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: Some(name.into()),
            kind: Some(SourceKind::Group),
            disorder_type: Some("Category".to_string()),
            expert_link: None,
            last_updated: None,
            extra: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    /// Create a disorder node
    #[must_use]
    pub fn disorder(
        id: impl Into<String>,
        name: impl Into<String>,
        disorder_type: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: Some(name.into()),
            kind: Some(SourceKind::Disorder),
            disorder_type: Some(disorder_type.into()),
            expert_link: None,
            last_updated: None,
            extra: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    /// Set the expert link
    #[must_use]
    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.expert_link = Some(link.into());
        self
    }

    /// Append a child node
    #[must_use]
    pub fn with_child(mut self, child: SourceNode) -> Self {
        self.children.push(child);
        self
    }

    /// Append several child nodes
    #[must_use]
    pub fn with_children(mut self, children: impl IntoIterator<Item = SourceNode>) -> Self {
        self.children.extend(children);
        self
    }

    /// Whether the source explicitly labels this node as a category
    #[must_use]
    pub fn is_labeled_category(&self) -> bool {
        self.kind == Some(SourceKind::Group)
            || self
                .disorder_type
                .as_deref()
                .is_some_and(|t| t.eq_ignore_ascii_case("category"))
    }

    /// Display name, or the placeholder when the source has none
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or(UNKNOWN_NAME)
    }

    /// Number of nodes in this subtree, including this one
    #[must_use]
    pub fn subtree_size(&self) -> usize {
        1 + self.children.iter().map(Self::subtree_size).sum::<usize>()
    }
}

/// The whole source classification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceDocument {
    /// Informational version of the source release
    #[serde(default)]
    pub version: Option<String>,
    /// Informational release date
    #[serde(default)]
    pub date: Option<String>,
    /// Root nodes
    pub nodes: Vec<SourceNode>,
}

impl SourceDocument {
    /// Create a document from its root nodes
    #[must_use]
    pub const fn new(nodes: Vec<SourceNode>) -> Self {
        Self {
            version: None,
            date: None,
            nodes,
        }
    }

    /// Parse a source document from any reader
    ///
    /// `origin` only feeds the error message.
    pub fn from_reader<R: Read>(reader: R, origin: &Path) -> Result<Self> {
        let document: Self = serde_json::from_reader(reader)
            .map_err(|e| IndexError::invalid_format(origin, e.to_string()))?;
        document.check_ids(origin)?;
        Ok(document)
    }

    /// Parse a source document from a file
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = safe_open_file(path, "reading the source classification")?;
        Self::from_reader(std::io::BufReader::new(file), path)
    }

    /// Total number of nodes in the document
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.iter().map(SourceNode::subtree_size).sum()
    }

    /// Reject nodes whose id is blank
    fn check_ids(&self, origin: &Path) -> Result<()> {
        let mut stack: Vec<&SourceNode> = self.nodes.iter().collect();
        while let Some(node) = stack.pop() {
            if node.id.trim().is_empty() {
                return Err(IndexError::invalid_format(
                    origin,
                    format!("node '{}' has an empty id", node.display_name()),
                ));
            }
            stack.extend(node.children.iter());
        }
        Ok(())
    }
}
