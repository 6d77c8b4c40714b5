//! Category entity model
//!
//! Categories form the always-resident backbone of the classification.

use serde::{Deserialize, Serialize};

/// Whether a category sits at the top of the classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryKind {
    /// A category without parent
    RootCategory,
    /// Any other grouping node
    Category,
}

/// A grouping node in the classification backbone
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryNode {
    /// Identifier from the source classification
    pub id: String,
    /// Display name
    pub name: String,
    /// Root or inner category
    #[serde(rename = "type")]
    pub kind: CategoryKind,
    /// Depth from the root (roots are level 0)
    pub level: usize,
    /// Parent category, `None` for roots
    #[serde(default)]
    pub parent_id: Option<String>,
    /// Child categories in source order
    #[serde(default)]
    pub children: Vec<String>,
}

impl CategoryNode {
    /// Create a root category
    #[must_use]
    pub fn root(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: CategoryKind::RootCategory,
            level: 0,
            parent_id: None,
            children: Vec::new(),
        }
    }

    /// Create a category filed under `parent_id`
    #[must_use]
    pub fn child(
        id: impl Into<String>,
        name: impl Into<String>,
        parent_id: impl Into<String>,
        level: usize,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: CategoryKind::Category,
            level,
            parent_id: Some(parent_id.into()),
            children: Vec::new(),
        }
    }

    /// Check if this category has no parent
    #[must_use]
    pub const fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Append a child id, keeping the list free of duplicates
    ///
    /// Returns `true` if the child was not already present.
    pub fn add_child(&mut self, child_id: &str) -> bool {
        if self.children.iter().any(|c| c == child_id) {
            false
        } else {
            self.children.push(child_id.to_string());
            true
        }
    }
}

/// One entry of the relationship table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    /// Parent category, `None` for roots
    #[serde(default)]
    pub parent: Option<String>,
    /// Child categories in source order
    #[serde(default)]
    pub children: Vec<String>,
}

impl Relationship {
    /// Build the relationship entry mirroring a category node
    #[must_use]
    pub fn of(node: &CategoryNode) -> Self {
        Self {
            parent: node.parent_id.clone(),
            children: node.children.clone(),
        }
    }
}
