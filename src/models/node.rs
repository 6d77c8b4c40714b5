//! Polymorphic node abstraction
//!
//! Navigation code that only needs ids and names is written once against
//! [`IndexNode`]; anything kind-specific matches on [`Node`].

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::models::category::CategoryNode;
use crate::models::disease::DiseaseInstance;

/// Runtime kind of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Category,
    Disease,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Category => write!(f, "category"),
            Self::Disease => write!(f, "disease"),
        }
    }
}

impl FromStr for NodeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "category" => Ok(Self::Category),
            "disease" => Ok(Self::Disease),
            other => Err(format!("unknown node kind: {other}")),
        }
    }
}

/// Capabilities shared by every node in the index
pub trait IndexNode {
    /// Node identifier
    fn id(&self) -> &str;

    /// Display name
    fn name(&self) -> &str;

    /// Runtime kind
    fn node_kind(&self) -> NodeKind;

    /// Depth from the root
    fn level(&self) -> usize;
}

impl IndexNode for CategoryNode {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn node_kind(&self) -> NodeKind {
        NodeKind::Category
    }

    fn level(&self) -> usize {
        self.level
    }
}

impl IndexNode for DiseaseInstance {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn node_kind(&self) -> NodeKind {
        NodeKind::Disease
    }

    fn level(&self) -> usize {
        self.classification.level
    }
}

/// A category or a disease
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "node", rename_all = "snake_case")]
pub enum Node {
    Category(CategoryNode),
    Disease(Arc<DiseaseInstance>),
}

impl Node {
    /// The category, if this node is one
    #[must_use]
    pub const fn as_category(&self) -> Option<&CategoryNode> {
        match self {
            Self::Category(category) => Some(category),
            Self::Disease(_) => None,
        }
    }

    /// The disease, if this node is one
    #[must_use]
    pub fn as_disease(&self) -> Option<&DiseaseInstance> {
        match self {
            Self::Category(_) => None,
            Self::Disease(disease) => Some(disease),
        }
    }
}

impl IndexNode for Node {
    fn id(&self) -> &str {
        match self {
            Self::Category(category) => category.id(),
            Self::Disease(disease) => disease.id(),
        }
    }

    fn name(&self) -> &str {
        match self {
            Self::Category(category) => category.name(),
            Self::Disease(disease) => disease.name(),
        }
    }

    fn node_kind(&self) -> NodeKind {
        match self {
            Self::Category(_) => NodeKind::Category,
            Self::Disease(_) => NodeKind::Disease,
        }
    }

    fn level(&self) -> usize {
        match self {
            Self::Category(category) => category.level,
            Self::Disease(disease) => disease.classification.level,
        }
    }
}
