//! Domain models for the disease classification index
//!
//! This module contains the entities shared by the converter, the category
//! graph, the disease store and the navigator: category nodes, disease
//! instances with their classification, the polymorphic [`Node`], the source
//! document shape and validation issues.

pub mod category;
pub mod disease;
pub mod node;
pub mod source;
pub mod validation;

// Re-export commonly used types
pub use category::{CategoryKind, CategoryNode, Relationship};
pub use disease::{Classification, DiseaseInstance, DiseaseMetadata, ExtendedMetadata};
pub use node::{IndexNode, Node, NodeKind};
pub use source::{SourceDocument, SourceKind, SourceNode};
pub use validation::{IssueCode, IssueSeverity, ValidationIssue, ValidationReport};
