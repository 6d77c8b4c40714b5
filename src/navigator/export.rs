//! Standalone snapshots of a subtree

use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::CombinedNavigator;
use crate::artifacts::write_json;
use crate::error::Result;
use crate::models::{CategoryNode, DiseaseInstance, Node};

/// A node together with everything below it
#[derive(Debug, Clone, Serialize)]
pub struct SubtreeSnapshot {
    pub root: Node,
    pub exported_at: DateTime<Utc>,
    /// Descendant categories in depth-first order, the root excluded
    pub categories: Vec<CategoryNode>,
    /// Diseases filed on the root or any descendant category
    pub diseases: Vec<Arc<DiseaseInstance>>,
}

impl SubtreeSnapshot {
    /// Number of nodes in the snapshot, the root included
    #[must_use]
    pub fn node_count(&self) -> usize {
        1 + self.categories.len() + self.diseases.len()
    }
}

impl CombinedNavigator {
    /// Snapshot `id` and its full descendant closure
    ///
    /// A disease exports as a snapshot of itself alone.
    pub fn export(&self, id: &str) -> Result<SubtreeSnapshot> {
        let root = self.get(id)?;
        let (categories, diseases) = match &root {
            Node::Category(_) => {
                let categories = self
                    .graph
                    .descendants(id, None)?
                    .iter()
                    .filter_map(|c| self.graph.get(c).cloned())
                    .collect();
                (categories, self.all_diseases_in_subtree(id)?)
            }
            Node::Disease(_) => (Vec::new(), Vec::new()),
        };

        Ok(SubtreeSnapshot {
            root,
            exported_at: Utc::now(),
            categories,
            diseases,
        })
    }

    /// Write the snapshot of `id` as JSON, returning the bytes written
    pub fn export_to_path(&self, id: &str, path: &Path, pretty: bool) -> Result<u64> {
        let snapshot = self.export(id)?;
        let bytes = write_json(path, &snapshot, pretty)?;
        log::info!(
            "Exported {} node(s) under {id} to {}",
            snapshot.node_count(),
            path.display()
        );
        Ok(bytes)
    }
}
