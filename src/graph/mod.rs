//! Category graph
//!
//! The category backbone is loaded eagerly and in full: categories are
//! bounded in count, unlike disease leaves. The graph is never mutated after
//! construction; the only interior state is the bounded path memo.

pub mod statistics;
pub mod traversal;
pub mod validation;

use std::collections::BTreeMap;
use std::num::NonZeroUsize;
use std::path::Path;
use std::sync::{Arc, Mutex};

use lru::LruCache;
use rustc_hash::FxHashMap;

use crate::artifacts::{Artifact, ArtifactLayout, CategoryStructure, ConversionMetadata, read_json};
use crate::config::StoreConfig;
use crate::error::{EntityKind, IndexError, Result};
use crate::models::{CategoryNode, Relationship};

pub use statistics::CategoryStatistics;
pub use traversal::find_cycles;

/// In-memory index of all categories
#[derive(Debug)]
pub struct CategoryGraph {
    nodes: FxHashMap<String, CategoryNode>,
    relationships: FxHashMap<String, Relationship>,
    /// Ids whose relationship entry has no parent, in id order
    roots: Vec<String>,
    levels: BTreeMap<usize, Vec<String>>,
    metadata: Option<ConversionMetadata>,
    /// Memoised strict path-to-root results, `None` when disabled
    path_cache: Option<Mutex<LruCache<String, Arc<[String]>>>>,
}

impl CategoryGraph {
    /// Load the category structure artifact from an artifact directory
    pub fn load(dir: &Path, config: &StoreConfig) -> Result<Self> {
        let layout = ArtifactLayout::new(dir);
        let structure: CategoryStructure = read_json(
            &layout.path(Artifact::CategoryStructure),
            "loading the category graph",
        )?;
        let graph = Self::from_structure(structure, config);
        log::info!(
            "Loaded category graph with {} categories ({} roots) from {}",
            graph.len(),
            graph.roots.len(),
            dir.display()
        );
        Ok(graph)
    }

    /// Build the graph from an already decoded structure
    #[must_use]
    pub fn from_structure(structure: CategoryStructure, config: &StoreConfig) -> Self {
        let mut graph = Self::from_tables(structure.nodes, structure.relationships, config);
        graph.metadata = Some(structure.metadata);
        graph
    }

    /// Build the graph from node and relationship tables
    ///
    /// No consistency is enforced here; see [`Self::validate_structure`].
    #[must_use]
    pub fn from_tables(
        nodes: impl IntoIterator<Item = (String, CategoryNode)>,
        relationships: impl IntoIterator<Item = (String, Relationship)>,
        config: &StoreConfig,
    ) -> Self {
        let nodes: FxHashMap<String, CategoryNode> = nodes.into_iter().collect();
        let relationships: FxHashMap<String, Relationship> = relationships.into_iter().collect();

        let mut roots: Vec<String> = relationships
            .iter()
            .filter(|(_, rel)| rel.parent.is_none())
            .map(|(id, _)| id.clone())
            .collect();
        roots.sort();

        let mut levels: BTreeMap<usize, Vec<String>> = BTreeMap::new();
        for node in nodes.values() {
            levels.entry(node.level).or_default().push(node.id.clone());
        }
        for ids in levels.values_mut() {
            ids.sort();
        }

        let path_cache = NonZeroUsize::new(config.path_cache_capacity)
            .map(|capacity| Mutex::new(LruCache::new(capacity)));

        Self {
            nodes,
            relationships,
            roots,
            levels,
            metadata: None,
            path_cache,
        }
    }

    /// Look up a category; absence is not an error
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&CategoryNode> {
        self.nodes.get(id)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Number of categories
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Root category ids
    #[must_use]
    pub fn roots(&self) -> &[String] {
        &self.roots
    }

    /// Conversion metadata, when loaded from artifacts
    #[must_use]
    pub const fn metadata(&self) -> Option<&ConversionMetadata> {
        self.metadata.as_ref()
    }

    /// Iterate over all categories in no particular order
    pub fn iter(&self) -> impl Iterator<Item = &CategoryNode> {
        self.nodes.values()
    }

    /// Parent of a category, `None` for roots
    pub fn parent(&self, id: &str) -> Result<Option<&CategoryNode>> {
        let rel = self.relationship(id)?;
        Ok(rel.parent.as_deref().and_then(|p| self.nodes.get(p)))
    }

    /// Child categories in converter insertion order
    pub fn children(&self, id: &str) -> Result<Vec<&CategoryNode>> {
        Ok(self
            .child_ids(id)?
            .iter()
            .filter_map(|c| self.nodes.get(c))
            .collect())
    }

    /// Raw child ids from the relationship table
    pub fn child_ids(&self, id: &str) -> Result<&[String]> {
        Ok(&self.relationship(id)?.children)
    }

    /// Other children of the same parent; for a root, the other roots
    pub fn siblings(&self, id: &str) -> Result<Vec<String>> {
        let rel = self.relationship(id)?;
        let pool: &[String] = match rel.parent.as_deref() {
            Some(parent) => self
                .relationships
                .get(parent)
                .map_or(&[][..], |p| p.children.as_slice()),
            None => &self.roots,
        };
        Ok(pool.iter().filter(|s| *s != id).cloned().collect())
    }

    /// All categories exactly at `level`
    #[must_use]
    pub fn level_slice(&self, level: usize) -> Vec<&CategoryNode> {
        self.levels
            .get(&level)
            .map(|ids| ids.iter().filter_map(|id| self.nodes.get(id)).collect())
            .unwrap_or_default()
    }

    fn relationship(&self, id: &str) -> Result<&Relationship> {
        self.relationships
            .get(id)
            .ok_or_else(|| IndexError::not_found(id, EntityKind::Category))
    }

    /// Parent pointer used by traversals: relationship table first, node table second
    fn parent_id(&self, id: &str) -> Option<&str> {
        match self.relationships.get(id) {
            Some(rel) => rel.parent.as_deref(),
            None => self.nodes.get(id).and_then(|n| n.parent_id.as_deref()),
        }
    }
}
