//! Combined navigator over the category graph and the disease store
//!
//! This is the entry point application code is meant to use. Categories are
//! answered from the eagerly loaded graph; disease lookups fall through to
//! the store and may hydrate its bulk table.

pub mod aggregation;
pub mod export;
pub mod resolution;
pub mod validation;

use std::path::Path;

use rustc_hash::FxHashMap;

use crate::config::StoreConfig;
use crate::error::{EntityKind, IndexError, Result};
use crate::graph::CategoryGraph;
use crate::models::source::UNKNOWN_NAME;
use crate::models::{Node, NodeKind};
use crate::store::{DiseaseStore, NameIds};

pub use export::SubtreeSnapshot;

/// One view over categories and diseases
#[derive(Debug)]
pub struct CombinedNavigator {
    graph: CategoryGraph,
    store: DiseaseStore,
    /// Display name to ids of both kinds, each list sorted
    names: FxHashMap<String, NameIds>,
}

impl CombinedNavigator {
    /// Open both components over an artifact directory
    pub fn open(dir: &Path, config: &StoreConfig) -> Result<Self> {
        let graph = CategoryGraph::load(dir, config)?;
        let store = DiseaseStore::open(dir)?;
        Ok(Self::new(graph, store))
    }

    /// Wrap already loaded components and merge their name entries
    #[must_use]
    pub fn new(graph: CategoryGraph, store: DiseaseStore) -> Self {
        let mut names: FxHashMap<String, NameIds> = FxHashMap::default();
        for category in graph.iter() {
            if category.name != UNKNOWN_NAME {
                names
                    .entry(category.name.clone())
                    .or_default()
                    .push(category.id.clone());
            }
        }
        for (name, ids) in store.names() {
            names
                .entry(name.to_string())
                .or_default()
                .extend(ids.iter().cloned());
        }
        for ids in names.values_mut() {
            ids.sort_unstable();
            ids.dedup();
        }

        log::debug!("Merged name index holds {} names", names.len());
        Self {
            graph,
            store,
            names,
        }
    }

    #[must_use]
    pub const fn graph(&self) -> &CategoryGraph {
        &self.graph
    }

    #[must_use]
    pub const fn store(&self) -> &DiseaseStore {
        &self.store
    }

    /// Runtime kind of an id, answered without hydration
    #[must_use]
    pub fn kind_of(&self, id: &str) -> Option<NodeKind> {
        if self.graph.contains(id) {
            Some(NodeKind::Category)
        } else if self.store.contains(id) {
            Some(NodeKind::Disease)
        } else {
            None
        }
    }

    /// Look up any node; categories first
    pub fn get(&self, id: &str) -> Result<Node> {
        if let Some(category) = self.graph.get(id) {
            return Ok(Node::Category(category.clone()));
        }
        if self.store.contains(id) {
            if let Some(disease) = self.store.get(id)? {
                return Ok(Node::Disease(disease));
            }
        }
        Err(IndexError::not_found(id, EntityKind::Node))
    }

    /// Parent category of a category, or the category a disease is filed under
    ///
    /// `None` only for root categories.
    pub fn parent(&self, id: &str) -> Result<Option<Node>> {
        match self.kind_of(id) {
            Some(NodeKind::Category) => Ok(self.graph.parent(id)?.cloned().map(Node::Category)),
            Some(NodeKind::Disease) => {
                let category = self.disease_category(id)?;
                Ok(Some(Node::Category(category.clone())))
            }
            None => Err(IndexError::not_found(id, EntityKind::Node)),
        }
    }

    /// Child categories followed by the diseases filed directly on `id`
    ///
    /// Diseases have no children.
    pub fn children(&self, id: &str) -> Result<Vec<Node>> {
        match self.kind_of(id) {
            Some(NodeKind::Category) => {
                let mut nodes: Vec<Node> = self
                    .graph
                    .children(id)?
                    .into_iter()
                    .cloned()
                    .map(Node::Category)
                    .collect();
                nodes.extend(self.store.by_category(id)?.into_iter().map(Node::Disease));
                Ok(nodes)
            }
            Some(NodeKind::Disease) => Ok(Vec::new()),
            None => Err(IndexError::not_found(id, EntityKind::Node)),
        }
    }

    /// Ids from the root down to `id`, inclusive
    ///
    /// For a disease this is its category's path with the disease appended.
    /// Cycles fail with `DataIntegrity`.
    pub fn path_to_root(&self, id: &str) -> Result<Vec<String>> {
        match self.kind_of(id) {
            Some(NodeKind::Category) => self.graph.path_to_root(id),
            Some(NodeKind::Disease) => {
                let category = self.disease_category(id)?;
                let mut path = self.graph.path_to_root(&category.id)?;
                path.push(id.to_string());
                Ok(path)
            }
            None => Err(IndexError::not_found(id, EntityKind::Node)),
        }
    }

    /// Category a known disease is filed under, which must exist in the graph
    fn disease_category(&self, id: &str) -> Result<&crate::models::CategoryNode> {
        let category_id = self
            .store
            .category_of(id)
            .ok_or_else(|| IndexError::not_found(id, EntityKind::Disease))?;
        self.graph.get(category_id).ok_or_else(|| {
            IndexError::DataIntegrity(format!(
                "disease {id} is filed under missing category {category_id}"
            ))
        })
    }
}
