//! Name resolution
//!
//! A name may map to several nodes. `get_by_name` never picks one of several
//! matches: it fails with `Ambiguous` and lists the candidates instead.

use itertools::Itertools;

use super::CombinedNavigator;
use crate::error::{EntityKind, IndexError, Result};
use crate::models::source::UNKNOWN_NAME;
use crate::models::{Node, NodeKind};

impl CombinedNavigator {
    /// Ids registered under `name`, optionally restricted to one kind
    #[must_use]
    pub fn resolve_name(&self, name: &str, kind: Option<NodeKind>) -> Vec<String> {
        self.names
            .get(name)
            .map(|ids| {
                ids.iter()
                    .filter(|id| kind.is_none() || self.kind_of(id) == kind)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    /// The single node registered under `name`
    ///
    /// # Errors
    /// `NotFound` when nothing matches after filtering, `Ambiguous` when
    /// more than one id remains.
    pub fn get_by_name(&self, name: &str, kind: Option<NodeKind>) -> Result<Node> {
        let mut ids = self.resolve_name(name, kind);
        match ids.len() {
            0 => Err(IndexError::not_found(name, EntityKind::Name)),
            1 => {
                let id = ids.remove(0);
                self.get(&id)
            }
            _ => Err(IndexError::Ambiguous {
                name: name.to_string(),
                candidates: ids,
            }),
        }
    }

    /// Case-insensitive substring search over category and disease names
    ///
    /// Categories come first, then diseases, each sorted by id. Categories
    /// without a name never match. Searching diseases hydrates the store.
    pub fn search_by_name(&self, query: &str, kind: Option<NodeKind>) -> Result<Vec<Node>> {
        let needle = query.to_lowercase();
        let mut nodes = Vec::new();

        if kind != Some(NodeKind::Disease) {
            nodes.extend(
                self.graph
                    .iter()
                    .filter(|c| c.name != UNKNOWN_NAME && c.name.to_lowercase().contains(&needle))
                    .sorted_by(|a, b| a.id.cmp(&b.id))
                    .cloned()
                    .map(Node::Category),
            );
        }
        if kind != Some(NodeKind::Category) {
            nodes.extend(
                self.store
                    .by_name_partial(query)?
                    .into_iter()
                    .map(Node::Disease),
            );
        }

        Ok(nodes)
    }
}
