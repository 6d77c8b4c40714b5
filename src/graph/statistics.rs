//! Aggregate statistics over the category graph

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::CategoryGraph;

/// Shape of the category backbone
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryStatistics {
    pub total_categories: usize,
    pub root_categories: usize,
    pub max_depth: usize,
    pub categories_per_level: BTreeMap<usize, usize>,
    pub average_children: f64,
    pub min_children: usize,
    pub max_children: usize,
    /// Categories without child categories
    pub leaf_categories: usize,
}

impl CategoryGraph {
    /// Compute statistics over all categories
    #[must_use]
    pub fn statistics(&self) -> CategoryStatistics {
        if self.nodes.is_empty() {
            return CategoryStatistics::default();
        }

        let child_counts: Vec<usize> = self
            .nodes
            .keys()
            .map(|id| self.child_list(id).len())
            .collect();
        let total_children: usize = child_counts.iter().sum();

        CategoryStatistics {
            total_categories: self.nodes.len(),
            root_categories: self.roots.len(),
            max_depth: self.levels.keys().next_back().copied().unwrap_or(0),
            categories_per_level: self
                .levels
                .iter()
                .map(|(level, ids)| (*level, ids.len()))
                .collect(),
            average_children: total_children as f64 / self.nodes.len() as f64,
            min_children: child_counts.iter().copied().min().unwrap_or(0),
            max_children: child_counts.iter().copied().max().unwrap_or(0),
            leaf_categories: child_counts.iter().filter(|c| **c == 0).count(),
        }
    }
}
