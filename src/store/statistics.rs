//! Index-derived statistics of the disease store

use serde::{Deserialize, Serialize};

use super::DiseaseStore;

/// Disease counts, computed without hydrating any record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiseaseStatistics {
    pub total_diseases: usize,
    pub categories_with_diseases: usize,
    /// Average diseases per category that has at least one
    pub average_per_category: f64,
    pub min_per_category: usize,
    pub max_per_category: usize,
    /// Names mapping to more than one id
    pub ambiguous_names: usize,
    pub name_entries: usize,
}

impl DiseaseStore {
    #[must_use]
    pub fn statistics(&self) -> DiseaseStatistics {
        let counts: Vec<usize> = self
            .classification_index
            .values()
            .map(Vec::len)
            .filter(|n| *n > 0)
            .collect();
        let total_filed: usize = counts.iter().sum();

        DiseaseStatistics {
            total_diseases: self.count_all(),
            categories_with_diseases: counts.len(),
            average_per_category: if counts.is_empty() {
                0.0
            } else {
                total_filed as f64 / counts.len() as f64
            },
            min_per_category: counts.iter().copied().min().unwrap_or(0),
            max_per_category: counts.iter().copied().max().unwrap_or(0),
            ambiguous_names: self.name_index.values().filter(|ids| ids.len() > 1).count(),
            name_entries: self.name_index.len(),
        }
    }
}
