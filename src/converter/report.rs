//! Aggregate statistics of a conversion

use std::collections::BTreeMap;

use super::builder::ClassificationBuild;
use crate::artifacts::AggregateStatistics;

/// Compute the aggregate statistics of a finished build
#[must_use]
pub fn aggregate_statistics(build: &ClassificationBuild) -> AggregateStatistics {
    let categories_per_level = build.level_counts();

    let mut diseases_per_level: BTreeMap<usize, usize> = BTreeMap::new();
    for disease in build.diseases.values() {
        *diseases_per_level.entry(disease.level()).or_insert(0) += 1;
    }

    AggregateStatistics {
        total_categories: build.categories.len(),
        total_diseases: build.diseases.len(),
        root_categories: build.categories.values().filter(|c| c.is_root()).count(),
        max_depth: categories_per_level.keys().next_back().copied().unwrap_or(0),
        categories_per_level,
        diseases_per_level,
        categories_with_diseases: build
            .classification_index
            .values()
            .filter(|ids| !ids.is_empty())
            .count(),
        name_entries: build.name_index.len(),
        ambiguous_names: build.name_index.values().filter(|ids| ids.len() > 1).count(),
        alias_names: build.alias_names,
        skipped_orphans: build.skipped_orphans,
        duplicate_diseases: build.duplicate_diseases,
        forced_categories: build.forced_categories,
        path_entries: build.diseases.len(),
    }
}
