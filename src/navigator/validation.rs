//! Cross-structure validation

use itertools::Itertools;
use rustc_hash::FxHashMap;

use super::CombinedNavigator;
use crate::error::Result;
use crate::models::{IssueCode, NodeKind, ValidationIssue, ValidationReport};

impl CombinedNavigator {
    /// Validate the graph, the disease records and the indices together
    ///
    /// Hydrates the disease records. Integrity issues: everything the graph
    /// reports, diseases filed under a missing category, and disagreement
    /// between the classification index and the records. Names shared by a
    /// category and a disease are warnings.
    pub fn validate(&self) -> Result<ValidationReport> {
        let mut report = self.graph.validate_structure();

        let records = self.store.all_records()?;
        let by_id: FxHashMap<&str, &str> = records
            .iter()
            .map(|d| (d.id.as_str(), d.category_id()))
            .collect();

        for disease in &records {
            let category_id = disease.category_id();
            if !self.graph.contains(category_id) {
                report.push(ValidationIssue::integrity(
                    IssueCode::MissingCategory,
                    format!("disease {} is filed under missing category {category_id}", disease.id),
                    vec![disease.id.clone(), category_id.to_string()],
                ));
            }
            if !self
                .store
                .ids_in_category(category_id)
                .iter()
                .any(|id| *id == disease.id)
            {
                report.push(ValidationIssue::integrity(
                    IssueCode::IndexMismatch,
                    format!(
                        "disease {} is not indexed under its category {category_id}",
                        disease.id
                    ),
                    vec![disease.id.clone(), category_id.to_string()],
                ));
            }
        }

        for category_id in self.store.indexed_categories().sorted() {
            for id in self.store.ids_in_category(category_id) {
                let message = match by_id.get(id.as_str()).map(|c| *c == category_id) {
                    Some(true) => continue,
                    Some(false) => {
                        format!("index files {id} under {category_id} but its record disagrees")
                    }
                    None => format!("index lists {id} under {category_id} but it has no record"),
                };
                report.push(ValidationIssue::integrity(
                    IssueCode::IndexMismatch,
                    message,
                    vec![id.clone(), category_id.to_string()],
                ));
            }
        }

        for (name, ids) in self.names.iter().sorted_by(|a, b| a.0.cmp(b.0)) {
            let kinds: Vec<_> = ids.iter().filter_map(|id| self.kind_of(id)).collect();
            if kinds.contains(&NodeKind::Category) && kinds.contains(&NodeKind::Disease) {
                report.push(ValidationIssue::warning(
                    IssueCode::NameCollision,
                    format!("name '{name}' is shared by a category and a disease"),
                    ids.to_vec(),
                ));
            }
        }

        log::info!(
            "Navigator validation: {} integrity issue(s), {} warning(s)",
            report.integrity_count(),
            report.warning_count()
        );
        Ok(report)
    }
}
