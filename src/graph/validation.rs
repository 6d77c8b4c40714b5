//! Structural validation of the category graph

use itertools::Itertools;

use super::CategoryGraph;
use super::traversal::find_cycles;
use crate::models::{IssueCode, ValidationIssue, ValidationReport};

impl CategoryGraph {
    /// Check the graph's structural invariants
    ///
    /// Integrity issues: relationship entries referencing nodes absent from
    /// the node table, and cycles. Warnings: parent/child back-reference
    /// mismatches, level mismatches, categories without a relationship entry
    /// and multiple roots. The report is valid when there is no integrity
    /// issue.
    #[must_use]
    pub fn validate_structure(&self) -> ValidationReport {
        let mut report = ValidationReport::new();

        for (id, rel) in self.relationships.iter().sorted_by(|a, b| a.0.cmp(b.0)) {
            if !self.nodes.contains_key(id) {
                report.push(ValidationIssue::integrity(
                    IssueCode::MissingNode,
                    format!("relationship entry {id} has no category node"),
                    vec![id.clone()],
                ));
            }

            if let Some(parent) = &rel.parent {
                if !self.nodes.contains_key(parent) {
                    report.push(ValidationIssue::integrity(
                        IssueCode::MissingNode,
                        format!("category {id} references missing parent {parent}"),
                        vec![id.clone(), parent.clone()],
                    ));
                } else if let Some(parent_rel) = self.relationships.get(parent) {
                    if !parent_rel.children.contains(id) {
                        report.push(ValidationIssue::warning(
                            IssueCode::BackReferenceMismatch,
                            format!("parent {parent} does not list {id} as a child"),
                            vec![parent.clone(), id.clone()],
                        ));
                    }
                }
            }

            for child in &rel.children {
                if !self.nodes.contains_key(child) {
                    report.push(ValidationIssue::integrity(
                        IssueCode::MissingNode,
                        format!("category {id} references missing child {child}"),
                        vec![id.clone(), child.clone()],
                    ));
                } else if let Some(child_rel) = self.relationships.get(child) {
                    if child_rel.parent.as_deref() != Some(id.as_str()) {
                        report.push(ValidationIssue::warning(
                            IssueCode::BackReferenceMismatch,
                            format!(
                                "child {child} of {id} names {} as its parent",
                                child_rel.parent.as_deref().unwrap_or("no category")
                            ),
                            vec![id.clone(), child.clone()],
                        ));
                    }
                }
            }
        }

        for node in self.nodes.values().sorted_by(|a, b| a.id.cmp(&b.id)) {
            self.check_node(node, &mut report);
        }

        let cycles = find_cycles(
            self.relationships.keys().map(String::as_str),
            |id| self.relationships.get(id).and_then(|r| r.parent.as_deref()),
        );
        for cycle in cycles {
            report.push(ValidationIssue::integrity(
                IssueCode::Cycle,
                format!("categories form a cycle: {}", cycle.join(" -> ")),
                cycle,
            ));
        }

        if self.roots.len() > 1 {
            report.push(ValidationIssue::warning(
                IssueCode::MultipleRoots,
                format!("{} root categories found", self.roots.len()),
                self.roots.clone(),
            ));
        }

        log::debug!(
            "Category graph validation: {} integrity issue(s), {} warning(s)",
            report.integrity_count(),
            report.warning_count()
        );
        report
    }

    fn check_node(&self, node: &crate::models::CategoryNode, report: &mut ValidationReport) {
        let Some(rel) = self.relationships.get(&node.id) else {
            report.push(ValidationIssue::warning(
                IssueCode::MissingNode,
                format!("category {} has no relationship entry", node.id),
                vec![node.id.clone()],
            ));
            return;
        };

        if rel.parent != node.parent_id {
            report.push(ValidationIssue::warning(
                IssueCode::BackReferenceMismatch,
                format!(
                    "category {} disagrees with its relationship entry about its parent",
                    node.id
                ),
                vec![node.id.clone()],
            ));
        }

        let expected_level = match rel.parent.as_deref() {
            None => Some(0),
            Some(parent) => self.nodes.get(parent).map(|p| p.level + 1),
        };
        if let Some(expected) = expected_level {
            if node.level != expected {
                report.push(ValidationIssue::warning(
                    IssueCode::LevelMismatch,
                    format!(
                        "category {} is at level {} but expected {}",
                        node.id, node.level, expected
                    ),
                    vec![node.id.clone()],
                ));
            }
        }
    }
}
