//! Console output utilities
//!
//! This module provides the human-readable summaries printed by the binary.

use crate::artifacts::{AggregateStatistics, RunReport};
use crate::converter::ValidationSummary;
use crate::models::ValidationIssue;

/// Print the summary of a finished conversion run
pub fn print_conversion_summary(report: &RunReport) {
    println!(
        "Converted {} in {} ms",
        report.source_path.display(),
        report.duration_ms
    );
    print_statistics(&report.statistics);
    println!("Artifacts in {}:", report.output_dir.display());
    for artifact in &report.artifacts {
        println!("  - {} ({})", artifact.name, format_bytes(artifact.bytes));
    }
    println!("Total size: {}", format_bytes(report.total_bytes()));
    if !report.warnings.is_empty() {
        println!("Warnings:");
        for warning in &report.warnings {
            println!("  - {warning}");
        }
    }
}

/// Print aggregate counts
pub fn print_statistics(stats: &AggregateStatistics) {
    println!("Categories: {} ({} roots)", stats.total_categories, stats.root_categories);
    println!("Diseases: {}", stats.total_diseases);
    println!("Max depth: {}", stats.max_depth);
    for (level, count) in &stats.categories_per_level {
        println!("  level {level}: {count} categories");
    }
    println!(
        "Names: {} ({} ambiguous, {} aliases)",
        stats.name_entries, stats.ambiguous_names, stats.alias_names
    );
    if stats.skipped_orphans > 0 || stats.duplicate_diseases > 0 || stats.forced_categories > 0 {
        println!(
            "Skipped orphans: {}, duplicate diseases: {}, forced categories: {}",
            stats.skipped_orphans, stats.duplicate_diseases, stats.forced_categories
        );
    }
}

/// Print the outcome of a validation-only run
pub fn print_validation_summary(summary: &ValidationSummary) {
    if summary.passed {
        println!("Validation passed");
    } else {
        println!("Validation FAILED with {} issue(s)", summary.issues.len());
        for issue in &summary.issues {
            print_issue(issue);
        }
    }

    if summary.total_warnings > 0 {
        println!(
            "{} warning(s), showing {}:",
            summary.total_warnings,
            summary.warnings.len()
        );
        for warning in &summary.warnings {
            print_issue(warning);
        }
    }
}

fn print_issue(issue: &ValidationIssue) {
    println!("  [{:?}] {}", issue.code, issue.message);
}

fn format_bytes(bytes: u64) -> String {
    const KIB: u64 = 1024;
    const MIB: u64 = KIB * 1024;
    match bytes {
        b if b >= MIB => format!("{:.1} MiB", b as f64 / MIB as f64),
        b if b >= KIB => format!("{:.1} KiB", b as f64 / KIB as f64),
        b => format!("{b} B"),
    }
}
