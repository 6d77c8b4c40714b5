//! Disease index CLI
//!
//! # Usage
//!
//! ```bash
//! # Convert a source classification into an artifact directory
//! disease-index convert classification.json index/
//!
//! # Validate an existing artifact directory
//! disease-index validate index/
//!
//! # Resolve a display name
//! disease-index lookup index/ "PMM2-CDG" --kind disease
//! ```

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use disease_index::utils::logging::console::{
    print_conversion_summary, print_statistics, print_validation_summary,
};
use disease_index::utils::logging::{create_spinner, finish_progress_bar};
use disease_index::{
    CombinedNavigator, Converter, ConverterConfig, IndexError, IndexNode, Node, NodeKind,
    StoreConfig,
};
use log::{error, info};

#[derive(Parser)]
#[command(name = "disease-index")]
#[command(about = "Convert and query hierarchical disease classifications", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a source classification into an artifact directory
    Convert {
        /// Source classification document (JSON)
        source: PathBuf,

        /// Output artifact directory
        output: PathBuf,

        /// Depth below which every node is a category
        #[arg(long)]
        category_depth: Option<usize>,

        /// Write compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Validate an existing artifact directory
    Validate {
        /// Artifact directory
        dir: PathBuf,

        /// Also run the cross-structure checks, hydrating all records
        #[arg(long)]
        deep: bool,
    },

    /// Print the aggregate statistics of an artifact directory
    Stats {
        /// Artifact directory
        dir: PathBuf,
    },

    /// Resolve a display name to exactly one node
    Lookup {
        /// Artifact directory
        dir: PathBuf,

        /// Display name or alias
        name: String,

        /// Restrict matches to one kind (category or disease)
        #[arg(long)]
        kind: Option<NodeKind>,
    },
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let outcome = match cli.command {
        Commands::Convert {
            source,
            output,
            category_depth,
            compact,
        } => run_convert(&source, &output, category_depth, compact),
        Commands::Validate { dir, deep } => run_validate(&dir, deep),
        Commands::Stats { dir } => run_stats(&dir),
        Commands::Lookup { dir, name, kind } => run_lookup(&dir, &name, kind),
    };

    match outcome {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

fn run_convert(
    source: &Path,
    output: &Path,
    category_depth: Option<usize>,
    compact: bool,
) -> anyhow::Result<bool> {
    let mut config = ConverterConfig::from_env();
    if let Some(depth) = category_depth {
        config.category_depth_threshold = depth;
    }
    config.pretty_json = !compact;

    match Converter::new(config).convert(source, output) {
        Ok(report) => {
            print_conversion_summary(&report);
            Ok(true)
        }
        Err(IndexError::ValidationFailed(issues)) => {
            error!("Conversion failed validation with {} issue(s)", issues.len());
            for issue in &issues {
                error!("  {}", issue.message);
            }
            Ok(false)
        }
        Err(e) => Err(e).with_context(|| format!("Failed to convert {}", source.display())),
    }
}

fn run_validate(dir: &Path, deep: bool) -> anyhow::Result<bool> {
    let max_warnings = ConverterConfig::default().max_reported_warnings;
    let summary = disease_index::validate_only(dir, max_warnings)
        .with_context(|| format!("Failed to validate {}", dir.display()))?;
    print_validation_summary(&summary);
    if !summary.passed || !deep {
        return Ok(summary.passed);
    }

    let spinner = create_spinner(Some("Checking records against indices"));
    let navigator = CombinedNavigator::open(dir, &StoreConfig::from_env())
        .with_context(|| format!("Failed to open {}", dir.display()))?;
    let report = navigator.validate()?;
    finish_progress_bar(&spinner, Some("Cross-structure checks done"));

    let deep_summary = disease_index::ValidationSummary::from_report(&report, max_warnings);
    print_validation_summary(&deep_summary);
    Ok(deep_summary.passed)
}

fn run_stats(dir: &Path) -> anyhow::Result<bool> {
    let stats = disease_index::statistics(dir)
        .with_context(|| format!("Failed to read statistics from {}", dir.display()))?;
    print_statistics(&stats);
    Ok(true)
}

fn run_lookup(dir: &Path, name: &str, kind: Option<NodeKind>) -> anyhow::Result<bool> {
    let navigator = CombinedNavigator::open(dir, &StoreConfig::from_env())
        .with_context(|| format!("Failed to open {}", dir.display()))?;

    match navigator.get_by_name(name, kind) {
        Ok(node) => {
            let path = navigator.path_to_root(node.id())?;
            println!("{} {} ({})", node.node_kind(), node.id(), node.name());
            println!("Path: {}", path.join(" > "));
            if let Node::Disease(disease) = &node {
                if let Some(link) = &disease.metadata.expert_link {
                    println!("Expert link: {link}");
                }
            }
            Ok(true)
        }
        Err(IndexError::Ambiguous { candidates, .. }) => {
            println!("'{name}' is ambiguous:");
            for id in &candidates {
                let label = navigator
                    .kind_of(id)
                    .map_or_else(|| "unknown".to_string(), |k| k.to_string());
                println!("  - {id} ({label})");
            }
            Ok(false)
        }
        Err(e @ IndexError::NotFound { .. }) => {
            info!("{e}");
            Ok(false)
        }
        Err(e) => Err(e.into()),
    }
}
