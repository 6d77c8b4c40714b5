use std::path::PathBuf;

use disease_index::config::StoreConfig;
use disease_index::models::{CategoryNode, Relationship, SourceDocument, SourceNode};
use disease_index::navigator::CombinedNavigator;
use disease_index::utils::test::{convert_into, open_navigator, sample_document};
use disease_index::{CategoryGraph, DiseaseStore};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tempfile::TempDir;

/// Fresh scratch directory, removed when dropped
#[must_use]
pub fn scratch() -> TempDir {
    tempfile::tempdir().unwrap()
}

/// Convert the sample classification, returning the scratch dir and the output path
#[must_use]
pub fn sample_index() -> (TempDir, PathBuf) {
    let dir = scratch();
    let (output, _) = convert_into(dir.path(), &sample_document(), "index").unwrap();
    (dir, output)
}

/// Navigator over the converted sample classification
#[must_use]
pub fn sample_navigator() -> (TempDir, CombinedNavigator) {
    let dir = scratch();
    let navigator = open_navigator(dir.path(), &sample_document()).unwrap();
    (dir, navigator)
}

/// Store over the converted sample classification
#[must_use]
pub fn sample_store() -> (TempDir, DiseaseStore) {
    let (dir, output) = sample_index();
    let store = DiseaseStore::open(&output).unwrap();
    (dir, store)
}

/// Category node with its children filled in
#[must_use]
pub fn category(id: &str, parent: Option<&str>, level: usize, children: &[&str]) -> CategoryNode {
    let mut node = match parent {
        Some(parent) => CategoryNode::child(id, format!("Category {id}"), parent, level),
        None => CategoryNode::root(id, format!("Category {id}")),
    };
    for child in children {
        node.add_child(child);
    }
    node
}

/// Graph whose relationship table mirrors the given nodes
#[must_use]
pub fn graph_of(nodes: Vec<CategoryNode>) -> CategoryGraph {
    let relationships: Vec<(String, Relationship)> = nodes
        .iter()
        .map(|n| (n.id.clone(), Relationship::of(n)))
        .collect();
    CategoryGraph::from_tables(
        nodes.into_iter().map(|n| (n.id.clone(), n)),
        relationships,
        &StoreConfig::default(),
    )
}

/// Random classification with colliding names and hyphenated aliases
#[must_use]
pub fn random_document(seed: u64) -> SourceDocument {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut next_id = 0usize;
    let roots = rng.random_range(1..=2);
    let nodes = (0..roots)
        .map(|_| random_node(&mut rng, &mut next_id, 0, true))
        .collect();
    SourceDocument::new(nodes)
}

fn random_node(rng: &mut StdRng, next_id: &mut usize, depth: usize, force_group: bool) -> SourceNode {
    *next_id += 1;
    let id = format!("N{next_id}");
    let name = if rng.random_bool(0.3) {
        format!("Gene{}-Type{}", rng.random_range(0..5), rng.random_range(0..3))
    } else {
        format!("Name{}", rng.random_range(0..20))
    };

    let mut node = if force_group || rng.random_bool(0.35) {
        SourceNode::group(id, name)
    } else {
        SourceNode::disorder(id, name, "Disease")
    };

    if depth < 4 {
        let children = rng.random_range(0..=4);
        for _ in 0..children {
            node.children.push(random_node(rng, next_id, depth + 1, false));
        }
    }
    node
}
