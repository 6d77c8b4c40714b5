//! Depth-first construction of the category and disease tables

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use indicatif::ProgressBar;
use rustc_hash::FxHashSet;

use crate::artifacts::{
    Artifact, ArtifactInfo, ArtifactLayout, CategoryStructure, CategoryTable, ClassificationIndex,
    ConversionMetadata, DiseaseTable, MetadataTable, NameIndex, PathEntry, RelationshipTable,
    write_json,
};
use crate::config::ConverterConfig;
use crate::error::Result;
use crate::models::disease::UNKNOWN_DISORDER_TYPE;
use crate::models::source::UNKNOWN_NAME;
use crate::models::{
    CategoryNode, Classification, DiseaseInstance, DiseaseMetadata, ExtendedMetadata,
    Relationship, SourceDocument, SourceNode,
};
use crate::utils::logging::log_warning;

/// Trailing segment of `name` after the last `separator`, if it makes a usable alias
#[must_use]
pub fn derive_alias(name: &str, separator: char) -> Option<&str> {
    let (head, tail) = name.rsplit_once(separator)?;
    let tail = tail.trim();
    (!head.trim().is_empty() && !tail.is_empty()).then_some(tail)
}

/// All tables of one conversion, before they are written
#[derive(Debug, Default)]
pub struct ClassificationBuild {
    pub categories: CategoryTable,
    pub diseases: DiseaseTable,
    pub classification_index: ClassificationIndex,
    pub name_index: NameIndex,
    pub disease_metadata: MetadataTable,
    /// Number of alias names registered
    pub alias_names: usize,
    pub skipped_orphans: usize,
    pub duplicate_diseases: usize,
    pub forced_categories: usize,
    /// Human-readable warnings raised while traversing
    pub warnings: Vec<String>,
}

/// Walks a source document and fills a [`ClassificationBuild`]
pub struct ClassificationBuilder<'a> {
    config: &'a ConverterConfig,
    generated_at: DateTime<Utc>,
    build: ClassificationBuild,
    progress: ProgressBar,
}

impl<'a> ClassificationBuilder<'a> {
    #[must_use]
    pub fn new(config: &'a ConverterConfig, generated_at: DateTime<Utc>, progress: ProgressBar) -> Self {
        Self {
            config,
            generated_at,
            build: ClassificationBuild::default(),
            progress,
        }
    }

    /// Traverse every root of the document depth-first
    #[must_use]
    pub fn build(mut self, document: &SourceDocument) -> ClassificationBuild {
        for root in &document.nodes {
            self.visit(root, None, 0);
        }

        if self.build.forced_categories > 0 {
            let message = format!(
                "{} node(s) labelled as disorders were treated as categories because they sit above depth {}",
                self.build.forced_categories, self.config.category_depth_threshold
            );
            log_warning(&message, None);
            self.build.warnings.push(message);
        }
        if self.build.skipped_orphans > 0 {
            log::warn!(
                "Skipped {} disease(s) without a parent category",
                self.build.skipped_orphans
            );
        }

        self.build
    }

    /// Visit one node
    ///
    /// `parent` is the nearest enclosing category. Children of a disorder are
    /// filed under that same category, since diseases never own other nodes.
    fn visit(&mut self, node: &SourceNode, parent: Option<&str>, depth: usize) {
        self.progress.inc(1);

        let labeled = node.is_labeled_category();
        let is_category = labeled || depth < self.config.category_depth_threshold;

        if is_category {
            if !labeled {
                self.build.forced_categories += 1;
                log::debug!(
                    "Node {} at depth {depth} treated as a category by the depth threshold",
                    node.id
                );
            }
            self.add_category(node, parent);
            for child in &node.children {
                self.visit(child, Some(&node.id), depth + 1);
            }
        } else {
            self.add_disease(node, parent, depth);
            for child in &node.children {
                self.visit(child, parent, depth + 1);
            }
        }
    }

    fn add_category(&mut self, node: &SourceNode, parent: Option<&str>) {
        let name = node.display_name();

        if let Some(existing) = self.build.categories.get_mut(&node.id) {
            // Repeated occurrence: keep the first parent, only fill in a missing name
            if existing.name == UNKNOWN_NAME && name != UNKNOWN_NAME {
                existing.name = name.to_string();
                register_name(&mut self.build.name_index, name, &node.id);
            }
            log::debug!(
                "Category {} seen again under {}; keeping its first parent",
                node.id,
                parent.unwrap_or("the root")
            );
            return;
        }

        let category = match parent.and_then(|p| self.build.categories.get_mut(p)) {
            Some(parent_node) => {
                parent_node.add_child(&node.id);
                CategoryNode::child(&node.id, name, &parent_node.id, parent_node.level + 1)
            }
            None => CategoryNode::root(&node.id, name),
        };

        if name != UNKNOWN_NAME {
            register_name(&mut self.build.name_index, name, &node.id);
        }
        self.build.categories.insert(node.id.clone(), category);
    }

    fn add_disease(&mut self, node: &SourceNode, parent: Option<&str>, depth: usize) {
        let Some(category_id) = parent else {
            self.build.skipped_orphans += 1;
            let message = format!("Disease {} has no parent category and was skipped", node.id);
            log::debug!("{message}");
            self.build.warnings.push(message);
            return;
        };

        if let Some(existing) = self.build.disease_metadata.get_mut(&node.id) {
            self.build.duplicate_diseases += 1;
            if !existing.occurrences.iter().any(|c| c == category_id) {
                existing.occurrences.push(category_id.to_string());
            }
            return;
        }

        let name = node.display_name();
        let path = self.path_to_root(category_id);
        let classification = Classification::new(category_id, path);

        let metadata = DiseaseMetadata {
            expert_link: node.expert_link.clone(),
            last_updated: Some(self.parse_timestamp(node)),
            disorder_type: node
                .disorder_type
                .clone()
                .unwrap_or_else(|| UNKNOWN_DISORDER_TYPE.to_string()),
            extra: node.extra.clone(),
        };

        let mut aliases = Vec::new();
        if name != UNKNOWN_NAME {
            register_name(&mut self.build.name_index, name, &node.id);
            if let Some(alias) = derive_alias(name, self.config.alias_separator) {
                register_name(&mut self.build.name_index, alias, &node.id);
                aliases.push(alias.to_string());
                self.build.alias_names += 1;
            }
        }

        let ids = self
            .build
            .classification_index
            .entry(category_id.to_string())
            .or_default();
        if !ids.iter().any(|id| *id == node.id) {
            ids.push(node.id.clone());
        }

        self.build.disease_metadata.insert(
            node.id.clone(),
            ExtendedMetadata {
                id: node.id.clone(),
                aliases,
                occurrences: vec![category_id.to_string()],
                source_depth: depth,
            },
        );
        self.build.diseases.insert(
            node.id.clone(),
            DiseaseInstance::new(&node.id, name, classification, metadata),
        );
    }

    /// Walk parent pointers from `category_id`, guarding against cycles
    fn path_to_root(&self, category_id: &str) -> Vec<String> {
        let mut visited: FxHashSet<&str> = FxHashSet::default();
        let mut path = Vec::new();
        let mut current = Some(category_id);

        while let Some(id) = current {
            if !visited.insert(id) {
                log::warn!("Cycle at category {id} while computing a disease path");
                break;
            }
            path.push(id.to_string());
            current = self
                .build
                .categories
                .get(id)
                .and_then(|c| c.parent_id.as_deref());
        }

        path.reverse();
        path
    }

    fn parse_timestamp(&self, node: &SourceNode) -> DateTime<Utc> {
        node.last_updated
            .as_deref()
            .and_then(|raw| match DateTime::parse_from_rfc3339(raw) {
                Ok(ts) => Some(ts.with_timezone(&Utc)),
                Err(e) => {
                    log::debug!("Unparseable timestamp '{raw}' on {}: {e}", node.id);
                    None
                }
            })
            .unwrap_or(self.generated_at)
    }
}

/// Add `id` under `name`, keeping each id list free of duplicates
fn register_name(index: &mut NameIndex, name: &str, id: &str) {
    let ids = index.entry(name.to_string()).or_default();
    if !ids.iter().any(|existing| existing == id) {
        ids.push(id.to_string());
    }
}

impl ClassificationBuild {
    /// Relationship table mirroring the category nodes
    #[must_use]
    pub fn relationships(&self) -> RelationshipTable {
        self.categories
            .iter()
            .map(|(id, node)| (id.clone(), Relationship::of(node)))
            .collect()
    }

    /// Root-to-leaf path of every disease, ids and display names
    #[must_use]
    pub fn path_cache(&self) -> Vec<PathEntry> {
        self.diseases
            .values()
            .map(|disease| {
                let ids: Vec<String> = disease
                    .classification
                    .path
                    .iter()
                    .chain(std::iter::once(&disease.id))
                    .cloned()
                    .collect();
                let names = ids
                    .iter()
                    .map(|id| match self.categories.get(id) {
                        Some(category) => category.name.clone(),
                        None => self
                            .diseases
                            .get(id)
                            .map_or_else(|| UNKNOWN_NAME.to_string(), |d| d.name.clone()),
                    })
                    .collect();
                PathEntry { ids, names }
            })
            .collect()
    }

    /// Number of categories per level
    #[must_use]
    pub fn level_counts(&self) -> BTreeMap<usize, usize> {
        let mut counts = BTreeMap::new();
        for node in self.categories.values() {
            *counts.entry(node.level).or_insert(0) += 1;
        }
        counts
    }

    /// Write every artifact into `layout`, returning their names and sizes
    pub fn write(
        &self,
        layout: &ArtifactLayout,
        metadata: &ConversionMetadata,
        statistics: &crate::artifacts::AggregateStatistics,
        pretty: bool,
    ) -> Result<Vec<ArtifactInfo>> {
        let relationships = self.relationships();
        let structure = CategoryStructure {
            metadata: metadata.clone(),
            nodes: self.categories.clone(),
            relationships: relationships.clone(),
        };
        let paths = self.path_cache();

        let mut written = Vec::with_capacity(Artifact::ALL.len());
        for artifact in Artifact::ALL {
            let path = layout.path(artifact);
            let bytes = match artifact {
                Artifact::CategoryStructure => write_json(&path, &structure, pretty)?,
                Artifact::CategoryDetails => write_json(&path, &self.categories, pretty)?,
                Artifact::Relationships => write_json(&path, &relationships, pretty)?,
                Artifact::ConversionMetadata => write_json(&path, metadata, pretty)?,
                Artifact::Diseases => write_json(&path, &self.diseases, pretty)?,
                Artifact::ClassificationIndex => {
                    write_json(&path, &self.classification_index, pretty)?
                }
                Artifact::NameIndex => write_json(&path, &self.name_index, pretty)?,
                Artifact::DiseaseMetadata => write_json(&path, &self.disease_metadata, pretty)?,
                Artifact::PathCache => write_json(&path, &paths, pretty)?,
                Artifact::Statistics => write_json(&path, statistics, pretty)?,
            };
            written.push(ArtifactInfo {
                name: artifact.relative_path().to_string(),
                bytes,
            });
        }

        Ok(written)
    }
}
