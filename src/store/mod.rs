//! Disease store
//!
//! Two lightweight indices are loaded eagerly: category id to disease ids and
//! display name to node ids. The full disease records and their extended
//! metadata are large, so they are hydrated on first access and can be
//! released again with [`DiseaseStore::clear_cache`].

pub mod lazy;
pub mod statistics;

use std::path::Path;
use std::sync::Arc;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::artifacts::{Artifact, ArtifactLayout, ClassificationIndex, NameIndex, read_json};
use crate::error::Result;
use crate::error::util::validate_directory;
use crate::models::source::UNKNOWN_NAME;
use crate::models::{DiseaseInstance, ExtendedMetadata};

pub use lazy::LazyTable;
pub use statistics::DiseaseStatistics;

/// Ids sharing one display name; almost always one or two
pub type NameIds = SmallVec<[String; 2]>;

/// Disease records with eager indices and lazily hydrated bulk tables
#[derive(Debug)]
pub struct DiseaseStore {
    classification_index: FxHashMap<String, Vec<String>>,
    name_index: FxHashMap<String, NameIds>,
    /// Disease id to the category it is filed under
    disease_category: FxHashMap<String, String>,
    records: LazyTable<Arc<DiseaseInstance>>,
    metadata: LazyTable<ExtendedMetadata>,
}

impl DiseaseStore {
    /// Open the store over an artifact directory, loading only the indices
    pub fn open(dir: &Path) -> Result<Self> {
        validate_directory(dir, "opening the disease store")?;
        let layout = ArtifactLayout::new(dir);

        let classification_index: ClassificationIndex = read_json(
            &layout.path(Artifact::ClassificationIndex),
            "loading the classification index",
        )?;
        let name_index: NameIndex =
            read_json(&layout.path(Artifact::NameIndex), "loading the name index")?;

        let store = Self::from_indices(classification_index, name_index, &layout);
        log::info!(
            "Opened disease store with {} diseases in {} categories",
            store.count_all(),
            store.classification_index.len()
        );
        Ok(store)
    }

    fn from_indices(
        classification_index: ClassificationIndex,
        name_index: NameIndex,
        layout: &ArtifactLayout,
    ) -> Self {
        let mut disease_category = FxHashMap::default();
        for (category, ids) in &classification_index {
            for id in ids {
                disease_category
                    .entry(id.clone())
                    .or_insert_with(|| category.clone());
            }
        }

        Self {
            classification_index: classification_index.into_iter().collect(),
            name_index: name_index
                .into_iter()
                .map(|(name, ids)| (name, ids.into_iter().collect()))
                .collect(),
            disease_category,
            records: LazyTable::new("disease records", layout.path(Artifact::Diseases)),
            metadata: LazyTable::new(
                "disease metadata",
                layout.path(Artifact::DiseaseMetadata),
            ),
        }
    }

    /// A disease record, hydrating the bulk table on first use
    pub fn get(&self, id: &str) -> Result<Option<Arc<DiseaseInstance>>> {
        Ok(self.records.get()?.get(id).cloned())
    }

    /// Diseases filed directly under a category, in index order
    ///
    /// Ids without a matching record are dropped.
    pub fn by_category(&self, category_id: &str) -> Result<Vec<Arc<DiseaseInstance>>> {
        self.batch_get(self.ids_in_category(category_id))
    }

    /// Hydrate many ids at once, skipping misses
    pub fn batch_get<I, S>(&self, ids: I) -> Result<Vec<Arc<DiseaseInstance>>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let records = self.records.get()?;
        Ok(ids
            .into_iter()
            .filter_map(|id| records.get(id.as_ref()).cloned())
            .collect())
    }

    /// Diseases registered under exactly `name`, aliases included
    pub fn by_name_exact(&self, name: &str) -> Result<Vec<Arc<DiseaseInstance>>> {
        match self.name_index.get(name) {
            Some(ids) => self.batch_get(ids),
            None => Ok(Vec::new()),
        }
    }

    /// Case-insensitive substring search over all disease names
    ///
    /// Results are sorted by id.
    pub fn by_name_partial(&self, query: &str) -> Result<Vec<Arc<DiseaseInstance>>> {
        let needle = query.to_lowercase();
        let records = self.records.get()?;
        let mut matches: Vec<_> = records
            .values()
            .filter(|d| d.name != UNKNOWN_NAME && d.name.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        matches.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(matches)
    }

    /// Diseases whose classification sits at `level`, sorted by id
    pub fn by_level(&self, level: usize) -> Result<Vec<Arc<DiseaseInstance>>> {
        let records = self.records.get()?;
        let mut matches: Vec<_> = records
            .values()
            .filter(|d| d.level() == level)
            .cloned()
            .collect();
        matches.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(matches)
    }

    /// Every hydrated record, sorted by id
    pub fn all_records(&self) -> Result<Vec<Arc<DiseaseInstance>>> {
        let records = self.records.get()?;
        let mut all: Vec<_> = records.values().cloned().collect();
        all.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(all)
    }

    /// Extended metadata of a disease
    pub fn metadata(&self, id: &str) -> Result<Option<ExtendedMetadata>> {
        Ok(self.metadata.get()?.get(id).cloned())
    }

    /// Ids filed directly under a category; no hydration
    #[must_use]
    pub fn ids_in_category(&self, category_id: &str) -> &[String] {
        self.classification_index
            .get(category_id)
            .map_or(&[][..], Vec::as_slice)
    }

    /// Every disease id in the index, sorted
    #[must_use]
    pub fn all_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.disease_category.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    #[must_use]
    pub fn count_in_category(&self, category_id: &str) -> usize {
        self.ids_in_category(category_id).len()
    }

    /// Number of distinct diseases in the index
    #[must_use]
    pub fn count_all(&self) -> usize {
        self.disease_category.len()
    }

    /// Whether `id` is a disease known to the index
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.disease_category.contains_key(id)
    }

    /// Category a disease is filed under, from the index alone
    #[must_use]
    pub fn category_of(&self, id: &str) -> Option<&str> {
        self.disease_category.get(id).map(String::as_str)
    }

    /// Node ids registered under a display name
    #[must_use]
    pub fn ids_for_name(&self, name: &str) -> &[String] {
        self.name_index.get(name).map_or(&[][..], |ids| ids.as_slice())
    }

    /// All name index entries
    pub fn names(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.name_index
            .iter()
            .map(|(name, ids)| (name.as_str(), ids.as_slice()))
    }

    /// Category ids present in the classification index
    pub fn indexed_categories(&self) -> impl Iterator<Item = &str> {
        self.classification_index.keys().map(String::as_str)
    }

    /// Release both lazy tables; indices stay resident
    pub fn clear_cache(&self) {
        self.records.clear();
        self.metadata.clear();
    }

    /// Hydrate both lazy tables now
    pub fn preload_all(&self) -> Result<()> {
        self.records.get()?;
        self.metadata.get()?;
        Ok(())
    }

    /// Whether the disease records are resident
    #[must_use]
    pub fn is_hydrated(&self) -> bool {
        self.records.is_loaded()
    }

    /// Number of times the disease records have been read from disk
    #[must_use]
    pub fn load_count(&self) -> usize {
        self.records.load_count()
    }

    /// Number of times the extended metadata has been read from disk
    #[must_use]
    pub fn metadata_load_count(&self) -> usize {
        self.metadata.load_count()
    }
}
