//! Subtree aggregation

use std::sync::Arc;

use super::CombinedNavigator;
use crate::error::Result;
use crate::models::DiseaseInstance;

impl CombinedNavigator {
    /// `category_id` followed by all its descendant categories
    pub fn subtree_categories(&self, category_id: &str) -> Result<Vec<String>> {
        let mut ids = vec![category_id.to_string()];
        ids.extend(self.graph.descendants(category_id, None)?);
        Ok(ids)
    }

    /// Diseases filed on `category_id` or any descendant, from the index alone
    pub fn count_diseases_in_subtree(&self, category_id: &str) -> Result<usize> {
        Ok(self
            .subtree_categories(category_id)?
            .iter()
            .map(|id| self.store.count_in_category(id))
            .sum())
    }

    /// Records of every disease in the subtree, in depth-first category order
    pub fn all_diseases_in_subtree(&self, category_id: &str) -> Result<Vec<Arc<DiseaseInstance>>> {
        let categories = self.subtree_categories(category_id)?;
        self.store.batch_get(
            categories
                .iter()
                .flat_map(|id| self.store.ids_in_category(id)),
        )
    }
}
