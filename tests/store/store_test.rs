#[cfg(test)]
mod tests {
    use disease_index::store::DiseaseStore;

    use crate::utils::{sample_store, scratch};

    fn ids(records: &[std::sync::Arc<disease_index::DiseaseInstance>]) -> Vec<String> {
        records.iter().map(|d| d.id.clone()).collect()
    }

    #[test]
    fn test_open_loads_only_indices() {
        let (_dir, store) = sample_store();

        assert!(!store.is_hydrated());
        assert_eq!(store.load_count(), 0);
        assert_eq!(store.count_all(), 6);
        assert_eq!(store.count_in_category("C11"), 2);
        assert_eq!(store.count_in_category("R"), 0);
        assert_eq!(store.ids_in_category("C2"), ["D4", "D5"]);
        assert_eq!(store.all_ids(), vec!["D1", "D2", "D3", "D4", "D5", "D6"]);
        assert_eq!(store.category_of("D3"), Some("C1"));
        assert!(store.contains("D6"));
        assert!(!store.contains("C1"));
        assert!(!store.is_hydrated());
    }

    #[test]
    fn test_get_hydrates_once() {
        let (_dir, store) = sample_store();

        let pmm2 = store.get("D1").unwrap().unwrap();
        assert_eq!(pmm2.name, "PMM2-CDG");
        assert!(store.is_hydrated());
        assert!(store.get("missing").unwrap().is_none());
        assert!(store.get("C1").unwrap().is_none());
        assert_eq!(store.load_count(), 1);
    }

    #[test]
    fn test_clear_cache_reloads_identical_content() {
        let (_dir, store) = sample_store();

        let before = store.get("D2").unwrap().unwrap();
        store.clear_cache();
        assert!(!store.is_hydrated());
        assert_eq!(store.count_all(), 6);

        let after = store.get("D2").unwrap().unwrap();
        assert_eq!(*before, *after);
        assert_eq!(store.load_count(), 2);
    }

    #[test]
    fn test_preload_all() {
        let (_dir, store) = sample_store();
        store.preload_all().unwrap();

        assert!(store.is_hydrated());
        assert_eq!(store.load_count(), 1);
        assert_eq!(store.metadata_load_count(), 1);

        store.metadata("D1").unwrap();
        assert_eq!(store.metadata_load_count(), 1);
    }

    #[test]
    fn test_by_category_and_batch_get() {
        let (_dir, store) = sample_store();

        assert_eq!(ids(&store.by_category("C11").unwrap()), vec!["D1", "D2"]);
        assert!(store.by_category("nope").unwrap().is_empty());
        assert_eq!(
            ids(&store.batch_get(["D6", "missing", "D3"]).unwrap()),
            vec!["D6", "D3"]
        );
    }

    #[test]
    fn test_by_name_exact_includes_aliases() {
        let (_dir, store) = sample_store();

        assert_eq!(ids(&store.by_name_exact("PMM2-CDG").unwrap()), vec!["D1"]);
        // the category sharing the alias is not a disease record
        assert_eq!(ids(&store.by_name_exact("CDG").unwrap()), vec!["D1", "D2"]);
        assert!(store.by_name_exact("cdg").unwrap().is_empty());
    }

    #[test]
    fn test_by_name_partial_is_case_insensitive() {
        let (_dir, store) = sample_store();

        assert_eq!(ids(&store.by_name_partial("cdg").unwrap()), vec!["D1", "D2"]);
        assert_eq!(ids(&store.by_name_partial("SYNDROME").unwrap()), vec!["D4"]);
        assert!(store.by_name_partial("zzz").unwrap().is_empty());
    }

    #[test]
    fn test_by_level() {
        let (_dir, store) = sample_store();

        assert_eq!(ids(&store.by_level(3).unwrap()), vec!["D1", "D2"]);
        assert_eq!(ids(&store.by_level(2).unwrap()), vec!["D3", "D4", "D5", "D6"]);
        assert!(store.by_level(0).unwrap().is_empty());
    }

    #[test]
    fn test_extended_metadata() {
        let (_dir, store) = sample_store();

        let meta = store.metadata("D1").unwrap().unwrap();
        assert_eq!(meta.aliases, vec!["CDG"]);
        assert_eq!(meta.occurrences, vec!["C11"]);
        assert_eq!(meta.source_depth, 3);
        assert!(store.metadata("D3").unwrap().unwrap().aliases.is_empty());
        assert!(store.metadata("nope").unwrap().is_none());
        assert!(!store.is_hydrated());
    }

    #[test]
    fn test_statistics_need_no_hydration() {
        let (_dir, store) = sample_store();
        let stats = store.statistics();

        assert_eq!(stats.total_diseases, 6);
        assert_eq!(stats.categories_with_diseases, 4);
        assert!((stats.average_per_category - 1.5).abs() < f64::EPSILON);
        assert_eq!(stats.min_per_category, 1);
        assert_eq!(stats.max_per_category, 2);
        assert_eq!(stats.ambiguous_names, 1);
        assert_eq!(stats.name_entries, 11);
        assert!(!store.is_hydrated());
    }

    #[test]
    fn test_concurrent_first_access_hydrates_once() {
        let (_dir, store) = sample_store();

        std::thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| {
                    assert!(store.get("D5").unwrap().is_some());
                });
            }
        });
        assert_eq!(store.load_count(), 1);
    }

    #[test]
    fn test_open_missing_directory_fails() {
        let dir = scratch();
        assert!(DiseaseStore::open(&dir.path().join("absent")).is_err());
    }
}
