#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::fs;

    use disease_index::artifacts::{
        Artifact, ArtifactLayout, CategoryTable, ClassificationIndex, DiseaseTable, MetadataTable,
        NameIndex, PathEntry, RUN_REPORT, read_json,
    };
    use disease_index::config::ConverterConfig;
    use disease_index::converter::{Converter, statistics};
    use disease_index::models::{SourceDocument, SourceNode};
    use disease_index::utils::test::{
        convert_into, poly_hierarchy_document, sample_document, test_config, write_document,
    };
    use disease_index::IndexError;

    use crate::utils::scratch;

    #[test]
    fn test_sample_statistics() {
        let dir = scratch();
        let (_, report) = convert_into(dir.path(), &sample_document(), "index").unwrap();
        let stats = &report.statistics;

        assert!(report.success);
        assert_eq!(stats.total_categories, 5);
        assert_eq!(stats.total_diseases, 6);
        assert_eq!(stats.root_categories, 1);
        assert_eq!(stats.max_depth, 2);
        assert_eq!(
            stats.categories_per_level,
            BTreeMap::from([(0, 1), (1, 3), (2, 1)])
        );
        assert_eq!(stats.diseases_per_level, BTreeMap::from([(2, 4), (3, 2)]));
        assert_eq!(stats.categories_with_diseases, 4);
        assert_eq!(stats.name_entries, 11);
        assert_eq!(stats.ambiguous_names, 1);
        assert_eq!(stats.alias_names, 2);
        assert_eq!(stats.forced_categories, 1);
        assert_eq!(stats.skipped_orphans, 0);
        assert_eq!(stats.duplicate_diseases, 0);
        assert_eq!(stats.path_entries, 6);
    }

    #[test]
    fn test_all_artifacts_and_report_written() {
        let dir = scratch();
        let (output, report) = convert_into(dir.path(), &sample_document(), "index").unwrap();
        let layout = ArtifactLayout::new(&output);

        for artifact in Artifact::ALL {
            assert!(layout.path(artifact).is_file(), "{artifact:?} missing");
        }
        assert!(output.join(RUN_REPORT).is_file());
        assert_eq!(report.artifacts.len(), Artifact::ALL.len());
        assert!(report.total_bytes() > 0);
        assert!(report.validation.is_valid());
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("treated as categories"));
    }

    #[test]
    fn test_category_and_disease_tables() {
        let (_dir, output) = crate::utils::sample_index();
        let layout = ArtifactLayout::new(&output);

        let categories: CategoryTable =
            read_json(&layout.path(Artifact::CategoryDetails), "test").unwrap();
        assert_eq!(categories["R"].children, vec!["C1", "C2", "C3"]);
        assert_eq!(categories["C11"].parent_id.as_deref(), Some("C1"));
        assert_eq!(categories["C11"].level, 2);
        assert_eq!(categories["C3"].level, 1);

        let diseases: DiseaseTable = read_json(&layout.path(Artifact::Diseases), "test").unwrap();
        let pmm2 = &diseases["D1"];
        assert_eq!(pmm2.category_id(), "C11");
        assert_eq!(pmm2.classification.path, vec!["R", "C1", "C11"]);
        assert_eq!(pmm2.classification.level, 3);
        assert!(pmm2.classification.is_consistent());
        assert_eq!(
            pmm2.metadata.expert_link.as_deref(),
            Some("https://example.org/expert/D1")
        );
        assert_eq!(pmm2.metadata.disorder_type, "Disease");
        assert!(pmm2.metadata.last_updated.is_some());
        assert_eq!(diseases["D6"].classification.path, vec!["R", "C3"]);

        let index: ClassificationIndex =
            read_json(&layout.path(Artifact::ClassificationIndex), "test").unwrap();
        assert_eq!(index["C11"], vec!["D1", "D2"]);
        assert_eq!(index["C1"], vec!["D3"]);
        assert!(!index.contains_key("R"));
    }

    #[test]
    fn test_alias_registered_in_name_index() {
        let (_dir, output) = crate::utils::sample_index();
        let names: NameIndex =
            read_json(&ArtifactLayout::new(&output).path(Artifact::NameIndex), "test").unwrap();

        assert_eq!(names["PMM2-CDG"], vec!["D1"]);
        assert_eq!(names["CDG"], vec!["C11", "D1", "D2"]);
        assert_eq!(names["Skeletal dysplasia"], vec!["C3"]);
    }

    #[test]
    fn test_path_cache_entries() {
        let (_dir, output) = crate::utils::sample_index();
        let paths: Vec<PathEntry> =
            read_json(&ArtifactLayout::new(&output).path(Artifact::PathCache), "test").unwrap();

        assert_eq!(paths.len(), 6);
        let pmm2 = paths
            .iter()
            .find(|p| p.ids.last().map(String::as_str) == Some("D1"))
            .unwrap();
        assert_eq!(pmm2.ids, vec!["R", "C1", "C11", "D1"]);
        assert_eq!(
            pmm2.names,
            vec!["Rare diseases", "Metabolic diseases", "CDG", "PMM2-CDG"]
        );
    }

    #[test]
    fn test_source_timestamp_is_kept() {
        let dir = scratch();
        let mut disorder = SourceNode::disorder("D", "Dated disease", "Disease");
        disorder.last_updated = Some("2023-05-01T12:00:00Z".to_string());
        let document = SourceDocument::new(vec![
            SourceNode::group("R", "Root").with_child(SourceNode::group("C", "Group").with_child(disorder)),
        ]);

        let (output, _) = convert_into(dir.path(), &document, "index").unwrap();
        let diseases: DiseaseTable =
            read_json(&ArtifactLayout::new(&output).path(Artifact::Diseases), "test").unwrap();
        let updated = diseases["D"].metadata.last_updated.unwrap();
        assert_eq!(updated.to_rfc3339(), "2023-05-01T12:00:00+00:00");
    }

    #[test]
    fn test_missing_optional_fields_degrade_to_placeholders() {
        let dir = scratch();
        let source = dir.path().join("sparse.json");
        fs::write(
            &source,
            r#"{"nodes": [{"id": "R", "kind": "group", "children": [
                {"id": "C", "kind": "group", "children": [{"id": "D"}]}
            ]}]}"#,
        )
        .unwrap();

        let output = dir.path().join("index");
        let report = Converter::new(test_config()).convert(&source, &output).unwrap();
        assert_eq!(report.statistics.total_diseases, 1);

        let diseases: DiseaseTable =
            read_json(&ArtifactLayout::new(&output).path(Artifact::Diseases), "test").unwrap();
        assert_eq!(diseases["D"].name, "Unknown");
        assert_eq!(diseases["D"].metadata.disorder_type, "Unknown");
        assert!(diseases["D"].metadata.expert_link.is_none());

        let names: NameIndex =
            read_json(&ArtifactLayout::new(&output).path(Artifact::NameIndex), "test").unwrap();
        assert!(!names.contains_key("Unknown"));
    }

    #[test]
    fn test_malformed_source_writes_nothing() {
        let dir = scratch();
        let source = dir.path().join("broken.json");
        fs::write(&source, "{ \"nodes\": [ { \"id\": ").unwrap();
        let output = dir.path().join("index");

        let result = Converter::new(test_config()).convert(&source, &output);
        assert!(matches!(result, Err(IndexError::InvalidFormat { .. })));
        assert!(!output.exists());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_blank_id_is_invalid_format() {
        let dir = scratch();
        let source = dir.path().join("blank.json");
        fs::write(&source, r#"{"nodes": [{"id": "  ", "name": "Nameless"}]}"#).unwrap();

        let result = Converter::new(test_config()).convert(&source, &dir.path().join("index"));
        assert!(matches!(result, Err(IndexError::InvalidFormat { .. })));
    }

    #[test]
    fn test_orphan_disease_is_skipped() {
        let dir = scratch();
        let document = SourceDocument::new(vec![
            SourceNode::disorder("O1", "Floating disease", "Disease"),
            SourceNode::group("G", "Group").with_child(SourceNode::disorder("D", "Filed disease", "Disease")),
        ]);
        let source = write_document(dir.path(), &document).unwrap();
        let config = ConverterConfig {
            category_depth_threshold: 0,
            ..test_config()
        };

        let report = Converter::new(config)
            .convert(&source, &dir.path().join("index"))
            .unwrap();
        assert_eq!(report.statistics.skipped_orphans, 1);
        assert_eq!(report.statistics.total_diseases, 1);
        assert_eq!(report.statistics.forced_categories, 0);
        assert!(report.warnings.iter().any(|w| w.contains("O1")));
    }

    #[test]
    fn test_poly_hierarchy_keeps_first_occurrence() {
        let dir = scratch();
        let (output, report) = convert_into(dir.path(), &poly_hierarchy_document(), "index").unwrap();
        let layout = ArtifactLayout::new(&output);

        assert_eq!(report.statistics.total_categories, 4);
        assert_eq!(report.statistics.total_diseases, 1);
        assert_eq!(report.statistics.duplicate_diseases, 2);

        let categories: CategoryTable =
            read_json(&layout.path(Artifact::CategoryDetails), "test").unwrap();
        assert_eq!(categories["B"].parent_id.as_deref(), Some("A"));
        assert!(categories["X"].children.is_empty());

        let diseases: DiseaseTable = read_json(&layout.path(Artifact::Diseases), "test").unwrap();
        assert_eq!(diseases["D1"].classification.path, vec!["R", "A", "B"]);

        let metadata: MetadataTable =
            read_json(&layout.path(Artifact::DiseaseMetadata), "test").unwrap();
        assert_eq!(metadata["D1"].occurrences, vec!["B", "X"]);
        assert_eq!(metadata["D1"].source_depth, 3);
    }

    #[test]
    fn test_depth_threshold_is_configurable() {
        let dir = scratch();
        let source = write_document(dir.path(), &sample_document()).unwrap();
        let config = ConverterConfig {
            category_depth_threshold: 1,
            ..test_config()
        };

        let report = Converter::new(config)
            .convert(&source, &dir.path().join("index"))
            .unwrap();
        // C3 is no longer forced, so it becomes a disease and D6 is filed under R
        assert_eq!(report.statistics.total_categories, 4);
        assert_eq!(report.statistics.total_diseases, 7);
        assert_eq!(report.statistics.forced_categories, 0);
    }

    #[test]
    fn test_identical_input_gives_identical_statistics() {
        let dir = scratch();
        let (first, first_report) = convert_into(dir.path(), &sample_document(), "first").unwrap();
        let (second, second_report) = convert_into(dir.path(), &sample_document(), "second").unwrap();

        assert_eq!(first_report.statistics, second_report.statistics);
        let layout_a = ArtifactLayout::new(&first);
        let layout_b = ArtifactLayout::new(&second);
        assert_eq!(
            fs::read(layout_a.path(Artifact::Statistics)).unwrap(),
            fs::read(layout_b.path(Artifact::Statistics)).unwrap()
        );
        assert_eq!(statistics(&first).unwrap(), first_report.statistics);
    }

    #[test]
    fn test_rerun_replaces_previous_output() {
        let dir = scratch();
        let (output, _) = convert_into(dir.path(), &sample_document(), "index").unwrap();
        let (again, report) = convert_into(dir.path(), &poly_hierarchy_document(), "index").unwrap();

        assert_eq!(output, again);
        assert_eq!(report.statistics.total_categories, 4);
        assert_eq!(statistics(&output).unwrap().total_categories, 4);

        let hidden: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().starts_with('.'))
            .collect();
        assert!(hidden.is_empty(), "staging leftovers: {hidden:?}");
    }
}
