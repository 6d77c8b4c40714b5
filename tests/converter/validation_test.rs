#[cfg(test)]
mod tests {
    use std::fs;

    use disease_index::artifacts::{
        Artifact, ArtifactLayout, CategoryStructure, DiseaseTable, read_json, write_json,
    };
    use disease_index::converter::{validate_artifacts, validate_only};
    use disease_index::models::IssueCode;

    use crate::utils::sample_index;

    #[test]
    fn test_fresh_output_passes() {
        let (_dir, output) = sample_index();
        let summary = validate_only(&output, 10).unwrap();

        assert!(summary.passed);
        assert!(summary.issues.is_empty());
        assert_eq!(summary.exit_code(), 0);
    }

    #[test]
    fn test_cycle_fails_validation() {
        let (_dir, output) = sample_index();
        let path = ArtifactLayout::new(&output).path(Artifact::CategoryStructure);
        let mut structure: CategoryStructure = read_json(&path, "test").unwrap();
        structure.relationships.get_mut("R").unwrap().parent = Some("C11".to_string());
        write_json(&path, &structure, false).unwrap();

        let summary = validate_only(&output, 10).unwrap();
        assert!(!summary.passed);
        assert_eq!(summary.exit_code(), 1);
        let cycles: Vec<_> = summary
            .issues
            .iter()
            .filter(|i| i.code == IssueCode::Cycle)
            .collect();
        assert_eq!(cycles.len(), 1);
        assert_eq!(cycles[0].ids, vec!["C1", "R", "C11"]);
    }

    #[test]
    fn test_missing_artifact_fails_validation() {
        let (_dir, output) = sample_index();
        fs::remove_file(ArtifactLayout::new(&output).path(Artifact::PathCache)).unwrap();

        let summary = validate_only(&output, 10).unwrap();
        assert!(!summary.passed);
        assert!(
            summary
                .issues
                .iter()
                .any(|i| i.code == IssueCode::MissingArtifact)
        );
    }

    #[test]
    fn test_unparseable_artifact_fails_validation() {
        let (_dir, output) = sample_index();
        let layout = ArtifactLayout::new(&output);
        fs::write(layout.path(Artifact::NameIndex), "not json").unwrap();
        fs::write(layout.path(Artifact::Diseases), "[1, 2, 3]").unwrap();

        let report = validate_artifacts(&output);
        assert!(!report.is_valid());
        assert_eq!(report.with_code(IssueCode::UnparseableArtifact).len(), 2);
    }

    #[test]
    fn test_disease_with_missing_category_only_warns() {
        let (_dir, output) = sample_index();
        let path = ArtifactLayout::new(&output).path(Artifact::Diseases);
        let mut diseases: DiseaseTable = read_json(&path, "test").unwrap();
        diseases.get_mut("D6").unwrap().classification.category_id = "GHOST".to_string();
        write_json(&path, &diseases, false).unwrap();

        let summary = validate_only(&output, 10).unwrap();
        assert!(summary.passed);
        assert_eq!(summary.total_warnings, 1);
        assert_eq!(summary.warnings[0].code, IssueCode::MissingCategory);
        assert_eq!(summary.warnings[0].ids, vec!["D6"]);
    }

    #[test]
    fn test_multiple_roots_only_warn() {
        let (_dir, output) = sample_index();
        let path = ArtifactLayout::new(&output).path(Artifact::CategoryStructure);
        let mut structure: CategoryStructure = read_json(&path, "test").unwrap();
        structure.relationships.get_mut("C2").unwrap().parent = None;
        write_json(&path, &structure, false).unwrap();

        let report = validate_artifacts(&output);
        assert!(report.is_valid());
        let roots = report.with_code(IssueCode::MultipleRoots);
        assert_eq!(roots.len(), 1);
        assert_eq!(roots[0].ids, vec!["C2", "R"]);
    }

    #[test]
    fn test_warnings_are_capped() {
        let (_dir, output) = sample_index();
        let path = ArtifactLayout::new(&output).path(Artifact::CategoryStructure);
        let mut structure: CategoryStructure = read_json(&path, "test").unwrap();
        structure.relationships.get_mut("C2").unwrap().parent = None;
        write_json(&path, &structure, false).unwrap();
        let diseases_path = ArtifactLayout::new(&output).path(Artifact::Diseases);
        let mut diseases: DiseaseTable = read_json(&diseases_path, "test").unwrap();
        diseases.get_mut("D6").unwrap().classification.category_id = "GHOST".to_string();
        write_json(&diseases_path, &diseases, false).unwrap();

        let summary = validate_only(&output, 1).unwrap();
        assert!(summary.passed);
        assert_eq!(summary.total_warnings, 2);
        assert_eq!(summary.warnings.len(), 1);
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let dir = crate::utils::scratch();
        assert!(validate_only(&dir.path().join("absent"), 10).is_err());
    }
}
