//! Test helper functions
//!
//! Conversion shortcuts shared by unit and integration tests.

use std::path::{Path, PathBuf};

use crate::artifacts::RunReport;
use crate::config::{ConverterConfig, StoreConfig};
use crate::converter::Converter;
use crate::error::Result;
use crate::models::SourceDocument;
use crate::navigator::CombinedNavigator;

use super::fixtures::write_document;

/// Converter configuration for tests: compact JSON, no progress display
#[must_use]
pub fn test_config() -> ConverterConfig {
    ConverterConfig::quiet()
}

/// Write `document` into `dir`, convert it into `dir/<output>` and return the report
pub fn convert_into(dir: &Path, document: &SourceDocument, output: &str) -> Result<(PathBuf, RunReport)> {
    let source = write_document(dir, document)?;
    let output = dir.join(output);
    let report = Converter::new(test_config()).convert(&source, &output)?;
    Ok((output, report))
}

/// Convert `document` and open a navigator over the result
pub fn open_navigator(dir: &Path, document: &SourceDocument) -> Result<CombinedNavigator> {
    let (output, _) = convert_into(dir, document, "index")?;
    CombinedNavigator::open(&output, &StoreConfig::default())
}
