//! Logging utilities
//!
//! This module provides standardized logging functions for operations.

use std::path::Path;

/// Log an operation start with consistent format
///
/// # Arguments
/// * `operation` - Description of the operation
/// * `path` - Path of the file or directory being operated on
pub fn log_operation_start(operation: &str, path: &Path) {
    log::debug!("{} {}", operation, path.display());
}

/// Log an operation completion with consistent format
///
/// # Arguments
/// * `operation` - Description of the operation
/// * `path` - Path of the file or directory that was operated on
/// * `bytes` - Number of bytes processed
/// * `elapsed` - Optional elapsed time
pub fn log_operation_complete(
    operation: &str,
    path: &Path,
    bytes: usize,
    elapsed: Option<std::time::Duration>,
) {
    if let Some(duration) = elapsed {
        log::debug!(
            "Successfully {} {} bytes from {} in {:?}",
            operation,
            bytes,
            path.display(),
            duration
        );
    } else {
        log::debug!(
            "Successfully {} {} bytes from {}",
            operation,
            bytes,
            path.display()
        );
    }
}

/// Log an operation warning with consistent format
///
/// # Arguments
/// * `message` - Warning message
/// * `path` - Optional path related to the warning
pub fn log_warning(message: &str, path: Option<&Path>) {
    if let Some(path) = path {
        log::warn!("{}: {}", message, path.display());
    } else {
        log::warn!("{message}");
    }
}

/// Log how long a lazy table took to hydrate
pub fn log_hydration(table: &str, path: &Path, records: usize, elapsed: std::time::Duration) {
    log::info!(
        "Hydrated {} ({} records) from {} in {:?}",
        table,
        records,
        path.display(),
        elapsed
    );
}
