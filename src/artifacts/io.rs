//! JSON encoding of artifacts

use std::fs;
use std::path::Path;
use std::time::Instant;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::util::{safe_read_to_string, safe_write};
use crate::error::{IndexError, Result};
use crate::utils::logging::{log_operation_complete, log_operation_start};

/// Read one artifact
///
/// A file that exists but does not decode into `T` is an
/// [`IndexError::InvalidFormat`].
pub fn read_json<T: DeserializeOwned>(path: &Path, purpose: &str) -> Result<T> {
    let start = Instant::now();
    log_operation_start("Loading", path);

    let content = safe_read_to_string(path, purpose)?;
    let value = serde_json::from_str(&content)
        .map_err(|e| IndexError::invalid_format(path, e.to_string()))?;

    log_operation_complete("loaded", path, content.len(), Some(start.elapsed()));
    Ok(value)
}

/// Write one artifact, creating parent directories as needed
///
/// Returns the number of bytes written.
pub fn write_json<T: Serialize>(path: &Path, value: &T, pretty: bool) -> Result<u64> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            IndexError::io("Failed to create artifact directory", e).with_path(parent)
        })?;
    }

    let bytes = if pretty {
        serde_json::to_vec_pretty(value)?
    } else {
        serde_json::to_vec(value)?
    };
    safe_write(path, &bytes, "writing an artifact")?;

    log::debug!("Wrote {} bytes to {}", bytes.len(), path.display());
    Ok(bytes.len() as u64)
}
