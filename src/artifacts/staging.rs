//! Staged writing of an artifact directory
//!
//! Artifacts are written into a hidden sibling directory and swapped into
//! place with renames once the run is known to be good. Readers never see a
//! half-written set; an abandoned stage is removed on drop.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{IndexError, Result};

/// A staging directory that becomes `target` on commit
#[derive(Debug)]
pub struct StagedDirectory {
    target: PathBuf,
    staging: PathBuf,
    committed: bool,
}

impl StagedDirectory {
    /// Create a fresh staging directory next to `target`
    pub fn create(target: &Path) -> Result<Self> {
        let staging = sibling(target, "staging")?;
        if staging.exists() {
            fs::remove_dir_all(&staging).map_err(|e| {
                IndexError::io("Failed to remove stale staging directory", e).with_path(&staging)
            })?;
        }
        fs::create_dir_all(&staging).map_err(|e| {
            IndexError::io("Failed to create staging directory", e).with_path(&staging)
        })?;

        log::debug!(
            "Staging artifacts for {} in {}",
            target.display(),
            staging.display()
        );
        Ok(Self {
            target: target.to_path_buf(),
            staging,
            committed: false,
        })
    }

    /// Directory artifacts are written into
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.staging
    }

    /// Final location after commit
    #[must_use]
    pub fn target(&self) -> &Path {
        &self.target
    }

    /// Move the staged artifacts into place, replacing any previous output
    pub fn commit(mut self) -> Result<PathBuf> {
        let backup = if self.target.exists() {
            let backup = sibling(&self.target, "previous")?;
            if backup.exists() {
                fs::remove_dir_all(&backup).map_err(|e| {
                    IndexError::io("Failed to remove stale backup directory", e).with_path(&backup)
                })?;
            }
            fs::rename(&self.target, &backup).map_err(|e| {
                IndexError::io("Failed to move previous output aside", e).with_path(&self.target)
            })?;
            Some(backup)
        } else {
            None
        };

        if let Err(e) = fs::rename(&self.staging, &self.target) {
            if let Some(backup) = &backup {
                restore_backup(backup, &self.target);
            }
            return Err(IndexError::io("Failed to commit staged artifacts", e).with_path(&self.target));
        }
        self.committed = true;

        if let Some(backup) = backup {
            if let Err(e) = fs::remove_dir_all(&backup) {
                log::warn!("Could not remove previous output {}: {e}", backup.display());
            }
        }

        Ok(self.target.clone())
    }
}

impl Drop for StagedDirectory {
    fn drop(&mut self) {
        if !self.committed && self.staging.exists() {
            if let Err(e) = fs::remove_dir_all(&self.staging) {
                log::warn!(
                    "Could not remove staging directory {}: {e}",
                    self.staging.display()
                );
            }
        }
    }
}

/// Put the previous output back after a failed commit
///
/// Returns whether the restore succeeded; a failure leaves the previous
/// output at `backup` and is logged with that path.
fn restore_backup(backup: &Path, target: &Path) -> bool {
    match fs::rename(backup, target) {
        Ok(()) => true,
        Err(e) => {
            log::error!(
                "Could not restore previous output to {}; it remains at {}: {e}",
                target.display(),
                backup.display()
            );
            false
        }
    }
}

/// Hidden sibling of `target` tagged with `purpose` and the process id
fn sibling(target: &Path, purpose: &str) -> Result<PathBuf> {
    let name = target.file_name().ok_or_else(|| {
        IndexError::invalid_format(target, "output path has no final directory name")
    })?;
    let parent = target.parent().unwrap_or_else(|| Path::new(""));
    fs::create_dir_all(parent)
        .map_err(|e| IndexError::io("Failed to create output parent directory", e).with_path(parent))?;

    Ok(parent.join(format!(
        ".{}.{}-{}",
        name.to_string_lossy(),
        purpose,
        std::process::id()
    )))
}
