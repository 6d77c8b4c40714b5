//! Utility functions for error handling
//!
//! File helpers that attach the path and the purpose of an operation to IO
//! failures, so a missing artifact reads as more than "No such file".

use std::fs;
use std::io;
use std::path::Path;

use crate::error::{IndexError, Result};

/// Safely open a file with rich error information
///
/// # Arguments
/// * `path` - The path to the file to open
/// * `purpose` - Why the file is being opened (for error context)
pub fn safe_open_file(path: &Path, purpose: &str) -> Result<fs::File> {
    if !path.is_file() {
        return Err(IndexError::io(
            format!("File not found, needed for: {purpose}"),
            io::Error::new(io::ErrorKind::NotFound, "not a file"),
        )
        .with_path(path));
    }

    fs::File::open(path).map_err(|e| {
        let context = match e.kind() {
            io::ErrorKind::PermissionDenied => {
                "Permission denied - check file permissions".to_string()
            }
            _ => format!("Failed to open file for: {purpose}"),
        };
        IndexError::io(context, e).with_path(path)
    })
}

/// Check if a directory exists and is readable, with rich error information
pub fn validate_directory(path: &Path, purpose: &str) -> Result<()> {
    if !path.is_dir() {
        return Err(IndexError::io(
            format!("Directory not found, needed for: {purpose}"),
            io::Error::new(io::ErrorKind::NotFound, "not a directory"),
        )
        .with_path(path));
    }

    match fs::read_dir(path) {
        Ok(_) => Ok(()),
        Err(e) => {
            let context = match e.kind() {
                io::ErrorKind::PermissionDenied => {
                    "Permission denied - check directory permissions".to_string()
                }
                _ => format!("Failed to access directory for: {purpose}"),
            };
            Err(IndexError::io(context, e).with_path(path))
        }
    }
}

/// Safely read a file to string with rich error information
pub fn safe_read_to_string(path: &Path, purpose: &str) -> Result<String> {
    let mut file = safe_open_file(path, purpose)?;

    let mut content = String::new();
    match io::Read::read_to_string(&mut file, &mut content) {
        Ok(_) => Ok(content),
        Err(e) => {
            let context = match e.kind() {
                io::ErrorKind::InvalidData => {
                    "File contains invalid UTF-8 data - cannot read as text".to_string()
                }
                _ => format!("Failed to read file content for: {purpose}"),
            };
            Err(IndexError::io(context, e).with_path(path))
        }
    }
}

/// Write bytes to a file, attaching the path to any failure
pub fn safe_write(path: &Path, bytes: &[u8], purpose: &str) -> Result<()> {
    fs::write(path, bytes)
        .map_err(|e| IndexError::io(format!("Failed to write file for: {purpose}"), e).with_path(path))
}
