//! Input validation utilities
//!
//! Checks applied to command-line paths before any report is parsed, reported through the
//! structured errors in [`crate::errors`].

use crate::errors::{FgqcError, Result};
use std::path::Path;

/// Validate that a path exists
///
/// # Arguments
/// * `path` - Path to validate
/// * `description` - Human-readable description of the path (e.g., "Input")
///
/// # Errors
/// Returns an error if the path does not exist
///
/// # Example
/// ```
/// use fgqc_lib::validation::validate_path_exists;
///
/// let result = validate_path_exists("/nonexistent/S1.family_sizes.txt", "Input");
/// assert!(result.is_err());
/// ```
pub fn validate_path_exists<P: AsRef<Path>>(path: P, description: &str) -> Result<()> {
    let path_ref = path.as_ref();
    if !path_ref.exists() {
        return Err(FgqcError::InvalidPath {
            file_type: description.to_string(),
            path: path_ref.display().to_string(),
            reason: "Path does not exist".to_string(),
        });
    }
    Ok(())
}

/// Validate that multiple paths exist
///
/// # Errors
/// Returns an error for the first path that doesn't exist
pub fn validate_paths_exist<P: AsRef<Path>>(paths: &[P], description: &str) -> Result<()> {
    if paths.is_empty() {
        return Err(FgqcError::InvalidParameter {
            parameter: "input".to_string(),
            reason: "At least one input path is required".to_string(),
        });
    }
    for path in paths {
        validate_path_exists(path, description)?;
    }
    Ok(())
}

/// Validate that `path` is a directory, or can become one.
///
/// # Errors
/// Returns an error if `path` exists and is not a directory
pub fn validate_output_dir<P: AsRef<Path>>(path: P) -> Result<()> {
    let path_ref = path.as_ref();
    if path_ref.exists() && !path_ref.is_dir() {
        return Err(FgqcError::InvalidPath {
            file_type: "Output directory".to_string(),
            path: path_ref.display().to_string(),
            reason: "Path exists and is not a directory".to_string(),
        });
    }
    Ok(())
}
