use crate::shared::error::DepGraphError;
use crate::shared::Result;
use std::fs;
use std::path::Path;

/// Maximum size of a dependency input file (100 MB).
/// Flat maps for very large Gradle builds stay well below this.
pub const MAX_INPUT_FILE_SIZE: u64 = 100 * 1024 * 1024;

/// Rejects symbolic links without following them.
///
/// `operation` names what the caller is about to do ("read", "write") and
/// only shows up in the error message.
pub fn validate_not_symlink(path: &Path, operation: &str) -> Result<()> {
    let metadata = fs::symlink_metadata(path).map_err(|e| DepGraphError::FileReadError {
        path: path.to_path_buf(),
        details: format!("Failed to read metadata before {}: {}", operation, e),
    })?;

    if metadata.is_symlink() {
        return Err(DepGraphError::SecurityError {
            path: path.to_path_buf(),
            reason: format!("{} operations on symbolic links are not allowed", operation),
            hint: "Point the tool at the real file instead of a link".to_string(),
        }
        .into());
    }

    Ok(())
}

/// Checks that `path` is a regular, non-symlink file no larger than `max_size`.
///
/// Returns the file size so callers can report it.
pub fn validate_input_file(path: &Path, file_description: &str, max_size: u64) -> Result<u64> {
    let metadata = fs::symlink_metadata(path).map_err(|e| DepGraphError::FileReadError {
        path: path.to_path_buf(),
        details: format!("Failed to read {} metadata: {}", file_description, e),
    })?;

    if metadata.is_symlink() {
        return Err(DepGraphError::SecurityError {
            path: path.to_path_buf(),
            reason: format!("{} is a symbolic link", file_description),
            hint: "Symbolic links are not followed; pass the target path".to_string(),
        }
        .into());
    }

    if !metadata.is_file() {
        anyhow::bail!("{} is not a regular file", path.display());
    }

    let file_size = metadata.len();
    if file_size > max_size {
        return Err(DepGraphError::SecurityError {
            path: path.to_path_buf(),
            reason: format!(
                "{} is too large ({} bytes). Maximum allowed size is {} bytes.",
                file_description, file_size, max_size
            ),
            hint: "Split the build into subprojects and generate one graph each".to_string(),
        }
        .into());
    }

    Ok(file_size)
}
