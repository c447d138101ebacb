use crate::dep_graph::domain::{CoordinateMap, FlatDependencyMap, HashIndex};
use crate::ports::outbound::{CoordinateMapReader, FlatMapReader};
use crate::shared::error::DepGraphError;
use crate::shared::security::{validate_input_file, MAX_INPUT_FILE_SIZE};
use crate::shared::Result;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Accepted shapes of a flat map file: either the map itself, or an
/// object carrying it under `dependencies`.
#[derive(Deserialize)]
#[serde(untagged)]
enum FlatMapDocument {
    Envelope(FlatMapEnvelope),
    Bare(FlatDependencyMap),
}

/// `dependencies` must be the only key, otherwise a bare map holding a
/// record with that id would lose all its other records.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct FlatMapEnvelope {
    dependencies: FlatDependencyMap,
}

/// FileSystemReader adapter for reading JSON dependency inputs
///
/// Implements both FlatMapReader and CoordinateMapReader. Every read goes
/// through the same checks: no symlinks, regular files only, bounded size.
pub struct FileSystemReader;

impl FileSystemReader {
    pub fn new() -> Self {
        Self
    }

    fn safe_read_file(&self, path: &Path, file_type: &str) -> Result<String> {
        if !path.exists() {
            return Err(DepGraphError::InputNotFound {
                path: path.to_path_buf(),
                suggestion: format!(
                    "The {} file does not exist. Generate it with the Gradle dependency task or correct the path.",
                    file_type
                ),
            }
            .into());
        }

        validate_input_file(path, file_type, MAX_INPUT_FILE_SIZE)?;

        fs::read_to_string(path).map_err(|e| {
            DepGraphError::FileReadError {
                path: path.to_path_buf(),
                details: e.to_string(),
            }
            .into()
        })
    }

    fn read_json<T: DeserializeOwned>(&self, path: &Path, file_type: &str) -> Result<T> {
        let content = self.safe_read_file(path, file_type)?;
        serde_json::from_str(&content).map_err(|e| {
            DepGraphError::InputParseError {
                path: path.to_path_buf(),
                details: e.to_string(),
            }
            .into()
        })
    }
}

impl Default for FileSystemReader {
    fn default() -> Self {
        Self::new()
    }
}

impl FlatMapReader for FileSystemReader {
    fn read_flat_map(&self, path: &Path) -> Result<FlatDependencyMap> {
        let content = self.safe_read_file(path, "flat dependency map")?;

        // The untagged enum hides the real parse error, so retry as a bare
        // map to surface a useful message.
        let document = serde_json::from_str::<FlatMapDocument>(&content)
            .or_else(|_| {
                serde_json::from_str::<FlatDependencyMap>(&content).map(FlatMapDocument::Bare)
            })
            .map_err(|e| DepGraphError::InputParseError {
                path: path.to_path_buf(),
                details: e.to_string(),
            })?;

        Ok(match document {
            FlatMapDocument::Envelope(envelope) => envelope.dependencies,
            FlatMapDocument::Bare(map) => map,
        })
    }
}

impl CoordinateMapReader for FileSystemReader {
    fn read_coordinate_map(&self, path: &Path) -> Result<CoordinateMap> {
        self.read_json(path, "coordinate map")
    }

    fn read_hash_index(&self, path: &Path) -> Result<HashIndex> {
        self.read_json(path, "sha1 hash index")
    }
}
