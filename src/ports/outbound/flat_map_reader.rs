use crate::dep_graph::domain::FlatDependencyMap;
use crate::shared::Result;
use std::path::Path;

/// FlatMapReader port for loading the flat dependency description
///
/// The flat map is produced upstream (by a Gradle init script or plugin
/// task); this port only abstracts where the already-produced data lives.
pub trait FlatMapReader {
    /// Reads the flat dependency map stored at `path`
    ///
    /// # Errors
    /// Returns an error if:
    /// - The file does not exist or cannot be read
    /// - The content is not a valid flat dependency map
    fn read_flat_map(&self, path: &Path) -> Result<FlatDependencyMap>;
}
