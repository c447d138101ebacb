use crate::dep_graph::domain::{CoordinateMap, HashIndex};
use crate::shared::Result;
use std::path::Path;

/// CoordinateMapReader port for loading identity remapping inputs
pub trait CoordinateMapReader {
    /// Reads a ready-made `id -> name@version` coordinate map
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed
    fn read_coordinate_map(&self, path: &Path) -> Result<CoordinateMap>;

    /// Reads an `id -> sha1` index of artifacts that still need resolving
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed
    fn read_hash_index(&self, path: &Path) -> Result<HashIndex>;
}
