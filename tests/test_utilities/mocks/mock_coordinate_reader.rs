use gradle_dep_graph::prelude::*;
use std::path::Path;

/// Mock CoordinateMapReader returning fixed maps
#[derive(Default)]
pub struct MockCoordinateReader {
    pub coordinates: CoordinateMap,
    pub hashes: HashIndex,
}

impl MockCoordinateReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_coordinate(mut self, id: &str, replacement: &str) -> Self {
        self.coordinates.insert(id, replacement);
        self
    }

    pub fn with_hash(mut self, id: &str, sha1: &str) -> Self {
        self.hashes.insert(id.to_string(), sha1.to_string());
        self
    }
}

impl CoordinateMapReader for MockCoordinateReader {
    fn read_coordinate_map(&self, _path: &Path) -> Result<CoordinateMap> {
        Ok(self.coordinates.clone())
    }

    fn read_hash_index(&self, _path: &Path) -> Result<HashIndex> {
        Ok(self.hashes.clone())
    }
}
