use std::path::PathBuf;

/// GraphRequest - Input DTO for the dependency graph use case
#[derive(Debug, Clone)]
pub struct GraphRequest {
    /// Path to the flat dependency map (JSON)
    pub input_path: PathBuf,
    /// Name of the root project
    pub root_name: String,
    /// Root project version; `None` falls back to `0.0.0`
    pub root_version: Option<String>,
    /// Optional ready-made coordinate map file
    pub coordinate_map_path: Option<PathBuf>,
    /// Optional `id -> sha1` file of artifacts to resolve remotely
    pub hash_index_path: Option<PathBuf>,
}

impl GraphRequest {
    pub fn new(input_path: PathBuf, root_name: impl Into<String>) -> Self {
        Self {
            input_path,
            root_name: root_name.into(),
            root_version: None,
            coordinate_map_path: None,
            hash_index_path: None,
        }
    }

    pub fn with_root_version(mut self, version: Option<String>) -> Self {
        self.root_version = version;
        self
    }

    pub fn with_coordinate_map(mut self, path: Option<PathBuf>) -> Self {
        self.coordinate_map_path = path;
        self
    }

    pub fn with_hash_index(mut self, path: Option<PathBuf>) -> Self {
        self.hash_index_path = path;
        self
    }
}
