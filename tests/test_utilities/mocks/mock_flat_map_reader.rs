use gradle_dep_graph::prelude::*;
use std::path::Path;

/// Mock FlatMapReader serving a JSON document from memory
pub struct MockFlatMapReader {
    pub content: String,
    pub should_fail: bool,
}

impl MockFlatMapReader {
    pub fn new(content: &str) -> Self {
        Self {
            content: content.to_string(),
            should_fail: false,
        }
    }

    pub fn with_failure() -> Self {
        Self {
            content: String::new(),
            should_fail: true,
        }
    }
}

impl FlatMapReader for MockFlatMapReader {
    fn read_flat_map(&self, _path: &Path) -> Result<FlatDependencyMap> {
        if self.should_fail {
            anyhow::bail!("Mock flat map read failure");
        }
        Ok(serde_json::from_str(&self.content)?)
    }
}
