use async_trait::async_trait;
use gradle_dep_graph::prelude::*;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Mock CoordinateResolver answering from a table
///
/// Hashes registered with `with_failure` return an error; unknown hashes
/// resolve to `None`.
#[derive(Default)]
pub struct MockCoordinateResolver {
    pub coordinates: HashMap<String, Coordinate>,
    pub failing: Vec<String>,
    pub call_count: AtomicUsize,
}

impl MockCoordinateResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_coordinate(
        mut self,
        sha1: &str,
        group: &str,
        artifact: &str,
        version: &str,
    ) -> Self {
        self.coordinates.insert(
            sha1.to_string(),
            Coordinate::from_maven(group, artifact, version),
        );
        self
    }

    pub fn with_failure(mut self, sha1: &str) -> Self {
        self.failing.push(sha1.to_string());
        self
    }

    pub fn calls(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CoordinateResolver for MockCoordinateResolver {
    async fn resolve(&self, sha1: &str) -> Result<Option<Coordinate>> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        if self.failing.iter().any(|f| f == sha1) {
            anyhow::bail!("Mock resolver failure for {}", sha1);
        }
        Ok(self.coordinates.get(sha1).cloned())
    }
}
