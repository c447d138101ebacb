use crate::dep_graph::domain::Coordinate;
use crate::ports::outbound::CoordinateResolver;
use crate::shared::Result;
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;

/// CachingCoordinateResolver wraps a CoordinateResolver with an in-memory cache
///
/// Lookups are keyed by the lowercase sha1. Both hits and confirmed misses
/// are cached; errors are not, so a transient failure can be retried.
/// Several record ids often share one jar, which is what makes this pay off.
pub struct CachingCoordinateResolver<R: CoordinateResolver> {
    inner: R,
    cache: Arc<DashMap<String, Option<Coordinate>>>,
}

impl<R: CoordinateResolver> CachingCoordinateResolver<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            cache: Arc::new(DashMap::new()),
        }
    }

    #[cfg(test)]
    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}

#[async_trait]
impl<R: CoordinateResolver> CoordinateResolver for CachingCoordinateResolver<R> {
    async fn resolve(&self, sha1: &str) -> Result<Option<Coordinate>> {
        let key = sha1.to_ascii_lowercase();

        if let Some(cached) = self.cache.get(&key) {
            return Ok(cached.clone());
        }

        let coordinate = self.inner.resolve(sha1).await?;
        self.cache.insert(key, coordinate.clone());

        Ok(coordinate)
    }
}
