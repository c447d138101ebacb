use crate::dep_graph::domain::{Coordinate, CoordinateMap, HashIndex};
use crate::ports::outbound::CoordinateResolver;
use crate::shared::Result;
use futures::stream::{self, StreamExt};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Default ceiling on concurrent lookups against the resolution service
pub const DEFAULT_MAX_CONCURRENCY: usize = 10;

/// A hash that could not be turned into a coordinate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionFailure {
    pub id: String,
    pub sha1: String,
    pub reason: String,
}

/// Outcome of resolving a whole [`HashIndex`]
#[derive(Debug, Clone, Default)]
pub struct CoordinateResolution {
    pub coordinates: CoordinateMap,
    pub failures: Vec<ResolutionFailure>,
}

/// ResolveCoordinatesUseCase - resolves artifact hashes to coordinates
///
/// Lookups run with bounded parallelism. A failed or empty lookup only
/// affects its own entry; the batch always completes.
///
/// # Type Parameters
/// * `R` - CoordinateResolver implementation
pub struct ResolveCoordinatesUseCase<R> {
    resolver: R,
    max_concurrency: usize,
}

impl<R: CoordinateResolver> ResolveCoordinatesUseCase<R> {
    pub fn new(resolver: R) -> Self {
        Self {
            resolver,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
        }
    }

    /// Sets the concurrency ceiling; values below 1 are treated as 1
    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency.max(1);
        self
    }

    pub fn max_concurrency(&self) -> usize {
        self.max_concurrency
    }

    pub async fn execute(&self, hashes: &HashIndex) -> CoordinateResolution {
        self.execute_with_progress(hashes, |_, _| {}).await
    }

    /// Resolves every entry of `hashes`, calling `progress(done, total)`
    /// after each lookup finishes.
    ///
    /// Coordinates are inserted in `hashes` order regardless of which
    /// lookup finished first.
    pub async fn execute_with_progress<F>(
        &self,
        hashes: &HashIndex,
        progress: F,
    ) -> CoordinateResolution
    where
        F: Fn(usize, usize),
    {
        let total = hashes.len();
        let finished = AtomicUsize::new(0);
        let finished = &finished;
        let progress = &progress;

        let mut outcomes: Vec<(usize, Result<Option<Coordinate>>)> =
            stream::iter(hashes.values().enumerate())
                .map(|(index, sha1)| async move {
                    let outcome = self.resolver.resolve(sha1).await;
                    let done = finished.fetch_add(1, Ordering::Relaxed) + 1;
                    progress(done, total);
                    (index, outcome)
                })
                .buffer_unordered(self.max_concurrency)
                .collect()
                .await;
        outcomes.sort_by_key(|(index, _)| *index);

        let mut resolution = CoordinateResolution::default();
        for (index, outcome) in outcomes {
            let Some((id, sha1)) = hashes.get_index(index) else {
                continue;
            };

            let reason = match outcome {
                Ok(Some(coordinate)) => {
                    resolution.coordinates.insert(id.clone(), coordinate.to_string());
                    continue;
                }
                Ok(None) => "no artifact found for this hash".to_string(),
                Err(e) => e.to_string(),
            };

            tracing::warn!(id = %id, sha1 = %sha1, reason = %reason, "coordinate lookup failed");
            resolution.failures.push(ResolutionFailure {
                id: id.clone(),
                sha1: sha1.clone(),
                reason,
            });
        }

        resolution
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::time::Duration;

    /// Resolver answering from a fixed table; hashes starting with "err"
    /// fail, and lookups sleep briefly so completion order varies.
    struct TableResolver {
        table: HashMap<String, Coordinate>,
        in_flight: AtomicUsize,
        peak: AtomicUsize,
    }

    impl TableResolver {
        fn new(entries: &[(&str, &str)]) -> Self {
            Self {
                table: entries
                    .iter()
                    .map(|(sha1, coord)| (sha1.to_string(), Coordinate::parse(coord).unwrap()))
                    .collect(),
                in_flight: AtomicUsize::new(0),
                peak: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl CoordinateResolver for TableResolver {
        async fn resolve(&self, sha1: &str) -> Result<Option<Coordinate>> {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            let delay = if sha1.ends_with('1') { 20 } else { 1 };
            tokio::time::sleep(Duration::from_millis(delay)).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);

            if sha1.starts_with("err") {
                anyhow::bail!("service unavailable");
            }
            Ok(self.table.get(sha1).cloned())
        }
    }

    fn index(entries: &[(&str, &str)]) -> HashIndex {
        entries
            .iter()
            .map(|(id, sha1)| (id.to_string(), sha1.to_string()))
            .collect()
    }

    #[tokio::test]
    async fn test_resolves_in_index_order() {
        let resolver = TableResolver::new(&[("h1", "g:a@1"), ("h2", "g:b@2")]);
        let use_case = ResolveCoordinatesUseCase::new(resolver);

        let resolution = use_case
            .execute(&index(&[("a.jar", "h1"), ("b.jar", "h2")]))
            .await;

        let entries: Vec<(&str, &str)> = resolution.coordinates.iter().collect();
        assert_eq!(entries, vec![("a.jar", "g:a@1"), ("b.jar", "g:b@2")]);
        assert!(resolution.failures.is_empty());
    }

    #[tokio::test]
    async fn test_failures_do_not_abort_batch() {
        let resolver = TableResolver::new(&[("h2", "g:b@2")]);
        let use_case = ResolveCoordinatesUseCase::new(resolver);

        let resolution = use_case
            .execute(&index(&[
                ("broken.jar", "err-1"),
                ("b.jar", "h2"),
                ("missing.jar", "h3"),
            ]))
            .await;

        assert_eq!(resolution.coordinates.len(), 1);
        assert_eq!(resolution.coordinates.get("b.jar"), Some("g:b@2"));
        assert_eq!(resolution.failures.len(), 2);
        assert_eq!(resolution.failures[0].id, "broken.jar");
        assert!(resolution.failures[0].reason.contains("service unavailable"));
        assert_eq!(resolution.failures[1].id, "missing.jar");
        assert!(resolution.failures[1].reason.contains("no artifact found"));
    }

    #[tokio::test]
    async fn test_concurrency_ceiling_is_respected() {
        let resolver = TableResolver::new(&[]);
        let use_case = ResolveCoordinatesUseCase::new(resolver).with_max_concurrency(2);

        let entries: Vec<(String, String)> = (0..8)
            .map(|i| (format!("id{}", i), format!("h{}", i)))
            .collect();
        let hashes: HashIndex = entries.into_iter().collect();
        use_case.execute(&hashes).await;

        assert!(use_case.resolver.peak.load(Ordering::SeqCst) <= 2);
    }

    #[tokio::test]
    async fn test_progress_reaches_total() {
        let resolver = TableResolver::new(&[("h1", "g:a@1")]);
        let use_case = ResolveCoordinatesUseCase::new(resolver);
        let seen = Mutex::new(Vec::new());

        use_case
            .execute_with_progress(&index(&[("a", "h1"), ("b", "h2")]), |done, total| {
                seen.lock().unwrap().push((done, total));
            })
            .await;

        let seen = seen.into_inner().unwrap();
        assert_eq!(seen, vec![(1, 2), (2, 2)]);
    }

    #[tokio::test]
    async fn test_empty_index() {
        let use_case = ResolveCoordinatesUseCase::new(TableResolver::new(&[]));
        let resolution = use_case.execute(&HashIndex::new()).await;
        assert!(resolution.coordinates.is_empty());
        assert!(resolution.failures.is_empty());
    }

    #[test]
    fn test_zero_concurrency_clamped() {
        let use_case =
            ResolveCoordinatesUseCase::new(TableResolver::new(&[])).with_max_concurrency(0);
        assert_eq!(use_case.max_concurrency(), 1);
    }
}
