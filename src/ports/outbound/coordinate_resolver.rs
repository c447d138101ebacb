use crate::dep_graph::domain::Coordinate;
use crate::shared::Result;
use async_trait::async_trait;

/// CoordinateResolver port for turning artifact content hashes into
/// canonical coordinates (e.g. via a repository search service)
///
/// # Async Support
/// Lookups run concurrently, so implementations must be `Send + Sync`.
#[async_trait]
pub trait CoordinateResolver: Send + Sync {
    /// Looks up the coordinate of the artifact with the given sha1
    ///
    /// # Returns
    /// `Ok(None)` when the service knows no artifact with that hash
    ///
    /// # Errors
    /// Returns an error if the lookup itself fails (network, bad response)
    async fn resolve(&self, sha1: &str) -> Result<Option<Coordinate>>;
}
