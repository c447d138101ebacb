/// Network adapters for external API calls
mod caching_resolver;
mod maven_central_client;

pub use caching_resolver::CachingCoordinateResolver;
pub use maven_central_client::{MavenCentralResolver, MAVEN_CENTRAL_SEARCH_URL};
