use crate::dep_graph::domain::Coordinate;
use crate::ports::outbound::CoordinateResolver;
use crate::shared::Result;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

/// Default Maven Central search endpoint
pub const MAVEN_CENTRAL_SEARCH_URL: &str = "https://search.maven.org/solrsearch/select";

const SHA1_HEX_LEN: usize = 40;

#[derive(Debug, Deserialize)]
struct SearchResult {
    response: SearchResponse,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(rename = "numFound", default)]
    num_found: u64,
    #[serde(default)]
    docs: Vec<ArtifactDoc>,
}

#[derive(Debug, Deserialize)]
struct ArtifactDoc {
    g: String,
    a: String,
    v: String,
}

/// MavenCentralResolver adapter resolving artifact sha1 hashes to
/// `group:artifact@version` coordinates via the Maven Central search API
///
/// Implements the CoordinateResolver port. Each lookup validates the hash
/// first, then queries `q=1:"<sha1>"` with a request timeout and a small
/// number of retries.
pub struct MavenCentralResolver {
    client: reqwest::Client,
    base_url: String,
    max_retries: u32,
}

impl MavenCentralResolver {
    /// Creates a resolver against the public Maven Central search service
    pub fn new() -> Result<Self> {
        Self::with_base_url(MAVEN_CENTRAL_SEARCH_URL)
    }

    /// Creates a resolver against a mirror exposing the same search API
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let user_agent = format!("gradle-dep-graph/{}", env!("CARGO_PKG_VERSION"));
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            max_retries: 3,
        })
    }

    /// Overrides the number of attempts per lookup (minimum 1)
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries.max(1);
        self
    }

    /// Rejects anything that is not exactly 40 hexadecimal characters, so
    /// the value can be embedded in the query safely.
    fn validate_sha1(sha1: &str) -> Result<()> {
        if sha1.len() != SHA1_HEX_LEN || !sha1.chars().all(|c| c.is_ascii_hexdigit()) {
            anyhow::bail!(
                "Invalid sha1 '{}': expected {} hexadecimal characters",
                sha1,
                SHA1_HEX_LEN
            );
        }
        Ok(())
    }

    fn search_url(&self, sha1: &str) -> String {
        let query = format!("1:\"{}\"", sha1.to_ascii_lowercase());
        format!(
            "{}?q={}&rows=1&wt=json",
            self.base_url,
            urlencoding::encode(&query)
        )
    }

    fn parse_search_result(result: SearchResult) -> Option<Coordinate> {
        if result.response.num_found == 0 {
            return None;
        }
        result
            .response
            .docs
            .into_iter()
            .next()
            .map(|doc| Coordinate::from_maven(&doc.g, &doc.a, &doc.v))
    }

    async fn search(&self, sha1: &str) -> Result<Option<Coordinate>> {
        let url = self.search_url(sha1);
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            anyhow::bail!("Maven Central search returned status code {}", response.status());
        }

        let result: SearchResult = response.json().await?;
        Ok(Self::parse_search_result(result))
    }

    async fn search_with_retry(&self, sha1: &str) -> Result<Option<Coordinate>> {
        let mut last_error = None;

        for attempt in 1..=self.max_retries {
            match self.search(sha1).await {
                Ok(result) => return Ok(result),
                Err(e) => {
                    tracing::debug!(sha1, attempt, error = %e, "maven central lookup failed");
                    last_error = Some(e);
                    if attempt < self.max_retries {
                        tokio::time::sleep(Duration::from_millis(100 * attempt as u64)).await;
                    }
                }
            }
        }

        Err(last_error.unwrap_or_else(|| anyhow::anyhow!("Maven Central lookup was not attempted")))
    }
}

#[async_trait]
impl CoordinateResolver for MavenCentralResolver {
    async fn resolve(&self, sha1: &str) -> Result<Option<Coordinate>> {
        Self::validate_sha1(sha1)?;
        self.search_with_retry(sha1).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHA1: &str = "3a1b7d3a1b7d3a1b7d3a1b7d3a1b7d3a1b7d3a1b";

    #[test]
    fn test_resolver_creation() {
        assert!(MavenCentralResolver::new().is_ok());
    }

    #[test]
    fn test_validate_sha1() {
        assert!(MavenCentralResolver::validate_sha1(SHA1).is_ok());
        assert!(MavenCentralResolver::validate_sha1(&SHA1.to_uppercase()).is_ok());
        assert!(MavenCentralResolver::validate_sha1("abc").is_err());
        assert!(MavenCentralResolver::validate_sha1(&format!("{}zz", &SHA1[..38])).is_err());
        assert!(MavenCentralResolver::validate_sha1(&format!("{}\"&", &SHA1[..38])).is_err());
    }

    #[tokio::test]
    async fn test_resolve_rejects_invalid_hash_without_request() {
        let resolver =
            MavenCentralResolver::with_base_url("http://127.0.0.1:9/unreachable").unwrap();
        let err = resolver.resolve("not-a-hash").await.unwrap_err();
        assert!(err.to_string().contains("Invalid sha1"));
    }

    #[test]
    fn test_search_url_encodes_query() {
        let resolver = MavenCentralResolver::new().unwrap();
        let url = resolver.search_url(SHA1);
        assert_eq!(
            url,
            format!(
                "{}?q=1%3A%22{}%22&rows=1&wt=json",
                MAVEN_CENTRAL_SEARCH_URL, SHA1
            )
        );
    }

    #[test]
    fn test_parse_search_result_hit() {
        let json = r#"{"response": {"numFound": 1, "docs": [
            {"id": "com.google.guava:guava:32.1.2-jre", "g": "com.google.guava", "a": "guava", "v": "32.1.2-jre"}
        ]}}"#;
        let result: SearchResult = serde_json::from_str(json).unwrap();

        let coordinate = MavenCentralResolver::parse_search_result(result).unwrap();
        assert_eq!(coordinate.to_string(), "com.google.guava:guava@32.1.2-jre");
    }

    #[test]
    fn test_parse_search_result_miss() {
        let json = r#"{"response": {"numFound": 0, "docs": []}}"#;
        let result: SearchResult = serde_json::from_str(json).unwrap();
        assert!(MavenCentralResolver::parse_search_result(result).is_none());
    }

    #[tokio::test]
    async fn test_unreachable_service_is_an_error() {
        let resolver = MavenCentralResolver::with_base_url("http://127.0.0.1:9/solrsearch/select")
            .unwrap()
            .with_max_retries(1);
        assert!(resolver.resolve(SHA1).await.is_err());
    }
}
