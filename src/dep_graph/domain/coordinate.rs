use indexmap::IndexMap;
use serde::Deserialize;
use std::fmt;

/// Canonical package identity, rendered as `name@version`.
///
/// For Maven artifacts the name is `group:artifact`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Coordinate {
    name: String,
    version: String,
}

impl Coordinate {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }

    pub fn from_maven(group: &str, artifact: &str, version: &str) -> Self {
        Self::new(format!("{}:{}", group, artifact), version)
    }

    /// Splits `value` at the first `@`.
    ///
    /// Returns `None` when there is no `@` or either side is empty.
    pub fn parse(value: &str) -> Option<Self> {
        let (name, version) = value.split_once('@')?;
        if name.is_empty() || version.is_empty() {
            return None;
        }
        Some(Self::new(name, version))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.name, self.version)
    }
}

/// Replacement identities keyed by original record id.
///
/// Values are expected in `name@version` form but are stored verbatim;
/// malformed values are detected when they are applied.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(transparent)]
pub struct CoordinateMap {
    entries: IndexMap<String, String>,
}

impl CoordinateMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, original_id: impl Into<String>, replacement: impl Into<String>) {
        self.entries.insert(original_id.into(), replacement.into());
    }

    pub fn get(&self, original_id: &str) -> Option<&str> {
        self.entries.get(original_id).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Adds entries from `other` whose keys are not present yet.
    pub fn merge_missing(&mut self, other: CoordinateMap) {
        for (id, replacement) in other.entries {
            self.entries.entry(id).or_insert(replacement);
        }
    }
}

impl FromIterator<(String, String)> for CoordinateMap {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Content hashes (sha1) of artifacts whose coordinates are unknown,
/// keyed by record id.
pub type HashIndex = IndexMap<String, String>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        let coord = Coordinate::parse("com.google.guava:guava@32.1.2-jre").unwrap();
        assert_eq!(coord.name(), "com.google.guava:guava");
        assert_eq!(coord.version(), "32.1.2-jre");
    }

    #[test]
    fn test_parse_splits_at_first_at_sign() {
        let coord = Coordinate::parse("a@1.0@extra").unwrap();
        assert_eq!(coord.name(), "a");
        assert_eq!(coord.version(), "1.0@extra");
    }

    #[test]
    fn test_parse_malformed() {
        assert!(Coordinate::parse("no-version-here").is_none());
        assert!(Coordinate::parse("@1.0").is_none());
        assert!(Coordinate::parse("name@").is_none());
        assert!(Coordinate::parse("").is_none());
    }

    #[test]
    fn test_from_maven_display() {
        let coord = Coordinate::from_maven("org.slf4j", "slf4j-api", "2.0.9");
        assert_eq!(coord.to_string(), "org.slf4j:slf4j-api@2.0.9");
    }

    #[test]
    fn test_coordinate_map_deserialize() {
        let json = r#"{"unknown:lib.jar@unspecified": "com.acme:lib@1.2"}"#;
        let map: CoordinateMap = serde_json::from_str(json).unwrap();
        assert_eq!(map.get("unknown:lib.jar@unspecified"), Some("com.acme:lib@1.2"));
        assert_eq!(map.get("other"), None);
    }

    #[test]
    fn test_merge_missing_keeps_existing_entries() {
        let mut explicit = CoordinateMap::new();
        explicit.insert("a", "explicit:a@1");

        let mut resolved = CoordinateMap::new();
        resolved.insert("a", "resolved:a@2");
        resolved.insert("b", "resolved:b@1");

        explicit.merge_missing(resolved);
        assert_eq!(explicit.len(), 2);
        assert_eq!(explicit.get("a"), Some("explicit:a@1"));
        assert_eq!(explicit.get("b"), Some("resolved:b@1"));
    }
}
