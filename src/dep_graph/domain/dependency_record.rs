use indexmap::IndexMap;
use serde::Deserialize;

/// Synthetic parent id marking a top-level dependency of the project.
pub const ROOT_NODE_ID: &str = "root-node";

/// One dependency occurrence from the build, keyed by its id in the flat map.
///
/// `name` and `version` may be missing in what the build emits; the graph
/// builder substitutes `"unknown"` for either.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct DependencyRecord {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default, rename = "parentIds")]
    pub parent_ids: Vec<String>,
}

impl DependencyRecord {
    pub fn new(name: &str, version: &str, parent_ids: &[&str]) -> Self {
        Self {
            name: Some(name.to_string()),
            version: Some(version.to_string()),
            parent_ids: parent_ids.iter().map(|p| p.to_string()).collect(),
        }
    }

    /// Whether `parent_id` directly depends on this record.
    pub fn has_parent(&self, parent_id: &str) -> bool {
        self.parent_ids.iter().any(|p| p == parent_id)
    }
}

/// Mapping from record id to [`DependencyRecord`].
///
/// Iteration follows insertion order, which for deserialized input is the
/// order keys appear in the JSON document. Child lookup relies on this to
/// keep graph construction deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(transparent)]
pub struct FlatDependencyMap {
    records: IndexMap<String, DependencyRecord>,
}

impl FlatDependencyMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a record, replacing (in place) any record with the same id.
    pub fn insert(&mut self, id: impl Into<String>, record: DependencyRecord) {
        self.records.insert(id.into(), record);
    }

    pub fn get(&self, id: &str) -> Option<&DependencyRecord> {
        self.records.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.records.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DependencyRecord)> {
        self.records.iter().map(|(id, record)| (id.as_str(), record))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FromIterator<(String, DependencyRecord)> for FlatDependencyMap {
    fn from_iter<I: IntoIterator<Item = (String, DependencyRecord)>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}
