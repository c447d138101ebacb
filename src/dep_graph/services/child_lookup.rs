use crate::dep_graph::domain::FlatDependencyMap;

/// A pending edge `parent_id -> id` waiting to be materialized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueItem {
    pub id: String,
    pub parent_id: String,
}

impl QueueItem {
    pub fn new(id: impl Into<String>, parent_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            parent_id: parent_id.into(),
        }
    }
}

/// Finds every record that lists `parent_id` among its parents.
///
/// Results follow the flat map's iteration order. A record naming the same
/// parent several times still yields a single item, and an unknown
/// `parent_id` yields nothing.
pub fn find_children(parent_id: &str, flat_map: &FlatDependencyMap) -> Vec<QueueItem> {
    flat_map
        .iter()
        .filter(|(_, record)| record.has_parent(parent_id))
        .map(|(id, _)| QueueItem::new(id, parent_id))
        .collect()
}
