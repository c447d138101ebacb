use crate::dep_graph::domain::{Coordinate, CoordinateMap, DependencyRecord};

const UNKNOWN: &str = "unknown";

/// Graph identity of one node after optional remapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedIdentity {
    pub id: String,
    pub name: String,
    pub version: String,
}

/// Applies an optional [`CoordinateMap`] to node and parent ids.
///
/// The remapper only reads the map. An id without an entry, or whose entry
/// is not a valid `name@version`, keeps its original identity.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityRemapper<'a> {
    coordinates: Option<&'a CoordinateMap>,
}

impl<'a> IdentityRemapper<'a> {
    pub fn new(coordinates: Option<&'a CoordinateMap>) -> Self {
        Self { coordinates }
    }

    /// The usable replacement coordinate for `id`, if any.
    pub fn lookup(&self, id: &str) -> Option<Coordinate> {
        let replacement = self.coordinates?.get(id)?;
        let coordinate = Coordinate::parse(replacement);
        if coordinate.is_none() {
            tracing::warn!(
                id,
                replacement,
                "ignoring malformed coordinate remap, expected name@version"
            );
        }
        coordinate
    }

    /// Identity of a record: its own id and fields, or the remapped
    /// coordinate when one exists.
    pub fn resolve_node(&self, id: &str, record: &DependencyRecord) -> ResolvedIdentity {
        if let Some(coordinate) = self.lookup(id) {
            return ResolvedIdentity {
                id: coordinate.to_string(),
                name: coordinate.name().to_string(),
                version: coordinate.version().to_string(),
            };
        }

        ResolvedIdentity {
            id: id.to_string(),
            name: record.name.clone().unwrap_or_else(|| UNKNOWN.to_string()),
            version: record.version.clone().unwrap_or_else(|| UNKNOWN.to_string()),
        }
    }

    /// Graph id of a parent, remapped independently of its child.
    pub fn resolve_parent(&self, parent_id: &str) -> String {
        match self.lookup(parent_id) {
            Some(coordinate) => coordinate.to_string(),
            None => parent_id.to_string(),
        }
    }
}
