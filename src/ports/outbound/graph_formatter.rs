use crate::application::dto::GraphMetadata;
use crate::dep_graph::domain::DepGraph;
use crate::shared::Result;

/// GraphFormatter port for rendering a finished dependency graph
///
/// The graph itself is format-agnostic; each formatter decides how it is
/// serialized (dep-graph JSON, text tree, ...).
pub trait GraphFormatter {
    /// Renders `graph` together with run metadata
    ///
    /// # Errors
    /// Returns an error if serialization fails
    fn format(&self, graph: &DepGraph, metadata: &GraphMetadata) -> Result<String>;
}
