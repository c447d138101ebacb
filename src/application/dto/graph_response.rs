use super::GraphMetadata;
use crate::dep_graph::domain::DepGraph;

/// Summary counts for one graph build
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphStats {
    pub records: usize,
    pub expanded_nodes: usize,
    pub pruned_nodes: usize,
    pub edges: usize,
}

impl GraphStats {
    pub fn from_graph(records: usize, graph: &DepGraph) -> Self {
        let pruned_nodes = graph.pruned_count();
        Self {
            records,
            // Root is not a dependency
            expanded_nodes: graph.node_count() - 1 - pruned_nodes,
            pruned_nodes,
            edges: graph.edge_count(),
        }
    }
}

/// GraphResponse - Output DTO of the dependency graph use case
#[derive(Debug, Clone)]
pub struct GraphResponse {
    pub dep_graph: DepGraph,
    pub metadata: GraphMetadata,
    pub stats: GraphStats,
    /// Record ids whose hash could not be resolved to a coordinate
    pub unresolved_ids: Vec<String>,
}
