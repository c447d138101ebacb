pub mod coordinate;
pub mod dep_graph;
pub mod dependency_record;

pub use coordinate::{Coordinate, CoordinateMap, HashIndex};
pub use dep_graph::{DepGraph, DepGraphBuilder, GraphNode, PkgInfo, PRUNED_LABEL};
pub use dependency_record::{DependencyRecord, FlatDependencyMap, ROOT_NODE_ID};
