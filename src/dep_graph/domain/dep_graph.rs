//! Output graph model.
//!
//! [`DepGraphBuilder`] is the mutable assembly side used while traversing the
//! flat map; [`DepGraph`] is the finished, read-only value handed to callers.
//! Nodes are addressed by a graph-local node id, so the same name/version
//! pair can appear under several nodes (expanded once, pruned elsewhere).

use super::dependency_record::ROOT_NODE_ID;
use crate::shared::Result;
use indexmap::{IndexMap, IndexSet};
use std::collections::{BTreeMap, HashMap};

/// Label key marking a node that stands in for an already-expanded node.
pub const PRUNED_LABEL: &str = "pruned";

/// Display identity of a package.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PkgInfo {
    pub name: String,
    pub version: String,
}

impl PkgInfo {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }

    /// The `name@version` package id used when serializing.
    pub fn pkg_id(&self) -> String {
        format!("{}@{}", self.name, self.version)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphNode {
    node_id: String,
    pkg: PkgInfo,
    labels: BTreeMap<String, String>,
}

impl GraphNode {
    pub fn node_id(&self) -> &str {
        &self.node_id
    }

    pub fn pkg(&self) -> &PkgInfo {
        &self.pkg
    }

    pub fn labels(&self) -> &BTreeMap<String, String> {
        &self.labels
    }

    pub fn is_pruned(&self) -> bool {
        self.labels.get(PRUNED_LABEL).map(String::as_str) == Some("true")
    }
}

/// Mutable graph under construction.
#[derive(Debug, Clone)]
pub struct DepGraphBuilder {
    pkg_manager: String,
    nodes: IndexMap<String, GraphNode>,
    edges: IndexMap<String, IndexSet<String>>,
}

impl DepGraphBuilder {
    pub fn new(pkg_manager: impl Into<String>, root_pkg: PkgInfo) -> Self {
        let mut nodes = IndexMap::new();
        nodes.insert(
            ROOT_NODE_ID.to_string(),
            GraphNode {
                node_id: ROOT_NODE_ID.to_string(),
                pkg: root_pkg,
                labels: BTreeMap::new(),
            },
        );

        Self {
            pkg_manager: pkg_manager.into(),
            nodes,
            edges: IndexMap::new(),
        }
    }

    pub fn root_node_id(&self) -> &str {
        ROOT_NODE_ID
    }

    pub fn contains_node(&self, node_id: &str) -> bool {
        self.nodes.contains_key(node_id)
    }

    /// Adds a package node under `node_id`. Adding an existing id replaces
    /// its package and labels but keeps its edges.
    ///
    /// # Errors
    /// Returns an error if `node_id` is the root node id.
    pub fn add_pkg_node(
        &mut self,
        pkg: PkgInfo,
        node_id: &str,
        labels: BTreeMap<String, String>,
    ) -> Result<()> {
        if node_id == ROOT_NODE_ID {
            anyhow::bail!("Cannot add a package node under the root node id '{}'", node_id);
        }

        self.nodes.insert(
            node_id.to_string(),
            GraphNode {
                node_id: node_id.to_string(),
                pkg,
                labels,
            },
        );
        Ok(())
    }

    /// Adds a directed edge `parent_node_id -> child_node_id`.
    /// Connecting the same pair twice keeps one edge.
    ///
    /// # Errors
    /// Returns an error if either node is unknown or both ids are equal.
    pub fn connect_dep(&mut self, parent_node_id: &str, child_node_id: &str) -> Result<()> {
        if !self.nodes.contains_key(parent_node_id) {
            anyhow::bail!("Cannot connect from unknown node '{}'", parent_node_id);
        }
        if !self.nodes.contains_key(child_node_id) {
            anyhow::bail!("Cannot connect to unknown node '{}'", child_node_id);
        }
        if parent_node_id == child_node_id {
            anyhow::bail!("Refusing to connect node '{}' to itself", parent_node_id);
        }

        self.edges
            .entry(parent_node_id.to_string())
            .or_default()
            .insert(child_node_id.to_string());
        Ok(())
    }

    pub fn build(self) -> DepGraph {
        DepGraph {
            pkg_manager: self.pkg_manager,
            nodes: self.nodes,
            edges: self.edges,
        }
    }
}

/// Finished dependency graph.
///
/// Equality is structural: same package manager, same nodes (id, package,
/// labels) and same edges, regardless of insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepGraph {
    pkg_manager: String,
    nodes: IndexMap<String, GraphNode>,
    edges: IndexMap<String, IndexSet<String>>,
}

impl DepGraph {
    pub fn pkg_manager(&self) -> &str {
        &self.pkg_manager
    }

    pub fn root_node_id(&self) -> &str {
        ROOT_NODE_ID
    }

    pub fn root_pkg(&self) -> &PkgInfo {
        // The builder inserts the root first and never removes it.
        &self.nodes[0].pkg
    }

    pub fn node(&self, node_id: &str) -> Option<&GraphNode> {
        self.nodes.get(node_id)
    }

    /// All nodes in insertion order, root first.
    pub fn nodes(&self) -> impl Iterator<Item = &GraphNode> {
        self.nodes.values()
    }

    /// Direct dependencies of `node_id` in the order they were connected.
    pub fn dependencies_of(&self, node_id: &str) -> impl Iterator<Item = &str> {
        self.edges
            .get(node_id)
            .into_iter()
            .flat_map(|children| children.iter().map(String::as_str))
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.values().map(IndexSet::len).sum()
    }

    pub fn pruned_count(&self) -> usize {
        self.nodes.values().filter(|n| n.is_pruned()).count()
    }

    /// Distinct packages in node order, root first.
    pub fn pkgs(&self) -> Vec<&PkgInfo> {
        let mut seen = IndexSet::new();
        for node in self.nodes.values() {
            seen.insert(&node.pkg);
        }
        seen.into_iter().collect()
    }

    /// Whether no edge path revisits a node. Uses an iterative three-colour
    /// depth-first search so deep graphs cannot overflow the stack.
    pub fn is_acyclic(&self) -> bool {
        #[derive(Clone, Copy, PartialEq)]
        enum Mark {
            InProgress,
            Done,
        }

        let mut marks: HashMap<&str, Mark> = HashMap::new();

        for start in self.nodes.keys() {
            if marks.contains_key(start.as_str()) {
                continue;
            }

            let mut stack: Vec<(&str, usize)> = vec![(start.as_str(), 0)];
            marks.insert(start.as_str(), Mark::InProgress);

            while let Some((node_id, next_child)) = stack.pop() {
                let child = self
                    .edges
                    .get(node_id)
                    .and_then(|children| children.get_index(next_child));

                let Some(child) = child else {
                    marks.insert(node_id, Mark::Done);
                    continue;
                };

                stack.push((node_id, next_child + 1));
                match marks.get(child.as_str()) {
                    Some(Mark::InProgress) => return false,
                    Some(Mark::Done) => {}
                    None => {
                        marks.insert(child.as_str(), Mark::InProgress);
                        stack.push((child.as_str(), 0));
                    }
                }
            }
        }

        true
    }
}
