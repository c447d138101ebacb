use crate::application::dto::GraphMetadata;
use crate::dep_graph::domain::{DepGraph, GraphNode};
use crate::ports::outbound::GraphFormatter;
use crate::shared::Result;
use serde::Serialize;
use std::collections::BTreeMap;

/// Version of the dep-graph JSON layout emitted under `depGraph`.
pub const DEP_GRAPH_SCHEMA_VERSION: &str = "1.3.0";

#[derive(Debug, Serialize)]
struct Document<'a> {
    metadata: Metadata<'a>,
    #[serde(rename = "depGraph")]
    dep_graph: DepGraphData<'a>,
}

#[derive(Debug, Serialize)]
struct Metadata<'a> {
    timestamp: &'a str,
    #[serde(rename = "serialNumber")]
    serial_number: &'a str,
    tool: Tool<'a>,
}

#[derive(Debug, Serialize)]
struct Tool<'a> {
    name: &'a str,
    version: &'a str,
}

#[derive(Debug, Serialize)]
struct DepGraphData<'a> {
    #[serde(rename = "schemaVersion")]
    schema_version: &'static str,
    #[serde(rename = "pkgManager")]
    pkg_manager: PkgManager<'a>,
    pkgs: Vec<Pkg<'a>>,
    graph: Graph<'a>,
}

#[derive(Debug, Serialize)]
struct PkgManager<'a> {
    name: &'a str,
}

#[derive(Debug, Serialize)]
struct Pkg<'a> {
    id: String,
    info: PkgInfoData<'a>,
}

#[derive(Debug, Serialize)]
struct PkgInfoData<'a> {
    name: &'a str,
    version: &'a str,
}

#[derive(Debug, Serialize)]
struct Graph<'a> {
    #[serde(rename = "rootNodeId")]
    root_node_id: &'a str,
    nodes: Vec<Node<'a>>,
}

#[derive(Debug, Serialize)]
struct Node<'a> {
    #[serde(rename = "nodeId")]
    node_id: &'a str,
    #[serde(rename = "pkgId")]
    pkg_id: String,
    deps: Vec<Dep<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    info: Option<NodeInfo<'a>>,
}

#[derive(Debug, Serialize)]
struct Dep<'a> {
    #[serde(rename = "nodeId")]
    node_id: &'a str,
}

#[derive(Debug, Serialize)]
struct NodeInfo<'a> {
    labels: &'a BTreeMap<String, String>,
}

/// DepGraphJsonFormatter adapter for the dep-graph JSON layout
///
/// Output is `{ "metadata": ..., "depGraph": ... }`. Packages are listed
/// once each; nodes reference them by `name@version` and carry their
/// labels (such as `pruned`) under `info.labels`.
pub struct DepGraphJsonFormatter;

impl DepGraphJsonFormatter {
    pub fn new() -> Self {
        Self
    }

    fn build_node<'a>(graph: &'a DepGraph, node: &'a GraphNode) -> Node<'a> {
        let labels = node.labels();
        Node {
            node_id: node.node_id(),
            pkg_id: node.pkg().pkg_id(),
            deps: graph
                .dependencies_of(node.node_id())
                .map(|node_id| Dep { node_id })
                .collect(),
            info: (!labels.is_empty()).then_some(NodeInfo { labels }),
        }
    }
}

impl Default for DepGraphJsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphFormatter for DepGraphJsonFormatter {
    fn format(&self, graph: &DepGraph, metadata: &GraphMetadata) -> Result<String> {
        let document = Document {
            metadata: Metadata {
                timestamp: metadata.timestamp(),
                serial_number: metadata.serial_number(),
                tool: Tool {
                    name: metadata.tool_name(),
                    version: metadata.tool_version(),
                },
            },
            dep_graph: DepGraphData {
                schema_version: DEP_GRAPH_SCHEMA_VERSION,
                pkg_manager: PkgManager {
                    name: graph.pkg_manager(),
                },
                pkgs: graph
                    .pkgs()
                    .into_iter()
                    .map(|pkg| Pkg {
                        id: pkg.pkg_id(),
                        info: PkgInfoData {
                            name: &pkg.name,
                            version: &pkg.version,
                        },
                    })
                    .collect(),
                graph: Graph {
                    root_node_id: graph.root_node_id(),
                    nodes: graph
                        .nodes()
                        .map(|node| Self::build_node(graph, node))
                        .collect(),
                },
            },
        };

        serde_json::to_string_pretty(&document).map_err(Into::into)
    }
}
