use super::child_lookup::{find_children, QueueItem};
use super::identity_remapper::{IdentityRemapper, ResolvedIdentity};
use crate::dep_graph::domain::{
    CoordinateMap, DepGraph, DepGraphBuilder, FlatDependencyMap, PkgInfo, PRUNED_LABEL,
    ROOT_NODE_ID,
};
use indexmap::IndexSet;
use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};

pub const DEFAULT_PACKAGE_MANAGER: &str = "gradle";
const DEFAULT_ROOT_VERSION: &str = "0.0.0";
const PRUNED_SUFFIX: &str = ":pruned";

/// GraphBuilder turns a [`FlatDependencyMap`] into a [`DepGraph`].
///
/// Traversal is breadth-first from the root sentinel. The first time a
/// (possibly remapped) id is reached it is expanded; every later arrival is
/// recorded as a leaf node `<id>:pruned` labelled `pruned=true`, with the
/// suffix repeated if that id is already taken. The result
/// is acyclic for every input, and the expanded occurrence of a node is the
/// one closest to the root, ties broken by flat map order.
///
/// Building never fails. Records that cannot be placed are skipped and
/// reported through `tracing`.
#[derive(Debug, Clone)]
pub struct GraphBuilder {
    package_manager: String,
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_PACKAGE_MANAGER)
    }
}

impl GraphBuilder {
    pub fn new(package_manager: impl Into<String>) -> Self {
        Self {
            package_manager: package_manager.into(),
        }
    }

    /// Builds the graph for one project.
    ///
    /// # Arguments
    /// * `flat_map` - Records keyed by id, each listing its direct parents
    /// * `root_name` - Name of the project the graph is rooted at
    /// * `root_version` - Project version; `None` or empty becomes `0.0.0`
    /// * `coordinate_map` - Optional id replacements in `name@version` form
    pub fn build(
        &self,
        flat_map: &FlatDependencyMap,
        root_name: &str,
        root_version: Option<&str>,
        coordinate_map: Option<&CoordinateMap>,
    ) -> DepGraph {
        let root_version = root_version
            .filter(|v| !v.is_empty())
            .unwrap_or(DEFAULT_ROOT_VERSION);
        let mut graph = DepGraphBuilder::new(
            self.package_manager.clone(),
            PkgInfo::new(root_name, root_version),
        );

        if flat_map.is_empty() {
            return graph.build();
        }

        let remapper = IdentityRemapper::new(coordinate_map);
        let identities: HashMap<&str, ResolvedIdentity> = flat_map
            .iter()
            .map(|(id, record)| (id, remapper.resolve_node(id, record)))
            .collect();
        let mut pruned_ids = PrunedIds::new(identities.values().map(|node| node.id.as_str()));
        let mut visited: IndexSet<String> = IndexSet::new();
        let mut queue: VecDeque<QueueItem> = find_children(ROOT_NODE_ID, flat_map).into();

        while let Some(QueueItem { id, parent_id }) = queue.pop_front() {
            let Some(node) = identities.get(id.as_str()) else {
                tracing::debug!(
                    id = %id,
                    parent = %parent_id,
                    "skipping dangling dependency reference"
                );
                continue;
            };

            // Children are listed against original ids, never remapped ones.
            let lookup_id = id;
            let parent_id = remapper.resolve_parent(&parent_id);
            if !graph.contains_node(&parent_id) {
                tracing::warn!(
                    id = %node.id,
                    parent = %parent_id,
                    "skipping dependency of unknown parent"
                );
                continue;
            }
            let pkg = PkgInfo::new(node.name.clone(), node.version.clone());

            if visited.contains(&node.id) {
                let (pruned_id, allocated) = pruned_ids.get_or_allocate(&node.id);
                let added = if allocated {
                    let labels = BTreeMap::from([(PRUNED_LABEL.to_string(), "true".to_string())]);
                    graph.add_pkg_node(pkg, &pruned_id, labels)
                } else {
                    Ok(())
                };
                if let Err(e) = added.and_then(|()| graph.connect_dep(&parent_id, &pruned_id)) {
                    tracing::warn!(
                        id = %pruned_id,
                        parent = %parent_id,
                        error = %e,
                        "skipping pruned dependency"
                    );
                }
                continue;
            }

            if let Err(e) = graph
                .add_pkg_node(pkg, &node.id, BTreeMap::new())
                .and_then(|()| graph.connect_dep(&parent_id, &node.id))
            {
                tracing::warn!(
                    id = %node.id,
                    parent = %parent_id,
                    error = %e,
                    "skipping dependency"
                );
                continue;
            }

            queue.extend(find_children(&lookup_id, flat_map));
            visited.insert(node.id.clone());
        }

        graph.build()
    }
}

/// Hands out pruned sibling ids.
///
/// Every arrival at the same expanded id shares one `<id>:pruned` node. The
/// suffix is repeated until the id names neither a record that could be
/// expanded nor another pruned node, so a pruned leaf never replaces a node
/// that has children.
struct PrunedIds<'a> {
    reserved: HashSet<&'a str>,
    allocated: HashMap<String, String>,
    taken: HashSet<String>,
}

impl<'a> PrunedIds<'a> {
    fn new(reserved: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            reserved: reserved.into_iter().collect(),
            allocated: HashMap::new(),
            taken: HashSet::new(),
        }
    }

    /// The pruned id for `node_id`, and whether it was allocated just now.
    fn get_or_allocate(&mut self, node_id: &str) -> (String, bool) {
        if let Some(existing) = self.allocated.get(node_id) {
            return (existing.clone(), false);
        }

        let mut candidate = format!("{}{}", node_id, PRUNED_SUFFIX);
        while self.reserved.contains(candidate.as_str()) || self.taken.contains(&candidate) {
            candidate.push_str(PRUNED_SUFFIX);
        }

        self.taken.insert(candidate.clone());
        self.allocated.insert(node_id.to_string(), candidate.clone());
        (candidate, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dep_graph::domain::DependencyRecord;

    fn edges(graph: &DepGraph) -> Vec<(String, String)> {
        graph
            .nodes()
            .flat_map(|n| {
                graph
                    .dependencies_of(n.node_id())
                    .map(|c| (n.node_id().to_string(), c.to_string()))
                    .collect::<Vec<_>>()
            })
            .collect()
    }

    fn edge(parent: &str, child: &str) -> (String, String) {
        (parent.to_string(), child.to_string())
    }

    #[test]
    fn test_empty_map_returns_root_only() {
        let graph =
            GraphBuilder::default().build(&FlatDependencyMap::new(), "app", Some("1.0"), None);

        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.root_pkg(), &PkgInfo::new("app", "1.0"));
        assert_eq!(graph.pkg_manager(), "gradle");
    }

    #[test]
    fn test_root_version_defaults() {
        let builder = GraphBuilder::default();
        let map = FlatDependencyMap::new();
        assert_eq!(builder.build(&map, "app", None, None).root_pkg().version, "0.0.0");
        assert_eq!(builder.build(&map, "app", Some(""), None).root_pkg().version, "0.0.0");
    }

    #[test]
    fn test_single_top_level_dependency() {
        let mut map = FlatDependencyMap::new();
        map.insert("a@1", DependencyRecord::new("a", "1", &[ROOT_NODE_ID]));

        let graph = GraphBuilder::default().build(&map, "app", None, None);
        assert_eq!(edges(&graph), vec![edge(ROOT_NODE_ID, "a@1")]);
        assert_eq!(graph.node("a@1").unwrap().pkg(), &PkgInfo::new("a", "1"));
    }

    #[test]
    fn test_cycle_is_broken_with_pruned_node() {
        let mut map = FlatDependencyMap::new();
        map.insert("a", DependencyRecord::new("a", "1", &[ROOT_NODE_ID]));
        map.insert("b", DependencyRecord::new("b", "1", &["a", "c"]));
        map.insert("c", DependencyRecord::new("c", "1", &["b"]));

        let graph = GraphBuilder::default().build(&map, "app", None, None);

        assert_eq!(
            edges(&graph),
            vec![
                edge(ROOT_NODE_ID, "a"),
                edge("a", "b"),
                edge("b", "c"),
                edge("c", "b:pruned"),
            ]
        );
        let pruned = graph.node("b:pruned").unwrap();
        assert!(pruned.is_pruned());
        assert_eq!(pruned.pkg(), &PkgInfo::new("b", "1"));
        assert_eq!(graph.dependencies_of("b:pruned").count(), 0);
        assert!(graph.is_acyclic());
    }

    #[test]
    fn test_diamond_expands_shared_node_once() {
        let mut map = FlatDependencyMap::new();
        map.insert("left", DependencyRecord::new("left", "1", &[ROOT_NODE_ID]));
        map.insert("right", DependencyRecord::new("right", "1", &[ROOT_NODE_ID]));
        map.insert("shared", DependencyRecord::new("shared", "1", &["left", "right"]));
        map.insert("leaf", DependencyRecord::new("leaf", "1", &["shared"]));

        let graph = GraphBuilder::default().build(&map, "app", None, None);

        assert_eq!(graph.dependencies_of("left").collect::<Vec<_>>(), vec!["shared"]);
        assert_eq!(
            graph.dependencies_of("right").collect::<Vec<_>>(),
            vec!["shared:pruned"]
        );
        // The subtree below the shared node appears once
        assert_eq!(graph.dependencies_of("shared").collect::<Vec<_>>(), vec!["leaf"]);
        assert!(graph.node("leaf:pruned").is_none());
    }

    #[test]
    fn test_shallowest_occurrence_is_expanded() {
        // "deep" is reachable at depth 1 from root and at depth 2 via "a";
        // "a" precedes "deep" in the map, but BFS still expands the shallow one.
        let mut map = FlatDependencyMap::new();
        map.insert("a", DependencyRecord::new("a", "1", &[ROOT_NODE_ID]));
        map.insert("deep", DependencyRecord::new("deep", "1", &["a", ROOT_NODE_ID]));

        let graph = GraphBuilder::default().build(&map, "app", None, None);
        assert_eq!(
            graph.dependencies_of(ROOT_NODE_ID).collect::<Vec<_>>(),
            vec!["a", "deep"]
        );
        assert_eq!(graph.dependencies_of("a").collect::<Vec<_>>(), vec!["deep:pruned"]);
    }

    #[test]
    fn test_dangling_reference_is_skipped() {
        let mut map = FlatDependencyMap::new();
        map.insert("a", DependencyRecord::new("a", "1", &[ROOT_NODE_ID]));
        map.insert("orphan", DependencyRecord::new("orphan", "1", &["filtered-out"]));

        let graph = GraphBuilder::default().build(&map, "app", None, None);
        assert_eq!(graph.node_count(), 2);
        assert!(graph.node("orphan").is_none());
    }

    #[test]
    fn test_self_parent_becomes_pruned_leaf() {
        let mut map = FlatDependencyMap::new();
        map.insert("a", DependencyRecord::new("a", "1", &[ROOT_NODE_ID, "a"]));

        let graph = GraphBuilder::default().build(&map, "app", None, None);
        assert_eq!(graph.dependencies_of("a").collect::<Vec<_>>(), vec!["a:pruned"]);
        assert!(graph.is_acyclic());
    }

    #[test]
    fn test_missing_name_and_version_default_to_unknown() {
        let mut map = FlatDependencyMap::new();
        map.insert(
            "mystery",
            DependencyRecord {
                parent_ids: vec![ROOT_NODE_ID.to_string()],
                ..Default::default()
            },
        );

        let graph = GraphBuilder::default().build(&map, "app", None, None);
        assert_eq!(
            graph.node("mystery").unwrap().pkg(),
            &PkgInfo::new("unknown", "unknown")
        );
    }

    #[test]
    fn test_coordinate_remap_changes_identity_not_lookup() {
        let mut map = FlatDependencyMap::new();
        map.insert(
            "unknown:lib.jar@unspecified",
            DependencyRecord::new("lib.jar", "unspecified", &[ROOT_NODE_ID]),
        );
        map.insert(
            "child@1",
            DependencyRecord::new("child", "1", &["unknown:lib.jar@unspecified"]),
        );

        let mut coordinates = CoordinateMap::new();
        coordinates.insert("unknown:lib.jar@unspecified", "com.acme:lib@1.2");

        let graph = GraphBuilder::default().build(&map, "app", None, Some(&coordinates));

        let node = graph.node("com.acme:lib@1.2").unwrap();
        assert_eq!(node.pkg(), &PkgInfo::new("com.acme:lib", "1.2"));
        assert!(graph.node("unknown:lib.jar@unspecified").is_none());
        assert_eq!(
            graph.dependencies_of("com.acme:lib@1.2").collect::<Vec<_>>(),
            vec!["child@1"]
        );
    }

    #[test]
    fn test_two_ids_remapped_to_same_coordinate_prune() {
        let mut map = FlatDependencyMap::new();
        map.insert("x.jar", DependencyRecord::new("x.jar", "?", &[ROOT_NODE_ID]));
        map.insert("y.jar", DependencyRecord::new("y.jar", "?", &[ROOT_NODE_ID]));

        let mut coordinates = CoordinateMap::new();
        coordinates.insert("x.jar", "g:a@1");
        coordinates.insert("y.jar", "g:a@1");

        let graph = GraphBuilder::default().build(&map, "app", None, Some(&coordinates));
        assert_eq!(
            graph.dependencies_of(ROOT_NODE_ID).collect::<Vec<_>>(),
            vec!["g:a@1", "g:a@1:pruned"]
        );
    }

    #[test]
    fn test_build_is_idempotent() {
        let mut map = FlatDependencyMap::new();
        map.insert("a", DependencyRecord::new("a", "1", &[ROOT_NODE_ID, "c"]));
        map.insert("b", DependencyRecord::new("b", "1", &["a"]));
        map.insert("c", DependencyRecord::new("c", "1", &["b", ROOT_NODE_ID]));

        let builder = GraphBuilder::new("gradle");
        let first = builder.build(&map, "app", Some("2.0"), None);
        let second = builder.build(&map, "app", Some("2.0"), None);
        assert_eq!(first, second);
        assert!(first.is_acyclic());
    }

    #[test]
    fn test_custom_package_manager() {
        let graph = GraphBuilder::new("maven").build(&FlatDependencyMap::new(), "app", None, None);
        assert_eq!(graph.pkg_manager(), "maven");
    }

    #[test]
    fn test_pruned_id_never_replaces_expanded_record() {
        let mut map = FlatDependencyMap::new();
        map.insert("x:pruned", DependencyRecord::new("x", "2", &[ROOT_NODE_ID]));
        map.insert("x", DependencyRecord::new("x", "1", &[ROOT_NODE_ID, "d"]));
        map.insert("d", DependencyRecord::new("d", "1", &["x:pruned"]));

        let graph = GraphBuilder::default().build(&map, "app", None, None);

        assert!(graph.is_acyclic());
        assert!(!graph.node("x:pruned").unwrap().is_pruned());
        assert_eq!(
            graph.dependencies_of("x:pruned").collect::<Vec<_>>(),
            vec!["d"]
        );
        assert_eq!(
            graph.dependencies_of("d").collect::<Vec<_>>(),
            vec!["x:pruned:pruned"]
        );
        let pruned = graph.node("x:pruned:pruned").unwrap();
        assert!(pruned.is_pruned());
        assert_eq!(pruned.pkg(), &PkgInfo::new("x", "1"));
    }

    #[test]
    fn test_pruned_id_skips_remapped_identity() {
        let mut map = FlatDependencyMap::new();
        map.insert("a", DependencyRecord::new("a", "1", &[ROOT_NODE_ID, "b"]));
        map.insert("vendor.jar", DependencyRecord::new("vendor.jar", "?", &["a"]));
        map.insert("b", DependencyRecord::new("b", "1", &["vendor.jar"]));

        let mut coordinates = CoordinateMap::new();
        coordinates.insert("a", "g:a@1");
        coordinates.insert("vendor.jar", "g:a@1:pruned");

        let graph = GraphBuilder::default().build(&map, "app", None, Some(&coordinates));

        assert!(graph.is_acyclic());
        assert!(!graph.node("g:a@1:pruned").unwrap().is_pruned());
        assert_eq!(
            graph.dependencies_of("b").collect::<Vec<_>>(),
            vec!["g:a@1:pruned:pruned"]
        );
    }

    #[test]
    fn test_repeated_arrivals_share_one_pruned_node() {
        let mut map = FlatDependencyMap::new();
        map.insert("a", DependencyRecord::new("a", "1", &[ROOT_NODE_ID]));
        map.insert("b", DependencyRecord::new("b", "1", &[ROOT_NODE_ID]));
        map.insert("c", DependencyRecord::new("c", "1", &[ROOT_NODE_ID]));
        map.insert("shared", DependencyRecord::new("shared", "1", &["a", "b", "c"]));

        let graph = GraphBuilder::default().build(&map, "app", None, None);

        assert_eq!(graph.pruned_count(), 1);
        assert_eq!(
            graph.dependencies_of("b").collect::<Vec<_>>(),
            vec!["shared:pruned"]
        );
        assert_eq!(
            graph.dependencies_of("c").collect::<Vec<_>>(),
            vec!["shared:pruned"]
        );
    }

    #[test]
    fn test_unknown_parent_leaves_no_orphan() {
        let mut map = FlatDependencyMap::new();
        map.insert("a", DependencyRecord::new("a", "1", &[ROOT_NODE_ID]));

        let mut coordinates = CoordinateMap::new();
        coordinates.insert(ROOT_NODE_ID, "g:root@1");

        let graph = GraphBuilder::default().build(&map, "app", None, Some(&coordinates));

        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.edge_count(), 0);
    }

    /// Acyclic, every non-root node reachable through an incoming edge,
    /// pruned nodes are leaves.
    fn assert_well_formed(graph: &DepGraph) {
        assert!(graph.is_acyclic(), "cycle in {:?}", edges(graph));

        let children: HashSet<&str> = graph
            .nodes()
            .flat_map(|n| graph.dependencies_of(n.node_id()))
            .collect();
        for node in graph.nodes() {
            if node.node_id() != ROOT_NODE_ID {
                assert!(children.contains(node.node_id()), "orphan {}", node.node_id());
            }
            if node.is_pruned() {
                assert_eq!(graph.dependencies_of(node.node_id()).count(), 0);
            }
        }
    }

    const SMALL_IDS: [&str; 3] = ["g@1", "h@1", "g@1:pruned"];
    const SMALL_PARENTS: [&str; 4] = [ROOT_NODE_ID, "g@1", "h@1", "g@1:pruned"];

    fn small_remaps() -> Vec<CoordinateMap> {
        let pairs: [&[(&str, &str)]; 6] = [
            &[],
            &[("h@1", "g@1")],
            &[("g@1", "h@1")],
            &[("h@1", "g@1:pruned")],
            &[("g@1:pruned", "g@1")],
            &[("g@1", "h@1"), ("h@1", "g@1")],
        ];
        pairs
            .iter()
            .map(|entries| {
                let mut coordinates = CoordinateMap::new();
                for (id, target) in entries.iter() {
                    coordinates.insert(*id, *target);
                }
                coordinates
            })
            .collect()
    }

    #[test]
    fn test_every_small_map_builds_well_formed_graph() {
        let remaps = small_remaps();
        // Per id: one subset of parents, or the last choice for absent.
        let choices = SMALL_PARENTS.len().pow(2) + 1;
        let total = choices.pow(SMALL_IDS.len() as u32);

        for combination in 0..total {
            let mut map = FlatDependencyMap::new();
            let mut rest = combination;
            for id in SMALL_IDS {
                let choice = rest % choices;
                rest /= choices;
                if choice == choices - 1 {
                    continue;
                }
                let parents: Vec<&str> = SMALL_PARENTS
                    .iter()
                    .enumerate()
                    .filter(|&(bit, _)| choice & (1usize << bit) != 0)
                    .map(|(_, parent)| *parent)
                    .collect();
                map.insert(id, DependencyRecord::new(id, "1", &parents));
            }

            for coordinates in &remaps {
                let graph = GraphBuilder::default().build(&map, "app", None, Some(coordinates));
                assert_well_formed(&graph);
            }
        }
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        const IDS: &[&str] = &[
            "a@1",
            "b@1",
            "c@1",
            "a@1:pruned",
            "a@1:pruned:pruned",
            ROOT_NODE_ID,
        ];
        const TARGETS: &[&str] = &["a@1", "b@1", "a@1:pruned", "z@9", "not-a-coordinate"];

        fn arb_flat_map() -> impl Strategy<Value = FlatDependencyMap> {
            let record = (
                prop::sample::select(IDS),
                prop::collection::vec(prop::sample::select(IDS), 0..4),
            );
            prop::collection::vec(record, 0..10).prop_map(|records| {
                records
                    .into_iter()
                    .map(|(id, parents)| {
                        (id.to_string(), DependencyRecord::new(id, "1", &parents))
                    })
                    .collect::<FlatDependencyMap>()
            })
        }

        fn arb_coordinate_map() -> impl Strategy<Value = CoordinateMap> {
            let entry = (prop::sample::select(IDS), prop::sample::select(TARGETS));
            prop::collection::vec(entry, 0..4).prop_map(|entries| {
                let mut coordinates = CoordinateMap::new();
                for (id, target) in entries {
                    coordinates.insert(id, target);
                }
                coordinates
            })
        }

        proptest! {
            #[test]
            fn random_maps_build_well_formed_graphs(
                map in arb_flat_map(),
                coordinates in arb_coordinate_map(),
            ) {
                let graph = GraphBuilder::default().build(&map, "app", None, Some(&coordinates));
                prop_assert!(graph.is_acyclic());
                assert_well_formed(&graph);
            }
        }
    }
}
