use crate::application::dto::GraphMetadata;
use crate::dep_graph::domain::{DepGraph, GraphNode};
use crate::ports::outbound::GraphFormatter;
use crate::shared::Result;
use owo_colors::OwoColorize;
use std::collections::HashSet;
use std::fmt::Write;

const PRUNED_MARKER: &str = "(pruned)";
const REPEATED_MARKER: &str = "(*)";

/// TreeFormatter adapter rendering the graph as an indented text tree
///
/// Each node is expanded under the first parent that reaches it in
/// depth-first order. Pruned nodes are leaves and carry a `(pruned)`
/// marker; any other node reached again is shown once more with `(*)`
/// and not expanded.
pub struct TreeFormatter {
    colored: bool,
}

impl TreeFormatter {
    pub fn new() -> Self {
        Self { colored: false }
    }

    /// Enables ANSI colors (for interactive terminals)
    pub fn with_color(mut self, colored: bool) -> Self {
        self.colored = colored;
        self
    }

    fn render_label(&self, node: &GraphNode) -> String {
        let pkg_id = node.pkg().pkg_id();
        if !self.colored {
            return pkg_id;
        }
        if node.is_pruned() {
            pkg_id.dimmed().to_string()
        } else {
            pkg_id.bold().to_string()
        }
    }

    fn render_marker(&self, marker: &str) -> String {
        if self.colored {
            marker.yellow().to_string()
        } else {
            marker.to_string()
        }
    }
}

impl Default for TreeFormatter {
    fn default() -> Self {
        Self::new()
    }
}

/// One pending line: the node to print and the prefix of its parent rows.
struct Frame<'a> {
    node_id: &'a str,
    prefix: String,
    is_last: bool,
}

impl GraphFormatter for TreeFormatter {
    fn format(&self, graph: &DepGraph, metadata: &GraphMetadata) -> Result<String> {
        let mut output = String::new();
        let root_id = graph.root_node_id();

        if let Some(root) = graph.node(root_id) {
            writeln!(output, "{}", self.render_label(root))?;
        }

        let mut expanded: HashSet<&str> = HashSet::from([root_id]);
        let mut stack: Vec<Frame> = Vec::new();
        push_children(graph, root_id, String::new(), &mut stack);

        while let Some(frame) = stack.pop() {
            let Some(node) = graph.node(frame.node_id) else {
                continue;
            };

            let branch = if frame.is_last { "└── " } else { "├── " };
            write!(output, "{}{}{}", frame.prefix, branch, self.render_label(node))?;

            let first_visit = expanded.insert(frame.node_id);
            if node.is_pruned() {
                write!(output, " {}", self.render_marker(PRUNED_MARKER))?;
            } else if !first_visit {
                write!(output, " {}", self.render_marker(REPEATED_MARKER))?;
            }
            output.push('\n');

            if first_visit && !node.is_pruned() {
                let child_prefix = format!(
                    "{}{}",
                    frame.prefix,
                    if frame.is_last { "    " } else { "│   " }
                );
                push_children(graph, frame.node_id, child_prefix, &mut stack);
            }
        }

        writeln!(output)?;
        writeln!(
            output,
            "{} node(s), {} pruned, {} edge(s) ({} {})",
            graph.node_count(),
            graph.pruned_count(),
            graph.edge_count(),
            metadata.tool_name(),
            metadata.tool_version()
        )?;

        Ok(output)
    }
}

/// Pushes children in reverse so they pop in connection order.
fn push_children<'a>(
    graph: &'a DepGraph,
    node_id: &str,
    prefix: String,
    stack: &mut Vec<Frame<'a>>,
) {
    let children: Vec<&'a str> = graph.dependencies_of(node_id).collect();
    let last = children.len().saturating_sub(1);
    for (index, child) in children.into_iter().enumerate().rev() {
        stack.push(Frame {
            node_id: child,
            prefix: prefix.clone(),
            is_last: index == last,
        });
    }
}
