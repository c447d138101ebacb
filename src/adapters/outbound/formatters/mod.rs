/// Formatter adapters for the supported graph output formats
mod json_formatter;
mod tree_formatter;

pub use json_formatter::{DepGraphJsonFormatter, DEP_GRAPH_SCHEMA_VERSION};
pub use tree_formatter::TreeFormatter;
