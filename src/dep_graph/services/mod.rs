mod child_lookup;
mod graph_builder;
mod identity_remapper;

pub use child_lookup::{find_children, QueueItem};
pub use graph_builder::{GraphBuilder, DEFAULT_PACKAGE_MANAGER};
pub use identity_remapper::{IdentityRemapper, ResolvedIdentity};
