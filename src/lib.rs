//! gradle-dep-graph - canonical dependency graphs for Gradle builds
//!
//! This library turns a flat dependency map emitted by a Gradle build (one
//! record per dependency occurrence, each listing its parents) into a
//! rooted, cycle-free dependency graph. It follows hexagonal architecture.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`dep_graph`): Flat map model, output graph and the
//!   breadth-first graph builder
//! - **Application Layer** (`application`): Use cases, DTOs and factories
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use gradle_dep_graph::prelude::*;
//! use std::path::PathBuf;
//!
//! # async fn run() -> Result<()> {
//! let use_case = BuildDepGraphUseCase::new(
//!     FileSystemReader::new(),
//!     FileSystemReader::new(),
//!     CachingCoordinateResolver::new(MavenCentralResolver::new()?),
//!     StderrProgressReporter::new(),
//! );
//!
//! let request = GraphRequest::new(PathBuf::from("build/deps.json"), "my-app");
//! let response = use_case.execute(request).await?;
//!
//! let output = DepGraphJsonFormatter::new().format(&response.dep_graph, &response.metadata)?;
//! println!("{}", output);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod cli;
pub mod config;
pub mod dep_graph;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{
        FileSystemReader, FileSystemWriter, StdoutPresenter,
    };
    pub use crate::adapters::outbound::formatters::{DepGraphJsonFormatter, TreeFormatter};
    pub use crate::adapters::outbound::network::{CachingCoordinateResolver, MavenCentralResolver};
    pub use crate::application::dto::{FormatterType, GraphMetadata, GraphRequest, GraphResponse};
    pub use crate::application::use_cases::{BuildDepGraphUseCase, ResolveCoordinatesUseCase};
    pub use crate::dep_graph::domain::{
        Coordinate, CoordinateMap, DepGraph, DependencyRecord, FlatDependencyMap, HashIndex,
        ROOT_NODE_ID,
    };
    pub use crate::dep_graph::services::GraphBuilder;
    pub use crate::ports::outbound::{
        CoordinateMapReader, CoordinateResolver, FlatMapReader, GraphFormatter, OutputPresenter,
        ProgressReporter,
    };
    pub use crate::shared::Result;
}
