/// Use cases module containing application business logic orchestration
mod build_dep_graph;
mod resolve_coordinates;

pub use build_dep_graph::BuildDepGraphUseCase;
pub use resolve_coordinates::{
    CoordinateResolution, ResolutionFailure, ResolveCoordinatesUseCase, DEFAULT_MAX_CONCURRENCY,
};
