use super::resolve_coordinates::{ResolveCoordinatesUseCase, DEFAULT_MAX_CONCURRENCY};
use crate::application::dto::{GraphMetadata, GraphRequest, GraphResponse, GraphStats};
use crate::dep_graph::domain::{CoordinateMap, FlatDependencyMap};
use crate::dep_graph::services::GraphBuilder;
use crate::ports::outbound::{
    CoordinateMapReader, CoordinateResolver, FlatMapReader, ProgressReporter,
};
use crate::shared::error::DepGraphError;
use crate::shared::Result;

/// Coordinate map merged from all sources, plus ids left unresolved
type LoadedCoordinates = (Option<CoordinateMap>, Vec<String>);

/// BuildDepGraphUseCase - Core use case for dependency graph generation
///
/// Reads the flat dependency map and optional remapping inputs through the
/// injected ports, resolves artifact hashes when asked to, and runs the
/// graph builder.
///
/// # Type Parameters
/// * `FR` - FlatMapReader implementation
/// * `CR` - CoordinateMapReader implementation
/// * `RES` - CoordinateResolver implementation
/// * `PR` - ProgressReporter implementation
pub struct BuildDepGraphUseCase<FR, CR, RES, PR> {
    flat_map_reader: FR,
    coordinate_reader: CR,
    resolver: ResolveCoordinatesUseCase<RES>,
    progress_reporter: PR,
    graph_builder: GraphBuilder,
}

impl<FR, CR, RES, PR> BuildDepGraphUseCase<FR, CR, RES, PR>
where
    FR: FlatMapReader,
    CR: CoordinateMapReader,
    RES: CoordinateResolver,
    PR: ProgressReporter,
{
    /// Creates a new BuildDepGraphUseCase with injected dependencies
    pub fn new(
        flat_map_reader: FR,
        coordinate_reader: CR,
        resolver: RES,
        progress_reporter: PR,
    ) -> Self {
        Self {
            flat_map_reader,
            coordinate_reader,
            resolver: ResolveCoordinatesUseCase::new(resolver)
                .with_max_concurrency(DEFAULT_MAX_CONCURRENCY),
            progress_reporter,
            graph_builder: GraphBuilder::default(),
        }
    }

    /// Overrides the package manager recorded on the graph (default `gradle`)
    pub fn with_package_manager(mut self, package_manager: impl Into<String>) -> Self {
        self.graph_builder = GraphBuilder::new(package_manager);
        self
    }

    /// Overrides the ceiling on concurrent coordinate lookups
    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.resolver = self.resolver.with_max_concurrency(max_concurrency);
        self
    }

    /// Executes the dependency graph use case
    ///
    /// # Errors
    /// Returns an error if the root name is blank or an input file cannot be
    /// read or parsed. Building the graph itself never fails.
    pub async fn execute(&self, request: GraphRequest) -> Result<GraphResponse> {
        if request.root_name.trim().is_empty() {
            return Err(DepGraphError::InvalidRootPackage {
                reason: "root package name is empty".to_string(),
            }
            .into());
        }

        // Step 1: Read the flat dependency map
        let flat_map = self.read_flat_map(&request)?;

        // Step 2: Collect coordinate remaps (explicit file and/or resolved hashes)
        let (coordinates, unresolved_ids) = self.load_coordinates(&request).await?;

        // Step 3: Build the graph
        self.progress_reporter
            .report("🔗 Building dependency graph...");
        let dep_graph = self.graph_builder.build(
            &flat_map,
            &request.root_name,
            request.root_version.as_deref(),
            coordinates.as_ref(),
        );

        // Step 4: Report summary
        let stats = GraphStats::from_graph(flat_map.len(), &dep_graph);
        self.report_stats(&stats);

        Ok(GraphResponse {
            dep_graph,
            metadata: GraphMetadata::generate(),
            stats,
            unresolved_ids,
        })
    }

    fn read_flat_map(&self, request: &GraphRequest) -> Result<FlatDependencyMap> {
        self.progress_reporter.report(&format!(
            "📖 Loading flat dependency map from: {}",
            request.input_path.display()
        ));

        let flat_map = self.flat_map_reader.read_flat_map(&request.input_path)?;

        self.progress_reporter.report(&format!(
            "✅ Detected {} dependency record(s)",
            flat_map.len()
        ));

        Ok(flat_map)
    }

    /// Loads the explicit coordinate map, then fills gaps from resolved
    /// hashes. Explicit entries always win over resolved ones.
    async fn load_coordinates(&self, request: &GraphRequest) -> Result<LoadedCoordinates> {
        let mut coordinates = match &request.coordinate_map_path {
            Some(path) => {
                let map = self.coordinate_reader.read_coordinate_map(path)?;
                self.progress_reporter
                    .report(&format!("🗺️  Loaded {} coordinate remap(s)", map.len()));
                Some(map)
            }
            None => None,
        };

        let Some(path) = &request.hash_index_path else {
            return Ok((coordinates, Vec::new()));
        };

        let hashes = self.coordinate_reader.read_hash_index(path)?;
        if hashes.is_empty() {
            return Ok((coordinates, Vec::new()));
        }

        self.progress_reporter.report(&format!(
            "🔍 Resolving coordinates for {} artifact(s)...",
            hashes.len()
        ));

        let resolution = self
            .resolver
            .execute_with_progress(&hashes, |done, total| {
                self.progress_reporter
                    .report_progress(done, total, Some("Resolving artifact coordinates..."));
            })
            .await;

        for failure in &resolution.failures {
            self.progress_reporter.report_error(&format!(
                "⚠️  Warning: Could not resolve {} (sha1 {}): {}",
                failure.id, failure.sha1, failure.reason
            ));
        }

        let resolved = resolution.coordinates.len();
        self.progress_reporter.report_completion(&format!(
            "✅ Coordinate resolution complete: {} succeeded out of {}, {} failed",
            resolved,
            hashes.len(),
            resolution.failures.len()
        ));

        let merged = match coordinates.take() {
            Some(mut explicit) => {
                explicit.merge_missing(resolution.coordinates);
                explicit
            }
            None => resolution.coordinates,
        };
        let unresolved_ids = resolution.failures.into_iter().map(|f| f.id).collect();

        Ok((Some(merged), unresolved_ids))
    }

    fn report_stats(&self, stats: &GraphStats) {
        self.progress_reporter
            .report(&format!("   - Expanded dependencies: {}", stats.expanded_nodes));
        self.progress_reporter
            .report(&format!("   - Pruned duplicates: {}", stats.pruned_nodes));
        self.progress_reporter
            .report(&format!("   - Edges: {}", stats.edges));

        let skipped = stats.records.saturating_sub(stats.expanded_nodes);
        if skipped > 0 {
            tracing::debug!(
                skipped,
                "records not expanded (unreachable from root or merged by remapping)"
            );
        }
    }
}
