/// Mock implementations for testing
mod mock_coordinate_reader;
mod mock_coordinate_resolver;
mod mock_flat_map_reader;
mod mock_progress_reporter;

pub use mock_coordinate_reader::MockCoordinateReader;
pub use mock_coordinate_resolver::MockCoordinateResolver;
pub use mock_flat_map_reader::MockFlatMapReader;
pub use mock_progress_reporter::MockProgressReporter;
