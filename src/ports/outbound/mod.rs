/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (file system, network, console, etc.).
pub mod coordinate_map_reader;
pub mod coordinate_resolver;
pub mod flat_map_reader;
pub mod graph_formatter;
pub mod output_presenter;
pub mod progress_reporter;

pub use coordinate_map_reader::CoordinateMapReader;
pub use coordinate_resolver::CoordinateResolver;
pub use flat_map_reader::FlatMapReader;
pub use graph_formatter::GraphFormatter;
pub use output_presenter::OutputPresenter;
pub use progress_reporter::ProgressReporter;
