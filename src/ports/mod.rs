/// Ports module defining interfaces for hexagonal architecture
///
/// Outbound ports (driven ports) are the interfaces the application core
/// uses to reach files, the console and remote lookup services.
pub mod outbound;
