/// Dependency graph domain layer
///
/// Pure data structures and algorithms for turning a flat, parent-indexed
/// dependency description into a canonical dependency graph. Nothing in
/// this module performs I/O.
pub mod domain;
pub mod services;
