/// Application layer - use cases and their data transfer objects
pub mod dto;
pub mod factories;
pub mod use_cases;
