/// Bot identity resolved from environment variables
pub mod bot;

/// Catalog seed loading from catalog.toml
pub mod catalog;

/// Database configuration and connection management
pub mod database;
