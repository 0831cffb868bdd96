/// Casino configuration loading from config.toml
pub mod casino;

/// Database configuration and connection management
pub mod database;
