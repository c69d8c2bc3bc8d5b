/// Database configuration and connection management
pub mod database;

/// Application settings (receipt storage, employee directory) from config.toml
pub mod settings;
