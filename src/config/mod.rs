/// Application settings from config.toml
pub mod app;

/// Database configuration and connection management
pub mod database;

/// Mock record loading from the fixtures file
pub mod fixtures;

pub use app::{AppConfig, api_token, load_config, load_or_default};
pub use fixtures::{Fixtures, load_fixtures};
