//! Application configuration assembled from the environment.

/// Product catalog seeding from catalog.toml
pub mod catalog;

/// Database configuration and connection management
pub mod database;

/// Media URL configuration for product images
pub mod media;

use media::MediaConfig;
use std::path::PathBuf;
use tracing::info;

/// Everything the binary needs to start, read once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// `SeaORM` connection URL
    pub database_url: String,
    /// Where product images are served from
    pub media: MediaConfig,
    /// Catalog file used to seed an empty product table
    pub catalog_path: PathBuf,
}

/// Reads the application configuration from environment variables.
///
/// Expects `.env` to have been loaded already, if one is used.
#[must_use]
pub fn load_app_configuration() -> AppConfig {
    let config = AppConfig {
        database_url: database::get_database_url(),
        media: MediaConfig::from_env(),
        catalog_path: catalog::get_catalog_path(),
    };
    info!(
        "Configuration loaded: database={}, media_url={}, catalog={}",
        config.database_url,
        config.media.base_url,
        config.catalog_path.display()
    );
    config
}
