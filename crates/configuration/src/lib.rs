//! # Inmo Configuration
//!
//! Loads the immutable, process-wide configuration from `config.toml` once at
//! startup. The resulting `Config` value is passed explicitly to whatever
//! constructs the resolver and the web server; nothing in the system reads
//! ambient global state.

use crate::error::ConfigError;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{Application, Config, FixedStats, Server, StatsSourceKind, Valuation};

/// Loads the application configuration from the `config.toml` file.
///
/// This function is the primary entry point for this crate. It reads the
/// configuration file, deserializes it into our strongly-typed `Config`
/// struct, and returns it.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from("config.toml")
}

/// Loads the configuration from an explicit path. Useful for tests and for
/// deployments that keep the file outside the working directory.
pub fn load_config_from(path: &str) -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::with_name(path))
        .build()?;

    let config = builder.try_deserialize::<Config>()?;

    Ok(config)
}
