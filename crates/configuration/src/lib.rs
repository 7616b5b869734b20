// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use error::ConfigError;
pub use settings::{Config, SearchConfig, ServerConfig};

/// Loads the application configuration from the `config.toml` file.
///
/// Values can be overridden from the environment with an `APP_` prefix,
/// e.g. `APP_SERVER__PORT=9090` or `APP_SEARCH__BASE_URL=...`.
/// The database connection string deliberately stays out of this file and is
/// read from `DATABASE_URL` by the database crate.
pub fn load_config() -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::with_name("config.toml"))
        .add_source(config::Environment::with_prefix("APP").separator("__"))
        .build()?;

    let config = builder.try_deserialize::<Config>()?;
    config.validate()?;

    Ok(config)
}
