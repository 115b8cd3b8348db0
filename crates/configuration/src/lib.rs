pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use error::ConfigError;
pub use settings::{ServerSettings, Settings};

/// Loads the application settings.
///
/// Built-in defaults are overridden by an optional `config.toml`, which in
/// turn is overridden by `APP_`-prefixed environment variables (e.g.
/// `APP_SERVER__PORT=8080`).
pub fn load_settings() -> Result<Settings, ConfigError> {
    let builder = config::Config::builder()
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 9090)?
        .add_source(config::File::with_name("config.toml").required(false))
        .add_source(config::Environment::with_prefix("APP").separator("__"))
        .build()?;

    let settings = builder.try_deserialize::<Settings>()?;

    Ok(settings)
}
