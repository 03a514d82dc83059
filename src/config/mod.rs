//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `HVAC_ASSIST` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use hvac_assist::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {}", config.server.socket_addr().unwrap());
//! ```

mod error;
mod server;
mod sheets;

pub use error::{ConfigError, ValidationError};
pub use server::{Environment, LogFormat, ServerConfig};
pub use sheets::SheetsConfig;

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment, logging)
    #[serde(default)]
    pub server: ServerConfig,

    /// Spreadsheet store configuration
    pub sheets: SheetsConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `HVAC_ASSIST` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Lets a bare `PORT` variable override `server.port`
    ///
    /// # Environment Variable Format
    ///
    /// - `HVAC_ASSIST__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `HVAC_ASSIST__SHEETS__WEBHOOK_URL=...` -> `sheets.webhook_url = ...`
    /// - `PORT=8080` -> `server.port = 8080`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Required environment variables are missing
    /// - Values cannot be parsed into expected types
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("HVAC_ASSIST")
                    .separator("__"),
            )
            // Hosting platforms hand out the listening port as PORT
            .set_override_option("server.port", std::env::var("PORT").ok())?
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.sheets.validate(&self.server.environment)?;

        // The router must not cut off a turn the save step would still answer.
        if self.server.request_timeout_secs <= self.sheets.save_timeout_secs {
            return Err(ValidationError::RequestTimeoutNotAboveSave {
                request_secs: self.server.request_timeout_secs,
                save_secs: self.sheets.save_timeout_secs,
            });
        }
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
