//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use serde::{Deserialize, Serialize};

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub api: ApiConfig,
    pub session: SessionConfig,
    pub payment: PaymentConfig,
    pub logging: LoggingConfig,
}

/// Remote ticketing API configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Root of the REST API, including the `/api` prefix
    pub base_url: String,
    /// Origin that serves uploaded files (ID proofs, event images)
    pub uploads_url: String,
    pub timeout_seconds: u64,
    pub user_agent: String,
    /// Development servers on localhost commonly run with self-signed certificates
    pub accept_invalid_certs: bool,
}

/// Persisted session configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionConfig {
    pub path: String,
}

/// Simulated payment configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PaymentConfig {
    pub currency_symbol: String,
    pub success_status: String,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    /// Directory for the rolling log file; empty disables the file sink
    pub file_path: String,
    pub json: bool,
}

impl Settings {
    /// Load settings from configuration file and environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        Self::from_file("config")
    }

    /// Load settings from a named configuration file (extension optional)
    /// layered under `TICKETDESK__*` environment variables
    pub fn from_file(name: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::Config::try_from(&Settings::default())?)
            .add_source(config::File::with_name(name).required(false))
            .add_source(config::Environment::with_prefix("TICKETDESK").separator("__"))
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::TicketdeskError> {
        super::validation::validate_settings(self)
    }

    /// Render these settings as a TOML document
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            session: SessionConfig::default(),
            payment: PaymentConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://localhost:7187/api".to_string(),
            uploads_url: "https://localhost:7187".to_string(),
            timeout_seconds: 30,
            user_agent: format!("ticketdesk/{}", env!("CARGO_PKG_VERSION")),
            accept_invalid_certs: false,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            path: ".ticketdesk/session.json".to_string(),
        }
    }
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            currency_symbol: "₹".to_string(),
            success_status: "Success".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            file_path: String::new(),
            json: false,
        }
    }
}
