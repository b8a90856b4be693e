//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use url::Url;
use crate::utils::errors::{TicketdeskError, Result};
use super::Settings;

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_api_config(&settings.api)?;
    validate_session_config(&settings.session)?;
    validate_payment_config(&settings.payment)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate remote API configuration
fn validate_api_config(config: &super::ApiConfig) -> Result<()> {
    validate_http_url("API base URL", &config.base_url)?;
    validate_http_url("Uploads URL", &config.uploads_url)?;

    if config.timeout_seconds == 0 {
        return Err(TicketdeskError::Config(
            "API timeout must be greater than 0".to_string()
        ));
    }

    Ok(())
}

fn validate_http_url(label: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(TicketdeskError::Config(format!("{} is required", label)));
    }

    let url = Url::parse(value)
        .map_err(|e| TicketdeskError::Config(format!("{} is invalid: {}", label, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(TicketdeskError::Config(
            format!("{} must use http or https, got {}", label, url.scheme())
        ));
    }

    Ok(())
}

/// Validate session configuration
fn validate_session_config(config: &super::SessionConfig) -> Result<()> {
    if config.path.trim().is_empty() {
        return Err(TicketdeskError::Config(
            "Session file path is required".to_string()
        ));
    }

    Ok(())
}

/// Validate payment configuration
fn validate_payment_config(config: &super::PaymentConfig) -> Result<()> {
    if config.success_status.is_empty() {
        return Err(TicketdeskError::Config(
            "Payment success status is required".to_string()
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(TicketdeskError::Config(
            "Log level is required".to_string()
        ));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(TicketdeskError::Config(
            format!("Invalid log level: {}. Valid levels: {:?}", config.level, valid_levels)
        ));
    }

    Ok(())
}
