//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for the Ticketdesk client.

use tracing::{info, warn, error, debug};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};
use crate::config::LoggingConfig;
use crate::utils::errors::{TicketdeskError, Result};

/// Initialize logging based on configuration.
///
/// Console output goes to stderr so command output on stdout stays clean.
/// The returned guard must be held for the file sink to flush.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let filter = tracing_subscriber::EnvFilter::try_new(&config.level)
        .map_err(|e| TicketdeskError::Config(format!("Invalid log filter: {}", e)))?;

    let console = if config.json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .boxed()
    };

    let (file_layer, guard) = if config.file_path.is_empty() {
        (None, None)
    } else {
        let file_appender = tracing_appender::rolling::daily(&config.file_path, "ticketdesk.log");
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
        let layer = tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_writer(non_blocking);
        (Some(layer), Some(guard))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(file_layer)
        .try_init()
        .map_err(|e| TicketdeskError::Config(format!("Logging already initialized: {}", e)))?;

    debug!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log an outgoing API request
pub fn log_api_request(request_id: &str, method: &str, url: &str) {
    debug!(
        request_id = request_id,
        method = method,
        url = url,
        "API request"
    );
}

/// Log an API response status
pub fn log_api_response(request_id: &str, status: u16, duration_ms: u64) {
    if status < 400 {
        debug!(
            request_id = request_id,
            status = status,
            duration_ms = duration_ms,
            "API response"
        );
    } else {
        warn!(
            request_id = request_id,
            status = status,
            duration_ms = duration_ms,
            "API request rejected"
        );
    }
}

/// Log API errors with context
pub fn log_api_error(api: &str, error: &str, context: Option<&str>) {
    error!(
        api = api,
        error = error,
        context = context,
        "API error occurred"
    );
}

/// Log booking workflow actions
pub fn log_booking_action(booking_id: i64, action: &str, email: Option<&str>, details: Option<&str>) {
    info!(
        booking_id = booking_id,
        action = action,
        email = email,
        details = details,
        "Booking action performed"
    );
}

/// Log payment results
pub fn log_payment(booking_id: i64, amount: f64, method: &str, transaction_id: &str) {
    info!(
        booking_id = booking_id,
        amount = amount,
        method = method,
        transaction_id = transaction_id,
        "Payment recorded"
    );
}

/// Log admin actions
pub fn log_admin_action(resource: &str, action: &str, target: Option<i64>, actor: Option<&str>) {
    warn!(
        resource = resource,
        action = action,
        target = target,
        actor = actor,
        "Admin action performed"
    );
}

/// Log authentication events. Never pass tokens or passwords here.
pub fn log_auth_event(email: &str, action: &str, success: bool, details: Option<&str>) {
    if success {
        info!(
            email = email,
            action = action,
            details = details,
            "Authentication event: success"
        );
    } else {
        warn!(
            email = email,
            action = action,
            details = details,
            "Authentication event: failure"
        );
    }
}
