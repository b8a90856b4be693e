//! Command handlers module
//!
//! Each handler runs one CLI command against the services and writes its
//! human-readable output to the given writer

pub mod account;
pub mod events;
pub mod bookings;
pub mod dashboard;
pub mod admin;

use std::io::Write;
use crate::utils::errors::{ErrorSeverity, TicketdeskError};

/// Render an error the way the user should see it
pub fn user_message(error: &TicketdeskError) -> String {
    match error {
        TicketdeskError::LoginRequired { redirect } => {
            format!("Please log in to continue (ticketdesk login), then return to {}", redirect)
        }
        TicketdeskError::BookingCancelled { booking_id } => {
            format!("Booking #{} has been cancelled and cannot be changed", booking_id)
        }
        other => other.to_string(),
    }
}

/// Write an error for the user and record it in the log
pub fn report_error<W: Write>(out: &mut W, error: &TicketdeskError) {
    match error.severity() {
        ErrorSeverity::Info => tracing::info!(error = %error, "Command failed"),
        ErrorSeverity::Warning => tracing::warn!(error = %error, "Command failed"),
        ErrorSeverity::Error | ErrorSeverity::Critical => tracing::error!(error = ?error, "Command failed"),
    }
    let _ = writeln!(out, "Error: {}", user_message(error));
}
