//! Ticketdesk
//!
//! Client library for an event ticketing and booking API.
//! This library provides the API client and repositories, the booking,
//! payment and receipt workflows, role-aware dashboards and back-office
//! management, plus the handlers behind the `ticketdesk` command line.

pub mod config;
pub mod api;
pub mod models;
pub mod state;
pub mod services;
pub mod handlers;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{TicketdeskError, Result};

// Re-export main components for easy access
pub use api::ApiService;
pub use services::ServiceFactory;
pub use state::SessionContext;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
