//! Error handling for Ticketdesk
//!
//! This module defines the main error types used throughout the application
//! and provides a unified error handling strategy.

use serde_json::Value;
use thiserror::Error;

/// Main error type for Ticketdesk
#[derive(Error, Debug)]
pub enum TicketdeskError {
    #[error("{0}")]
    Api(#[from] ApiError),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Token decoding error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Please log in to continue")]
    LoginRequired { redirect: String },

    #[error("Your session has expired, please log in again")]
    SessionExpired,

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("{0}")]
    Validation(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: i64 },

    #[error("Booking {booking_id} is cancelled")]
    BookingCancelled { booking_id: i64 },
}

/// Failures reported by, or while talking to, the remote ticketing API
#[derive(Error, Debug)]
pub enum ApiError {
    /// The server answered with a non-2xx status; `message` is what it said
    #[error("{message}")]
    Rejected { status: u16, message: String },

    #[error("API request timed out")]
    Timeout,

    #[error("API service unavailable")]
    Unavailable,

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),
}

/// Result type alias for Ticketdesk operations
pub type Result<T> = std::result::Result<T, TicketdeskError>;

impl ApiError {
    /// HTTP status of a rejection, if the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Rejections that mean "wrong verb or shape", which justify trying the
    /// next request variant of a fallback chain
    pub fn is_variant_rejection(&self) -> bool {
        matches!(self.status(), Some(404) | Some(405))
    }

    /// Build a rejection from a status code and raw response body
    pub fn from_response(status: u16, body: &str) -> Self {
        ApiError::Rejected {
            status,
            message: server_message(status, body),
        }
    }

    /// What the server itself said, if anything beyond the status line
    pub fn server_detail(&self) -> Option<&str> {
        match self {
            ApiError::Rejected { status, message } if *message != status_text(*status) => Some(message),
            _ => None,
        }
    }
}

/// Extract the most useful human-readable message from an error body.
///
/// Structured validation maps (`{"errors": {"Field": ["msg", ..]}}`) are
/// flattened into a newline-joined string. Otherwise `message`, then `title`,
/// then a bare string body, then the generic status text.
pub fn server_message(status: u16, body: &str) -> String {
    let trimmed = body.trim();

    if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
        if let Some(flattened) = flatten_validation_errors(&value) {
            return flattened;
        }

        for key in ["message", "Message", "title", "Title"] {
            if let Some(text) = value.get(key).and_then(Value::as_str) {
                if !text.is_empty() {
                    return text.to_string();
                }
            }
        }

        if let Some(text) = value.as_str() {
            if !text.is_empty() {
                return text.to_string();
            }
        }
    } else if !trimmed.is_empty() {
        return trimmed.to_string();
    }

    status_text(status)
}

fn status_text(status: u16) -> String {
    let reason = reqwest::StatusCode::from_u16(status)
        .ok()
        .and_then(|code| code.canonical_reason())
        .unwrap_or("Unknown status");
    format!("Request failed with status {} ({})", status, reason)
}

/// Flatten an ASP.NET-style `errors` map into one message per line
pub fn flatten_validation_errors(value: &Value) -> Option<String> {
    let errors = value.get("errors").or_else(|| value.get("Errors"))?.as_object()?;

    let mut messages = Vec::new();
    for entry in errors.values() {
        match entry {
            Value::Array(items) => {
                messages.extend(items.iter().filter_map(|item| item.as_str().map(str::to_string)))
            }
            Value::String(text) => messages.push(text.clone()),
            _ => {}
        }
    }

    if messages.is_empty() {
        None
    } else {
        Some(messages.join("\n"))
    }
}

impl TicketdeskError {
    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            TicketdeskError::Config(_) => ErrorSeverity::Critical,
            TicketdeskError::PermissionDenied(_) => ErrorSeverity::Warning,
            TicketdeskError::Authentication(_) => ErrorSeverity::Warning,
            TicketdeskError::SessionExpired => ErrorSeverity::Warning,
            TicketdeskError::LoginRequired { .. } => ErrorSeverity::Info,
            TicketdeskError::Validation(_) => ErrorSeverity::Info,
            TicketdeskError::InvalidInput(_) => ErrorSeverity::Info,
            _ => ErrorSeverity::Error,
        }
    }

    /// Whether the error means the caller has to log in (again)
    pub fn requires_login(&self) -> bool {
        matches!(
            self,
            TicketdeskError::LoginRequired { .. } | TicketdeskError::SessionExpired
        )
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
