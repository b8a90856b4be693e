//! Helper functions and utilities
//!
//! This module contains common helper functions used throughout the application.

use std::sync::OnceLock;
use chrono::{DateTime, NaiveDate, Utc};
use regex::Regex;
use uuid::Uuid;

/// Special characters accepted by the server's password policy
pub const PASSWORD_SPECIALS: &str = "@$!%*#?&";

/// Extensions accepted for uploaded identity documents
pub const ID_PROOF_EXTENSIONS: [&str; 4] = ["pdf", "jpg", "jpeg", "png"];

/// Generate a new UUID v4
pub fn generate_uuid() -> String {
    Uuid::new_v4().to_string()
}

/// Simulated gateway transaction id: `TXN` followed by epoch milliseconds
pub fn generate_transaction_id(now: DateTime<Utc>) -> String {
    format!("TXN{}", now.timestamp_millis())
}

/// Format a timestamp for display
pub fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

/// Render an API date (`YYYY-MM-DD` or an ISO date-time) as `DD-MM-YYYY`.
///
/// The date part is sliced out textually so no timezone shift is applied.
pub fn format_date(value: &str) -> String {
    if value.is_empty() {
        return "-".to_string();
    }

    let date_part = value.split('T').next().unwrap_or(value);
    match NaiveDate::parse_from_str(date_part, "%Y-%m-%d") {
        Ok(date) => date.format("%d-%m-%Y").to_string(),
        Err(_) => date_part.to_string(),
    }
}

/// Render an API time (`HH:mm:ss`, `HH:mm` or an ISO date-time) as `HH:mm`
pub fn format_time(value: &str) -> String {
    let time_part = match value.split_once('T') {
        Some((_, time)) => time,
        None => value,
    };

    if time_part.len() >= 5 {
        time_part[..5].to_string()
    } else if time_part.is_empty() {
        "TBD".to_string()
    } else {
        time_part.to_string()
    }
}

/// Normalize a form time to the `HH:mm:ss` shape the server parses
pub fn normalize_time(value: &str) -> String {
    let value = value.trim();
    match value.len() {
        0 => "00:00:00".to_string(),
        5 => format!("{}:00", value),
        _ => value.to_string(),
    }
}

/// Format an amount with a currency symbol, dropping a zero fraction
pub fn format_amount(symbol: &str, amount: f64) -> String {
    if amount.fract() == 0.0 {
        format!("{}{}", symbol, amount as i64)
    } else {
        format!("{}{:.2}", symbol, amount)
    }
}

/// Display label for an event fee: `FREE` for zero, otherwise the amount
pub fn fee_label(symbol: &str, fee: f64) -> String {
    if fee == 0.0 {
        "FREE".to_string()
    } else {
        format_amount(symbol, fee)
    }
}

/// Truncate text to a maximum length with ellipsis
pub fn truncate_text(text: &str, max_length: usize) -> String {
    if text.chars().count() <= max_length {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max_length.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
    })
}

/// Validate email format
pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_match(email.trim())
}

/// Validate phone number format (basic validation)
pub fn is_valid_phone(phone: &str) -> bool {
    let digits = phone.chars().filter(|c| c.is_ascii_digit()).count();
    phone.chars().all(|c| c.is_ascii_digit() || c == '+' || c == '-' || c == ' ')
        && digits >= 10
}

/// Server password policy: at least six characters, at least one letter,
/// one digit and one of [`PASSWORD_SPECIALS`], and nothing outside those sets
pub fn meets_password_policy(password: &str) -> bool {
    let allowed = |c: char| c.is_ascii_alphanumeric() || PASSWORD_SPECIALS.contains(c);

    password.chars().count() >= 6
        && password.chars().all(allowed)
        && password.chars().any(|c| c.is_ascii_alphabetic())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| PASSWORD_SPECIALS.contains(c))
}

/// Whether a file name carries an accepted ID proof extension
pub fn is_accepted_id_proof(file_name: &str) -> bool {
    file_name
        .rsplit_once('.')
        .map(|(_, ext)| ID_PROOF_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// MIME type for an uploaded document, based on its extension
pub fn mime_for_file(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "pdf" => "application/pdf",
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        _ => "application/octet-stream",
    }
}

/// Resolve a server-relative upload path against the uploads origin
pub fn resolve_upload_url(uploads_url: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }

    let normalized = path.replace('\\', "/");
    format!(
        "{}/{}",
        uploads_url.trim_end_matches('/'),
        normalized.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_format_date_variants() {
        assert_eq!(format_date("2025-03-09"), "09-03-2025");
        assert_eq!(format_date("2025-03-09T18:30:00"), "09-03-2025");
        assert_eq!(format_date(""), "-");
        assert_eq!(format_date("soon"), "soon");
    }

    #[test]
    fn test_time_helpers() {
        assert_eq!(format_time("18:30:00"), "18:30");
        assert_eq!(format_time("2025-03-09T07:05:00"), "07:05");
        assert_eq!(format_time(""), "TBD");
        assert_eq!(normalize_time("09:15"), "09:15:00");
        assert_eq!(normalize_time("09:15:30"), "09:15:30");
        assert_eq!(normalize_time(""), "00:00:00");
    }

    #[test]
    fn test_fee_label() {
        assert_eq!(fee_label("₹", 0.0), "FREE");
        assert_eq!(fee_label("₹", 150.0), "₹150");
        assert_eq!(fee_label("₹", 99.5), "₹99.50");
    }

    #[test]
    fn test_password_policy() {
        assert!(meets_password_policy("abc12@"));
        assert!(meets_password_policy("Secret#2024"));
        assert!(!meets_password_policy("abc123"));
        assert!(!meets_password_policy("a1@"));
        assert!(!meets_password_policy("abc 12@"));
        assert!(!meets_password_policy("@@@111"));
    }

    #[test]
    fn test_contact_validation() {
        assert!(is_valid_email("asha@example.com"));
        assert!(!is_valid_email("asha@example"));
        assert!(!is_valid_email("asha example.com"));
        assert!(is_valid_phone("+91 98765 43210"));
        assert!(!is_valid_phone("12345"));
    }

    #[test]
    fn test_id_proof_extensions() {
        assert!(is_accepted_id_proof("passport.PDF"));
        assert!(is_accepted_id_proof("scan.jpeg"));
        assert!(!is_accepted_id_proof("notes.txt"));
        assert!(!is_accepted_id_proof("noext"));
        assert_eq!(mime_for_file("id.png"), "image/png");
    }

    #[test]
    fn test_resolve_upload_url() {
        assert_eq!(
            resolve_upload_url("https://localhost:7187/", "/uploads/id/1.png"),
            "https://localhost:7187/uploads/id/1.png"
        );
        assert_eq!(
            resolve_upload_url("https://localhost:7187", "uploads\\events\\a.jpg"),
            "https://localhost:7187/uploads/events/a.jpg"
        );
        assert_eq!(resolve_upload_url("https://x", "https://cdn/y.png"), "https://cdn/y.png");
    }

    #[test]
    fn test_transaction_id_prefix() {
        let now = Utc::now();
        let id = generate_transaction_id(now);
        assert!(id.starts_with("TXN"));
        assert_eq!(id[3..].parse::<i64>().unwrap(), now.timestamp_millis());
    }

    proptest! {
        #[test]
        fn prop_passwords_without_specials_are_rejected(p in "[A-Za-z0-9]{0,24}") {
            prop_assert!(!meets_password_policy(&p));
        }

        #[test]
        fn prop_truncate_never_exceeds_limit(s in ".{0,64}", max in 3usize..40) {
            prop_assert!(truncate_text(&s, max).chars().count() <= max);
        }
    }
}
