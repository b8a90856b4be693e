//! Required-field checks shared by the edit forms

use crate::utils::errors::{TicketdeskError, Result};

/// Collects the labels of required fields left blank
#[derive(Debug, Default)]
pub struct RequiredFields {
    missing: Vec<&'static str>,
}

impl RequiredFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, label: &'static str, value: &str) -> Self {
        if value.trim().is_empty() {
            self.missing.push(label);
        }
        self
    }

    pub fn id(mut self, label: &'static str, value: Option<i64>) -> Self {
        if !matches!(value, Some(id) if id > 0) {
            self.missing.push(label);
        }
        self
    }

    pub fn check(self) -> Result<()> {
        if self.missing.is_empty() {
            Ok(())
        } else {
            Err(TicketdeskError::Validation(format!(
                "Please fill in all required fields: {}",
                self.missing.join(", ")
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lists_every_missing_field() {
        let err = RequiredFields::new()
            .text("Name", "")
            .text("Email", "a@b.co")
            .text("Phone", "   ")
            .id("Event", None)
            .check()
            .unwrap_err();
        assert_eq!(err.to_string(), "Please fill in all required fields: Name, Phone, Event");
    }

    #[test]
    fn test_all_present() {
        assert!(RequiredFields::new().text("Name", "Asha").id("Event", Some(3)).check().is_ok());
    }
}
