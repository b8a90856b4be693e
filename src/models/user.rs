//! User model

use std::fmt;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use crate::models::form::RequiredFields;
use crate::models::normalize::{Fields, FromApi};
use crate::utils::errors::{TicketdeskError, Result};
use crate::utils::helpers::{is_valid_email, meets_password_policy};

/// Account role as reported by the API
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    User,
    Admin,
    Manager,
    Organizer,
    Other(String),
}

impl Role {
    /// Case-insensitive parse; unknown names are kept verbatim
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "user" | "" => Role::User,
            "admin" => Role::Admin,
            "manager" => Role::Manager,
            "organizer" => Role::Organizer,
            _ => Role::Other(value.trim().to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Role::User => "User",
            Role::Admin => "Admin",
            Role::Manager => "Manager",
            Role::Organizer => "Organizer",
            Role::Other(name) => name,
        }
    }

    /// Admins and managers share the admin back-office
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin | Role::Manager)
    }

    pub fn is_organizer(&self) -> bool {
        matches!(self, Role::Organizer)
    }
}

impl Default for Role {
    fn default() -> Self {
        Role::User
    }
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        Role::parse(&value)
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.as_str().to_string()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A platform account. The password is never read back from the API.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub user_id: i64,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub role: Role,
}

impl User {
    pub fn full_name(&self) -> String {
        [Some(self.first_name.as_str()), self.middle_name.as_deref(), Some(self.last_name.as_str())]
            .into_iter()
            .flatten()
            .filter(|part| !part.trim().is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl FromApi for User {
    const ENTITY: &'static str = "User";

    fn from_api(value: &Value) -> Result<Self> {
        let f = Fields::new(value, Self::ENTITY)?;
        Ok(Self {
            user_id: f.required_id(&["userId", "id"])?,
            first_name: f.string_or_default(&["firstName"]),
            middle_name: f.non_empty(&["middleName"]),
            last_name: f.string_or_default(&["lastName"]),
            email: f.string_or_default(&["email"]),
            phone: f.string_or_default(&["phone"]),
            role: f.string(&["role"]).map(|r| Role::parse(&r)).unwrap_or_default(),
        })
    }
}

/// Create/update payload for a user account
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserForm {
    pub first_name: String,
    #[serde(default)]
    pub middle_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub role: Role,
    pub password: String,
}

impl UserForm {
    pub fn validate(&self) -> Result<()> {
        RequiredFields::new()
            .text("First name", &self.first_name)
            .text("Last name", &self.last_name)
            .text("Email", &self.email)
            .text("Phone", &self.phone)
            .check()?;

        if !is_valid_email(&self.email) {
            return Err(TicketdeskError::Validation(format!("Invalid email address: {}", self.email)));
        }

        if !meets_password_policy(&self.password) {
            return Err(TicketdeskError::Validation(
                "Password must contain letters, numbers and at least one special character.".to_string(),
            ));
        }

        Ok(())
    }
}

impl fmt::Debug for UserForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserForm")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .field("role", &self.role)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_role_parsing_is_case_insensitive() {
        assert_eq!(Role::parse("ADMIN"), Role::Admin);
        assert_eq!(Role::parse("manager"), Role::Manager);
        assert_eq!(Role::parse("Organizer"), Role::Organizer);
        assert_eq!(Role::parse(""), Role::User);
        assert_eq!(Role::parse("Auditor"), Role::Other("Auditor".to_string()));
        assert!(Role::Manager.is_admin());
        assert!(!Role::Organizer.is_admin());
    }

    #[test]
    fn test_user_from_pascal_case_payload_drops_password() {
        let value = json!({
            "UserId": 12, "FirstName": "Asha", "MiddleName": "", "LastName": "Rao",
            "Email": "asha@example.com", "Phone": "9876543210", "Role": "organizer",
            "Password": "plain@123"
        });
        let user = User::from_api(&value).unwrap();
        assert_eq!(user.user_id, 12);
        assert_eq!(user.full_name(), "Asha Rao");
        assert_eq!(user.role, Role::Organizer);
        let rendered = serde_json::to_string(&user).unwrap();
        assert!(!rendered.contains("plain@123"));
    }

    #[test]
    fn test_user_form_validation() {
        let mut form = UserForm {
            first_name: "Asha".into(),
            middle_name: String::new(),
            last_name: "Rao".into(),
            email: "asha@example.com".into(),
            phone: "9876543210".into(),
            role: Role::User,
            password: "weakpass".into(),
        };
        assert!(form.validate().is_err());
        form.password = "strong@1".into();
        assert!(form.validate().is_ok());
        assert!(!format!("{:?}", form).contains("strong@1"));
    }
}
