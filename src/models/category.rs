//! Event category model

use serde::{Deserialize, Serialize};
use serde_json::Value;
use crate::models::form::RequiredFields;
use crate::models::normalize::{Fields, FromApi};
use crate::utils::errors::Result;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventCategory {
    pub event_category_id: i64,
    pub name: String,
    pub description: String,
    pub user_id: Option<i64>,
}

impl FromApi for EventCategory {
    const ENTITY: &'static str = "EventCategory";

    fn from_api(value: &Value) -> Result<Self> {
        let f = Fields::new(value, Self::ENTITY)?;
        Ok(Self {
            event_category_id: f.required_id(&["eventCategoryId", "id"])?,
            name: f.string_or_default(&["eventCategoryName", "name"]),
            description: f.string_or_default(&["eventCategoryDescription", "description"]),
            user_id: f.i64(&["userId"]),
        })
    }
}

/// Create/update payload; the category endpoints bind camelCase JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryForm {
    pub event_category_name: String,
    #[serde(default)]
    pub event_category_description: String,
    pub user_id: i64,
}

impl CategoryForm {
    pub fn validate(&self) -> Result<()> {
        RequiredFields::new()
            .text("Name", &self.event_category_name)
            .id("User", Some(self.user_id))
            .check()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_category_from_api() {
        let value = json!({"eventCategoryId": 2, "eventCategoryName": "Music", "userId": 5});
        let category = EventCategory::from_api(&value).unwrap();
        assert_eq!(category.name, "Music");
        assert_eq!(category.description, "");
        assert_eq!(category.user_id, Some(5));
    }

    #[test]
    fn test_category_form_requires_owner() {
        let form = CategoryForm {
            event_category_name: "Music".into(),
            event_category_description: String::new(),
            user_id: 0,
        };
        assert!(form.validate().is_err());
    }
}
