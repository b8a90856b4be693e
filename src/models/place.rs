//! Place (venue) model

use serde::{Deserialize, Serialize};
use serde_json::Value;
use crate::models::form::RequiredFields;
use crate::models::normalize::{Fields, FromApi};
use crate::utils::errors::{TicketdeskError, Result};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    pub place_id: i64,
    pub name: String,
    pub address: String,
    pub city: String,
    pub country: String,
    pub max_capacity: Option<i64>,
    pub user_id: Option<i64>,
}

impl Place {
    /// One-line location used in listings and receipts
    pub fn location(&self) -> String {
        [self.name.as_str(), self.city.as_str(), self.country.as_str()]
            .into_iter()
            .filter(|part| !part.trim().is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl FromApi for Place {
    const ENTITY: &'static str = "Place";

    fn from_api(value: &Value) -> Result<Self> {
        let f = Fields::new(value, Self::ENTITY)?;
        Ok(Self {
            place_id: f.required_id(&["placeId", "id"])?,
            name: f.string_or_default(&["placeName", "name"]),
            address: f.string_or_default(&["address"]),
            city: f.string_or_default(&["city"]),
            country: f.string_or_default(&["country"]),
            max_capacity: f.i64(&["maxCapacity"]),
            user_id: f.i64(&["userId"]),
        })
    }
}

/// Create/update payload; the places endpoints bind PascalCase JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PlaceForm {
    pub place_name: String,
    pub address: String,
    pub country: String,
    pub city: String,
    pub max_capacity: i64,
    pub user_id: i64,
}

impl PlaceForm {
    pub fn validate(&self) -> Result<()> {
        RequiredFields::new()
            .text("Name", &self.place_name)
            .text("Address", &self.address)
            .text("City", &self.city)
            .text("Country", &self.country)
            .id("User", Some(self.user_id))
            .check()?;

        if self.max_capacity <= 0 {
            return Err(TicketdeskError::Validation(
                "Max capacity must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_place_form_serializes_pascal_case() {
        let form = PlaceForm {
            place_name: "Town Hall".into(),
            address: "1 Main St".into(),
            country: "India".into(),
            city: "Pune".into(),
            max_capacity: 300,
            user_id: 4,
        };
        let value = serde_json::to_value(&form).unwrap();
        assert_eq!(value["PlaceName"], "Town Hall");
        assert_eq!(value["MaxCapacity"], 300);
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_place_location() {
        let place = Place::from_api(&json!({"placeId": 1, "placeName": "Town Hall", "city": "Pune"})).unwrap();
        assert_eq!(place.location(), "Town Hall, Pune");
    }
}
