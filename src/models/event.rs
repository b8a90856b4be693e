//! Scheduled event model

use serde::{Deserialize, Serialize};
use serde_json::Value;
use crate::models::form::RequiredFields;
use crate::models::normalize::{Fields, FromApi};
use crate::utils::errors::{TicketdeskError, Result};
use crate::utils::helpers::normalize_time;

/// A concrete event instance with date, time, venue and fee
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledEvent {
    pub schedule_event_id: i64,
    pub details: String,
    /// `YYYY-MM-DD`
    pub start_date: String,
    /// `HH:mm[:ss]`, empty when unknown
    pub start_time: String,
    pub end_date: String,
    pub end_time: String,
    pub fees: f64,
    pub event_category_id: Option<i64>,
    pub place_id: Option<i64>,
    pub contact_name: String,
    pub phone: String,
    /// Organizer that owns the event
    pub user_id: Option<i64>,
    pub image_path: Option<String>,
    /// Display names joined by the server, when it sends them
    pub place_name: Option<String>,
    pub event_category_name: Option<String>,
}

impl ScheduledEvent {
    pub fn is_free(&self) -> bool {
        self.fees == 0.0
    }
}

/// Split a `date` or `dateTtime` value into its date and time parts
fn split_date_time(value: &str) -> (String, String) {
    match value.split_once('T') {
        Some((date, time)) => (date.to_string(), time.to_string()),
        None if value.contains(':') => (String::new(), value.to_string()),
        None => (value.to_string(), String::new()),
    }
}

impl FromApi for ScheduledEvent {
    const ENTITY: &'static str = "ScheduleEvent";

    fn from_api(value: &Value) -> Result<Self> {
        let f = Fields::new(value, Self::ENTITY)?;

        let (start_from_time, start_time) = split_date_time(&f.string_or_default(&["startTime"]));
        let (end_from_time, end_time) = split_date_time(&f.string_or_default(&["endTime"]));

        let start_date = f
            .non_empty(&["startDate", "eventDate"])
            .map(|d| split_date_time(&d).0)
            .unwrap_or(start_from_time);
        let end_date = f
            .non_empty(&["endDate"])
            .map(|d| split_date_time(&d).0)
            .unwrap_or(end_from_time);

        Ok(Self {
            schedule_event_id: f.required_id(&["scheduleEventId", "id"])?,
            details: f.string_or_default(&["details", "title"]),
            start_date,
            start_time,
            end_date,
            end_time,
            fees: f.f64(&["fees", "fee"]).unwrap_or(0.0),
            event_category_id: f.i64(&["eventCategoryId"]),
            place_id: f.i64(&["placeId"]),
            contact_name: f.string_or_default(&["contactName"]),
            phone: f.string_or_default(&["phone"]),
            user_id: f.i64(&["userId"]),
            image_path: f.non_empty(&["imagePath"]),
            place_name: f.non_empty(&["placeName"]),
            event_category_name: f.non_empty(&["eventCategoryName"]),
        })
    }
}

/// Create/update form, sent as multipart so an image can ride along
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledEventForm {
    pub details: String,
    pub start_date: String,
    pub start_time: String,
    pub end_date: String,
    pub end_time: String,
    #[serde(default)]
    pub fees: f64,
    pub contact_name: String,
    pub phone: String,
    pub event_category_id: i64,
    pub place_id: i64,
    pub user_id: i64,
    /// Existing image path to keep when no new image is uploaded
    #[serde(default)]
    pub image_path: String,
}

impl ScheduledEventForm {
    /// Pre-fill an edit form from an existing event
    pub fn from_event(event: &ScheduledEvent) -> Self {
        Self {
            details: event.details.clone(),
            start_date: event.start_date.clone(),
            start_time: event.start_time.clone(),
            end_date: event.end_date.clone(),
            end_time: event.end_time.clone(),
            fees: event.fees,
            contact_name: event.contact_name.clone(),
            phone: event.phone.clone(),
            event_category_id: event.event_category_id.unwrap_or_default(),
            place_id: event.place_id.unwrap_or_default(),
            user_id: event.user_id.unwrap_or_default(),
            image_path: event.image_path.clone().unwrap_or_default(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        RequiredFields::new()
            .text("Details", &self.details)
            .text("Start date", &self.start_date)
            .text("Start time", &self.start_time)
            .text("End date", &self.end_date)
            .text("End time", &self.end_time)
            .text("Contact name", &self.contact_name)
            .text("Phone", &self.phone)
            .id("Category", Some(self.event_category_id))
            .id("Place", Some(self.place_id))
            .id("Organizer", Some(self.user_id))
            .check()?;

        if self.fees < 0.0 {
            return Err(TicketdeskError::Validation("Fees cannot be negative".to_string()));
        }

        Ok(())
    }

    /// Multipart text fields in the server's PascalCase binding names
    pub fn to_fields(&self, schedule_event_id: Option<i64>) -> Vec<(&'static str, String)> {
        let mut fields = Vec::with_capacity(13);
        if let Some(id) = schedule_event_id {
            fields.push(("ScheduleEventId", id.to_string()));
        }
        fields.extend([
            ("Details", self.details.clone()),
            ("StartDate", self.start_date.clone()),
            ("EndDate", self.end_date.clone()),
            ("StartTime", normalize_time(&self.start_time)),
            ("EndTime", normalize_time(&self.end_time)),
            ("Fees", self.fees.to_string()),
            ("ContactName", self.contact_name.clone()),
            ("Phone", self.phone.clone()),
            ("EventCategoryId", self.event_category_id.to_string()),
            ("PlaceId", self.place_id.to_string()),
            ("UserId", self.user_id.to_string()),
            ("ImagePath", self.image_path.clone()),
        ]);
        fields
    }
}
