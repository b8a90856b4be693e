//! Event booking model

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use crate::models::form::RequiredFields;
use crate::models::normalize::{Fields, FromApi};
use crate::utils::errors::{TicketdeskError, Result};
use crate::utils::helpers::is_valid_email;

/// A reservation of one attendee slot against a scheduled event
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub event_booking_id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub schedule_event_id: Option<i64>,
    /// Event title copied onto the booking by the server
    pub schedule_event_details: Option<String>,
    /// Fee copied onto the booking by the server
    pub schedule_event_fees: Option<f64>,
    pub is_cancelled: bool,
    pub cancellation_date_time: Option<String>,
    pub id_proof_document_path: Option<String>,
}

impl Booking {
    /// Whether `email` owns this booking (case-insensitive)
    pub fn is_owned_by(&self, email: &str) -> bool {
        !email.trim().is_empty() && self.email.trim().eq_ignore_ascii_case(email.trim())
    }

    /// Fee owed for this booking. A missing or zero fee copy defers to the
    /// event's current fee.
    pub fn fee_or(&self, event_fee: Option<f64>) -> f64 {
        self.schedule_event_fees
            .filter(|fee| *fee > 0.0)
            .or(event_fee)
            .unwrap_or(0.0)
    }
}

impl FromApi for Booking {
    const ENTITY: &'static str = "EventBooking";

    fn from_api(value: &Value) -> Result<Self> {
        let f = Fields::new(value, Self::ENTITY)?;
        Ok(Self {
            event_booking_id: f.required_id(&["eventBookingId", "id"])?,
            name: f.string_or_default(&["name"]),
            email: f.string_or_default(&["email"]),
            phone: f.string_or_default(&["phone"]),
            address: f.string_or_default(&["address"]),
            city: f.string_or_default(&["city"]),
            state: f.string_or_default(&["state"]),
            country: f.string_or_default(&["country"]),
            schedule_event_id: f.i64(&["scheduleEventId"]),
            schedule_event_details: f.non_empty(&["scheduleEventDetails"]),
            schedule_event_fees: f.f64(&["scheduleEventFees"]),
            is_cancelled: f.bool(&["isCancelled"]).unwrap_or(false),
            cancellation_date_time: f.non_empty(&["cancellationDateTime"]),
            id_proof_document_path: f.non_empty(&["idProofDocumentPath"]),
        })
    }
}

/// Booking fields as submitted in a multipart create/update request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub country: String,
    pub schedule_event_id: i64,
    #[serde(default)]
    pub is_cancelled: bool,
    #[serde(default)]
    pub cancellation_date_time: Option<DateTime<Utc>>,
    /// Existing document path, kept on update when no new file is sent
    #[serde(default)]
    pub id_proof_document_path: Option<String>,
}

impl BookingForm {
    /// Re-submission form carrying every field of an existing booking
    pub fn from_booking(booking: &Booking) -> Self {
        Self {
            name: booking.name.clone(),
            email: booking.email.clone(),
            phone: booking.phone.clone(),
            address: booking.address.clone(),
            city: booking.city.clone(),
            state: booking.state.clone(),
            country: booking.country.clone(),
            schedule_event_id: booking.schedule_event_id.unwrap_or_default(),
            is_cancelled: booking.is_cancelled,
            cancellation_date_time: booking
                .cancellation_date_time
                .as_deref()
                .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
                .map(|d| d.with_timezone(&Utc)),
            id_proof_document_path: booking.id_proof_document_path.clone(),
        }
    }

    /// Back-office check: contact fields and the event are required
    pub fn validate(&self) -> Result<()> {
        RequiredFields::new()
            .text("Name", &self.name)
            .text("Email", &self.email)
            .text("Phone", &self.phone)
            .id("Event", Some(self.schedule_event_id))
            .check()?;

        if !is_valid_email(&self.email) {
            return Err(TicketdeskError::Validation(format!("Invalid email address: {}", self.email)));
        }

        Ok(())
    }

    /// Public booking check: the full address is required too
    pub fn validate_for_attendee(&self) -> Result<()> {
        RequiredFields::new()
            .text("Address", &self.address)
            .text("City", &self.city)
            .text("State", &self.state)
            .text("Country", &self.country)
            .check()?;
        self.validate()
    }

    /// Multipart text fields in the server's PascalCase binding names
    pub fn to_fields(&self, event_booking_id: Option<i64>) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("Name", self.name.clone()),
            ("Email", self.email.clone()),
            ("Phone", self.phone.clone()),
            ("Address", self.address.clone()),
            ("City", self.city.clone()),
            ("State", self.state.clone()),
            ("Country", self.country.clone()),
            ("ScheduleEventId", self.schedule_event_id.to_string()),
            ("IsCancelled", self.is_cancelled.to_string()),
        ];

        if let Some(id) = event_booking_id {
            fields.push(("EventBookingId", id.to_string()));
        }
        if let Some(at) = self.cancellation_date_time {
            fields.push(("CancellationDateTime", at.to_rfc3339_opts(SecondsFormat::Millis, true)));
        }
        if let Some(path) = &self.id_proof_document_path {
            fields.push(("IdProofDocumentPath", path.clone()));
        }

        fields
    }
}
