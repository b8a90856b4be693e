//! Event booking repository implementation

use serde_json::Value;
use crate::api::{ApiClient, ApiRequest};
use crate::models::{Booking, BookingForm, Fields, FileUpload};
use crate::utils::errors::{ApiError, Result};
use super::{found, owned_fields};

/// Multipart part name of the ID proof document
const ID_PROOF_PART: &str = "IdProofDocument";

#[derive(Debug, Clone)]
pub struct BookingRepository {
    client: ApiClient,
}

impl BookingRepository {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<Booking>> {
        self.client.fetch_list(&ApiRequest::get("EventBooking")).await
    }

    /// Bookings of the authenticated user, as resolved by the server
    pub async fn my_bookings(&self) -> Result<Vec<Booking>> {
        self.client.fetch_list(&ApiRequest::get("EventBooking/my-bookings")).await
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Booking>> {
        found(self.client.fetch(&ApiRequest::get(format!("EventBooking/{}", id))).await)
    }

    /// Create a booking and return the id the server assigned
    pub async fn create(&self, form: &BookingForm, id_proof: Option<FileUpload>) -> Result<i64> {
        let request = ApiRequest::post("EventBooking").multipart(
            owned_fields(form.to_fields(None)),
            id_proof.map(|file| (ID_PROOF_PART.to_string(), file)),
        );
        let value = self.client.send(&request).await?;
        created_booking_id(&value)
    }

    /// Re-submit every field of a booking
    pub async fn update(&self, id: i64, form: &BookingForm, id_proof: Option<FileUpload>) -> Result<Value> {
        let request = ApiRequest::patch(format!("EventBooking/{}", id)).multipart(
            owned_fields(form.to_fields(Some(id))),
            id_proof.map(|file| (ID_PROOF_PART.to_string(), file)),
        );
        self.client.send(&request).await
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        self.client.send(&ApiRequest::delete(format!("EventBooking/{}", id))).await?;
        Ok(())
    }
}

fn created_booking_id(value: &Value) -> Result<i64> {
    if let Some(id) = value.as_i64() {
        return Ok(id);
    }
    Fields::new(value, "EventBooking")?
        .i64(&["eventBookingId", "id"])
        .ok_or_else(|| ApiError::InvalidResponse("booking was created without an id".to_string()).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_created_booking_id_shapes() {
        assert_eq!(created_booking_id(&json!({"eventBookingId": 12})).unwrap(), 12);
        assert_eq!(created_booking_id(&json!({"EventBookingId": "13"})).unwrap(), 13);
        assert_eq!(created_booking_id(&json!({"id": 14})).unwrap(), 14);
        assert_eq!(created_booking_id(&json!(15)).unwrap(), 15);
    }

    #[test]
    fn test_missing_booking_id_is_an_error() {
        assert!(created_booking_id(&json!({"name": "Asha"})).is_err());
        assert!(created_booking_id(&Value::Null).is_err());
    }
}
