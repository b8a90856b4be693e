//! Booking receipts
//!
//! A receipt joins a booking with its first payment and its event. The
//! amount always comes from the booking's own fee copy, falling back to
//! the event fee only when the booking has none.

use std::fmt;
use std::io::{self, Write};
use chrono::{DateTime, Utc};
use futures::join;
use crate::api::ApiService;
use crate::config::Settings;
use crate::models::{Booking, Payment, ScheduledEvent};
use crate::services::auth::require_session;
use crate::services::catalog::{EVENT_UNAVAILABLE, LOCATION_TBD};
use crate::utils::errors::{Result, TicketdeskError};
use crate::utils::helpers::{format_amount, format_date, format_time, format_timestamp};

/// Method shown when no payment record exists
pub const DEFAULT_METHOD: &str = "Online";
/// Transaction id shown when no payment record exists
pub const NO_TRANSACTION: &str = "N/A";

#[derive(Debug, Clone, PartialEq)]
pub struct Receipt {
    pub booking_id: i64,
    pub attendee_name: String,
    pub email: String,
    pub phone: String,
    pub event_details: String,
    pub event_date: String,
    pub event_time: String,
    pub location: String,
    pub amount: f64,
    pub currency_symbol: String,
    pub payment_method: String,
    pub payment_status: Option<String>,
    pub transaction_id: String,
    pub paid_at: Option<DateTime<Utc>>,
    pub issued_at: DateTime<Utc>,
}

impl Receipt {
    /// Assemble a receipt from already-fetched records
    pub fn assemble(
        booking: &Booking,
        payment: Option<&Payment>,
        event: Option<&ScheduledEvent>,
        currency_symbol: &str,
        issued_at: DateTime<Utc>,
    ) -> Self {
        let amount = booking.fee_or(event.map(|e| e.fees));

        let event_details = event
            .map(|e| e.details.clone())
            .filter(|d| !d.trim().is_empty())
            .or_else(|| booking.schedule_event_details.clone())
            .unwrap_or_else(|| EVENT_UNAVAILABLE.to_string());

        Self {
            booking_id: booking.event_booking_id,
            attendee_name: booking.name.clone(),
            email: booking.email.clone(),
            phone: booking.phone.clone(),
            event_details,
            event_date: event.map(|e| format_date(&e.start_date)).unwrap_or_else(|| "-".to_string()),
            event_time: event.map(|e| format_time(&e.start_time)).unwrap_or_else(|| "TBD".to_string()),
            location: event
                .and_then(|e| e.place_name.clone())
                .unwrap_or_else(|| LOCATION_TBD.to_string()),
            amount,
            currency_symbol: currency_symbol.to_string(),
            payment_method: payment
                .map(|p| p.payment_method.clone())
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_METHOD.to_string()),
            payment_status: payment.map(|p| p.payment_status.clone()).filter(|s| !s.is_empty()),
            transaction_id: payment
                .and_then(|p| p.transaction_id.clone())
                .unwrap_or_else(|| NO_TRANSACTION.to_string()),
            paid_at: payment.and_then(Payment::paid_at),
            issued_at,
        }
    }

    /// Write the printable receipt
    pub fn print_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        write!(writer, "{}", self)?;
        writer.flush()
    }
}

impl fmt::Display for Receipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(44);
        writeln!(f, "{}", rule)?;
        writeln!(f, "{:^44}", "BOOKING RECEIPT")?;
        writeln!(f, "{}", rule)?;
        writeln!(f, "Booking ID     : #{}", self.booking_id)?;
        writeln!(f, "Issued         : {}", format_timestamp(self.issued_at))?;
        writeln!(f)?;
        writeln!(f, "Attendee       : {}", self.attendee_name)?;
        writeln!(f, "Email          : {}", self.email)?;
        writeln!(f, "Phone          : {}", self.phone)?;
        writeln!(f)?;
        writeln!(f, "Event          : {}", self.event_details)?;
        writeln!(f, "Date           : {}", self.event_date)?;
        writeln!(f, "Time           : {}", self.event_time)?;
        writeln!(f, "Venue          : {}", self.location)?;
        writeln!(f)?;
        writeln!(f, "Amount         : {}", format_amount(&self.currency_symbol, self.amount))?;
        writeln!(f, "Payment method : {}", self.payment_method)?;
        writeln!(f, "Transaction ID : {}", self.transaction_id)?;
        if let Some(status) = &self.payment_status {
            writeln!(f, "Status         : {}", status)?;
        }
        if let Some(paid_at) = self.paid_at {
            writeln!(f, "Paid on        : {}", format_timestamp(paid_at))?;
        }
        writeln!(f, "{}", rule)?;
        writeln!(f, "{:^44}", "Thank you for your booking!")
    }
}

#[derive(Debug, Clone)]
pub struct ReceiptService {
    api: ApiService,
    currency_symbol: String,
}

impl ReceiptService {
    pub fn new(api: ApiService, settings: &Settings) -> Self {
        Self {
            api,
            currency_symbol: settings.payment.currency_symbol.clone(),
        }
    }

    pub async fn receipt(&self, booking_id: i64) -> Result<Receipt> {
        require_session(self.api.session(), &format!("/receipt/{}", booking_id))?;

        let booking = self
            .api
            .bookings
            .find_by_id(booking_id)
            .await?
            .ok_or(TicketdeskError::NotFound {
                entity: "Booking",
                id: booking_id,
            })?;

        let event_fetch = async {
            match booking.schedule_event_id {
                Some(id) => self.api.events.find_by_id(id).await.ok().flatten(),
                None => None,
            }
        };
        let (payments, mut event) = join!(self.api.payments.list(), event_fetch);

        let payment = payments
            .unwrap_or_default()
            .into_iter()
            .find(|p| p.is_for_booking(booking_id));

        if let Some(event) = event.as_mut() {
            if event.place_name.is_none() {
                if let Some(place_id) = event.place_id {
                    event.place_name = self.api.places.find_by_id(place_id).await.ok().flatten().map(|p| p.location());
                }
            }
        }

        Ok(Receipt::assemble(
            &booking,
            payment.as_ref(),
            event.as_ref(),
            &self.currency_symbol,
            Utc::now(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use crate::models::FromApi;

    fn booking(fee: Option<f64>) -> Booking {
        let mut value = json!({
            "eventBookingId": 41,
            "name": "Asha Rao",
            "email": "asha@example.com",
            "phone": "9876543210",
            "scheduleEventId": 9
        });
        if let Some(fee) = fee {
            value["scheduleEventFees"] = json!(fee);
        }
        Booking::from_api(&value).unwrap()
    }

    fn event(fee: f64) -> ScheduledEvent {
        ScheduledEvent::from_api(&json!({
            "scheduleEventId": 9,
            "details": "Jazz Night",
            "startDate": "2025-06-01",
            "startTime": "19:00:00",
            "fees": fee,
            "placeName": "Blue Hall"
        }))
        .unwrap()
    }

    #[test]
    fn test_amount_prefers_booking_fee_copy() {
        let receipt = Receipt::assemble(&booking(Some(150.0)), None, Some(&event(999.0)), "₹", Utc::now());
        assert_eq!(receipt.amount, 150.0);

        let fallback = Receipt::assemble(&booking(None), None, Some(&event(150.0)), "₹", Utc::now());
        assert_eq!(fallback.amount, 150.0);

        let zero_copy = Receipt::assemble(&booking(Some(0.0)), None, Some(&event(150.0)), "₹", Utc::now());
        assert_eq!(zero_copy.amount, 150.0);

        let free = Receipt::assemble(&booking(Some(0.0)), None, None, "₹", Utc::now());
        assert_eq!(free.amount, 0.0);
    }

    #[test]
    fn test_missing_payment_placeholders() {
        let receipt = Receipt::assemble(&booking(Some(150.0)), None, None, "₹", Utc::now());
        assert_eq!(receipt.payment_method, DEFAULT_METHOD);
        assert_eq!(receipt.transaction_id, NO_TRANSACTION);
        assert_eq!(receipt.event_details, EVENT_UNAVAILABLE);
    }

    #[test]
    fn test_printed_receipt() {
        let payment = Payment::from_api(&json!({
            "paymentId": 3,
            "eventBookingId": 41,
            "amount": "150",
            "paymentMethod": "UPI",
            "paymentStatus": "Success",
            "transactionId": "TXN1717000000000"
        }))
        .unwrap();
        let receipt = Receipt::assemble(&booking(Some(150.0)), Some(&payment), Some(&event(150.0)), "₹", Utc::now());

        let mut out = Vec::new();
        receipt.print_to(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Asha Rao"));
        assert!(text.contains("Jazz Night"));
        assert!(text.contains("₹150"));
        assert!(text.contains("UPI"));
        assert!(text.contains("TXN1717000000000"));
        assert!(text.contains("01-06-2025"));
    }
}
