//! Payment model

use std::fmt;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use crate::models::form::RequiredFields;
use crate::models::normalize::{Fields, FromApi};
use crate::utils::errors::{TicketdeskError, Result};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub payment_id: i64,
    pub event_booking_id: Option<i64>,
    pub amount: f64,
    pub payment_method: String,
    pub payment_status: String,
    pub transaction_id: Option<String>,
    pub payment_date: Option<String>,
}

impl Payment {
    pub fn is_for_booking(&self, booking_id: i64) -> bool {
        self.event_booking_id == Some(booking_id)
    }

    pub fn paid_at(&self) -> Option<DateTime<Utc>> {
        let raw = self.payment_date.as_deref()?;
        DateTime::parse_from_rfc3339(raw)
            .map(|d| d.with_timezone(&Utc))
            .or_else(|_| {
                chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
                    .map(|naive| naive.and_utc())
            })
            .ok()
    }
}

impl FromApi for Payment {
    const ENTITY: &'static str = "Payment";

    fn from_api(value: &Value) -> Result<Self> {
        let f = Fields::new(value, Self::ENTITY)?;
        Ok(Self {
            payment_id: f.required_id(&["paymentId", "id"])?,
            event_booking_id: f.i64(&["eventBookingId"]),
            // Unparseable amounts count as zero
            amount: f.f64(&["amount"]).unwrap_or(0.0),
            payment_method: f.string_or_default(&["paymentMethod"]),
            payment_status: f.string_or_default(&["paymentStatus"]),
            transaction_id: f.non_empty(&["transactionId"]),
            payment_date: f.non_empty(&["paymentDate"]),
        })
    }
}

/// Payment method chosen at checkout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    Card,
    /// Scan-to-pay QR code, recorded as UPI
    Qr,
    NetBanking,
    Cash,
}

impl PaymentMethod {
    /// Name recorded on the payment; the server validator accepts "UPI" but not "QR"
    pub fn api_name(&self) -> &'static str {
        match self {
            PaymentMethod::Card => "Card",
            PaymentMethod::Qr => "UPI",
            PaymentMethod::NetBanking => "Net Banking",
            PaymentMethod::Cash => "Cash",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().replace(['-', '_'], " ").as_str() {
            "card" | "credit card" | "debit card" => Some(PaymentMethod::Card),
            "qr" | "upi" => Some(PaymentMethod::Qr),
            "net banking" | "netbanking" => Some(PaymentMethod::NetBanking),
            "cash" => Some(PaymentMethod::Cash),
            _ => None,
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.api_name())
    }
}

/// Body for `POST /Payment` and `POST /Payment/make-payment`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    pub event_booking_id: i64,
    pub amount: f64,
    pub payment_method: String,
    pub payment_status: String,
    pub payment_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
}

/// Back-office create/edit form for a payment record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentForm {
    pub event_booking_id: i64,
    #[serde(default)]
    pub amount: f64,
    pub payment_method: String,
    pub payment_status: String,
    pub payment_date: DateTime<Utc>,
    #[serde(default)]
    pub transaction_id: Option<String>,
}

impl PaymentForm {
    pub fn validate(&self) -> Result<()> {
        RequiredFields::new()
            .id("Booking", Some(self.event_booking_id))
            .text("Payment method", &self.payment_method)
            .text("Payment status", &self.payment_status)
            .check()?;

        if self.amount < 0.0 {
            return Err(TicketdeskError::Validation("Amount cannot be negative".to_string()));
        }

        Ok(())
    }

    pub fn to_request(&self) -> PaymentRequest {
        PaymentRequest {
            event_booking_id: self.event_booking_id,
            amount: self.amount,
            payment_method: self.payment_method.clone(),
            payment_status: self.payment_status.clone(),
            payment_date: self.payment_date.to_rfc3339_opts(SecondsFormat::Millis, true),
            transaction_id: self.transaction_id.clone(),
        }
    }
}
