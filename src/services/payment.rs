//! Payment service implementation
//!
//! Simulated checkout: the card, QR and net-banking screens collect details
//! for show, the server pre-checks the payment, and a payment record with
//! the configured success status is stored. No gateway is contacted.

use chrono::{SecondsFormat, Utc};
use tracing::info;
use crate::api::ApiService;
use crate::config::Settings;
use crate::models::{Booking, Fields, PaymentMethod, PaymentRequest, ScheduledEvent};
use crate::services::auth::require_session;
use crate::utils::errors::{Result, TicketdeskError};
use crate::utils::helpers::generate_transaction_id;
use crate::utils::logging::log_payment;

/// Details entered on the checkout screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentDetails {
    Card {
        holder: String,
        number: String,
        expiry: String,
        cvv: String,
    },
    Qr,
    NetBanking {
        bank: String,
    },
}

impl PaymentDetails {
    pub fn method(&self) -> PaymentMethod {
        match self {
            PaymentDetails::Card { .. } => PaymentMethod::Card,
            PaymentDetails::Qr => PaymentMethod::Qr,
            PaymentDetails::NetBanking { .. } => PaymentMethod::NetBanking,
        }
    }

    /// Form checks only; nothing here is sent anywhere
    pub fn validate(&self) -> Result<()> {
        match self {
            PaymentDetails::Card { holder, number, expiry, cvv } => {
                if holder.trim().is_empty() {
                    return Err(TicketdeskError::Validation("Card holder name is required".to_string()));
                }
                let digits: String = number.chars().filter(|c| !c.is_whitespace()).collect();
                if digits.len() != 16 || !digits.chars().all(|c| c.is_ascii_digit()) {
                    return Err(TicketdeskError::Validation("Card number must be 16 digits".to_string()));
                }
                if !is_valid_expiry(expiry) {
                    return Err(TicketdeskError::Validation("Expiry must be in MM/YY format".to_string()));
                }
                if !(3..=4).contains(&cvv.len()) || !cvv.chars().all(|c| c.is_ascii_digit()) {
                    return Err(TicketdeskError::Validation("CVV must be 3 or 4 digits".to_string()));
                }
                Ok(())
            }
            PaymentDetails::Qr => Ok(()),
            PaymentDetails::NetBanking { bank } => {
                if bank.trim().is_empty() {
                    return Err(TicketdeskError::Validation("Please select your bank".to_string()));
                }
                Ok(())
            }
        }
    }
}

fn is_valid_expiry(expiry: &str) -> bool {
    match expiry.split_once('/') {
        Some((month, year)) if month.len() == 2 && year.len() == 2 => {
            year.chars().all(|c| c.is_ascii_digit())
                && matches!(month.parse::<u32>(), Ok(1..=12))
        }
        _ => false,
    }
}

/// Amount due for a booking
#[derive(Debug, Clone)]
pub struct PaymentQuote {
    pub booking: Booking,
    pub event: Option<ScheduledEvent>,
    pub amount: f64,
}

/// A stored simulated payment
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentConfirmation {
    pub booking_id: i64,
    pub payment_id: Option<i64>,
    pub transaction_id: String,
    pub amount: f64,
    pub method: PaymentMethod,
}

impl PaymentConfirmation {
    pub fn next_path(&self) -> String {
        format!("/receipt/{}", self.booking_id)
    }
}

#[derive(Debug, Clone)]
pub struct PaymentService {
    api: ApiService,
    success_status: String,
}

impl PaymentService {
    pub fn new(api: ApiService, settings: &Settings) -> Self {
        Self {
            api,
            success_status: settings.payment.success_status.clone(),
        }
    }

    /// Amount due: the booking's fee copy, else the event's fee
    pub async fn quote(&self, booking_id: i64) -> Result<PaymentQuote> {
        require_session(self.api.session(), &format!("/payment/{}", booking_id))?;

        let booking = self
            .api
            .bookings
            .find_by_id(booking_id)
            .await?
            .ok_or(TicketdeskError::NotFound {
                entity: "Booking",
                id: booking_id,
            })?;

        if booking.is_cancelled {
            return Err(TicketdeskError::BookingCancelled { booking_id });
        }

        let event = match booking.schedule_event_id {
            Some(event_id) => self.api.events.find_by_id(event_id).await.ok().flatten(),
            None => None,
        };

        let amount = booking.fee_or(event.as_ref().map(|e| e.fees));

        Ok(PaymentQuote { booking, event, amount })
    }

    /// Run the simulated checkout for a booking
    pub async fn pay(&self, booking_id: i64, details: &PaymentDetails) -> Result<PaymentConfirmation> {
        details.validate()?;
        let quote = self.quote(booking_id).await?;

        let now = Utc::now();
        let transaction_id = generate_transaction_id(now);
        let method = details.method();
        let request = PaymentRequest {
            event_booking_id: booking_id,
            amount: quote.amount,
            payment_method: method.api_name().to_string(),
            payment_status: self.success_status.clone(),
            payment_date: now.to_rfc3339_opts(SecondsFormat::Millis, true),
            transaction_id: Some(transaction_id.clone()),
        };

        self.api.payments.make_payment(&request).await?;
        let created = self.api.payments.create(&request).await?;

        let payment_id = created.as_i64().or_else(|| {
            Fields::new(&created, "Payment")
                .ok()
                .and_then(|f| f.i64(&["paymentId", "id"]))
        });

        log_payment(booking_id, quote.amount, method.api_name(), &transaction_id);
        info!(booking_id = booking_id, payment_id = ?payment_id, "Payment recorded");

        Ok(PaymentConfirmation {
            booking_id,
            payment_id,
            transaction_id,
            amount: quote.amount,
            method,
        })
    }
}
