//! User dashboard and booking cancellation

use std::fmt;
use chrono::Utc;
use futures::join;
use tracing::{debug, info};
use crate::api::ApiService;
use crate::config::Settings;
use crate::models::{Booking, BookingForm, Payment, ScheduledEvent};
use crate::services::auth::require_session;
use crate::services::catalog::EVENT_UNAVAILABLE;
use crate::services::stats::or_empty;
use crate::utils::errors::{Result, TicketdeskError};
use crate::utils::helpers::{fee_label, format_date};
use crate::utils::logging::log_booking_action;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingStatus {
    Cancelled,
    Paid,
    PendingPayment,
    /// Free booking, nothing to pay
    Confirmed,
}

impl BookingStatus {
    pub fn derive(booking: &Booking, payments: &[Payment], fee: f64) -> Self {
        if booking.is_cancelled {
            BookingStatus::Cancelled
        } else if payments.iter().any(|p| p.is_for_booking(booking.event_booking_id)) {
            BookingStatus::Paid
        } else if fee > 0.0 {
            BookingStatus::PendingPayment
        } else {
            BookingStatus::Confirmed
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BookingStatus::Cancelled => "CANCELLED",
            BookingStatus::Paid => "PAID",
            BookingStatus::PendingPayment => "PENDING PAYMENT",
            BookingStatus::Confirmed => "CONFIRMED",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One row of the "my bookings" table
#[derive(Debug, Clone, PartialEq)]
pub struct BookingSummary {
    pub booking: Booking,
    pub event_details: String,
    pub event_date: String,
    pub fee: f64,
    pub fee_label: String,
    pub status: BookingStatus,
}

impl BookingSummary {
    pub fn new(booking: Booking, events: &[ScheduledEvent], payments: &[Payment], currency_symbol: &str) -> Self {
        let event = booking
            .schedule_event_id
            .and_then(|id| events.iter().find(|e| e.schedule_event_id == id));

        let fee = booking.fee_or(event.map(|e| e.fees));
        let status = BookingStatus::derive(&booking, payments, fee);
        let event_details = event
            .map(|e| e.details.clone())
            .or_else(|| booking.schedule_event_details.clone())
            .unwrap_or_else(|| EVENT_UNAVAILABLE.to_string());
        let event_date = event.map(|e| format_date(&e.start_date)).unwrap_or_else(|| "-".to_string());

        Self {
            booking,
            event_details,
            event_date,
            fee,
            fee_label: fee_label(currency_symbol, fee),
            status,
        }
    }

    /// Unpaid, uncancelled bookings of paid events can still be paid
    pub fn can_pay(&self) -> bool {
        self.status == BookingStatus::PendingPayment
    }

    pub fn can_cancel(&self) -> bool {
        self.status != BookingStatus::Cancelled
    }
}

#[derive(Debug, Clone)]
pub struct DashboardService {
    api: ApiService,
    currency_symbol: String,
}

impl DashboardService {
    pub fn new(api: ApiService, settings: &Settings) -> Self {
        Self {
            api,
            currency_symbol: settings.payment.currency_symbol.clone(),
        }
    }

    /// Bookings of the logged-in user with their derived status
    pub async fn my_bookings(&self) -> Result<Vec<BookingSummary>> {
        let session = require_session(self.api.session(), "/my-bookings")?;

        let bookings = match self.api.bookings.my_bookings().await {
            Ok(bookings) => bookings,
            Err(TicketdeskError::Api(e)) if e.is_variant_rejection() => {
                debug!(status = ?e.status(), "my-bookings endpoint unavailable, filtering all bookings");
                self.api
                    .bookings
                    .list()
                    .await?
                    .into_iter()
                    .filter(|b| b.is_owned_by(&session.email))
                    .collect()
            }
            Err(e) => return Err(e),
        };

        let (events, payments) = join!(self.api.events.list(), self.api.payments.list());
        let events = or_empty("events", events)?;
        let payments = or_empty("payments", payments)?;

        Ok(bookings
            .into_iter()
            .map(|b| BookingSummary::new(b, &events, &payments, &self.currency_symbol))
            .collect())
    }

    /// Cancel one of the user's own bookings
    pub async fn cancel(&self, booking_id: i64) -> Result<Booking> {
        let session = require_session(self.api.session(), "/my-bookings")?;

        let booking = self
            .api
            .bookings
            .find_by_id(booking_id)
            .await?
            .ok_or(TicketdeskError::NotFound {
                entity: "Booking",
                id: booking_id,
            })?;

        if !booking.is_owned_by(&session.email) {
            return Err(TicketdeskError::PermissionDenied(
                "You can only cancel your own bookings".to_string(),
            ));
        }
        if booking.is_cancelled {
            return Err(TicketdeskError::BookingCancelled { booking_id });
        }

        let mut form = BookingForm::from_booking(&booking);
        form.is_cancelled = true;
        form.cancellation_date_time = Some(Utc::now());

        self.api.bookings.update(booking_id, &form, None).await?;
        log_booking_action(booking_id, "cancelled", Some(&session.email), None);

        let refreshed = self.api.bookings.find_by_id(booking_id).await.ok().flatten();
        let cancelled = match refreshed {
            Some(b) if b.is_cancelled => b,
            _ => Booking {
                is_cancelled: true,
                cancellation_date_time: form.cancellation_date_time.map(|t| t.to_rfc3339()),
                ..booking
            },
        };

        info!(booking_id = booking_id, "Booking cancelled");
        Ok(cancelled)
    }
}
