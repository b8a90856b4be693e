//! Booking service implementation
//!
//! Creates bookings for logged-in users. A free event is confirmed on the
//! spot; a paid one continues to the payment page.

use std::fmt;
use tracing::{info, warn};
use crate::api::ApiService;
use crate::models::{BookingForm, FileUpload, ScheduledEvent};
use crate::services::auth::require_session;
use crate::utils::errors::{Result, TicketdeskError};
use crate::utils::helpers::is_accepted_id_proof;
use crate::utils::logging::log_booking_action;

pub const MISSING_ID_PROOF: &str = "Please upload your ID proof document.";

/// A booking form prefilled for one event
#[derive(Debug, Clone)]
pub struct BookingDraft {
    pub event_id: i64,
    /// `None` when the event could not be loaded
    pub event: Option<ScheduledEvent>,
    pub fee: f64,
    pub form: BookingForm,
}

/// What happens after a booking is created
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BookingOutcome {
    Confirmed { booking_id: i64 },
    PaymentRequired { booking_id: i64, amount: f64 },
}

impl BookingOutcome {
    pub fn booking_id(&self) -> i64 {
        match self {
            BookingOutcome::Confirmed { booking_id } => *booking_id,
            BookingOutcome::PaymentRequired { booking_id, .. } => *booking_id,
        }
    }

    /// Route of the page that follows
    pub fn next_path(&self) -> String {
        match self {
            BookingOutcome::Confirmed { .. } => "/my-bookings".to_string(),
            BookingOutcome::PaymentRequired { booking_id, .. } => format!("/payment/{}", booking_id),
        }
    }
}

impl fmt::Display for BookingOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookingOutcome::Confirmed { booking_id } => write!(f, "Booking #{} confirmed", booking_id),
            BookingOutcome::PaymentRequired { booking_id, .. } => {
                write!(f, "Booking #{} created, payment required", booking_id)
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct BookingService {
    api: ApiService,
}

impl BookingService {
    pub fn new(api: ApiService) -> Self {
        Self { api }
    }

    /// Open the booking form for an event. Requires a session.
    pub async fn start(&self, event_id: i64) -> Result<BookingDraft> {
        let session = require_session(self.api.session(), &format!("/booking/{}", event_id))?;

        let event = match self.api.events.find_by_id(event_id).await {
            Ok(event) => event,
            Err(e) if e.requires_login() => return Err(e),
            Err(e) => {
                warn!(event_id = event_id, error = %e, "Could not load event, assuming no fee");
                None
            }
        };
        let fee = event.as_ref().map(|e| e.fees).unwrap_or(0.0);

        Ok(BookingDraft {
            event_id,
            event,
            fee,
            form: BookingForm {
                email: session.email,
                schedule_event_id: event_id,
                ..Default::default()
            },
        })
    }

    /// Submit a filled draft with its ID proof document
    pub async fn submit(&self, draft: &BookingDraft, id_proof: Option<FileUpload>) -> Result<BookingOutcome> {
        let session = require_session(self.api.session(), &format!("/booking/{}", draft.event_id))?;

        let mut form = draft.form.clone();
        form.schedule_event_id = draft.event_id;
        form.is_cancelled = false;
        form.cancellation_date_time = None;
        form.id_proof_document_path = None;
        form.validate_for_attendee()?;

        let id_proof = id_proof.ok_or_else(|| TicketdeskError::Validation(MISSING_ID_PROOF.to_string()))?;
        if !is_accepted_id_proof(&id_proof.file_name) {
            return Err(TicketdeskError::Validation(
                "ID proof must be a PDF, JPG, JPEG or PNG file".to_string(),
            ));
        }

        let booking_id = self.api.bookings.create(&form, Some(id_proof)).await?;
        log_booking_action(booking_id, "created", Some(&session.email), None);

        let outcome = if draft.fee > 0.0 {
            BookingOutcome::PaymentRequired {
                booking_id,
                amount: draft.fee,
            }
        } else {
            BookingOutcome::Confirmed { booking_id }
        };

        info!(booking_id = booking_id, next = %outcome.next_path(), "Booking submitted");
        Ok(outcome)
    }
}
