//! Booking, payment and receipt commands

use std::io::Write;
use crate::models::{BookingForm, FileUpload};
use crate::services::{BookingOutcome, PaymentDetails, ServiceFactory};
use crate::utils::errors::Result;
use crate::utils::helpers::format_amount;

/// Attendee details entered on the booking form
#[derive(Debug, Clone, Default)]
pub struct AttendeeInput {
    pub name: String,
    /// Defaults to the session email
    pub email: Option<String>,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub country: String,
}

impl AttendeeInput {
    fn apply(self, form: &mut BookingForm) {
        form.name = self.name;
        if let Some(email) = self.email {
            form.email = email;
        }
        form.phone = self.phone;
        form.address = self.address;
        form.city = self.city;
        form.state = self.state;
        form.country = self.country;
    }
}

pub async fn handle_book<W: Write>(
    services: &ServiceFactory,
    out: &mut W,
    event_id: i64,
    attendee: AttendeeInput,
    id_proof: Option<FileUpload>,
) -> Result<()> {
    let mut draft = services.booking_service.start(event_id).await?;
    attendee.apply(&mut draft.form);

    let outcome = services.booking_service.submit(&draft, id_proof).await?;
    writeln!(out, "{}", outcome)?;
    if let BookingOutcome::PaymentRequired { booking_id, amount } = outcome {
        writeln!(out, "Amount due: {}", format_amount(services.payment_currency(), amount))?;
        writeln!(out, "Pay with: ticketdesk pay {} --method <card|qr|netbanking>", booking_id)?;
    }
    writeln!(out, "Next: {}", outcome.next_path())?;
    Ok(())
}

pub async fn handle_pay<W: Write>(
    services: &ServiceFactory,
    out: &mut W,
    booking_id: i64,
    details: &PaymentDetails,
) -> Result<()> {
    let confirmation = services.payment_service.pay(booking_id, details).await?;
    writeln!(out, "Payment successful")?;
    writeln!(out, "Amount         : {}", format_amount(services.payment_currency(), confirmation.amount))?;
    writeln!(out, "Method         : {}", confirmation.method)?;
    writeln!(out, "Transaction ID : {}", confirmation.transaction_id)?;
    writeln!(out, "Next: {}", confirmation.next_path())?;
    Ok(())
}

pub async fn handle_receipt<W: Write>(services: &ServiceFactory, out: &mut W, booking_id: i64) -> Result<()> {
    let receipt = services.receipt_service.receipt(booking_id).await?;
    receipt.print_to(out)?;
    Ok(())
}

pub async fn handle_my_bookings<W: Write>(services: &ServiceFactory, out: &mut W) -> Result<()> {
    let bookings = services.dashboard_service.my_bookings().await?;

    if bookings.is_empty() {
        writeln!(out, "You have no bookings yet")?;
        return Ok(());
    }

    writeln!(out, "{:<6} {:<30} {:<12} {:<10} {}", "ID", "EVENT", "DATE", "FEE", "STATUS")?;
    for summary in &bookings {
        writeln!(
            out,
            "{:<6} {:<30} {:<12} {:<10} {}",
            summary.booking.event_booking_id,
            summary.event_details,
            summary.event_date,
            summary.fee_label,
            summary.status
        )?;
    }
    Ok(())
}

pub async fn handle_cancel<W: Write>(services: &ServiceFactory, out: &mut W, booking_id: i64) -> Result<()> {
    let booking = services.dashboard_service.cancel(booking_id).await?;
    writeln!(out, "Booking #{} cancelled", booking.event_booking_id)?;
    if let Some(at) = &booking.cancellation_date_time {
        writeln!(out, "Cancelled at: {}", at)?;
    }
    Ok(())
}
