//! Dashboard aggregation
//!
//! Totals and six-month series for the admin and organizer dashboards.
//! Every list is fetched independently; a failed fetch counts as empty so
//! one broken endpoint never blanks the whole dashboard.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use futures::future::join4;
use tracing::warn;
use crate::api::ApiService;
use crate::models::{Booking, Payment, ScheduledEvent, User};
use crate::services::auth::require_session;
use crate::utils::errors::Result;

const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// One bar of a monthly chart
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyPoint {
    pub year: i32,
    pub month: u32,
    pub label: &'static str,
    pub value: f64,
}

/// The six calendar months ending with the month of `today`, oldest first
pub fn last_six_months(today: NaiveDate) -> Vec<(i32, u32)> {
    let current = today.year() * 12 + today.month0() as i32;
    (0..6)
        .rev()
        .map(|back| {
            let index = current - back;
            (index.div_euclid(12), index.rem_euclid(12) as u32 + 1)
        })
        .collect()
}

/// Sum `(timestamp, value)` pairs into the last six calendar months
pub fn monthly_series<I>(points: I, today: NaiveDate) -> Vec<MonthlyPoint>
where
    I: IntoIterator<Item = (DateTime<Utc>, f64)>,
{
    let mut series: Vec<MonthlyPoint> = last_six_months(today)
        .into_iter()
        .map(|(year, month)| MonthlyPoint {
            year,
            month,
            label: MONTH_NAMES[(month - 1) as usize],
            value: 0.0,
        })
        .collect();

    for (at, value) in points {
        if let Some(point) = series
            .iter_mut()
            .find(|p| p.year == at.year() && p.month == at.month())
        {
            point.value += value;
        }
    }

    series
}

#[derive(Debug, Clone, PartialEq)]
pub struct AdminStats {
    pub total_events: usize,
    pub total_users: usize,
    pub active_bookings: usize,
    pub total_revenue: f64,
    pub monthly_revenue: Vec<MonthlyPoint>,
}

impl AdminStats {
    pub fn compute(
        events: &[ScheduledEvent],
        users: &[User],
        bookings: &[Booking],
        payments: &[Payment],
        today: NaiveDate,
    ) -> Self {
        Self {
            total_events: events.len(),
            total_users: users.len(),
            active_bookings: bookings.iter().filter(|b| !b.is_cancelled).count(),
            total_revenue: payments.iter().map(|p| p.amount).sum(),
            monthly_revenue: monthly_series(
                payments.iter().filter_map(|p| p.paid_at().map(|at| (at, p.amount))),
                today,
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrganizerStats {
    pub total_events: usize,
    pub active_bookings: usize,
    pub total_revenue: f64,
    pub monthly_bookings: Vec<MonthlyPoint>,
}

impl OrganizerStats {
    /// `events` must already be restricted to the organizer
    pub fn compute(events: &[ScheduledEvent], bookings: &[Booking], payments: &[Payment], today: NaiveDate) -> Self {
        let active: Vec<&Booking> = bookings
            .iter()
            .filter(|b| !b.is_cancelled)
            .filter(|b| {
                b.schedule_event_id
                    .map(|id| events.iter().any(|e| e.schedule_event_id == id))
                    .unwrap_or(false)
            })
            .collect();

        let total_revenue: f64 = active.iter().filter_map(|b| b.schedule_event_fees).sum();

        let paid_dates = active.iter().filter_map(|b| {
            payments
                .iter()
                .find(|p| p.is_for_booking(b.event_booking_id))
                .and_then(Payment::paid_at)
                .map(|at| (at, 1.0))
        });

        Self {
            total_events: events.len(),
            active_bookings: active.len(),
            total_revenue,
            monthly_bookings: monthly_series(paid_dates, today),
        }
    }
}

#[derive(Debug, Clone)]
pub struct StatsService {
    api: ApiService,
}

impl StatsService {
    pub fn new(api: ApiService) -> Self {
        Self { api }
    }

    pub async fn admin_stats(&self) -> Result<AdminStats> {
        require_session(self.api.session(), "/admin")?;

        let (events, users, bookings, payments) = join4(
            self.api.events.list(),
            self.api.users.list(),
            self.api.bookings.list(),
            self.api.payments.list(),
        )
        .await;

        Ok(AdminStats::compute(
            &or_empty("events", events)?,
            &or_empty("users", users)?,
            &or_empty("bookings", bookings)?,
            &or_empty("payments", payments)?,
            Utc::now().date_naive(),
        ))
    }

    pub async fn organizer_stats(&self) -> Result<OrganizerStats> {
        let session = require_session(self.api.session(), "/organizer")?;

        let (events, bookings, payments) = futures::join!(
            self.api.events.list(),
            self.api.bookings.list(),
            self.api.payments.list()
        );

        let events: Vec<ScheduledEvent> = or_empty("events", events)?
            .into_iter()
            .filter(|e| session.user_id.is_some() && e.user_id == session.user_id)
            .collect();

        Ok(OrganizerStats::compute(
            &events,
            &or_empty("bookings", bookings)?,
            &or_empty("payments", payments)?,
            Utc::now().date_naive(),
        ))
    }
}

/// A failed list fetch counts as empty, unless the caller has to log in again
pub(crate) fn or_empty<T>(what: &str, result: Result<Vec<T>>) -> Result<Vec<T>> {
    match result {
        Ok(items) => Ok(items),
        Err(e) if e.requires_login() => Err(e),
        Err(e) => {
            warn!(list = what, error = %e, "Dashboard list unavailable, counting as empty");
            Ok(Vec::new())
        }
    }
}
