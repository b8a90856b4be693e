//! Role dashboards

use std::io::Write;
use crate::services::{Destination, MonthlyPoint, ServiceFactory};
use crate::utils::errors::Result;
use crate::utils::helpers::format_amount;
use super::bookings::handle_my_bookings;

/// Show the dashboard for the role of the active session
pub async fn handle_dashboard<W: Write>(services: &ServiceFactory, out: &mut W) -> Result<()> {
    let session = services.auth_service.require_session("/dashboard")?;
    let currency = services.payment_currency();

    match Destination::for_role(&session.role) {
        Destination::AdminDashboard => {
            let stats = services.stats_service.admin_stats().await?;
            writeln!(out, "Admin dashboard")?;
            writeln!(out, "Total events    : {}", stats.total_events)?;
            writeln!(out, "Total users     : {}", stats.total_users)?;
            writeln!(out, "Active bookings : {}", stats.active_bookings)?;
            writeln!(out, "Total revenue   : {}", format_amount(currency, stats.total_revenue))?;
            write_series(out, "Monthly revenue", &stats.monthly_revenue, |v| format_amount(currency, v))?;
        }
        Destination::OrganizerDashboard => {
            let stats = services.stats_service.organizer_stats().await?;
            writeln!(out, "Organizer dashboard")?;
            writeln!(out, "My events       : {}", stats.total_events)?;
            writeln!(out, "Active bookings : {}", stats.active_bookings)?;
            writeln!(out, "Revenue         : {}", format_amount(currency, stats.total_revenue))?;
            write_series(out, "Monthly bookings", &stats.monthly_bookings, |v| format!("{}", v as i64))?;
        }
        Destination::UserDashboard => handle_my_bookings(services, out).await?,
    }
    Ok(())
}

fn write_series<W: Write>(
    out: &mut W,
    title: &str,
    series: &[MonthlyPoint],
    render: impl Fn(f64) -> String,
) -> Result<()> {
    writeln!(out, "\n{}", title)?;
    for point in series {
        writeln!(out, "  {} {} : {}", point.label, point.year, render(point.value))?;
    }
    Ok(())
}
