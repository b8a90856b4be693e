//! Public catalog commands

use std::io::Write;
use crate::services::{EventFilter, EventView, ServiceFactory};
use crate::utils::errors::Result;
use crate::utils::helpers::truncate_text;

pub async fn handle_events<W: Write>(services: &ServiceFactory, out: &mut W, filter: &EventFilter) -> Result<()> {
    let events = services.catalog_service.search(filter).await?;

    if events.is_empty() {
        writeln!(out, "No events found")?;
        return Ok(());
    }

    writeln!(out, "{:<6} {:<32} {:<12} {:<6} {:<10} {}", "ID", "EVENT", "DATE", "TIME", "FEE", "VENUE")?;
    for view in &events {
        writeln!(
            out,
            "{:<6} {:<32} {:<12} {:<6} {:<10} {}",
            view.event.schedule_event_id,
            truncate_text(&view.event.details, 32),
            view.date,
            view.time,
            view.fee,
            view.location
        )?;
    }
    writeln!(out, "\n{} event(s)", events.len())?;
    Ok(())
}

pub async fn handle_event_detail<W: Write>(services: &ServiceFactory, out: &mut W, event_id: i64) -> Result<()> {
    let view = services.catalog_service.detail(event_id).await?;
    write_event(out, &view)?;
    writeln!(out, "\nBook with: ticketdesk book {} --id-proof <file> ...", event_id)?;
    Ok(())
}

fn write_event<W: Write>(out: &mut W, view: &EventView) -> Result<()> {
    writeln!(out, "{}", view.event.details)?;
    writeln!(out, "Category  : {}", view.category)?;
    writeln!(out, "Date      : {} {}", view.date, view.time)?;
    writeln!(out, "Venue     : {}", view.location)?;
    writeln!(out, "Fee       : {}", view.fee)?;
    writeln!(out, "Organizer : {}", view.organizer)?;
    if !view.event.phone.is_empty() {
        writeln!(out, "Contact   : {}", view.event.phone)?;
    }
    if let Some(url) = &view.image_url {
        writeln!(out, "Image     : {}", url)?;
    }
    Ok(())
}
