//! Public event catalog
//!
//! Listing, searching and detail views of scheduled events, joined with
//! their place and category names.

use tracing::debug;
use crate::api::ApiService;
use crate::config::Settings;
use crate::models::{EventCategory, ScheduledEvent};
use crate::utils::errors::{Result, TicketdeskError};
use crate::utils::helpers::{fee_label, format_date, format_time, resolve_upload_url};

pub const LOCATION_TBD: &str = "Location TBD";
pub const UNCATEGORISED: &str = "Uncategorised";
pub const UNKNOWN_ORGANIZER: &str = "Unknown organizer";
pub const EVENT_UNAVAILABLE: &str = "Event unavailable";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PriceFilter {
    #[default]
    Any,
    Free,
    Paid,
}

/// Search criteria; every unset criterion matches everything
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    pub text: Option<String>,
    pub category_id: Option<i64>,
    pub place_id: Option<i64>,
    pub price: PriceFilter,
}

impl EventFilter {
    pub fn matches(&self, event: &ScheduledEvent) -> bool {
        if let Some(category_id) = self.category_id {
            if event.event_category_id != Some(category_id) {
                return false;
            }
        }
        if let Some(place_id) = self.place_id {
            if event.place_id != Some(place_id) {
                return false;
            }
        }
        match self.price {
            PriceFilter::Free if !event.is_free() => return false,
            PriceFilter::Paid if event.is_free() => return false,
            _ => {}
        }

        match self.text.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            None => true,
            Some(text) => {
                let needle = text.to_lowercase();
                [
                    Some(event.details.as_str()),
                    event.place_name.as_deref(),
                    event.event_category_name.as_deref(),
                    Some(event.contact_name.as_str()),
                ]
                .into_iter()
                .flatten()
                .any(|haystack| haystack.to_lowercase().contains(&needle))
            }
        }
    }
}

/// An event with everything a listing or detail page displays
#[derive(Debug, Clone, PartialEq)]
pub struct EventView {
    pub event: ScheduledEvent,
    pub date: String,
    pub time: String,
    pub fee: String,
    pub location: String,
    pub category: String,
    pub organizer: String,
    pub image_url: Option<String>,
}

impl EventView {
    pub fn new(event: ScheduledEvent, currency_symbol: &str, uploads_url: &str) -> Self {
        let date = format_date(&event.start_date);
        let time = format_time(&event.start_time);
        let fee = fee_label(currency_symbol, event.fees);
        let location = event.place_name.clone().unwrap_or_else(|| LOCATION_TBD.to_string());
        let category = event
            .event_category_name
            .clone()
            .unwrap_or_else(|| UNCATEGORISED.to_string());
        let organizer = if event.contact_name.trim().is_empty() {
            UNKNOWN_ORGANIZER.to_string()
        } else {
            event.contact_name.clone()
        };
        let image_url = event
            .image_path
            .as_deref()
            .map(|path| resolve_upload_url(uploads_url, path));

        Self {
            event,
            date,
            time,
            fee,
            location,
            category,
            organizer,
            image_url,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CatalogService {
    api: ApiService,
    currency_symbol: String,
    uploads_url: String,
}

impl CatalogService {
    pub fn new(api: ApiService, settings: &Settings) -> Self {
        Self {
            api,
            currency_symbol: settings.payment.currency_symbol.clone(),
            uploads_url: settings.api.uploads_url.clone(),
        }
    }

    pub async fn search(&self, filter: &EventFilter) -> Result<Vec<EventView>> {
        let events = self.api.events_with_names().await?;
        let total = events.len();

        let views: Vec<EventView> = events
            .into_iter()
            .filter(|event| filter.matches(event))
            .map(|event| self.view(event))
            .collect();

        debug!(total = total, matched = views.len(), "Event search");
        Ok(views)
    }

    pub async fn detail(&self, event_id: i64) -> Result<EventView> {
        let mut event = self
            .api
            .events
            .find_by_id(event_id)
            .await?
            .ok_or(TicketdeskError::NotFound {
                entity: "Event",
                id: event_id,
            })?;

        if event.place_name.is_none() {
            if let Some(place_id) = event.place_id {
                event.place_name = self.api.places.find_by_id(place_id).await.ok().flatten().map(|p| p.location());
            }
        }
        if event.event_category_name.is_none() {
            if let Some(category_id) = event.event_category_id {
                event.event_category_name = self
                    .api
                    .categories
                    .find_by_id(category_id)
                    .await
                    .ok()
                    .flatten()
                    .map(|c| c.name);
            }
        }

        Ok(self.view(event))
    }

    pub async fn categories(&self) -> Result<Vec<EventCategory>> {
        self.api.categories.list().await
    }

    pub fn view(&self, event: ScheduledEvent) -> EventView {
        EventView::new(event, &self.currency_symbol, &self.uploads_url)
    }
}
