//! API service layer
//!
//! This module bundles every resource repository behind one handle and
//! offers the cross-resource lookups several features share

use futures::future::join3;
use crate::api::{ApiClient, AuthRepository, BookingRepository, CategoryRepository, EventRepository, PaymentRepository, PlaceRepository, UserRepository};
use crate::models::ScheduledEvent;
use crate::state::SessionContext;
use crate::utils::errors::Result;

#[derive(Debug, Clone)]
pub struct ApiService {
    pub auth: AuthRepository,
    pub users: UserRepository,
    pub categories: CategoryRepository,
    pub places: PlaceRepository,
    pub events: EventRepository,
    pub bookings: BookingRepository,
    pub payments: PaymentRepository,
    client: ApiClient,
}

impl ApiService {
    pub fn new(client: ApiClient) -> Self {
        Self {
            auth: AuthRepository::new(client.clone()),
            users: UserRepository::new(client.clone()),
            categories: CategoryRepository::new(client.clone()),
            places: PlaceRepository::new(client.clone()),
            events: EventRepository::new(client.clone()),
            bookings: BookingRepository::new(client.clone()),
            payments: PaymentRepository::new(client.clone()),
            client,
        }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn session(&self) -> &SessionContext {
        self.client.session()
    }

    /// Scheduled events with place locations and category names filled in
    /// from the reference lists when the event payload does not carry them
    pub async fn events_with_names(&self) -> Result<Vec<ScheduledEvent>> {
        let (events, places, categories) = join3(
            self.events.list(),
            self.places.list(),
            self.categories.list(),
        )
        .await;

        let mut events = events?;
        // Names are decoration; a failed reference fetch leaves them unset
        let places = places.unwrap_or_default();
        let categories = categories.unwrap_or_default();

        for event in &mut events {
            if event.place_name.is_none() {
                event.place_name = event
                    .place_id
                    .and_then(|id| places.iter().find(|p| p.place_id == id))
                    .map(|p| p.location());
            }
            if event.event_category_name.is_none() {
                event.event_category_name = event
                    .event_category_id
                    .and_then(|id| categories.iter().find(|c| c.event_category_id == id))
                    .map(|c| c.name.clone());
            }
        }

        Ok(events)
    }
}
