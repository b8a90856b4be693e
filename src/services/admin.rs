//! Back-office service implementation
//!
//! List, show, create, update and delete for every resource. Forms are
//! checked before anything is sent, and each mutation returns the list
//! as refetched from the server.

use std::fmt;
use std::str::FromStr;
use crate::api::ApiService;
use crate::models::{
    Booking, BookingForm, CategoryForm, EventCategory, FileUpload, Payment, PaymentForm, Place, PlaceForm,
    ScheduledEvent, ScheduledEventForm, User, UserForm,
};
use crate::services::auth::AuthService;
use crate::state::Session;
use crate::utils::errors::{Result, TicketdeskError};
use crate::utils::logging::log_admin_action;

/// Back-office resources
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Users,
    Categories,
    Places,
    Events,
    Bookings,
    Payments,
}

impl Resource {
    pub const ALL: [Resource; 6] = [
        Resource::Users,
        Resource::Categories,
        Resource::Places,
        Resource::Events,
        Resource::Bookings,
        Resource::Payments,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Resource::Users => "users",
            Resource::Categories => "categories",
            Resource::Places => "places",
            Resource::Events => "events",
            Resource::Bookings => "bookings",
            Resource::Payments => "payments",
        }
    }

    /// Singular entity name used in errors
    pub fn entity(&self) -> &'static str {
        match self {
            Resource::Users => "User",
            Resource::Categories => "Category",
            Resource::Places => "Place",
            Resource::Events => "Event",
            Resource::Bookings => "Booking",
            Resource::Payments => "Payment",
        }
    }

    /// Organizers manage their own catalog; everything else is admin-only
    pub fn organizer_allowed(&self) -> bool {
        matches!(self, Resource::Categories | Resource::Places | Resource::Events)
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Resource {
    type Err = TicketdeskError;

    fn from_str(value: &str) -> Result<Self> {
        let value = value.trim().to_lowercase();
        Resource::ALL
            .into_iter()
            .find(|r| r.name() == value || r.entity().to_lowercase() == value)
            .ok_or_else(|| TicketdeskError::InvalidInput(format!("Unknown resource: {}", value)))
    }
}

/// Map the final rejection of a delete into a not-found error
fn deleted(result: Result<()>, resource: Resource, id: i64) -> Result<()> {
    match result {
        Err(TicketdeskError::Api(e)) if e.status() == Some(404) => Err(TicketdeskError::NotFound {
            entity: resource.entity(),
            id,
        }),
        other => other,
    }
}

fn not_found(resource: Resource, id: i64) -> TicketdeskError {
    TicketdeskError::NotFound {
        entity: resource.entity(),
        id,
    }
}

#[derive(Debug, Clone)]
pub struct AdminService {
    api: ApiService,
    auth: AuthService,
}

impl AdminService {
    pub fn new(api: ApiService, auth: AuthService) -> Self {
        Self { api, auth }
    }

    fn authorize(&self, resource: Resource) -> Result<Session> {
        let redirect = format!("/admin/{}", resource.name());
        if resource.organizer_allowed() {
            self.auth.require_staff(&redirect)
        } else {
            self.auth.require_admin(&redirect)
        }
    }

    fn audit(&self, resource: Resource, action: &str, id: Option<i64>, session: &Session) {
        log_admin_action(resource.name(), action, id, Some(&session.email));
    }

    // Users

    pub async fn list_users(&self) -> Result<Vec<User>> {
        self.authorize(Resource::Users)?;
        self.api.users.list().await
    }

    pub async fn get_user(&self, id: i64) -> Result<User> {
        self.authorize(Resource::Users)?;
        self.api.users.find_by_id(id).await?.ok_or_else(|| not_found(Resource::Users, id))
    }

    pub async fn create_user(&self, form: &UserForm) -> Result<Vec<User>> {
        let session = self.authorize(Resource::Users)?;
        form.validate()?;
        self.api.users.create(form).await?;
        self.audit(Resource::Users, "create", None, &session);
        self.api.users.list().await
    }

    pub async fn update_user(&self, id: i64, form: &UserForm) -> Result<Vec<User>> {
        let session = self.authorize(Resource::Users)?;
        form.validate()?;
        self.api.users.update(id, form).await?;
        self.audit(Resource::Users, "update", Some(id), &session);
        self.api.users.list().await
    }

    pub async fn delete_user(&self, id: i64) -> Result<Vec<User>> {
        let session = self.authorize(Resource::Users)?;
        deleted(self.api.users.delete(id).await, Resource::Users, id)?;
        self.audit(Resource::Users, "delete", Some(id), &session);
        self.api.users.list().await
    }

    // Categories

    pub async fn list_categories(&self) -> Result<Vec<EventCategory>> {
        self.authorize(Resource::Categories)?;
        self.api.categories.list().await
    }

    pub async fn get_category(&self, id: i64) -> Result<EventCategory> {
        self.authorize(Resource::Categories)?;
        self.api
            .categories
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found(Resource::Categories, id))
    }

    pub async fn create_category(&self, form: &CategoryForm) -> Result<Vec<EventCategory>> {
        let session = self.authorize(Resource::Categories)?;
        form.validate()?;
        self.api.categories.create(form).await?;
        self.audit(Resource::Categories, "create", None, &session);
        self.api.categories.list().await
    }

    pub async fn update_category(&self, id: i64, form: &CategoryForm) -> Result<Vec<EventCategory>> {
        let session = self.authorize(Resource::Categories)?;
        form.validate()?;
        self.api.categories.update(id, form).await?;
        self.audit(Resource::Categories, "update", Some(id), &session);
        self.api.categories.list().await
    }

    pub async fn delete_category(&self, id: i64) -> Result<Vec<EventCategory>> {
        let session = self.authorize(Resource::Categories)?;
        deleted(self.api.categories.delete(id).await, Resource::Categories, id)?;
        self.audit(Resource::Categories, "delete", Some(id), &session);
        self.api.categories.list().await
    }

    // Places

    pub async fn list_places(&self) -> Result<Vec<Place>> {
        self.authorize(Resource::Places)?;
        self.api.places.list().await
    }

    pub async fn get_place(&self, id: i64) -> Result<Place> {
        self.authorize(Resource::Places)?;
        self.api.places.find_by_id(id).await?.ok_or_else(|| not_found(Resource::Places, id))
    }

    pub async fn create_place(&self, form: &PlaceForm) -> Result<Vec<Place>> {
        let session = self.authorize(Resource::Places)?;
        form.validate()?;
        self.api.places.create(form).await?;
        self.audit(Resource::Places, "create", None, &session);
        self.api.places.list().await
    }

    pub async fn update_place(&self, id: i64, form: &PlaceForm) -> Result<Vec<Place>> {
        let session = self.authorize(Resource::Places)?;
        form.validate()?;
        self.api.places.update(id, form).await?;
        self.audit(Resource::Places, "update", Some(id), &session);
        self.api.places.list().await
    }

    pub async fn delete_place(&self, id: i64) -> Result<Vec<Place>> {
        let session = self.authorize(Resource::Places)?;
        deleted(self.api.places.delete(id).await, Resource::Places, id)?;
        self.audit(Resource::Places, "delete", Some(id), &session);
        self.api.places.list().await
    }

    // Scheduled events. Organizers only see and touch their own.

    async fn scoped_events(&self, session: &Session) -> Result<Vec<ScheduledEvent>> {
        if session.role.is_admin() {
            return self.api.events.list().await;
        }
        match session.user_id {
            Some(user_id) => self.api.events.list_by_organizer(user_id).await,
            None => Ok(Vec::new()),
        }
    }

    fn check_event_owner(&self, session: &Session, event: &ScheduledEvent) -> Result<()> {
        if session.role.is_admin() || (session.user_id.is_some() && event.user_id == session.user_id) {
            Ok(())
        } else {
            Err(TicketdeskError::PermissionDenied(
                "You can only manage your own events".to_string(),
            ))
        }
    }

    pub async fn list_events(&self) -> Result<Vec<ScheduledEvent>> {
        let session = self.authorize(Resource::Events)?;
        self.scoped_events(&session).await
    }

    pub async fn get_event(&self, id: i64) -> Result<ScheduledEvent> {
        let session = self.authorize(Resource::Events)?;
        let event = self
            .api
            .events
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found(Resource::Events, id))?;
        self.check_event_owner(&session, &event)?;
        Ok(event)
    }

    pub async fn create_event(&self, form: &ScheduledEventForm, image: Option<FileUpload>) -> Result<Vec<ScheduledEvent>> {
        let session = self.authorize(Resource::Events)?;
        let mut form = form.clone();
        if !session.role.is_admin() {
            if let Some(user_id) = session.user_id {
                form.user_id = user_id;
            }
        }
        form.validate()?;
        self.api.events.create(&form, image).await?;
        self.audit(Resource::Events, "create", None, &session);
        self.scoped_events(&session).await
    }

    pub async fn update_event(
        &self,
        id: i64,
        form: &ScheduledEventForm,
        image: Option<FileUpload>,
    ) -> Result<Vec<ScheduledEvent>> {
        let session = self.authorize(Resource::Events)?;
        let existing = self
            .api
            .events
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found(Resource::Events, id))?;
        self.check_event_owner(&session, &existing)?;

        let mut form = form.clone();
        if !session.role.is_admin() {
            if let Some(user_id) = session.user_id {
                form.user_id = user_id;
            }
        }
        if form.image_path.is_empty() {
            form.image_path = existing.image_path.clone().unwrap_or_default();
        }
        form.validate()?;
        self.api.events.update(id, &form, image).await?;
        self.audit(Resource::Events, "update", Some(id), &session);
        self.scoped_events(&session).await
    }

    pub async fn delete_event(&self, id: i64) -> Result<Vec<ScheduledEvent>> {
        let session = self.authorize(Resource::Events)?;
        if !session.role.is_admin() {
            let existing = self
                .api
                .events
                .find_by_id(id)
                .await?
                .ok_or_else(|| not_found(Resource::Events, id))?;
            self.check_event_owner(&session, &existing)?;
        }
        deleted(self.api.events.delete(id).await, Resource::Events, id)?;
        self.audit(Resource::Events, "delete", Some(id), &session);
        self.scoped_events(&session).await
    }

    // Bookings

    pub async fn list_bookings(&self) -> Result<Vec<Booking>> {
        self.authorize(Resource::Bookings)?;
        self.api.bookings.list().await
    }

    pub async fn get_booking(&self, id: i64) -> Result<Booking> {
        self.authorize(Resource::Bookings)?;
        self.api
            .bookings
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found(Resource::Bookings, id))
    }

    pub async fn create_booking(&self, form: &BookingForm, id_proof: Option<FileUpload>) -> Result<Vec<Booking>> {
        let session = self.authorize(Resource::Bookings)?;
        form.validate()?;
        let id = self.api.bookings.create(form, id_proof).await?;
        self.audit(Resource::Bookings, "create", Some(id), &session);
        self.api.bookings.list().await
    }

    pub async fn update_booking(&self, id: i64, form: &BookingForm, id_proof: Option<FileUpload>) -> Result<Vec<Booking>> {
        let session = self.authorize(Resource::Bookings)?;
        form.validate()?;
        self.api.bookings.update(id, form, id_proof).await?;
        self.audit(Resource::Bookings, "update", Some(id), &session);
        self.api.bookings.list().await
    }

    pub async fn delete_booking(&self, id: i64) -> Result<Vec<Booking>> {
        let session = self.authorize(Resource::Bookings)?;
        deleted(self.api.bookings.delete(id).await, Resource::Bookings, id)?;
        self.audit(Resource::Bookings, "delete", Some(id), &session);
        self.api.bookings.list().await
    }

    // Payments

    pub async fn list_payments(&self) -> Result<Vec<Payment>> {
        self.authorize(Resource::Payments)?;
        self.api.payments.list().await
    }

    pub async fn get_payment(&self, id: i64) -> Result<Payment> {
        self.authorize(Resource::Payments)?;
        self.api
            .payments
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found(Resource::Payments, id))
    }

    pub async fn create_payment(&self, form: &PaymentForm) -> Result<Vec<Payment>> {
        let session = self.authorize(Resource::Payments)?;
        form.validate()?;
        self.api.payments.create(&form.to_request()).await?;
        self.audit(Resource::Payments, "create", None, &session);
        self.api.payments.list().await
    }

    pub async fn update_payment(&self, id: i64, form: &PaymentForm) -> Result<Vec<Payment>> {
        let session = self.authorize(Resource::Payments)?;
        form.validate()?;
        self.api.payments.update(id, &form.to_request()).await?;
        self.audit(Resource::Payments, "update", Some(id), &session);
        self.api.payments.list().await
    }

    pub async fn delete_payment(&self, id: i64) -> Result<Vec<Payment>> {
        let session = self.authorize(Resource::Payments)?;
        deleted(self.api.payments.delete(id).await, Resource::Payments, id)?;
        self.audit(Resource::Payments, "delete", Some(id), &session);
        self.api.payments.list().await
    }
}
