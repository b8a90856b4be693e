//! Services module
//!
//! This module contains the client-side workflows built on the API layer

pub mod auth;
pub mod catalog;
pub mod booking;
pub mod payment;
pub mod receipt;
pub mod dashboard;
pub mod stats;
pub mod admin;

// Re-export commonly used services
pub use auth::{AuthService, Destination, require_session};
pub use catalog::{CatalogService, EventFilter, EventView, PriceFilter};
pub use booking::{BookingService, BookingDraft, BookingOutcome};
pub use payment::{PaymentService, PaymentDetails, PaymentQuote, PaymentConfirmation};
pub use receipt::{ReceiptService, Receipt};
pub use dashboard::{DashboardService, BookingStatus, BookingSummary};
pub use stats::{StatsService, AdminStats, OrganizerStats, MonthlyPoint};
pub use admin::{AdminService, Resource};

use std::sync::Arc;
use crate::api::{ApiClient, ApiService};
use crate::config::Settings;
use crate::state::{FileSessionStore, SessionContext};
use crate::utils::errors::Result;

/// Service factory for creating and managing all services
#[derive(Debug, Clone)]
pub struct ServiceFactory {
    pub api: ApiService,
    pub auth_service: AuthService,
    pub catalog_service: CatalogService,
    pub booking_service: BookingService,
    pub payment_service: PaymentService,
    pub receipt_service: ReceiptService,
    pub dashboard_service: DashboardService,
    pub stats_service: StatsService,
    pub admin_service: AdminService,
    currency_symbol: String,
}

impl ServiceFactory {
    /// Create every service around one shared session context
    pub fn new(settings: &Settings, session: SessionContext) -> Result<Self> {
        let client = ApiClient::new(&settings.api, session)?;
        let api = ApiService::new(client);
        let auth_service = AuthService::new(api.clone());

        Ok(Self {
            catalog_service: CatalogService::new(api.clone(), settings),
            booking_service: BookingService::new(api.clone()),
            payment_service: PaymentService::new(api.clone(), settings),
            receipt_service: ReceiptService::new(api.clone(), settings),
            dashboard_service: DashboardService::new(api.clone(), settings),
            stats_service: StatsService::new(api.clone()),
            admin_service: AdminService::new(api.clone(), auth_service.clone()),
            auth_service,
            api,
            currency_symbol: settings.payment.currency_symbol.clone(),
        })
    }

    /// Services backed by the session file named in the settings
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let store = FileSessionStore::new(&settings.session.path);
        let session = SessionContext::new(Arc::new(store))?;
        Self::new(settings, session)
    }

    pub fn session(&self) -> &SessionContext {
        self.api.session()
    }

    pub fn payment_currency(&self) -> &str {
        &self.currency_symbol
    }
}
