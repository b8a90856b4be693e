//! Remote API module
//!
//! This module handles all communication with the ticketing REST API

pub mod client;
pub mod repositories;
pub mod service;

// Re-export commonly used API components
pub use client::{ApiClient, ApiRequest, Body};
pub use repositories::{AuthRepository, UserRepository, CategoryRepository, PlaceRepository, EventRepository, BookingRepository, PaymentRepository};
pub use service::ApiService;
