//! Data models module
//!
//! Canonical records for everything the ticketing API serves, plus the
//! create/update forms sent back to it.

pub mod normalize;
pub mod form;
pub mod upload;
pub mod user;
pub mod category;
pub mod place;
pub mod event;
pub mod booking;
pub mod payment;

// Re-export commonly used models
pub use normalize::{FromApi, Fields, unwrap_envelope, list_from_api};
pub use upload::FileUpload;
pub use user::{User, UserForm, Role};
pub use category::{EventCategory, CategoryForm};
pub use place::{Place, PlaceForm};
pub use event::{ScheduledEvent, ScheduledEventForm};
pub use booking::{Booking, BookingForm};
pub use payment::{Payment, PaymentForm, PaymentMethod, PaymentRequest};
