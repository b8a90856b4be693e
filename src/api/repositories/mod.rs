//! API repositories module
//!
//! One repository per remote resource, each owning the exact verbs and
//! paths its endpoints accept

pub mod auth;
pub mod user;
pub mod category;
pub mod place;
pub mod event;
pub mod booking;
pub mod payment;

// Re-export repositories
pub use auth::AuthRepository;
pub use user::UserRepository;
pub use category::CategoryRepository;
pub use place::PlaceRepository;
pub use event::EventRepository;
pub use booking::BookingRepository;
pub use payment::PaymentRepository;

use serde_json::json;
use crate::api::ApiRequest;
use crate::utils::errors::{Result, TicketdeskError};

/// Treat a 404 as an absent record
pub(crate) fn found<T>(result: Result<T>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(TicketdeskError::Api(e)) if e.status() == Some(404) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Multipart field names are static; the request body owns its strings
pub(crate) fn owned_fields(fields: Vec<(&'static str, String)>) -> Vec<(String, String)> {
    fields.into_iter().map(|(name, value)| (name.to_string(), value)).collect()
}

/// Delete variants tried in order for resources whose delete contract
/// differs between server versions
pub(crate) fn delete_chain(resource: &str, id_key: &str, id: i64) -> Result<Vec<ApiRequest>> {
    Ok(vec![
        ApiRequest::delete(format!("{}/{}", resource, id)),
        ApiRequest::delete(resource).query("id", id),
        ApiRequest::post(format!("{}/Delete/{}", resource, id)),
        ApiRequest::post(format!("{}/Delete", resource)).json(&json!({ id_key: id }))?,
    ])
}
