//! Test data
//!
//! JSON records shaped the way the ticketing API serves them, and signed
//! bearer tokens carrying identity claims.

use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::{json, Value};
use ticketdesk::models::FileUpload;
use ticketdesk::state::claims::{NAME_CLAIM, ROLE_CLAIM};

pub const USER_EMAIL: &str = "asha@example.com";
pub const OTHER_EMAIL: &str = "ravi@example.com";

/// A token the way the server issues it: identity claim URIs, string user id
pub fn test_token(role: &str, email: &str, user_id: i64) -> String {
    let claims = json!({
        ROLE_CLAIM: role,
        NAME_CLAIM: email,
        "userId": user_id.to_string(),
        "exp": 4102444800_i64,
        "iss": "ticketing-api"
    });
    encode(&Header::default(), &claims, &EncodingKey::from_secret(b"test-signing-secret"))
        .expect("Failed to sign test token")
}

pub fn event_json(id: i64, fees: f64) -> Value {
    json!({
        "scheduleEventId": id,
        "details": format!("Jazz Night {}", id),
        "startDate": "2025-03-14T00:00:00",
        "startTime": "2025-03-14T19:30:00",
        "endDate": "2025-03-14T00:00:00",
        "endTime": "2025-03-14T23:00:00",
        "fees": fees,
        "eventCategoryId": 2,
        "placeId": 4,
        "contactName": "Meera",
        "phone": "9876543210",
        "userId": 3
    })
}

pub fn booking_json(id: i64, event_id: i64, fees: Option<f64>, email: &str, cancelled: bool) -> Value {
    let mut booking = json!({
        "eventBookingId": id,
        "name": "Asha Rao",
        "email": email,
        "phone": "9876543210",
        "address": "12 MG Road",
        "city": "Pune",
        "state": "MH",
        "country": "India",
        "scheduleEventId": event_id,
        "isCancelled": cancelled,
        "idProofDocumentPath": "/uploads/idproofs/asha.pdf"
    });
    if let Some(fees) = fees {
        booking["scheduleEventFees"] = json!(fees);
    }
    booking
}

pub fn payment_json(id: i64, booking_id: i64, amount: f64, method: &str) -> Value {
    json!({
        "paymentId": id,
        "eventBookingId": booking_id,
        "amount": amount,
        "paymentMethod": method,
        "paymentStatus": "Success",
        "transactionId": format!("TXN{}", 1700000000000_i64 + id),
        "paymentDate": "2025-02-03T10:15:00Z"
    })
}

pub fn user_json(id: i64, email: &str, role: &str) -> Value {
    json!({
        "userId": id,
        "firstName": "Test",
        "lastName": format!("User{}", id),
        "email": email,
        "phone": "9876543210",
        "role": role
    })
}

pub fn id_proof() -> FileUpload {
    FileUpload::new("aadhaar.pdf", b"%PDF-1.4 test".to_vec())
}
