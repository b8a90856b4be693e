//! Payment repository implementation

use serde_json::Value;
use crate::api::{ApiClient, ApiRequest};
use crate::models::{Payment, PaymentRequest};
use crate::utils::errors::Result;
use super::found;

#[derive(Debug, Clone)]
pub struct PaymentRepository {
    client: ApiClient,
}

impl PaymentRepository {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<Payment>> {
        self.client.fetch_list(&ApiRequest::get("Payment")).await
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Payment>> {
        found(self.client.fetch(&ApiRequest::get(format!("Payment/{}", id))).await)
    }

    /// First payment recorded against a booking
    pub async fn find_for_booking(&self, booking_id: i64) -> Result<Option<Payment>> {
        let payments = self.list().await?;
        Ok(payments.into_iter().find(|p| p.is_for_booking(booking_id)))
    }

    /// Server-side pre-check run before a payment is recorded
    pub async fn make_payment(&self, request: &PaymentRequest) -> Result<Value> {
        self.client.send(&ApiRequest::post("Payment/make-payment").json(request)?).await
    }

    pub async fn create(&self, request: &PaymentRequest) -> Result<Value> {
        self.client.send(&ApiRequest::post("Payment").json(request)?).await
    }

    pub async fn update(&self, id: i64, request: &PaymentRequest) -> Result<Value> {
        let mut body = serde_json::to_value(request)?;
        body["paymentId"] = Value::from(id);
        self.client.send(&ApiRequest::patch(format!("Payment/{}", id)).json(&body)?).await
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        self.client.send(&ApiRequest::delete(format!("Payment/{}", id))).await?;
        Ok(())
    }
}
