//! Event category repository implementation

use serde_json::Value;
use crate::api::{ApiClient, ApiRequest};
use crate::models::{CategoryForm, EventCategory};
use crate::utils::errors::Result;
use super::{delete_chain, found};

#[derive(Debug, Clone)]
pub struct CategoryRepository {
    client: ApiClient,
}

impl CategoryRepository {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<EventCategory>> {
        self.client.fetch_list(&ApiRequest::get("EventCategory")).await
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<EventCategory>> {
        found(self.client.fetch(&ApiRequest::get(format!("EventCategory/{}", id))).await)
    }

    pub async fn create(&self, form: &CategoryForm) -> Result<Value> {
        self.client.send(&ApiRequest::post("EventCategory").json(form)?).await
    }

    /// PATCH on the item, falling back to PATCH on the collection with the
    /// id carried in the body
    pub async fn update(&self, id: i64, form: &CategoryForm) -> Result<Value> {
        let mut body = serde_json::to_value(form)?;
        body["eventCategoryId"] = Value::from(id);

        self.client
            .send_first(&[
                ApiRequest::patch(format!("EventCategory/{}", id)).json(&body)?,
                ApiRequest::patch("EventCategory").json(&body)?,
            ])
            .await
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        self.client.send_first(&delete_chain("EventCategory", "id", id)?).await?;
        Ok(())
    }
}
