//! Place repository implementation

use serde_json::Value;
use crate::api::{ApiClient, ApiRequest};
use crate::models::{Place, PlaceForm};
use crate::utils::errors::Result;
use super::found;

#[derive(Debug, Clone)]
pub struct PlaceRepository {
    client: ApiClient,
}

impl PlaceRepository {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<Place>> {
        self.client.fetch_list(&ApiRequest::get("Places")).await
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Place>> {
        found(self.client.fetch(&ApiRequest::get(format!("Places/{}", id))).await)
    }

    pub async fn create(&self, form: &PlaceForm) -> Result<Value> {
        self.client.send(&ApiRequest::post("Places").json(form)?).await
    }

    pub async fn update(&self, id: i64, form: &PlaceForm) -> Result<Value> {
        let mut body = serde_json::to_value(form)?;
        body["PlaceId"] = Value::from(id);
        self.client.send(&ApiRequest::put(format!("Places/{}", id)).json(&body)?).await
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        self.client.send(&ApiRequest::delete(format!("Places/{}", id))).await?;
        Ok(())
    }
}
