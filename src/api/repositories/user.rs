//! User repository implementation

use serde_json::Value;
use crate::api::{ApiClient, ApiRequest};
use crate::models::{User, UserForm};
use crate::utils::errors::Result;
use super::{delete_chain, found};

#[derive(Debug, Clone)]
pub struct UserRepository {
    client: ApiClient,
}

impl UserRepository {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<User>> {
        self.client.fetch_list(&ApiRequest::get("User")).await
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<User>> {
        found(self.client.fetch(&ApiRequest::get(format!("User/{}", id))).await)
    }

    pub async fn create(&self, form: &UserForm) -> Result<Value> {
        self.client.send(&ApiRequest::post("User").json(form)?).await
    }

    pub async fn update(&self, id: i64, form: &UserForm) -> Result<Value> {
        let mut body = serde_json::to_value(form)?;
        body["userId"] = Value::from(id);
        self.client.send(&ApiRequest::put(format!("User/{}", id)).json(&body)?).await
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        self.client.send_first(&delete_chain("User", "id", id)?).await?;
        Ok(())
    }
}
