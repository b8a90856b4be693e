//! Authentication endpoint

use serde::Serialize;
use crate::api::{ApiClient, ApiRequest};
use crate::models::Fields;
use crate::utils::errors::{Result, TicketdeskError};

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Clone)]
pub struct AuthRepository {
    client: ApiClient,
}

impl AuthRepository {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Exchange credentials for a bearer token
    pub async fn login(&self, email: &str, password: &str) -> Result<String> {
        let request = ApiRequest::post("Auth/login")
            .json(&LoginRequest { email, password })?
            .anonymous();
        let value = self.client.send(&request).await?;

        if let Some(token) = value.as_str().filter(|t| !t.is_empty()) {
            return Ok(token.to_string());
        }

        Fields::new(&value, "login response")?
            .non_empty(&["token", "accessToken"])
            .ok_or_else(|| TicketdeskError::Authentication("Login response did not include a token".to_string()))
    }
}
