//! Scheduled event repository implementation

use serde_json::Value;
use crate::api::{ApiClient, ApiRequest};
use crate::models::{FileUpload, ScheduledEvent, ScheduledEventForm};
use crate::utils::errors::Result;
use super::{found, owned_fields};

/// Multipart part name of the event image
const IMAGE_PART: &str = "Image";

#[derive(Debug, Clone)]
pub struct EventRepository {
    client: ApiClient,
}

impl EventRepository {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<ScheduledEvent>> {
        self.client.fetch_list(&ApiRequest::get("ScheduleEvent")).await
    }

    /// Events owned by one organizer. The API has no server-side filter.
    pub async fn list_by_organizer(&self, user_id: i64) -> Result<Vec<ScheduledEvent>> {
        let events = self.list().await?;
        Ok(events.into_iter().filter(|e| e.user_id == Some(user_id)).collect())
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<ScheduledEvent>> {
        found(self.client.fetch(&ApiRequest::get(format!("ScheduleEvent/{}", id))).await)
    }

    pub async fn create(&self, form: &ScheduledEventForm, image: Option<FileUpload>) -> Result<Value> {
        let request = ApiRequest::post("ScheduleEvent").multipart(
            owned_fields(form.to_fields(None)),
            image.map(|file| (IMAGE_PART.to_string(), file)),
        );
        self.client.send(&request).await
    }

    pub async fn update(&self, id: i64, form: &ScheduledEventForm, image: Option<FileUpload>) -> Result<Value> {
        let request = ApiRequest::put(format!("ScheduleEvent/{}", id)).multipart(
            owned_fields(form.to_fields(Some(id))),
            image.map(|file| (IMAGE_PART.to_string(), file)),
        );
        self.client.send(&request).await
    }

    /// DELETE with the id as a query parameter, falling back to the path form
    pub async fn delete(&self, id: i64) -> Result<()> {
        self.client
            .send_first(&[
                ApiRequest::delete("ScheduleEvent").query("id", id),
                ApiRequest::delete(format!("ScheduleEvent/{}", id)),
            ])
            .await?;
        Ok(())
    }
}
