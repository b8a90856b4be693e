//! Back-office commands
//!
//! Create and update read the form as JSON from a file; an optional upload
//! path supplies the event image or booking ID proof.

use std::io::Write;
use std::path::PathBuf;
use serde::de::DeserializeOwned;
use crate::models::{
    Booking, BookingForm, CategoryForm, EventCategory, FileUpload, Payment, PaymentForm, Place, PlaceForm,
    ScheduledEvent, ScheduledEventForm, User, UserForm,
};
use crate::services::{Resource, ServiceFactory};
use crate::utils::errors::{Result, TicketdeskError};
use crate::utils::helpers::{format_date, format_time, truncate_text};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminAction {
    List,
    Show { id: i64 },
    Delete { id: i64 },
    Create { file: PathBuf, upload: Option<PathBuf> },
    Update { id: i64, file: PathBuf, upload: Option<PathBuf> },
}

/// One line of a back-office table
pub trait AdminRow {
    const HEADER: &'static str;
    fn row(&self) -> String;
}

impl AdminRow for User {
    const HEADER: &'static str = "ID     NAME                       EMAIL                          ROLE";
    fn row(&self) -> String {
        format!("{:<6} {:<26} {:<30} {}", self.user_id, truncate_text(&self.full_name(), 26), self.email, self.role)
    }
}

impl AdminRow for EventCategory {
    const HEADER: &'static str = "ID     NAME                       DESCRIPTION";
    fn row(&self) -> String {
        format!("{:<6} {:<26} {}", self.event_category_id, truncate_text(&self.name, 26), truncate_text(&self.description, 40))
    }
}

impl AdminRow for Place {
    const HEADER: &'static str = "ID     LOCATION                                  CAPACITY";
    fn row(&self) -> String {
        let capacity = self.max_capacity.map(|c| c.to_string()).unwrap_or_else(|| "-".to_string());
        format!("{:<6} {:<41} {}", self.place_id, truncate_text(&self.location(), 41), capacity)
    }
}

impl AdminRow for ScheduledEvent {
    const HEADER: &'static str = "ID     EVENT                      DATE         TIME   FEES";
    fn row(&self) -> String {
        format!(
            "{:<6} {:<26} {:<12} {:<6} {}",
            self.schedule_event_id,
            truncate_text(&self.details, 26),
            format_date(&self.start_date),
            format_time(&self.start_time),
            self.fees
        )
    }
}

impl AdminRow for Booking {
    const HEADER: &'static str = "ID     NAME                       EMAIL                          EVENT  CANCELLED";
    fn row(&self) -> String {
        let event = self.schedule_event_id.map(|id| id.to_string()).unwrap_or_else(|| "-".to_string());
        format!(
            "{:<6} {:<26} {:<30} {:<6} {}",
            self.event_booking_id,
            truncate_text(&self.name, 26),
            self.email,
            event,
            if self.is_cancelled { "yes" } else { "no" }
        )
    }
}

impl AdminRow for Payment {
    const HEADER: &'static str = "ID     BOOKING  AMOUNT     METHOD        STATUS     TRANSACTION";
    fn row(&self) -> String {
        let booking = self.event_booking_id.map(|id| id.to_string()).unwrap_or_else(|| "-".to_string());
        format!(
            "{:<6} {:<8} {:<10} {:<13} {:<10} {}",
            self.payment_id,
            booking,
            self.amount,
            self.payment_method,
            self.payment_status,
            self.transaction_id.as_deref().unwrap_or("-")
        )
    }
}

fn write_table<W: Write, T: AdminRow>(out: &mut W, rows: &[T]) -> Result<()> {
    writeln!(out, "{}", T::HEADER)?;
    for row in rows {
        writeln!(out, "{}", row.row())?;
    }
    writeln!(out, "\n{} record(s)", rows.len())?;
    Ok(())
}

fn write_record<W: Write, T: serde::Serialize>(out: &mut W, record: &T) -> Result<()> {
    writeln!(out, "{}", serde_json::to_string_pretty(record)?)?;
    Ok(())
}

async fn read_form<T: DeserializeOwned>(path: &PathBuf) -> Result<T> {
    let text = tokio::fs::read_to_string(path).await?;
    serde_json::from_str(&text)
        .map_err(|e| TicketdeskError::InvalidInput(format!("{}: {}", path.display(), e)))
}

async fn read_upload(path: &Option<PathBuf>) -> Result<Option<FileUpload>> {
    match path {
        Some(path) => Ok(Some(FileUpload::from_path(path).await?)),
        None => Ok(None),
    }
}

pub async fn handle_admin<W: Write>(
    services: &ServiceFactory,
    out: &mut W,
    resource: Resource,
    action: AdminAction,
) -> Result<()> {
    let admin = &services.admin_service;

    match (resource, action) {
        (Resource::Users, AdminAction::List) => write_table(out, &admin.list_users().await?)?,
        (Resource::Users, AdminAction::Show { id }) => write_record(out, &admin.get_user(id).await?)?,
        (Resource::Users, AdminAction::Delete { id }) => write_table(out, &admin.delete_user(id).await?)?,
        (Resource::Users, AdminAction::Create { file, .. }) => {
            let form: UserForm = read_form(&file).await?;
            write_table(out, &admin.create_user(&form).await?)?
        }
        (Resource::Users, AdminAction::Update { id, file, .. }) => {
            let form: UserForm = read_form(&file).await?;
            write_table(out, &admin.update_user(id, &form).await?)?
        }

        (Resource::Categories, AdminAction::List) => write_table(out, &admin.list_categories().await?)?,
        (Resource::Categories, AdminAction::Show { id }) => write_record(out, &admin.get_category(id).await?)?,
        (Resource::Categories, AdminAction::Delete { id }) => write_table(out, &admin.delete_category(id).await?)?,
        (Resource::Categories, AdminAction::Create { file, .. }) => {
            let form: CategoryForm = read_form(&file).await?;
            write_table(out, &admin.create_category(&form).await?)?
        }
        (Resource::Categories, AdminAction::Update { id, file, .. }) => {
            let form: CategoryForm = read_form(&file).await?;
            write_table(out, &admin.update_category(id, &form).await?)?
        }

        (Resource::Places, AdminAction::List) => write_table(out, &admin.list_places().await?)?,
        (Resource::Places, AdminAction::Show { id }) => write_record(out, &admin.get_place(id).await?)?,
        (Resource::Places, AdminAction::Delete { id }) => write_table(out, &admin.delete_place(id).await?)?,
        (Resource::Places, AdminAction::Create { file, .. }) => {
            let form: PlaceForm = read_form(&file).await?;
            write_table(out, &admin.create_place(&form).await?)?
        }
        (Resource::Places, AdminAction::Update { id, file, .. }) => {
            let form: PlaceForm = read_form(&file).await?;
            write_table(out, &admin.update_place(id, &form).await?)?
        }

        (Resource::Events, AdminAction::List) => write_table(out, &admin.list_events().await?)?,
        (Resource::Events, AdminAction::Show { id }) => write_record(out, &admin.get_event(id).await?)?,
        (Resource::Events, AdminAction::Delete { id }) => write_table(out, &admin.delete_event(id).await?)?,
        (Resource::Events, AdminAction::Create { file, upload }) => {
            let form: ScheduledEventForm = read_form(&file).await?;
            let image = read_upload(&upload).await?;
            write_table(out, &admin.create_event(&form, image).await?)?
        }
        (Resource::Events, AdminAction::Update { id, file, upload }) => {
            let form: ScheduledEventForm = read_form(&file).await?;
            let image = read_upload(&upload).await?;
            write_table(out, &admin.update_event(id, &form, image).await?)?
        }

        (Resource::Bookings, AdminAction::List) => write_table(out, &admin.list_bookings().await?)?,
        (Resource::Bookings, AdminAction::Show { id }) => write_record(out, &admin.get_booking(id).await?)?,
        (Resource::Bookings, AdminAction::Delete { id }) => write_table(out, &admin.delete_booking(id).await?)?,
        (Resource::Bookings, AdminAction::Create { file, upload }) => {
            let form: BookingForm = read_form(&file).await?;
            let id_proof = read_upload(&upload).await?;
            write_table(out, &admin.create_booking(&form, id_proof).await?)?
        }
        (Resource::Bookings, AdminAction::Update { id, file, upload }) => {
            let form: BookingForm = read_form(&file).await?;
            let id_proof = read_upload(&upload).await?;
            write_table(out, &admin.update_booking(id, &form, id_proof).await?)?
        }

        (Resource::Payments, AdminAction::List) => write_table(out, &admin.list_payments().await?)?,
        (Resource::Payments, AdminAction::Show { id }) => write_record(out, &admin.get_payment(id).await?)?,
        (Resource::Payments, AdminAction::Delete { id }) => write_table(out, &admin.delete_payment(id).await?)?,
        (Resource::Payments, AdminAction::Create { file, .. }) => {
            let form: PaymentForm = read_form(&file).await?;
            write_table(out, &admin.create_payment(&form).await?)?
        }
        (Resource::Payments, AdminAction::Update { id, file, .. }) => {
            let form: PaymentForm = read_form(&file).await?;
            write_table(out, &admin.update_payment(id, &form).await?)?
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FromApi;
    use serde_json::json;

    #[test]
    fn test_table_output() {
        let places = vec![Place::from_api(&json!({"placeId": 1, "placeName": "Blue Hall", "city": "Pune", "maxCapacity": 200})).unwrap()];
        let mut out = Vec::new();
        write_table(&mut out, &places).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("ID"));
        assert!(text.contains("Blue Hall, Pune"));
        assert!(text.contains("200"));
        assert!(text.contains("1 record(s)"));
    }

    #[tokio::test]
    async fn test_read_form_reports_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("category.json");
        tokio::fs::write(&path, r#"{"eventCategoryName": "Music", "userId": 2}"#).await.unwrap();
        let form: CategoryForm = read_form(&path).await.unwrap();
        assert_eq!(form.event_category_name, "Music");

        tokio::fs::write(&path, "{").await.unwrap();
        let err = read_form::<CategoryForm>(&path).await.unwrap_err();
        assert!(err.to_string().contains("category.json"));
    }
}
