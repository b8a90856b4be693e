//! Back-office management against a mock ticketing API

mod helpers;

use assert_matches::assert_matches;
use helpers::*;
use serde_json::json;
use ticketdesk::handlers::admin::{handle_admin, AdminAction};
use ticketdesk::models::{CategoryForm, FromApi, ScheduledEvent, ScheduledEventForm};
use ticketdesk::services::Resource;
use ticketdesk::TicketdeskError;

#[tokio::test]
async fn test_deleted_user_leaves_the_list_and_cannot_be_deleted_twice() {
    let ctx = TestContext::new().await;
    ctx.sign_in("Admin", "admin@example.com", 1);

    ctx.api
        .mock_json_times(
            "GET",
            "User",
            200,
            json!([user_json(1, USER_EMAIL, "User"), user_json(2, OTHER_EMAIL, "Organizer")]),
            1,
        )
        .await;
    ctx.api.mock_json("GET", "User", 200, json!([user_json(2, OTHER_EMAIL, "Organizer")])).await;
    ctx.api.mock_json_times("DELETE", "User/1", 200, json!({ "message": "deleted" }), 1).await;

    let before = ctx.services.admin_service.list_users().await.unwrap();
    assert_eq!(before.len(), 2);

    let after = ctx.services.admin_service.delete_user(1).await.unwrap();
    assert!(after.iter().all(|u| u.user_id != 1));
    assert_eq!(after.len(), 1);

    let again = ctx.services.admin_service.delete_user(1).await.unwrap_err();
    assert_matches!(again, TicketdeskError::NotFound { entity: "User", id: 1 });
}

#[tokio::test]
async fn test_category_delete_walks_the_fallback_chain() {
    let ctx = TestContext::new().await;
    ctx.sign_in("Admin", "admin@example.com", 1);

    ctx.api.expect_status("DELETE", "EventCategory/3", 405, 1).await;
    ctx.api.expect_query("DELETE", "EventCategory", "id", "3", 404, 1).await;
    ctx.api.expect_status("POST", "EventCategory/Delete/3", 200, 1).await;
    ctx.api.expect_status("POST", "EventCategory/Delete", 200, 0).await;
    ctx.api.mock_json("GET", "EventCategory", 200, json!([])).await;

    let remaining = ctx.services.admin_service.delete_category(3).await.unwrap();
    assert!(remaining.is_empty());
}

#[tokio::test]
async fn test_category_delete_stops_on_server_error() {
    let ctx = TestContext::new().await;
    ctx.sign_in("Admin", "admin@example.com", 1);

    ctx.api
        .mock_json("DELETE", "EventCategory/3", 409, json!({ "message": "Category is in use" }))
        .await;
    ctx.api.expect_status("POST", "EventCategory/Delete/3", 200, 0).await;

    let err = ctx.services.admin_service.delete_category(3).await.unwrap_err();
    assert_eq!(err.to_string(), "Category is in use");
}

#[tokio::test]
async fn test_category_update_falls_back_to_collection_patch() {
    let ctx = TestContext::new().await;
    ctx.sign_in("Organizer", "org@example.com", 3);

    ctx.api
        .expect_json_body(
            "PATCH",
            "EventCategory",
            json!({ "eventCategoryId": 2, "eventCategoryName": "Live Music" }),
            json!({ "message": "updated" }),
        )
        .await;
    ctx.api
        .mock_json("GET", "EventCategory", 200, json!([{ "eventCategoryId": 2, "eventCategoryName": "Live Music" }]))
        .await;

    let form = CategoryForm {
        event_category_name: "Live Music".to_string(),
        event_category_description: String::new(),
        user_id: 3,
    };
    let categories = ctx.services.admin_service.update_category(2, &form).await.unwrap();
    assert_eq!(categories[0].name, "Live Music");
    assert_eq!(ctx.api.received("PATCH", "EventCategory/2").await, 1);
}

#[tokio::test]
async fn test_event_delete_prefers_query_form() {
    let ctx = TestContext::new().await;
    ctx.sign_in("Admin", "admin@example.com", 1);

    ctx.api.expect_query("DELETE", "ScheduleEvent", "id", "9", 200, 1).await;
    ctx.api.expect_status("DELETE", "ScheduleEvent/9", 200, 0).await;
    ctx.api.mock_json("GET", "ScheduleEvent", 200, json!([event_json(8, 150.0)])).await;

    let events = ctx.services.admin_service.delete_event(9).await.unwrap();
    assert_eq!(events.len(), 1);
}

#[tokio::test]
async fn test_roles_limit_back_office_access() {
    let ctx = TestContext::new().await;

    let err = ctx.services.admin_service.list_places().await.unwrap_err();
    assert_matches!(err, TicketdeskError::LoginRequired { ref redirect } if redirect == "/admin/places");

    ctx.sign_in("User", USER_EMAIL, 12);
    assert_matches!(
        ctx.services.admin_service.list_categories().await,
        Err(TicketdeskError::PermissionDenied(_))
    );

    ctx.sign_in("Organizer", "org@example.com", 3);
    assert_matches!(
        ctx.services.admin_service.list_users().await,
        Err(TicketdeskError::PermissionDenied(_))
    );
    assert_matches!(
        ctx.services.admin_service.list_payments().await,
        Err(TicketdeskError::PermissionDenied(_))
    );
    assert!(ctx.api.server.received_requests().await.unwrap_or_default().is_empty());
}

#[tokio::test]
async fn test_organizer_sees_and_deletes_only_own_events() {
    let ctx = TestContext::new().await;
    ctx.sign_in("Organizer", "org@example.com", 3);

    let mut foreign = event_json(9, 500.0);
    foreign["userId"] = json!(5);
    ctx.api.mock_json("GET", "ScheduleEvent", 200, json!([event_json(8, 150.0), foreign.clone()])).await;
    ctx.api.mock_json("GET", "ScheduleEvent/9", 200, foreign).await;

    let events = ctx.services.admin_service.list_events().await.unwrap();
    assert_eq!(events.iter().map(|e| e.schedule_event_id).collect::<Vec<_>>(), vec![8]);

    let err = ctx.services.admin_service.delete_event(9).await.unwrap_err();
    assert_matches!(err, TicketdeskError::PermissionDenied(_));
    assert_eq!(ctx.api.received("DELETE", "ScheduleEvent").await, 0);
}

#[tokio::test]
async fn test_organizer_cannot_hand_an_event_to_another_user() {
    let ctx = TestContext::new().await;
    ctx.sign_in("Organizer", "org@example.com", 3);

    ctx.api.mock_json("GET", "ScheduleEvent/8", 200, event_json(8, 150.0)).await;
    ctx.api.mock_json("PUT", "ScheduleEvent/8", 200, json!({ "message": "updated" })).await;
    ctx.api.mock_json("GET", "ScheduleEvent", 200, json!([event_json(8, 150.0)])).await;

    let event = ScheduledEvent::from_api(&event_json(8, 150.0)).unwrap();
    let mut form = ScheduledEventForm::from_event(&event);
    form.details = "Jazz Night (late show)".to_string();
    form.user_id = 5;

    let events = ctx.services.admin_service.update_event(8, &form, None).await.unwrap();
    assert_eq!(events.len(), 1);

    let bodies = ctx.api.bodies("PUT", "ScheduleEvent/8").await;
    assert_eq!(bodies.len(), 1);
    assert_eq!(multipart_field(&bodies[0], "UserId").as_deref(), Some("3"));
    assert_eq!(multipart_field(&bodies[0], "Details").as_deref(), Some("Jazz Night (late show)"));
}

#[tokio::test]
async fn test_admin_handler_creates_category_from_json_file() {
    let ctx = TestContext::new().await;
    ctx.sign_in("Admin", "admin@example.com", 1);

    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("category.json");
    std::fs::write(&file, r#"{"eventCategoryName": "Comedy", "eventCategoryDescription": "Stand-up", "userId": 1}"#).unwrap();

    ctx.api
        .expect_json_body("POST", "EventCategory", json!({ "eventCategoryName": "Comedy", "userId": 1 }), json!({ "eventCategoryId": 6 }))
        .await;
    ctx.api
        .mock_json(
            "GET",
            "EventCategory",
            200,
            json!([{ "eventCategoryId": 6, "eventCategoryName": "Comedy", "eventCategoryDescription": "Stand-up" }]),
        )
        .await;

    let mut out = Vec::new();
    handle_admin(
        &ctx.services,
        &mut out,
        Resource::Categories,
        AdminAction::Create { file, upload: None },
    )
    .await
    .unwrap();

    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("Comedy"));
    assert!(text.contains("1 record(s)"));
}

#[tokio::test]
async fn test_admin_handler_show_missing_record() {
    let ctx = TestContext::new().await;
    ctx.sign_in("Admin", "admin@example.com", 1);

    let mut out = Vec::new();
    let err = handle_admin(&ctx.services, &mut out, Resource::Payments, AdminAction::Show { id: 77 })
        .await
        .unwrap_err();
    assert_matches!(err, TicketdeskError::NotFound { entity: "Payment", id: 77 });
}
