//! My bookings, cancellation and role dashboards

mod helpers;

use assert_matches::assert_matches;
use helpers::*;
use serde_json::json;
use ticketdesk::handlers::bookings::handle_my_bookings;
use ticketdesk::handlers::dashboard::handle_dashboard;
use ticketdesk::services::{BookingStatus, PaymentDetails};
use ticketdesk::TicketdeskError;

#[tokio::test]
async fn test_cancelled_booking_cannot_be_cancelled_again_or_paid() {
    let ctx = TestContext::new().await;
    ctx.sign_in("User", USER_EMAIL, 12);

    ctx.api
        .mock_json_times("GET", "EventBooking/40", 200, booking_json(40, 8, Some(150.0), USER_EMAIL, false), 1)
        .await;
    ctx.api
        .mock_json("GET", "EventBooking/40", 200, booking_json(40, 8, Some(150.0), USER_EMAIL, true))
        .await;
    ctx.api.expect_status("PATCH", "EventBooking/40", 204, 1).await;
    ctx.api
        .mock_json("GET", "EventBooking/my-bookings", 200, json!([booking_json(40, 8, Some(150.0), USER_EMAIL, true)]))
        .await;

    let cancelled = ctx.services.dashboard_service.cancel(40).await.unwrap();
    assert!(cancelled.is_cancelled);

    let bookings = ctx.services.dashboard_service.my_bookings().await.unwrap();
    assert_eq!(bookings.len(), 1);
    assert_eq!(bookings[0].status, BookingStatus::Cancelled);
    assert!(!bookings[0].can_cancel());
    assert!(!bookings[0].can_pay());

    let mut out = Vec::new();
    handle_my_bookings(&ctx.services, &mut out).await.unwrap();
    assert!(String::from_utf8(out).unwrap().contains("CANCELLED"));

    let again = ctx.services.dashboard_service.cancel(40).await.unwrap_err();
    assert_matches!(again, TicketdeskError::BookingCancelled { booking_id: 40 });

    let pay = ctx.services.payment_service.pay(40, &PaymentDetails::Qr).await.unwrap_err();
    assert_matches!(pay, TicketdeskError::BookingCancelled { booking_id: 40 });
    assert_eq!(ctx.api.received("POST", "Payment/make-payment").await, 0);
}

#[tokio::test]
async fn test_cannot_cancel_someone_elses_booking() {
    let ctx = TestContext::new().await;
    ctx.sign_in("User", USER_EMAIL, 12);
    ctx.api
        .mock_json("GET", "EventBooking/41", 200, booking_json(41, 8, Some(150.0), OTHER_EMAIL, false))
        .await;

    let err = ctx.services.dashboard_service.cancel(41).await.unwrap_err();
    assert_matches!(err, TicketdeskError::PermissionDenied(_));
    assert_eq!(ctx.api.received("PATCH", "EventBooking/41").await, 0);
}

#[tokio::test]
async fn test_cancel_missing_booking() {
    let ctx = TestContext::new().await;
    ctx.sign_in("User", USER_EMAIL, 12);

    let err = ctx.services.dashboard_service.cancel(404).await.unwrap_err();
    assert_matches!(err, TicketdeskError::NotFound { entity: "Booking", id: 404 });
}

#[tokio::test]
async fn test_my_bookings_falls_back_to_filtering_all_bookings() {
    let ctx = TestContext::new().await;
    ctx.sign_in("User", USER_EMAIL, 12);

    // No my-bookings route on this server
    ctx.api
        .mock_json(
            "GET",
            "EventBooking",
            200,
            json!([
                booking_json(32, 8, Some(150.0), USER_EMAIL, false),
                booking_json(34, 8, None, "ASHA@example.com", false),
                booking_json(35, 8, Some(150.0), OTHER_EMAIL, false)
            ]),
        )
        .await;
    ctx.api.mock_json("GET", "ScheduleEvent", 200, json!([event_json(8, 150.0)])).await;
    ctx.api.mock_json("GET", "Payment", 200, json!([payment_json(5, 32, 150.0, "UPI")])).await;

    let bookings = ctx.services.dashboard_service.my_bookings().await.unwrap();
    let rows: Vec<(i64, BookingStatus)> = bookings.iter().map(|b| (b.booking.event_booking_id, b.status)).collect();
    assert_eq!(rows, vec![(32, BookingStatus::Paid), (34, BookingStatus::PendingPayment)]);
    assert_eq!(bookings[1].fee_label, "₹150");
    assert_eq!(bookings[1].event_details, "Jazz Night 8");
}

#[tokio::test]
async fn test_admin_dashboard_survives_a_failing_list() {
    let ctx = TestContext::new().await;
    ctx.sign_in("Admin", "admin@example.com", 1);

    ctx.api.mock_json("GET", "ScheduleEvent", 200, json!([event_json(7, 0.0), event_json(8, 150.0)])).await;
    ctx.api.mock_status("GET", "User", 500).await;
    ctx.api
        .mock_json(
            "GET",
            "EventBooking",
            200,
            json!([
                booking_json(32, 8, Some(150.0), USER_EMAIL, false),
                booking_json(33, 8, Some(150.0), USER_EMAIL, true)
            ]),
        )
        .await;
    ctx.api
        .mock_json("GET", "Payment", 200, json!({ "data": [payment_json(5, 32, 150.0, "UPI"), payment_json(6, 30, 99.5, "Card")] }))
        .await;

    let stats = ctx.services.stats_service.admin_stats().await.unwrap();
    assert_eq!(stats.total_events, 2);
    assert_eq!(stats.total_users, 0);
    assert_eq!(stats.active_bookings, 1);
    assert_eq!(stats.total_revenue, 249.5);
    assert_eq!(stats.monthly_revenue.len(), 6);

    let mut out = Vec::new();
    handle_dashboard(&ctx.services, &mut out).await.unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("Admin dashboard"));
    assert!(text.contains("Total revenue   : ₹249.50"));
}

#[tokio::test]
async fn test_expired_session_on_dashboard_asks_for_login() {
    let ctx = TestContext::new().await;
    ctx.sign_in("Admin", "admin@example.com", 1);
    for resource in ["ScheduleEvent", "User", "EventBooking", "Payment"] {
        ctx.api.mock_status("GET", resource, 401).await;
    }

    let mut out = Vec::new();
    let err = handle_dashboard(&ctx.services, &mut out).await.unwrap_err();
    assert_matches!(err, TicketdeskError::SessionExpired);
    assert!(err.requires_login());
    assert!(!ctx.services.session().is_authenticated());
    assert!(!String::from_utf8(out).unwrap().contains("Total revenue"));

    let err = ctx.services.stats_service.admin_stats().await.unwrap_err();
    assert_matches!(err, TicketdeskError::LoginRequired { ref redirect } if redirect == "/admin");
}

#[tokio::test]
async fn test_expired_session_while_joining_my_bookings() {
    let ctx = TestContext::new().await;
    ctx.sign_in("User", USER_EMAIL, 12);
    ctx.api
        .mock_json("GET", "EventBooking/my-bookings", 200, json!([booking_json(32, 8, Some(150.0), USER_EMAIL, false)]))
        .await;
    ctx.api.mock_status("GET", "ScheduleEvent", 401).await;
    ctx.api.mock_json("GET", "Payment", 200, json!([])).await;

    let err = ctx.services.dashboard_service.my_bookings().await.unwrap_err();
    assert_matches!(err, TicketdeskError::SessionExpired);
    assert!(!ctx.services.session().is_authenticated());
}

#[tokio::test]
async fn test_organizer_dashboard_counts_own_events_only() {
    let ctx = TestContext::new().await;
    ctx.sign_in("Organizer", "org@example.com", 3);

    let mut foreign = event_json(9, 500.0);
    foreign["userId"] = json!(5);
    ctx.api
        .mock_json("GET", "ScheduleEvent", 200, json!([event_json(7, 0.0), event_json(8, 150.0), foreign]))
        .await;
    ctx.api
        .mock_json(
            "GET",
            "EventBooking",
            200,
            json!([
                booking_json(32, 8, Some(150.0), USER_EMAIL, false),
                booking_json(33, 8, Some(150.0), USER_EMAIL, true),
                booking_json(36, 9, Some(500.0), USER_EMAIL, false)
            ]),
        )
        .await;
    ctx.api.mock_json("GET", "Payment", 200, json!([])).await;

    let stats = ctx.services.stats_service.organizer_stats().await.unwrap();
    assert_eq!(stats.total_events, 2);
    assert_eq!(stats.active_bookings, 1);
    assert_eq!(stats.total_revenue, 150.0);

    let mut out = Vec::new();
    handle_dashboard(&ctx.services, &mut out).await.unwrap();
    assert!(String::from_utf8(out).unwrap().contains("Organizer dashboard"));
}
