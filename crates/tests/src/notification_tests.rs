use pretty_assertions::assert_eq;
use serde_json::json;
use shared_types::{AdminUser, SessionRecord};
use std::time::Duration;
use studio_app::NotificationCenter;
use studio_client::NotificationPoller;

use crate::common::{temp_session, MockBackend};

fn sign_in(session: &studio_client::SessionContext, username: &str) {
    session
        .set(SessionRecord {
            token: format!("token-{}", username),
            user: AdminUser {
                id: "1".into(),
                username: username.into(),
                role: None,
            },
        })
        .unwrap();
}

#[tokio::test]
async fn test_signed_out_poller_makes_no_requests() {
    let backend = MockBackend::start().await;
    let poller = NotificationPoller::new(backend.client(), temp_session(), Duration::from_secs(30));

    assert_eq!(poller.fetch_once().await.unwrap(), None);
    assert_eq!(backend.total_hits(), 0);
}

#[tokio::test]
async fn test_notifications_cover_only_the_current_user() {
    let backend = MockBackend::start().await;
    backend.seed_booking(json!({"username": "ana", "status": "Confirmed", "date": "2026-11-02"}));
    backend.seed_booking(json!({"username": "ben", "status": "Pending"}));
    backend.seed_student(json!({"username": "ana", "submitted_at": "2026-12-01T10:00:00Z"}));
    let session = temp_session();
    sign_in(&session, "ana");
    let poller = NotificationPoller::new(backend.client(), session, Duration::from_secs(30));

    let list = poller.fetch_once().await.unwrap().unwrap();

    let ids: Vec<&str> = list.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec!["student-3", "booking-1"], "Newest first");
    assert_eq!(list[1].message, "Your wedding booking is Confirmed");
    assert_eq!(backend.hits("GET /bookings/user/ana"), 1);
    assert_eq!(backend.hits("GET /student-id/user/ana"), 1);
    assert_eq!(backend.hits("GET /bookings/user/ben"), 0);
}

#[tokio::test]
async fn test_spawned_poller_publishes_and_reacts_to_sign_out() {
    let backend = MockBackend::start().await;
    backend.seed_booking(json!({"username": "ana"}));
    let session = temp_session();
    sign_in(&session, "ana");
    let handle = NotificationPoller::new(backend.client(), session.clone(), Duration::from_secs(3600)).spawn();
    let mut rx = handle.subscribe();

    tokio::time::timeout(Duration::from_secs(5), rx.wait_for(|list| !list.is_empty()))
        .await
        .expect("First poll should publish")
        .unwrap();
    let mut center = NotificationCenter::new();
    center.apply(handle.latest());
    assert_eq!(center.unread_count(), 1);
    center.mark_all_read();

    session.clear().unwrap();
    tokio::time::timeout(Duration::from_secs(5), rx.wait_for(|list| list.is_empty()))
        .await
        .expect("Sign-out should clear the list")
        .unwrap();
    assert!(handle.is_running());
    handle.stop();
}

#[tokio::test]
async fn test_failed_poll_keeps_previous_list() {
    let backend = MockBackend::start().await;
    backend.seed_booking(json!({"username": "ana"}));
    let session = temp_session();
    sign_in(&session, "ana");
    let poller = NotificationPoller::new(backend.client(), session, Duration::from_secs(30));
    let mut center = NotificationCenter::new();
    center.apply(poller.fetch_once().await.unwrap().unwrap());
    center.mark_read("booking-1");

    backend.fail_next(axum::http::StatusCode::SERVICE_UNAVAILABLE, json!({"message": "down"}));
    assert!(poller.fetch_once().await.is_err());

    center.apply(poller.fetch_once().await.unwrap().unwrap());
    assert_eq!(center.items().len(), 1);
    assert_eq!(center.unread_count(), 0, "Read flags survive refreshes");
}
