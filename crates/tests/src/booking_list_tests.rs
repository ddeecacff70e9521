use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use shared_types::{BookingAction, BookingStatus};
use studio_app::admin::{BookingListView, BookingTab};

use crate::common::{ListShape, MockBackend};

fn seed(backend: &MockBackend) {
    backend.seed_booking(json!({"fullname": "Ana Cruz", "status": "Pending"}));
    backend.seed_booking(json!({"fullname": "Ben Reyes", "status": "Confirmed", "date": "2026-11-20"}));
    backend.seed_booking(json!({"fullname": "Cara Lim", "status": "Completed"}));
}

async fn names_for(shape: ListShape) -> Vec<String> {
    let backend = MockBackend::start().await;
    seed(&backend);
    backend.set_booking_shape(shape);
    let mut view = BookingListView::new(BookingStatus::Rejected);
    view.refresh(&backend.client()).await.unwrap();
    view.bookings().iter().map(|b| b.full_name.clone()).collect()
}

#[tokio::test]
async fn test_wrapped_and_bare_lists_are_identical() {
    let bare = names_for(ListShape::Bare).await;
    assert_eq!(bare, vec!["Ana Cruz", "Ben Reyes", "Cara Lim"]);
    assert_eq!(names_for(ListShape::Data).await, bare);
    assert_eq!(names_for(ListShape::Bookings).await, bare);
}

#[tokio::test]
async fn test_unknown_shape_yields_empty_list() {
    assert!(names_for(ListShape::Unknown).await.is_empty());
}

#[tokio::test]
async fn test_confirmed_transition_updates_backend_and_refetches() {
    let backend = MockBackend::start().await;
    seed(&backend);
    let client = backend.client();
    let mut view = BookingListView::new(BookingStatus::Rejected);
    view.refresh(&client).await.unwrap();

    view.request_transition("1", BookingAction::Approve).unwrap();
    assert_eq!(backend.hits("PUT /bookings/1"), 0, "Nothing is sent before confirmation");
    view.confirm(&client).await.unwrap();

    assert_eq!(backend.booking("1").unwrap()["status"], "Confirmed");
    assert_eq!(backend.hits("GET /bookings"), 2, "Confirming should re-fetch the list");
    view.set_tab(BookingTab::Confirmed);
    let ids: Vec<&str> = view.visible().iter().map(|b| b.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2"]);
}

#[tokio::test]
async fn test_pending_to_completed_is_blocked_without_network() {
    let backend = MockBackend::start().await;
    seed(&backend);
    let client = backend.client();
    let mut view = BookingListView::new(BookingStatus::Rejected);
    view.refresh(&client).await.unwrap();
    let before = backend.total_hits();

    let err = view.request_transition("1", BookingAction::MarkDone).unwrap_err();

    assert!(err.message.contains("Pending"), "Unexpected error: {}", err);
    assert!(view.pending().is_none());
    assert!(view.confirm(&client).await.is_err());
    assert_eq!(backend.total_hits(), before, "Blocked transition must not reach the backend");
    assert_eq!(backend.booking("1").unwrap()["status"], "Pending");
}

#[tokio::test]
async fn test_reject_writes_configured_label() {
    let backend = MockBackend::start().await;
    seed(&backend);
    let client = backend.client();
    let mut view = BookingListView::new(BookingStatus::Cancelled);
    view.refresh(&client).await.unwrap();

    view.request_transition("2", BookingAction::Reject).unwrap();
    view.confirm(&client).await.unwrap();

    assert_eq!(backend.booking("2").unwrap()["status"], "Cancelled");
    view.set_tab(BookingTab::Rejected);
    assert_eq!(view.visible().len(), 1);
}

#[tokio::test]
async fn test_cancelled_confirmation_sends_nothing() {
    let backend = MockBackend::start().await;
    seed(&backend);
    let client = backend.client();
    let mut view = BookingListView::new(BookingStatus::Rejected);
    view.refresh(&client).await.unwrap();

    view.request_delete("3").unwrap();
    view.cancel();

    assert_eq!(backend.hits("DELETE /bookings/3"), 0);
    assert!(backend.booking("3").is_some());
}

#[tokio::test]
async fn test_delete_completed_booking() {
    let backend = MockBackend::start().await;
    seed(&backend);
    let client = backend.client();
    let mut view = BookingListView::new(BookingStatus::Rejected);
    view.refresh(&client).await.unwrap();
    view.select("3").unwrap();

    view.request_delete("3").unwrap();
    view.confirm(&client).await.unwrap();

    assert!(backend.booking("3").is_none());
    assert!(view.selected().is_none());
    assert_eq!(view.bookings().len(), 2);
}

#[tokio::test]
async fn test_failed_confirmation_stays_staged_for_retry() {
    let backend = MockBackend::start().await;
    seed(&backend);
    let client = backend.client();
    let mut view = BookingListView::new(BookingStatus::Rejected);
    view.refresh(&client).await.unwrap();

    view.request_transition("1", BookingAction::Approve).unwrap();
    backend.fail_next(StatusCode::INTERNAL_SERVER_ERROR, json!({"message": "Database unavailable"}));
    let err = view.confirm(&client).await.unwrap_err();

    assert_eq!(err.message, "Database unavailable");
    assert!(view.pending().is_some(), "Request should stay staged after a failure");
    assert_eq!(backend.booking("1").unwrap()["status"], "Pending");

    view.confirm(&client).await.unwrap();
    assert!(view.pending().is_none());
    assert_eq!(backend.booking("1").unwrap()["status"], "Confirmed");
    assert_eq!(backend.hits("PUT /bookings/1"), 2);
}
