use axum::http::StatusCode;
use serde_json::json;
use shared_types::ServiceCatalog;
use studio_app::forms::{BookingField, BookingForm};
use studio_client::SubmissionResult;

use crate::common::MockBackend;

fn filled_form() -> BookingForm {
    let mut form = BookingForm::new(ServiceCatalog::builtin()).with_username(Some("ana".into()));
    form.set(BookingField::FullName, "Ana Cruz");
    form.set(BookingField::Email, "ana@example.com");
    form.set(BookingField::Phone, "0912-345-6789");
    form.set(BookingField::Location, "Quezon City");
    form.set(BookingField::Service, "debut");
    form.set(BookingField::Package, "Premium Debut");
    form.set(BookingField::Date, "2026-12-12");
    form.set(BookingField::Time, "16:00");
    form
}

#[tokio::test]
async fn test_submit_booking_sends_wire_fields_once() {
    let backend = MockBackend::start().await;
    let client = backend.client();
    let mut form = filled_form();

    let result = form.submit(&client).await.unwrap();

    assert!(result.is_success(), "Submission should succeed: {:?}", result);
    assert_eq!(backend.hits("POST /bookings"), 1);
    let stored = backend.booking("1").expect("Booking should be stored");
    assert_eq!(stored["fullname"], "Ana Cruz");
    assert_eq!(stored["phonenumber"], "09123456789");
    assert_eq!(stored["category"], "debut");
    assert_eq!(stored["Package_type"], "Premium Debut");
    assert_eq!(stored["username"], "ana");
    assert_eq!(form.value(BookingField::FullName), "", "Draft should be cleared after success");
    assert_eq!(form.reset_counter(), 1);
}

#[tokio::test]
async fn test_invalid_draft_never_reaches_backend() {
    let backend = MockBackend::start().await;
    let client = backend.client();
    let mut form = filled_form();
    form.set(BookingField::Phone, "0912345678");

    let err = form.submit(&client).await.unwrap_err();

    assert!(err.is_validation());
    assert_eq!(backend.total_hits(), 0, "Blocked submission must not touch the network");
    assert!(!form.is_submitting());
}

#[tokio::test]
async fn test_backend_message_is_shown_verbatim_and_draft_kept() {
    let backend = MockBackend::start().await;
    let client = backend.client();
    backend.fail_next(
        StatusCode::CONFLICT,
        json!({"success": false, "message": "That date is fully booked"}),
    );
    let mut form = filled_form();

    let result = form.submit(&client).await.unwrap();

    assert_eq!(result.error_message(), Some("That date is fully booked"));
    assert_eq!(form.value(BookingField::FullName), "Ana Cruz");
    assert!(!form.is_submitting(), "Submit control should be enabled again");
}

#[tokio::test]
async fn test_success_false_body_is_a_failure() {
    let backend = MockBackend::start().await;
    let client = backend.client();
    backend.fail_next(StatusCode::OK, json!({"success": false, "message": "Package unavailable"}));
    let mut form = filled_form();

    let result = form.submit(&client).await.unwrap();

    assert_eq!(
        result,
        SubmissionResult::Failed { message: "Package unavailable".into() }
    );
}

#[tokio::test]
async fn test_network_failure_reports_generic_message() {
    let backend = MockBackend::start().await;
    let base_url = backend.base_url.clone();
    drop(backend);
    // Give the aborted server a moment to release the socket.
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;

    let client = studio_client::StudioClient::new(base_url, std::time::Duration::from_secs(2)).unwrap();
    let mut form = filled_form();

    let result = form.submit(&client).await.unwrap();

    assert_eq!(result.error_message(), Some("Booking failed. Please try again."));
    assert_eq!(form.value(BookingField::Email), "ana@example.com");
}

#[tokio::test]
async fn test_html_error_page_falls_back_to_generic_message() {
    let backend = MockBackend::start().await;
    let client = backend.client();
    backend.fail_next(StatusCode::INTERNAL_SERVER_ERROR, json!(null));
    let mut form = filled_form();

    let result = form.submit(&client).await.unwrap();

    assert_eq!(result.error_message(), Some("Booking failed. Please try again."));
}

#[tokio::test]
async fn test_remote_catalog_only_when_enabled() {
    let backend = MockBackend::start().await;
    let client = backend.client();
    let mut config = shared_types::AppConfig::default();

    let builtin = client.service_catalog(&config).await;
    assert!(builtin.get("newborn").is_none());
    assert_eq!(backend.hits("GET /services"), 0);

    config.features.remote_services = true;
    let remote = client.service_catalog(&config).await;
    assert_eq!(remote.packages_for("newborn"), vec!["Sleepy Baby".to_string()]);

    backend.fail_next(StatusCode::INTERNAL_SERVER_ERROR, json!({}));
    let fallback = client.service_catalog(&config).await;
    assert!(fallback.get("newborn").is_none());
    assert!(fallback.get("wedding").is_some());
}
