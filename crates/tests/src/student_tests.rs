use axum::http::StatusCode;
use serde_json::json;
use shared_types::StudentStatus;
use studio_app::admin::StudentListView;
use studio_app::forms::{StudentField, StudentIdForm};

use crate::common::{png_artifact, MockBackend};

fn complete_form() -> StudentIdForm {
    let mut form = StudentIdForm::new().with_username(Some("lia".into()));
    form.set(StudentField::Lrn, "123456789012");
    form.set(StudentField::FirstName, "Lia");
    form.set(StudentField::MiddleName, "Reyes");
    form.set(StudentField::LastName, "Gomez");
    form.set(StudentField::Phone, "09123456789");
    form.set(StudentField::Grade, "Grade 9");
    form.set(StudentField::Section, "Emerald");
    form.set(StudentField::EmergencyName, "Rosa Gomez");
    form.set(StudentField::EmergencyPhone, "09998887777");
    form.set(StudentField::EmergencyAddress, "12 Mabini St");
    form.set_photo(Some(png_artifact()));
    form.set_signature(Some(png_artifact()));
    form
}

#[tokio::test]
async fn test_application_is_sent_as_multipart() {
    let backend = MockBackend::start().await;
    let mut form = complete_form();

    let result = form.submit(&backend.client()).await.unwrap();

    assert!(result.is_success(), "Submission should succeed: {:?}", result);
    assert_eq!(backend.hits("POST /student-id"), 1);
    let state = backend.state.lock().unwrap();
    assert_eq!(state.last_text_fields["lrn"], "123456789012");
    assert_eq!(state.last_text_fields["firstname"], "Lia");
    assert_eq!(state.last_text_fields["middlename"], "Reyes");
    assert_eq!(state.last_text_fields["emName"], "Rosa Gomez");
    assert_eq!(state.last_text_fields["username"], "lia");
    let photo = &state.last_files["photo"];
    assert_eq!(photo.file_name, "photo.png");
    assert_eq!(photo.content_type, "image/png");
    assert_eq!(photo.bytes[..4], [0x89, b'P', b'N', b'G']);
    assert_eq!(state.last_files["signature"].file_name, "signature.png");
    drop(state);
    assert_eq!(form.value(StudentField::Lrn), "", "Draft should be cleared after success");
}

#[tokio::test]
async fn test_missing_signature_blocks_without_network() {
    let backend = MockBackend::start().await;
    let mut form = complete_form();
    form.set_signature(None);

    let err = form.submit(&backend.client()).await.unwrap_err();

    assert_eq!(
        err.field_errors.get("Signature").map(String::as_str),
        Some("Please provide your signature.")
    );
    assert_eq!(backend.total_hits(), 0);
}

#[tokio::test]
async fn test_backend_rejection_keeps_the_draft() {
    let backend = MockBackend::start().await;
    backend.fail_next(StatusCode::BAD_REQUEST, json!({"error": "LRN already registered"}));
    let mut form = complete_form();

    let result = form.submit(&backend.client()).await.unwrap();

    assert_eq!(result.error_message(), Some("LRN already registered"));
    assert_eq!(form.value(StudentField::Lrn), "123456789012");
    assert!(!form.value(StudentField::Photo).is_empty());
}

#[tokio::test]
async fn test_records_without_status_are_pending_and_can_be_approved() {
    let backend = MockBackend::start().await;
    let id = backend.seed_student(json!({}));
    let client = backend.client();
    let mut view = StudentListView::new(true);
    view.refresh(&client).await.unwrap();
    assert_eq!(view.students()[0].status, StudentStatus::Pending);

    let request = view.request_approve(&id).unwrap();
    assert_eq!(request.title, "Approve Application");
    view.confirm(&client).await.unwrap();

    assert_eq!(backend.student(&id).unwrap()["status"], "Approved");
    assert_eq!(view.students()[0].status, StudentStatus::Approved);
    assert!(view.request_approve(&id).is_err(), "Approval is one-way");
}

#[tokio::test]
async fn test_approval_without_status_endpoint_sends_nothing() {
    let backend = MockBackend::start().await;
    let id = backend.seed_student(json!({}));
    let client = backend.client();
    let mut view = StudentListView::new(false);
    view.refresh(&client).await.unwrap();

    assert!(view.request_approve(&id).is_err());
    assert_eq!(backend.hits(&format!("PUT /student-id/{}", id)), 0);
}

#[tokio::test]
async fn test_delete_application() {
    let backend = MockBackend::start().await;
    let keep = backend.seed_student(json!({"firstname": "Keep"}));
    let gone = backend.seed_student(json!({"firstname": "Gone", "grade": "10"}));
    let client = backend.client();
    let mut view = StudentListView::new(true);
    view.refresh(&client).await.unwrap();
    view.set_grade_tab("10").unwrap();
    assert_eq!(view.visible().len(), 1);

    view.request_delete(&gone).unwrap();
    view.confirm(&client).await.unwrap();

    assert!(backend.student(&gone).is_none());
    assert!(backend.student(&keep).is_some());
    assert!(view.visible().is_empty());
}

#[tokio::test]
async fn test_failed_approval_can_be_retried() {
    let backend = MockBackend::start().await;
    let id = backend.seed_student(json!({}));
    let client = backend.client();
    let mut view = StudentListView::new(true);
    view.refresh(&client).await.unwrap();

    view.request_approve(&id).unwrap();
    backend.fail_next(StatusCode::SERVICE_UNAVAILABLE, json!({"message": "Try again later"}));
    assert!(view.confirm(&client).await.is_err());
    assert!(view.pending().is_some());

    view.confirm(&client).await.unwrap();
    assert!(view.pending().is_none());
    assert_eq!(backend.student(&id).unwrap()["status"], "Approved");
}
