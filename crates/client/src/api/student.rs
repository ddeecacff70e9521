use reqwest::multipart::{Form, Part};
use serde_json::Value;
use shared_types::{
    normalize_collection, AppError, ImageArtifact, StudentIdApplication, StudentRecord,
    StudentStatus, UpdateStudentStatusRequest,
};

use super::{segment, StudioClient};
use crate::error_convert::ValidateRequest;
use crate::submission::{SubmissionResult, APPLICATION_FAILURE};

/// Build the file part for an image artifact, e.g. `photo.png`.
fn image_part(field: &str, artifact: Option<&ImageArtifact>) -> Result<Part, AppError> {
    let artifact = artifact.ok_or_else(|| AppError::field(field, format!("{} is required", title(field))))?;
    let image = artifact
        .decode()
        .map_err(|e| AppError::field(field, e.message))?;
    let file_name = format!("{}.{}", field, image.extension());
    Part::bytes(image.bytes)
        .file_name(file_name)
        .mime_str(&image.mime)
        .map_err(|e| AppError::field(field, format!("Unsupported image type: {}", e)))
}

fn title(field: &str) -> String {
    let mut chars = field.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Assemble the complete multipart body. Fails without side effects if any
/// part cannot be built.
pub(crate) fn application_form(application: &StudentIdApplication) -> Result<Form, AppError> {
    let photo = image_part("photo", application.photo.as_ref())?;
    let signature = image_part("signature", application.signature.as_ref())?;
    let form = application
        .text_fields()
        .into_iter()
        .fold(Form::new(), |form, (name, value)| form.text(name, value));
    Ok(form.part("photo", photo).part("signature", signature))
}

impl StudioClient {
    /// Multipart `POST /student-id`. The whole form is built before the call.
    #[tracing::instrument(skip(self, application), fields(grade = %application.grade))]
    pub async fn create_student_application(&self, application: &StudentIdApplication) -> Result<Value, AppError> {
        application.validate_request()?;
        let form = application_form(application)?;
        let body = self
            .send(self.http.post(self.url("student-id")).multipart(form))
            .await?;
        tracing::info!(section = %application.section, "Student ID application submitted");
        Ok(body)
    }

    pub async fn submit_student_application(&self, application: &StudentIdApplication) -> SubmissionResult<Value> {
        SubmissionResult::from_result(
            self.create_student_application(application).await,
            APPLICATION_FAILURE,
        )
    }

    /// `GET /student-id`, normalized.
    #[tracing::instrument(skip(self))]
    pub async fn list_students(&self) -> Result<Vec<StudentRecord>, AppError> {
        let body = self.send(self.http.get(self.url("student-id"))).await?;
        let students: Vec<StudentRecord> = normalize_collection(body);
        tracing::debug!(count = students.len(), "Fetched student applications");
        Ok(students)
    }

    /// `GET /student-id/user/{username}`, normalized.
    #[tracing::instrument(skip(self))]
    pub async fn list_user_students(&self, username: &str) -> Result<Vec<StudentRecord>, AppError> {
        let path = format!("student-id/user/{}", segment(username));
        let body = self.send(self.http.get(self.url(&path))).await?;
        Ok(normalize_collection(body))
    }

    /// `PUT /student-id/{id}` with `{status}`.
    #[tracing::instrument(skip(self))]
    pub async fn update_student_status(&self, id: &str, status: StudentStatus) -> Result<(), AppError> {
        let path = format!("student-id/{}", segment(id));
        self.send(
            self.http
                .put(self.url(&path))
                .json(&UpdateStudentStatusRequest { status }),
        )
        .await?;
        tracing::info!(student_id = id, status = %status, "Student application status updated");
        Ok(())
    }

    /// `DELETE /student-id/{id}`.
    #[tracing::instrument(skip(self))]
    pub async fn delete_student(&self, id: &str) -> Result<(), AppError> {
        let path = format!("student-id/{}", segment(id));
        self.send(self.http.delete(self.url(&path))).await?;
        tracing::info!(student_id = id, "Student application deleted");
        Ok(())
    }
}
