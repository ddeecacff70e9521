use shared_types::{compare_ids, decode_stored_image, AppError, DecodedImage, StudentRecord, StudentStatus};
use studio_client::StudioClient;

use super::nothing_pending;
use crate::format_helpers::format_datetime_human;
use crate::review::{ConfirmationRequest, ReviewModal, ReviewRow, Tone};

/// Grade filter tabs. `All` plus the grade numbers.
pub const GRADE_TABS: &[&str] = &["All", "7", "8", "9", "10"];

/// A student-ID mutation awaiting confirmation.
#[derive(Debug, Clone, PartialEq)]
pub enum StudentCommand {
    Approve { id: String },
    Delete { id: String },
}

/// Admin list of student-ID applications.
#[derive(Debug, Clone)]
pub struct StudentListView {
    students: Vec<StudentRecord>,
    grade_tab: String,
    search: String,
    selected: Option<String>,
    pending: Option<ConfirmationRequest<StudentCommand>>,
    status_endpoint: bool,
    loaded: bool,
}

impl Default for StudentListView {
    fn default() -> Self {
        Self::new(true)
    }
}

impl StudentListView {
    /// `status_endpoint` says whether the backend accepts status updates.
    pub fn new(status_endpoint: bool) -> Self {
        Self {
            students: Vec::new(),
            grade_tab: "All".to_string(),
            search: String::new(),
            selected: None,
            pending: None,
            status_endpoint,
            loaded: false,
        }
    }

    pub fn from_config(config: &shared_types::AppConfig) -> Self {
        Self::new(config.features.student_status_endpoint)
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn students(&self) -> &[StudentRecord] {
        &self.students
    }

    pub fn replace(&mut self, students: Vec<StudentRecord>) {
        self.students = students;
        self.loaded = true;
        if let Some(id) = &self.selected {
            if !self.students.iter().any(|s| &s.id == id) {
                self.selected = None;
            }
        }
    }

    #[tracing::instrument(skip_all)]
    pub async fn refresh(&mut self, client: &StudioClient) -> Result<(), AppError> {
        let students = client.list_students().await?;
        tracing::debug!(count = students.len(), "Student applications refreshed");
        self.replace(students);
        Ok(())
    }

    pub fn grade_tab(&self) -> &str {
        &self.grade_tab
    }

    /// Select a grade tab; anything other than [`GRADE_TABS`] is refused.
    pub fn set_grade_tab(&mut self, tab: &str) -> Result<(), AppError> {
        let tab = tab.trim().trim_start_matches("Grade ").trim();
        match GRADE_TABS.iter().find(|t| t.eq_ignore_ascii_case(tab)) {
            Some(t) => {
                self.grade_tab = t.to_string();
                Ok(())
            }
            None => Err(AppError::bad_request(format!("Unknown grade filter: {}", tab))),
        }
    }

    pub fn set_search(&mut self, term: &str) {
        self.search = term.to_string();
    }

    pub fn visible(&self) -> Vec<&StudentRecord> {
        let mut rows: Vec<&StudentRecord> = self
            .students
            .iter()
            .filter(|s| s.matches_grade(&self.grade_tab) && s.matches_search(&self.search))
            .collect();
        rows.sort_by(|a, b| compare_ids(&a.id, &b.id));
        rows
    }

    fn find(&self, id: &str) -> Result<&StudentRecord, AppError> {
        self.students
            .iter()
            .find(|s| s.id == id)
            .ok_or_else(|| AppError::not_found(format!("Application {} not found", id)))
    }

    pub fn select(&mut self, id: &str) -> Result<(), AppError> {
        self.find(id)?;
        self.selected = Some(id.to_string());
        Ok(())
    }

    pub fn close_detail(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<&StudentRecord> {
        let id = self.selected.as_deref()?;
        self.students.iter().find(|s| s.id == id)
    }

    pub fn detail(&self) -> Option<ReviewModal> {
        let s = self.selected()?;
        Some(ReviewModal {
            title: "Application Details",
            rows: vec![
                ReviewRow::new("LRN", s.lrn.as_str()),
                ReviewRow::new("Name", s.full_name()),
                ReviewRow::new("Phone", s.phone.as_str()),
                ReviewRow::new("Grade Level", s.grade.as_str()),
                ReviewRow::new("Section", s.section.as_str()),
                ReviewRow::new("Emergency Contact", s.emergency_contact_name.as_str()),
                ReviewRow::new("Emergency Phone", s.emergency_contact_phone.as_str()),
                ReviewRow::new("Emergency Address", s.emergency_contact_address.as_str()),
                ReviewRow::new("Submitted", s.submission_time().map(format_datetime_human).unwrap_or_default()),
                ReviewRow::new("Status", s.status.as_str()),
            ],
            attachments: Vec::new(),
        })
    }

    /// Decoded photo and signature of the selected application as
    /// `(file name, image)` pairs ready to be written to disk.
    pub fn export_images(&self) -> Result<Vec<(&'static str, DecodedImage)>, AppError> {
        let s = self
            .selected()
            .ok_or_else(|| AppError::bad_request("No application is selected"))?;
        let mut files = Vec::new();
        for (name, stored) in [("student-photo.png", &s.photo), ("student-sig.png", &s.signature)] {
            if let Some(stored) = stored.as_deref().filter(|v| !v.trim().is_empty()) {
                files.push((name, decode_stored_image(stored)?));
            }
        }
        Ok(files)
    }

    /// Stage an approval. Already-approved applications and backends without
    /// a status endpoint are refused up front.
    pub fn request_approve(&mut self, id: &str) -> Result<&ConfirmationRequest<StudentCommand>, AppError> {
        let student = self.find(id)?;
        if !self.status_endpoint {
            return Err(AppError::bad_request(
                "Approving applications is not supported by this backend",
            ));
        }
        student.status.approve()?;
        Ok(self.pending.insert(ConfirmationRequest::new(
            "Approve Application",
            "Approve this student ID application?",
            Tone::Positive,
            StudentCommand::Approve { id: id.to_string() },
        )))
    }

    pub fn request_delete(&mut self, id: &str) -> Result<&ConfirmationRequest<StudentCommand>, AppError> {
        self.find(id)?;
        Ok(self.pending.insert(ConfirmationRequest::new(
            "Delete Application?",
            "Delete this application?",
            Tone::Destructive,
            StudentCommand::Delete { id: id.to_string() },
        )))
    }

    pub fn pending(&self) -> Option<&ConfirmationRequest<StudentCommand>> {
        self.pending.as_ref()
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Perform the staged mutation, then re-fetch. A failed call leaves the
    /// request staged so it can be confirmed again.
    pub async fn confirm(&mut self, client: &StudioClient) -> Result<(), AppError> {
        let action = self.pending.as_ref().ok_or_else(nothing_pending)?.action.clone();
        match &action {
            StudentCommand::Approve { id } => {
                client.update_student_status(id, StudentStatus::Approved).await?;
            }
            StudentCommand::Delete { id } => {
                client.delete_student(id).await?;
                if self.selected.as_deref() == Some(id.as_str()) {
                    self.selected = None;
                }
            }
        }
        self.pending = None;
        self.refresh(client).await
    }
}
