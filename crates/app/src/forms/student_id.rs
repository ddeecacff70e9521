use serde_json::Value;
use shared_types::{
    is_valid_section, sanitize_phone, sections_for, AppError, ImageArtifact, PhoneCheck,
    StudentIdApplication, GRADE_LEVELS,
};
use studio_client::{StudioClient, SubmissionResult};

use super::{already_submitting, first_issue, FieldIssue, ReviewGate};
use crate::review::{ReviewModal, ReviewRow};

/// Fields of the student-ID form. `Photo` and `Signature` are filled through
/// [`StudentIdForm::set_photo`] and [`StudentIdForm::set_signature`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StudentField {
    Lrn,
    FirstName,
    MiddleName,
    LastName,
    Phone,
    Grade,
    Section,
    EmergencyName,
    EmergencyPhone,
    EmergencyAddress,
    Photo,
    Signature,
}

impl StudentField {
    const TEXT: [StudentField; 10] = [
        StudentField::Lrn,
        StudentField::FirstName,
        StudentField::MiddleName,
        StudentField::LastName,
        StudentField::Phone,
        StudentField::Grade,
        StudentField::Section,
        StudentField::EmergencyName,
        StudentField::EmergencyPhone,
        StudentField::EmergencyAddress,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Lrn => "LRN",
            Self::FirstName => "First Name",
            Self::MiddleName => "Middle Name",
            Self::LastName => "Last Name",
            Self::Phone => "Phone",
            Self::Grade => "Grade Level",
            Self::Section => "Section",
            Self::EmergencyName => "Emergency Contact",
            Self::EmergencyPhone => "Emergency Phone",
            Self::EmergencyAddress => "Emergency Address",
            Self::Photo => "Photo",
            Self::Signature => "Signature",
        }
    }
}

/// Student-ID application form.
#[derive(Debug, Clone, Default)]
pub struct StudentIdForm {
    draft: StudentIdApplication,
    middle_name: String,
    section_options: Vec<&'static str>,
    username: Option<String>,
    submitting: bool,
    reset_counter: u32,
}

impl StudentIdForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_username(mut self, username: Option<String>) -> Self {
        self.username = username;
        self
    }

    pub fn grade_options(&self) -> &'static [&'static str] {
        GRADE_LEVELS
    }

    /// Sections of the selected grade; empty until one is chosen.
    pub fn section_options(&self) -> &[&'static str] {
        &self.section_options
    }

    pub fn value(&self, field: StudentField) -> &str {
        let d = &self.draft;
        match field {
            StudentField::Lrn => &d.lrn,
            StudentField::FirstName => &d.first_name,
            StudentField::MiddleName => &self.middle_name,
            StudentField::LastName => &d.last_name,
            StudentField::Phone => &d.phone,
            StudentField::Grade => &d.grade,
            StudentField::Section => &d.section,
            StudentField::EmergencyName => &d.emergency_contact_name,
            StudentField::EmergencyPhone => &d.emergency_contact_phone,
            StudentField::EmergencyAddress => &d.emergency_contact_address,
            StudentField::Photo => d.photo.as_ref().map(ImageArtifact::data_url).unwrap_or(""),
            StudentField::Signature => d.signature.as_ref().map(ImageArtifact::data_url).unwrap_or(""),
        }
    }

    /// Update a text field. Both phone fields are reduced to at most 11
    /// digits; changing the grade clears the section and reloads its options.
    pub fn set(&mut self, field: StudentField, value: &str) {
        let d = &mut self.draft;
        match field {
            StudentField::Lrn => d.lrn = value.trim().to_string(),
            StudentField::FirstName => d.first_name = value.to_string(),
            StudentField::MiddleName => self.middle_name = value.to_string(),
            StudentField::LastName => d.last_name = value.to_string(),
            StudentField::Phone => d.phone = sanitize_phone(value),
            StudentField::Grade => {
                d.grade = value.to_string();
                d.section.clear();
                self.section_options = sections_for(value).to_vec();
            }
            StudentField::Section => d.section = value.to_string(),
            StudentField::EmergencyName => d.emergency_contact_name = value.to_string(),
            StudentField::EmergencyPhone => d.emergency_contact_phone = sanitize_phone(value),
            StudentField::EmergencyAddress => d.emergency_contact_address = value.to_string(),
            StudentField::Photo | StudentField::Signature => {
                tracing::debug!(field = field.label(), "Images are set through the capture widgets");
            }
        }
    }

    pub fn set_photo(&mut self, photo: Option<ImageArtifact>) {
        self.draft.photo = photo;
    }

    pub fn set_signature(&mut self, signature: Option<ImageArtifact>) {
        self.draft.signature = signature;
    }

    pub fn phone_check(&self) -> PhoneCheck {
        PhoneCheck::of(&self.draft.phone)
    }

    pub fn emergency_phone_check(&self) -> PhoneCheck {
        PhoneCheck::of(&self.draft.emergency_contact_phone)
    }

    /// Inline message for `field`, if it holds a partial phone number.
    pub fn field_error(&self, field: StudentField) -> Option<&'static str> {
        match field {
            StudentField::Phone => self.phone_check().message(),
            StudentField::EmergencyPhone => self.emergency_phone_check().message(),
            _ => None,
        }
    }

    pub fn reset_counter(&self) -> u32 {
        self.reset_counter
    }

    /// Clear every field, option list and artifact; capture widgets observe
    /// the bumped counter and clear themselves.
    pub fn reset(&mut self) {
        self.draft = StudentIdApplication::default();
        self.middle_name.clear();
        self.section_options.clear();
        self.reset_counter = self.reset_counter.wrapping_add(1);
    }

    fn blocking_issue(&self) -> Option<FieldIssue<StudentField>> {
        let d = &self.draft;
        first_issue(&[
            (d.lrn.is_empty(), StudentField::Lrn, "LRN is required"),
            (d.first_name.trim().is_empty(), StudentField::FirstName, "First name is required"),
            (d.last_name.trim().is_empty(), StudentField::LastName, "Last name is required"),
            (!GRADE_LEVELS.contains(&d.grade.as_str()), StudentField::Grade, "Please select a grade level."),
            (!is_valid_section(&d.grade, &d.section), StudentField::Section, "Please select a section."),
            (d.photo.is_none(), StudentField::Photo, "Please upload a photo."),
            (d.signature.is_none(), StudentField::Signature, "Please provide your signature."),
            (d.phone.is_empty(), StudentField::Phone, "Phone number is required"),
            (
                d.emergency_contact_name.trim().is_empty(),
                StudentField::EmergencyName,
                "Emergency contact name is required",
            ),
            (
                d.emergency_contact_phone.is_empty(),
                StudentField::EmergencyPhone,
                "Emergency contact number is required",
            ),
            (
                d.emergency_contact_address.trim().is_empty(),
                StudentField::EmergencyAddress,
                "Emergency contact address is required",
            ),
            (!self.phone_check().is_valid(), StudentField::Phone, shared_types::PHONE_LENGTH_MESSAGE),
            (
                !self.emergency_phone_check().is_valid(),
                StudentField::EmergencyPhone,
                shared_types::PHONE_LENGTH_MESSAGE,
            ),
        ])
    }

    pub fn review(&self) -> ReviewGate<StudentField> {
        if let Some(issue) = self.blocking_issue() {
            return ReviewGate::Blocked(issue);
        }
        let rows = StudentField::TEXT
            .iter()
            .map(|&field| ReviewRow::new(field.label(), self.value(field)))
            .collect();
        let attachments = [
            (StudentField::Photo.label(), &self.draft.photo),
            (StudentField::Signature.label(), &self.draft.signature),
        ]
        .into_iter()
        .filter_map(|(label, artifact)| artifact.clone().map(|a| (label, a)))
        .collect();
        ReviewGate::Open(ReviewModal {
            title: "Review Your Application",
            rows,
            attachments,
        })
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn begin_submit(&mut self) -> Result<StudentIdApplication, AppError> {
        if self.submitting {
            return Err(already_submitting());
        }
        if let Some(issue) = self.blocking_issue() {
            return Err(AppError::field(issue.field.label(), issue.message));
        }
        self.submitting = true;
        let mut application = self.draft.clone();
        application.middle_name = Some(self.middle_name.clone()).filter(|m| !m.trim().is_empty());
        application.username = self.username.clone();
        Ok(application)
    }

    /// Record the outcome. The draft is cleared only on success.
    pub fn finish_submit<T>(&mut self, result: &SubmissionResult<T>) {
        self.submitting = false;
        if result.is_success() {
            self.reset();
        }
    }

    pub async fn submit(&mut self, client: &StudioClient) -> Result<SubmissionResult<Value>, AppError> {
        let application = self.begin_submit()?;
        let result = client.submit_student_application(&application).await;
        self.finish_submit(&result);
        Ok(result)
    }
}
