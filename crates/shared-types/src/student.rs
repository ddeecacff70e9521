use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

#[cfg(feature = "validation")]
use validator::Validate;

use crate::artifact::ImageArtifact;
use crate::common::{de_id, de_text, parse_timestamp};
use crate::error::AppError;

/// Review status of a student-ID application.
///
/// The backend may omit the column entirely; such records are ingested as
/// `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StudentStatus {
    #[default]
    Pending,
    Approved,
}

impl StudentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
        }
    }

    pub fn from_str_opt(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Some(Self::Pending),
            "approved" => Some(Self::Approved),
            _ => None,
        }
    }

    /// Approval is one-way.
    pub fn approve(&self) -> Result<StudentStatus, AppError> {
        match self {
            Self::Pending => Ok(Self::Approved),
            Self::Approved => Err(AppError::bad_request("Application is already approved")),
        }
    }
}

impl fmt::Display for StudentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for StudentStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for StudentStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw
            .as_deref()
            .and_then(StudentStatus::from_str_opt)
            .unwrap_or_default())
    }
}

/// Body of `PUT /student-id/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateStudentStatusRequest {
    pub status: StudentStatus,
}

/// A complete student-ID application ready for `POST /student-id`.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct StudentIdApplication {
    #[cfg_attr(feature = "validation", validate(length(min = 1, message = "LRN is required")))]
    pub lrn: String,
    #[cfg_attr(feature = "validation", validate(length(min = 1, message = "First name is required")))]
    pub first_name: String,
    pub middle_name: Option<String>,
    #[cfg_attr(feature = "validation", validate(length(min = 1, message = "Last name is required")))]
    pub last_name: String,
    #[cfg_attr(
        feature = "validation",
        validate(length(equal = 11, message = "Number must be 11 digits"))
    )]
    pub phone: String,
    #[cfg_attr(feature = "validation", validate(length(min = 1, message = "Grade is required")))]
    pub grade: String,
    #[cfg_attr(feature = "validation", validate(length(min = 1, message = "Section is required")))]
    pub section: String,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Emergency contact name is required"))
    )]
    pub emergency_contact_name: String,
    #[cfg_attr(
        feature = "validation",
        validate(length(equal = 11, message = "Number must be 11 digits"))
    )]
    pub emergency_contact_phone: String,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Emergency contact address is required"))
    )]
    pub emergency_contact_address: String,
    #[cfg_attr(feature = "validation", validate(required(message = "Photo is required")))]
    pub photo: Option<ImageArtifact>,
    #[cfg_attr(feature = "validation", validate(required(message = "Signature is required")))]
    pub signature: Option<ImageArtifact>,
    pub username: Option<String>,
}

impl StudentIdApplication {
    /// Text parts of the multipart body, keyed by backend field name.
    pub fn text_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("lrn", self.lrn.clone()),
            ("firstname", self.first_name.clone()),
            ("middlename", self.middle_name.clone().unwrap_or_default()),
            ("lastname", self.last_name.clone()),
            ("phone", self.phone.clone()),
            ("grade", self.grade.clone()),
            ("section", self.section.clone()),
            ("emName", self.emergency_contact_name.clone()),
            ("emPhone", self.emergency_contact_phone.clone()),
            ("emAddress", self.emergency_contact_address.clone()),
        ];
        if let Some(username) = &self.username {
            fields.push(("username", username.clone()));
        }
        fields
    }
}

/// A student-ID application as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentRecord {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    /// Learner reference number.
    #[serde(rename = "lrn", alias = "student_id", default, deserialize_with = "de_text")]
    pub lrn: String,
    #[serde(alias = "firstname", alias = "firstName", default, deserialize_with = "de_text")]
    pub first_name: String,
    #[serde(alias = "middlename", alias = "middleName", default, deserialize_with = "de_text")]
    pub middle_name: String,
    #[serde(alias = "lastname", alias = "lastName", default, deserialize_with = "de_text")]
    pub last_name: String,
    #[serde(default, deserialize_with = "de_text")]
    pub phone: String,
    #[serde(default, deserialize_with = "de_text")]
    pub grade: String,
    #[serde(default, deserialize_with = "de_text")]
    pub section: String,
    #[serde(rename = "emName", alias = "em_name", alias = "emergencyname", default, deserialize_with = "de_text")]
    pub emergency_contact_name: String,
    #[serde(rename = "emPhone", alias = "em_phone", alias = "emergencycontact", default, deserialize_with = "de_text")]
    pub emergency_contact_phone: String,
    #[serde(rename = "emAddress", alias = "em_address", alias = "address", default, deserialize_with = "de_text")]
    pub emergency_contact_address: String,
    /// Base64 photo (bare or data URL).
    #[serde(alias = "photo_path", default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    #[serde(alias = "signature_path", default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
    #[serde(default)]
    pub status: StudentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(rename = "dateSubmitted", default, skip_serializing_if = "Option::is_none")]
    pub date_submitted: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

impl StudentRecord {
    pub fn full_name(&self) -> String {
        [&self.first_name, &self.middle_name, &self.last_name]
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// First timestamp the backend provided for the submission.
    pub fn submission_time(&self) -> Option<&str> {
        [&self.submitted_at, &self.created_at, &self.date_submitted]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .find(|s| !s.trim().is_empty())
    }

    pub fn submitted(&self) -> Option<NaiveDateTime> {
        self.submission_time().and_then(parse_timestamp)
    }

    /// Matches first name, last name (case-insensitive) or LRN.
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.trim();
        if term.is_empty() {
            return true;
        }
        let lowered = term.to_lowercase();
        self.first_name.to_lowercase().contains(&lowered)
            || self.last_name.to_lowercase().contains(&lowered)
            || self.lrn.contains(term)
    }

    /// Grade filter tab: `All`, or a grade number matching `N` / `Grade N`.
    pub fn matches_grade(&self, tab: &str) -> bool {
        tab.eq_ignore_ascii_case("all") || self.grade == tab || self.grade == format!("Grade {}", tab)
    }
}
