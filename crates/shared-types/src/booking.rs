use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;

#[cfg(feature = "validation")]
use validator::Validate;

use crate::common::{de_id, de_text, parse_date};
use crate::error::AppError;

// ---------------------------------------------------------------------------
// Status state machine
// ---------------------------------------------------------------------------

/// Lifecycle status of a persisted booking.
///
/// `Rejected` and `Cancelled` are the same terminal state under two labels;
/// which label the admin writes is a configuration choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BookingStatus {
    #[default]
    Pending,
    Confirmed,
    Completed,
    Rejected,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Confirmed => "Confirmed",
            Self::Completed => "Completed",
            Self::Rejected => "Rejected",
            Self::Cancelled => "Cancelled",
        }
    }

    /// Case-insensitive parse. `Canceled` is accepted as an alternate spelling.
    pub fn from_str_opt(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Some(Self::Pending),
            "confirmed" => Some(Self::Confirmed),
            "completed" => Some(Self::Completed),
            "rejected" => Some(Self::Rejected),
            "cancelled" | "canceled" => Some(Self::Cancelled),
            _ => None,
        }
    }

    /// Parse the configured rejection label, falling back to `Rejected`.
    pub fn rejection_label(configured: &str) -> Self {
        match Self::from_str_opt(configured) {
            Some(Self::Cancelled) => Self::Cancelled,
            _ => Self::Rejected,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Rejected | Self::Cancelled)
    }

    /// Rejected and Cancelled compare as the same state.
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Rejected | Self::Cancelled)
    }

    /// Whether an admin may move a booking from `self` to `to`.
    pub fn can_transition(&self, to: BookingStatus) -> bool {
        match self {
            Self::Pending => matches!(to, Self::Confirmed) || to.is_rejection(),
            Self::Confirmed => matches!(to, Self::Completed) || to.is_rejection(),
            Self::Completed | Self::Rejected | Self::Cancelled => false,
        }
    }

    /// Actions an admin UI may offer for a booking in this state.
    pub fn allowed_actions(&self) -> &'static [BookingAction] {
        match self {
            Self::Pending => &[BookingAction::Approve, BookingAction::Reject],
            Self::Confirmed => &[BookingAction::MarkDone, BookingAction::Reject],
            Self::Completed | Self::Rejected | Self::Cancelled => &[],
        }
    }

    /// Resolve `action` against the current state.
    ///
    /// `rejection` is the label written for [`BookingAction::Reject`].
    pub fn apply(&self, action: BookingAction, rejection: BookingStatus) -> Result<BookingStatus, AppError> {
        let target = match action {
            BookingAction::Approve => Self::Confirmed,
            BookingAction::MarkDone => Self::Completed,
            BookingAction::Reject => rejection,
        };
        if self.allowed_actions().contains(&action) && self.can_transition(target) {
            Ok(target)
        } else {
            Err(AppError::bad_request(format!(
                "Cannot move a {} booking to {}",
                self.as_str(),
                target.as_str()
            )))
        }
    }

    /// Deletion is only offered once a booking has reached a terminal state.
    pub fn can_delete(&self) -> bool {
        self.is_terminal()
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for BookingStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Missing, null or unknown statuses are ingested as `Pending`.
impl<'de> Deserialize<'de> for BookingStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw
            .as_deref()
            .and_then(BookingStatus::from_str_opt)
            .unwrap_or_default())
    }
}

/// Admin actions that move a booking through its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BookingAction {
    Approve,
    Reject,
    MarkDone,
}

impl BookingAction {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Approve => "Approve",
            Self::Reject => "Reject",
            Self::MarkDone => "Mark as Done",
        }
    }
}

// ---------------------------------------------------------------------------
// Request DTOs
// ---------------------------------------------------------------------------

/// Booking draft as sent to `POST /bookings`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct BookingRequest {
    #[serde(rename = "fullname")]
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Full name is required"))
    )]
    pub full_name: String,
    #[cfg_attr(
        feature = "validation",
        validate(email(message = "Valid email is required"))
    )]
    pub email: String,
    #[serde(rename = "phonenumber")]
    #[cfg_attr(
        feature = "validation",
        validate(length(equal = 11, message = "Phone number must be 11 digits"))
    )]
    pub phone: String,
    pub location: String,
    #[serde(rename = "category")]
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Service is required"))
    )]
    pub service_category: String,
    #[serde(rename = "Package_type")]
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Package is required"))
    )]
    pub package_type: String,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Date is required"))
    )]
    pub date: String,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Time is required"))
    )]
    pub time: String,
    #[serde(rename = "details")]
    pub notes: String,
    /// Account the booking belongs to, when submitted by a signed-in user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

/// Body of `PUT /bookings/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateBookingStatusRequest {
    pub status: BookingStatus,
}

// ---------------------------------------------------------------------------
// Persisted record
// ---------------------------------------------------------------------------

/// A booking as returned by the backend.
///
/// Field aliases cover the naming variants different backend versions emit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingRecord {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    #[serde(rename = "fullname", alias = "full_name", alias = "fullName", default, deserialize_with = "de_text")]
    pub full_name: String,
    #[serde(default, deserialize_with = "de_text")]
    pub email: String,
    #[serde(rename = "phonenumber", alias = "phone", default, deserialize_with = "de_text")]
    pub phone: String,
    #[serde(default, deserialize_with = "de_text")]
    pub location: String,
    #[serde(rename = "category", alias = "service", default, deserialize_with = "de_text")]
    pub service_category: String,
    #[serde(rename = "Package_type", alias = "package", alias = "package_type", default, deserialize_with = "de_text")]
    pub package_type: String,
    #[serde(default, deserialize_with = "de_text")]
    pub date: String,
    #[serde(default, deserialize_with = "de_text")]
    pub time: String,
    #[serde(rename = "details", alias = "notes", default, deserialize_with = "de_text")]
    pub notes: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default)]
    pub status: BookingStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl BookingRecord {
    /// Calendar date of the booked session.
    pub fn booked_on(&self) -> Option<NaiveDate> {
        parse_date(&self.date)
    }

    /// Case-insensitive substring match over the name and contact fields.
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return true;
        }
        [&self.full_name, &self.email, &self.phone, &self.service_category]
            .iter()
            .any(|field| field.to_lowercase().contains(&term))
    }
}

/// Order record identifiers numerically when both are numbers, else lexically.
pub fn compare_ids(a: &str, b: &str) -> Ordering {
    match (a.parse::<i64>(), b.parse::<i64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        _ => a.cmp(b),
    }
}
