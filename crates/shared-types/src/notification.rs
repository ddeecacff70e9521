use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::booking::BookingRecord;
use crate::common::parse_timestamp;
use crate::student::StudentRecord;

/// Which record a notification was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationCategory {
    Booking,
    StudentId,
}

impl NotificationCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Booking => "booking",
            Self::StudentId => "student",
        }
    }
}

/// A status notice computed from one of the user's own records.
///
/// Notifications are never stored by the backend; they are rebuilt on
/// every poll.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    /// `booking-{id}` or `student-{id}`; stable across polls.
    pub id: String,
    pub category: NotificationCategory,
    pub status: String,
    pub message: String,
    pub detail: String,
    /// Raw timestamp as the backend sent it.
    pub timestamp: Option<String>,
    #[serde(default)]
    pub is_read: bool,
}

impl Notification {
    pub fn parsed_timestamp(&self) -> Option<NaiveDateTime> {
        self.timestamp.as_deref().and_then(parse_timestamp)
    }

    pub fn from_booking(booking: &BookingRecord) -> Self {
        let status = booking.status.as_str();
        Self {
            id: format!("booking-{}", booking.id),
            category: NotificationCategory::Booking,
            status: status.to_string(),
            message: format!("Your {} booking is {}", booking.service_category, status),
            detail: format!("{} on {}", booking.package_type, human_date(&booking.date)),
            timestamp: Some(booking.date.clone()).filter(|d| !d.is_empty()),
            is_read: false,
        }
    }

    pub fn from_student(student: &StudentRecord) -> Self {
        let status = student.status.as_str();
        Self {
            id: format!("student-{}", student.id),
            category: NotificationCategory::StudentId,
            status: status.to_string(),
            message: format!("Your Student ID application is {}", status),
            detail: format!("{} - {}", student.grade, student.section),
            timestamp: student.submission_time().map(str::to_string),
            is_read: false,
        }
    }
}

/// "Nov 2, 2026" for a parseable date, else the raw text.
pub fn human_date(raw: &str) -> String {
    match parse_timestamp(raw) {
        Some(dt) => dt.format("%b %-d, %Y").to_string(),
        None => raw.to_string(),
    }
}

/// Newest first; records with no parseable timestamp sort last.
fn newest_first(a: &Notification, b: &Notification) -> Ordering {
    match (a.parsed_timestamp(), b.parsed_timestamp()) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Merge a user's bookings and applications into one sorted notification list.
pub fn build_notifications(bookings: &[BookingRecord], students: &[StudentRecord]) -> Vec<Notification> {
    let mut all: Vec<Notification> = bookings
        .iter()
        .map(Notification::from_booking)
        .chain(students.iter().map(Notification::from_student))
        .collect();
    all.sort_by(newest_first);
    all
}
