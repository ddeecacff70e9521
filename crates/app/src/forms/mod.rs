//! Draft state for the public booking and student-ID forms.
//!
//! A form holds field values, derived option lists and inline phone checks.
//! `review()` runs the required-field checks in a fixed order and either
//! opens the recap or reports the first failing field. Submission is split
//! into `begin_submit` / `finish_submit` so the submit control stays disabled
//! while a call is outstanding.

mod booking;
mod student_id;

pub use booking::{BookingField, BookingForm};
pub use student_id::{StudentField, StudentIdForm};

use shared_types::AppError;

use crate::review::ReviewModal;

/// The first required-field check that failed.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldIssue<F> {
    pub field: F,
    pub message: &'static str,
}

/// Outcome of asking to review a draft.
#[derive(Debug, Clone, PartialEq)]
pub enum ReviewGate<F> {
    Open(ReviewModal),
    Blocked(FieldIssue<F>),
}

impl<F> ReviewGate<F> {
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open(_))
    }

    pub fn issue(&self) -> Option<&FieldIssue<F>> {
        match self {
            Self::Blocked(issue) => Some(issue),
            Self::Open(_) => None,
        }
    }
}

/// Text shown when a second submit is attempted while one is outstanding.
pub const ALREADY_SUBMITTING: &str = "A submission is already in progress";

pub(crate) fn already_submitting() -> AppError {
    AppError::field("submit", ALREADY_SUBMITTING)
}

/// Return the first issue among `checks`, in order.
pub(crate) fn first_issue<F: Copy>(checks: &[(bool, F, &'static str)]) -> Option<FieldIssue<F>> {
    checks
        .iter()
        .find(|(failed, _, _)| *failed)
        .map(|&(_, field, message)| FieldIssue { field, message })
}
