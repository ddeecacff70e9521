//! Admin back-office controllers.
//!
//! Each view owns the snapshot it last fetched. Filtering and sorting are
//! pure projections over that snapshot; mutating actions are staged as a
//! [`ConfirmationRequest`](crate::review::ConfirmationRequest) and only sent
//! once confirmed, after which the whole list is re-fetched.

mod bookings;
mod dashboard;
mod services;
mod students;

pub use bookings::{BookingCommand, BookingListView, BookingTab};
pub use dashboard::{DashboardView, ReportsView};
pub use services::{ManageServices, ServiceCommand, DEFAULT_SERVICE_IMAGE};
pub use students::{StudentCommand, StudentListView, GRADE_TABS};

use shared_types::AppError;

pub(crate) fn nothing_pending() -> AppError {
    AppError::bad_request("No action is awaiting confirmation")
}
