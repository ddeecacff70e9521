//! Headless controllers for the studio's public forms and admin back office.
//!
//! A UI shell binds its widgets to these types; the `studio-admin` console
//! drives the admin side directly.

pub mod admin;
pub mod auth;
pub mod capture;
pub mod console;
pub mod format_helpers;
pub mod forms;
pub mod notifications;
pub mod review;

pub use auth::LoginFlow;
pub use capture::{PhotoCapture, SignaturePad};
pub use forms::{BookingForm, ReviewGate, StudentIdForm};
pub use notifications::NotificationCenter;
pub use review::{ConfirmationRequest, ReviewModal, Tone};
