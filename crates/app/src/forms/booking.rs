use serde_json::Value;
use shared_types::{sanitize_phone, AppError, BookingRequest, PhoneCheck, ServiceCatalog};
use studio_client::{StudioClient, SubmissionResult};
use validator::ValidateEmail;

use super::{already_submitting, first_issue, FieldIssue, ReviewGate};
use crate::review::{ReviewModal, ReviewRow};

/// Editable fields of the booking form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BookingField {
    FullName,
    Email,
    Phone,
    Location,
    Service,
    Package,
    Date,
    Time,
    Notes,
}

impl BookingField {
    pub const ALL: [BookingField; 9] = [
        BookingField::FullName,
        BookingField::Email,
        BookingField::Phone,
        BookingField::Location,
        BookingField::Service,
        BookingField::Package,
        BookingField::Date,
        BookingField::Time,
        BookingField::Notes,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::FullName => "Full Name",
            Self::Email => "Email",
            Self::Phone => "Phone Number",
            Self::Location => "Location",
            Self::Service => "Service",
            Self::Package => "Package",
            Self::Date => "Date",
            Self::Time => "Time",
            Self::Notes => "Additional Details",
        }
    }
}

/// Public booking form.
#[derive(Debug, Clone)]
pub struct BookingForm {
    catalog: ServiceCatalog,
    draft: BookingRequest,
    package_options: Vec<String>,
    username: Option<String>,
    submitting: bool,
    reset_counter: u32,
}

impl BookingForm {
    pub fn new(catalog: ServiceCatalog) -> Self {
        Self {
            catalog,
            draft: BookingRequest::default(),
            package_options: Vec::new(),
            username: None,
            submitting: false,
            reset_counter: 0,
        }
    }

    /// Tag submissions with the signed-in account.
    pub fn with_username(mut self, username: Option<String>) -> Self {
        self.username = username;
        self
    }

    pub fn catalog(&self) -> &ServiceCatalog {
        &self.catalog
    }

    pub fn draft(&self) -> &BookingRequest {
        &self.draft
    }

    /// `(key, display name)` of every bookable service.
    pub fn service_options(&self) -> Vec<(&str, &str)> {
        self.catalog
            .services
            .iter()
            .map(|s| (s.key.as_str(), s.name.as_str()))
            .collect()
    }

    /// Packages of the selected service; empty until one is chosen.
    pub fn package_options(&self) -> &[String] {
        &self.package_options
    }

    pub fn value(&self, field: BookingField) -> &str {
        match field {
            BookingField::FullName => &self.draft.full_name,
            BookingField::Email => &self.draft.email,
            BookingField::Phone => &self.draft.phone,
            BookingField::Location => &self.draft.location,
            BookingField::Service => &self.draft.service_category,
            BookingField::Package => &self.draft.package_type,
            BookingField::Date => &self.draft.date,
            BookingField::Time => &self.draft.time,
            BookingField::Notes => &self.draft.notes,
        }
    }

    /// Update one field. Phone input is reduced to at most 11 digits;
    /// changing the service clears the package and reloads its options.
    pub fn set(&mut self, field: BookingField, value: &str) {
        match field {
            BookingField::FullName => self.draft.full_name = value.to_string(),
            BookingField::Email => self.draft.email = value.trim().to_string(),
            BookingField::Phone => self.draft.phone = sanitize_phone(value),
            BookingField::Location => self.draft.location = value.to_string(),
            BookingField::Service => self.select_service(value),
            BookingField::Package => self.draft.package_type = value.to_string(),
            BookingField::Date => self.draft.date = value.to_string(),
            BookingField::Time => self.draft.time = value.to_string(),
            BookingField::Notes => self.draft.notes = value.to_string(),
        }
    }

    fn select_service(&mut self, key: &str) {
        self.draft.service_category = key.to_string();
        self.draft.package_type.clear();
        self.package_options = self.catalog.packages_for(key);
    }

    /// Pre-select a service (and optionally a package) from a deep link.
    /// A package that does not belong to the service is ignored.
    pub fn prefill(&mut self, service: &str, package: Option<&str>) {
        if self.catalog.get(service).is_none() {
            tracing::debug!(service, "Ignoring prefill for unknown service");
            return;
        }
        self.select_service(service);
        if let Some(package) = package.filter(|p| self.catalog.is_valid_package(service, p)) {
            self.draft.package_type = package.to_string();
        }
    }

    pub fn phone_check(&self) -> PhoneCheck {
        PhoneCheck::of(&self.draft.phone)
    }

    /// Inline message for a partially entered phone number.
    pub fn phone_error(&self) -> Option<&'static str> {
        self.phone_check().message()
    }

    pub fn reset_counter(&self) -> u32 {
        self.reset_counter
    }

    /// Restore the empty draft and bump the reset counter.
    pub fn reset(&mut self) {
        self.draft = BookingRequest::default();
        self.package_options.clear();
        self.reset_counter = self.reset_counter.wrapping_add(1);
    }

    fn blocking_issue(&self) -> Option<FieldIssue<BookingField>> {
        let d = &self.draft;
        first_issue(&[
            (d.full_name.trim().is_empty(), BookingField::FullName, "Full name is required"),
            (!d.email.validate_email(), BookingField::Email, "Please enter a valid email address."),
            (d.phone.is_empty(), BookingField::Phone, "Phone number is required"),
            (self.catalog.get(&d.service_category).is_none(), BookingField::Service, "Please select a service."),
            (
                !self.catalog.is_valid_package(&d.service_category, &d.package_type),
                BookingField::Package,
                "Please select a package.",
            ),
            (d.date.trim().is_empty(), BookingField::Date, "Please choose a date."),
            (d.time.trim().is_empty(), BookingField::Time, "Please choose a time."),
            (
                self.phone_check() != PhoneCheck::Complete,
                BookingField::Phone,
                "Please enter a valid 11-digit phone number.",
            ),
        ])
    }

    /// Open the recap, or report the first failing field.
    pub fn review(&self) -> ReviewGate<BookingField> {
        if let Some(issue) = self.blocking_issue() {
            return ReviewGate::Blocked(issue);
        }
        let service_name = self
            .catalog
            .get(&self.draft.service_category)
            .map(|s| s.name.clone())
            .unwrap_or_default();
        let rows = BookingField::ALL
            .iter()
            .map(|&field| match field {
                BookingField::Service => ReviewRow::new(field.label(), service_name.clone()),
                _ => ReviewRow::new(field.label(), self.value(field)),
            })
            .collect();
        ReviewGate::Open(ReviewModal {
            title: "Review Your Booking",
            rows,
            attachments: Vec::new(),
        })
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Re-check the draft and mark a submission as outstanding.
    pub fn begin_submit(&mut self) -> Result<BookingRequest, AppError> {
        if self.submitting {
            return Err(already_submitting());
        }
        if let Some(issue) = self.blocking_issue() {
            return Err(AppError::field(issue.field.label(), issue.message));
        }
        self.submitting = true;
        let mut request = self.draft.clone();
        request.username = self.username.clone();
        Ok(request)
    }

    /// Record the outcome. The draft is cleared only on success.
    pub fn finish_submit<T>(&mut self, result: &SubmissionResult<T>) {
        self.submitting = false;
        if result.is_success() {
            self.reset();
        }
    }

    /// Review, send once, and record the outcome.
    pub async fn submit(&mut self, client: &StudioClient) -> Result<SubmissionResult<Value>, AppError> {
        let request = self.begin_submit()?;
        let result = client.submit_booking(&request).await;
        self.finish_submit(&result);
        Ok(result)
    }
}
