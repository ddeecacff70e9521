use std::cmp::Ordering;

use shared_types::{compare_ids, AppError, BookingAction, BookingRecord, BookingStatus};
use studio_client::StudioClient;

use super::nothing_pending;
use crate::format_helpers::format_date_human;
use crate::review::{ConfirmationRequest, ReviewModal, ReviewRow, Tone};

/// Status filter tabs of the booking list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BookingTab {
    /// Everything except Completed bookings.
    #[default]
    All,
    Pending,
    Confirmed,
    /// Rejected and Cancelled bookings.
    Rejected,
    Completed,
}

impl BookingTab {
    pub const TABS: [BookingTab; 5] = [
        BookingTab::All,
        BookingTab::Pending,
        BookingTab::Confirmed,
        BookingTab::Rejected,
        BookingTab::Completed,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Pending => "Pending",
            Self::Confirmed => "Confirmed",
            Self::Rejected => "Rejected",
            Self::Completed => "Completed",
        }
    }

    pub fn from_str_opt(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "all" => Some(Self::All),
            "pending" => Some(Self::Pending),
            "confirmed" => Some(Self::Confirmed),
            "rejected" | "cancelled" | "canceled" => Some(Self::Rejected),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }

    pub fn matches(&self, status: BookingStatus) -> bool {
        match self {
            Self::All => status != BookingStatus::Completed,
            Self::Pending => status == BookingStatus::Pending,
            Self::Confirmed => status == BookingStatus::Confirmed,
            Self::Rejected => status.is_rejection(),
            Self::Completed => status == BookingStatus::Completed,
        }
    }
}

/// A booking mutation awaiting confirmation.
#[derive(Debug, Clone, PartialEq)]
pub enum BookingCommand {
    Transition { id: String, to: BookingStatus },
    Delete { id: String },
}

/// Admin list of every booking.
#[derive(Debug, Clone, Default)]
pub struct BookingListView {
    bookings: Vec<BookingRecord>,
    tab: BookingTab,
    search: String,
    selected: Option<String>,
    pending: Option<ConfirmationRequest<BookingCommand>>,
    rejection: BookingStatus,
    loaded: bool,
}

impl BookingListView {
    /// `rejection` is the label written when a booking is rejected.
    pub fn new(rejection: BookingStatus) -> Self {
        Self {
            rejection,
            ..Self::default()
        }
    }

    pub fn from_config(config: &shared_types::AppConfig) -> Self {
        Self::new(BookingStatus::rejection_label(&config.bookings.rejection_status))
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn bookings(&self) -> &[BookingRecord] {
        &self.bookings
    }

    pub fn replace(&mut self, bookings: Vec<BookingRecord>) {
        self.bookings = bookings;
        self.loaded = true;
        if let Some(id) = &self.selected {
            if !self.bookings.iter().any(|b| &b.id == id) {
                self.selected = None;
            }
        }
    }

    /// Re-fetch every booking. On failure the previous snapshot is kept.
    #[tracing::instrument(skip_all)]
    pub async fn refresh(&mut self, client: &StudioClient) -> Result<(), AppError> {
        let bookings = client.list_bookings().await?;
        tracing::debug!(count = bookings.len(), "Bookings refreshed");
        self.replace(bookings);
        Ok(())
    }

    pub fn tab(&self) -> BookingTab {
        self.tab
    }

    pub fn set_tab(&mut self, tab: BookingTab) {
        self.tab = tab;
    }

    pub fn set_search(&mut self, term: &str) {
        self.search = term.to_string();
    }

    /// Rows for the current tab and search term.
    ///
    /// The Confirmed tab is ordered by session date, the others by id.
    pub fn visible(&self) -> Vec<&BookingRecord> {
        let mut rows: Vec<&BookingRecord> = self
            .bookings
            .iter()
            .filter(|b| self.tab.matches(b.status) && b.matches_search(&self.search))
            .collect();
        if self.tab == BookingTab::Confirmed {
            rows.sort_by(|a, b| match (a.booked_on(), b.booked_on()) {
                (Some(x), Some(y)) => x.cmp(&y).then_with(|| compare_ids(&a.id, &b.id)),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => compare_ids(&a.id, &b.id),
            });
        } else {
            rows.sort_by(|a, b| compare_ids(&a.id, &b.id));
        }
        rows
    }

    /// Number of bookings under each tab, ignoring the search term.
    pub fn tab_counts(&self) -> Vec<(BookingTab, usize)> {
        BookingTab::TABS
            .iter()
            .map(|tab| (*tab, self.bookings.iter().filter(|b| tab.matches(b.status)).count()))
            .collect()
    }

    fn find(&self, id: &str) -> Result<&BookingRecord, AppError> {
        self.bookings
            .iter()
            .find(|b| b.id == id)
            .ok_or_else(|| AppError::not_found(format!("Booking {} not found", id)))
    }

    pub fn select(&mut self, id: &str) -> Result<(), AppError> {
        self.find(id)?;
        self.selected = Some(id.to_string());
        Ok(())
    }

    pub fn close_detail(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<&BookingRecord> {
        let id = self.selected.as_deref()?;
        self.bookings.iter().find(|b| b.id == id)
    }

    /// Read-only recap of the selected booking.
    pub fn detail(&self) -> Option<ReviewModal> {
        let b = self.selected()?;
        Some(ReviewModal {
            title: "Booking Details",
            rows: vec![
                ReviewRow::new("Full Name", b.full_name.as_str()),
                ReviewRow::new("Email", b.email.as_str()),
                ReviewRow::new("Phone Number", b.phone.as_str()),
                ReviewRow::new("Location", b.location.as_str()),
                ReviewRow::new("Service", b.service_category.as_str()),
                ReviewRow::new("Package", b.package_type.as_str()),
                ReviewRow::new("Date", format_date_human(&b.date)),
                ReviewRow::new("Time", b.time.as_str()),
                ReviewRow::new("Additional Details", b.notes.as_str()),
                ReviewRow::new("Status", b.status.as_str()),
            ],
            attachments: Vec::new(),
        })
    }

    /// Stage a status change. Transitions the state machine forbids are
    /// refused here and never reach the backend.
    pub fn request_transition(
        &mut self,
        id: &str,
        action: BookingAction,
    ) -> Result<&ConfirmationRequest<BookingCommand>, AppError> {
        let booking = self.find(id)?;
        let to = booking.status.apply(action, self.rejection)?;
        let command = BookingCommand::Transition { id: id.to_string(), to };
        let request = match action {
            BookingAction::Approve => ConfirmationRequest::new(
                "Confirm Booking?",
                "Are you sure you want to approve this booking?",
                Tone::Positive,
                command,
            ),
            BookingAction::MarkDone => ConfirmationRequest::new(
                "Mark as Done?",
                "Are you sure this event is finished?",
                Tone::Informational,
                command,
            ),
            BookingAction::Reject => ConfirmationRequest::new(
                "Reject Booking?",
                "Are you sure you want to reject this booking?",
                Tone::Destructive,
                command,
            ),
        };
        Ok(self.pending.insert(request))
    }

    /// Stage a permanent delete. Only terminal bookings may be removed.
    pub fn request_delete(&mut self, id: &str) -> Result<&ConfirmationRequest<BookingCommand>, AppError> {
        let booking = self.find(id)?;
        if !booking.status.can_delete() {
            return Err(AppError::bad_request(format!(
                "A {} booking cannot be deleted",
                booking.status.as_str()
            )));
        }
        Ok(self.pending.insert(ConfirmationRequest::new(
            "Delete Booking?",
            "Permanently remove this booking from the record?",
            Tone::Destructive,
            BookingCommand::Delete { id: id.to_string() },
        )))
    }

    pub fn pending(&self) -> Option<&ConfirmationRequest<BookingCommand>> {
        self.pending.as_ref()
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Send the staged command, then re-fetch the list.
    /// Perform the staged mutation, then re-fetch. A failed call leaves the
    /// request staged so it can be confirmed again.
    pub async fn confirm(&mut self, client: &StudioClient) -> Result<(), AppError> {
        let action = self.pending.as_ref().ok_or_else(nothing_pending)?.action.clone();
        match &action {
            BookingCommand::Transition { id, to } => {
                client.update_booking_status(id, *to).await?;
            }
            BookingCommand::Delete { id } => {
                client.delete_booking(id).await?;
                if self.selected.as_deref() == Some(id.as_str()) {
                    self.selected = None;
                }
            }
        }
        self.pending = None;
        self.refresh(client).await
    }
}
