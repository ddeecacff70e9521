use shared_types::ImageArtifact;

/// Placeholder shown for an empty value in a recap.
pub const EMPTY_VALUE: &str = "N/A";

/// One labelled line of a read-only recap.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewRow {
    pub label: &'static str,
    pub value: String,
}

impl ReviewRow {
    pub fn new(label: &'static str, value: impl Into<String>) -> Self {
        Self {
            label,
            value: value.into(),
        }
    }

    /// The value, or [`EMPTY_VALUE`] when blank.
    pub fn display(&self) -> &str {
        if self.value.trim().is_empty() {
            EMPTY_VALUE
        } else {
            &self.value
        }
    }
}

/// Read-only recap of a draft shown before the final submit.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewModal {
    pub title: &'static str,
    pub rows: Vec<ReviewRow>,
    /// Captured images, by label.
    pub attachments: Vec<(&'static str, ImageArtifact)>,
}

impl ReviewModal {
    pub fn value(&self, label: &str) -> Option<&str> {
        self.rows.iter().find(|r| r.label == label).map(ReviewRow::display)
    }
}

/// Visual weight of a confirmation's accept button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Positive,
    Informational,
    Destructive,
}

/// A pending action awaiting an explicit yes/no from the user.
///
/// Nothing is sent to the backend until the owner of the request confirms it.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfirmationRequest<A> {
    pub title: &'static str,
    pub message: &'static str,
    pub confirm_label: &'static str,
    pub tone: Tone,
    pub action: A,
}

impl<A> ConfirmationRequest<A> {
    pub fn new(title: &'static str, message: &'static str, tone: Tone, action: A) -> Self {
        Self {
            title,
            message,
            confirm_label: match tone {
                Tone::Destructive => "Yes, continue",
                _ => "Confirm",
            },
            tone,
            action,
        }
    }
}
