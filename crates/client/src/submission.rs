use shared_types::AppError;

/// Generic failure text per submission kind.
pub const BOOKING_FAILURE: &str = "Booking failed. Please try again.";
pub const APPLICATION_FAILURE: &str = "Application failed. Please try again.";

/// Uniform outcome of a one-shot submission.
///
/// `Failed` carries text fit for the user: the backend's own message when it
/// sent one, otherwise the generic message for the operation.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionResult<T> {
    Submitted(T),
    Failed { message: String },
}

impl<T> SubmissionResult<T> {
    pub fn from_result(result: Result<T, AppError>, fallback: &str) -> Self {
        match result {
            Ok(data) => Self::Submitted(data),
            Err(err) => {
                tracing::warn!(error = %err, "Submission failed");
                Self::Failed {
                    message: err.user_message(fallback),
                }
            }
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Submitted(_))
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Submitted(data) => Some(data),
            Self::Failed { .. } => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Submitted(_) => None,
            Self::Failed { message } => Some(message),
        }
    }
}
