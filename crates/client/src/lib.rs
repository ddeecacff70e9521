pub mod api;
pub mod config;
pub mod error_convert;
pub mod poller;
pub mod session;
pub mod submission;
pub mod telemetry;

pub use api::StudioClient;
pub use poller::{NotificationPoller, PollerHandle};
pub use session::SessionContext;
pub use submission::SubmissionResult;
