use serde::{Deserialize, Serialize};

/// Feature flags controlling optional integrations.
///
/// Loaded from `config.toml` at startup. A missing or incomplete
/// `[features]` table falls back to the documented defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeatureFlags {
    /// Install the tracing subscriber at startup.
    #[serde(default = "default_true")]
    pub telemetry: bool,
    /// Fetch the service catalog from `GET /services` instead of the built-in table.
    #[serde(default)]
    pub remote_services: bool,
    /// Backend supports `PUT /student-id/{id}` for approving applications.
    #[serde(default = "default_true")]
    pub student_status_endpoint: bool,
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            telemetry: true,
            remote_services: false,
            student_status_endpoint: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// `[api]` table: where the REST backend lives.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:5000/api".to_string()
}

fn default_timeout_secs() -> u64 {
    15
}

/// `[session]` table: where the auth token and current user are persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionConfig {
    #[serde(default = "default_session_path")]
    pub path: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            path: default_session_path(),
        }
    }
}

fn default_session_path() -> String {
    ".studio/session.json".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NotificationConfig {
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval_secs(),
        }
    }
}

fn default_poll_interval_secs() -> u64 {
    30
}

/// `[reports]` table. Revenue is a flat figure: completed bookings × `unit_price`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReportConfig {
    #[serde(default = "default_unit_price")]
    pub unit_price: u64,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            unit_price: default_unit_price(),
        }
    }
}

fn default_unit_price() -> u64 {
    5000
}

/// `[bookings]` table. `rejection_status` picks the terminal label written
/// when an admin rejects a booking ("Rejected" or "Cancelled").
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BookingConfig {
    #[serde(default = "default_rejection_status")]
    pub rejection_status: String,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            rejection_status: default_rejection_status(),
        }
    }
}

fn default_rejection_status() -> String {
    "Rejected".to_string()
}

/// Top-level config file structure matching `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub notifications: NotificationConfig,
    #[serde(default)]
    pub reports: ReportConfig,
    #[serde(default)]
    pub bookings: BookingConfig,
    #[serde(default)]
    pub features: FeatureFlags,
}
