use reqwest::StatusCode;
use serde_json::Value;
use shared_types::{AppError, GENERIC_FAILURE};

/// Convert a transport-level reqwest error into an AppError.
pub fn reqwest_to_app_error(err: reqwest::Error) -> AppError {
    if err.is_timeout() {
        AppError::network(format!("Request timed out: {}", err))
    } else if err.is_decode() {
        AppError::internal(format!("Unreadable response: {}", err))
    } else {
        AppError::network(err.to_string())
    }
}

/// Pull the human-readable `message` (or `error`) out of a response body.
pub fn backend_message(body: &Value) -> Option<String> {
    ["message", "error"].iter().find_map(|key| {
        body.get(key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .map(str::to_string)
    })
}

/// Convert a non-2xx response into an AppError, keeping the backend's text verbatim.
pub fn status_to_app_error(status: StatusCode, body: &str) -> AppError {
    let message = match serde_json::from_str::<Value>(body) {
        Ok(json) => backend_message(&json),
        Err(_) => Some(body.trim().to_string()).filter(|b| !b.is_empty() && !b.starts_with('<')),
    }
    .unwrap_or_default();
    match status {
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => AppError::bad_request(message),
        StatusCode::UNAUTHORIZED => AppError::unauthorized(message),
        StatusCode::FORBIDDEN => AppError::forbidden(message),
        StatusCode::NOT_FOUND => AppError::not_found(message),
        StatusCode::CONFLICT => AppError::conflict(message),
        s if s.is_server_error() && message.is_empty() => AppError::internal(GENERIC_FAILURE),
        _ => AppError::backend(message),
    }
}

/// A 2xx body that still reports `"success": false` is a business failure.
pub fn check_business_failure(body: &Value) -> Result<(), AppError> {
    if body.get("success").and_then(Value::as_bool) == Some(false) {
        return Err(AppError::backend(backend_message(body).unwrap_or_default()));
    }
    Ok(())
}

/// Trait for validating request DTOs before they are sent.
pub trait ValidateRequest {
    fn validate_request(&self) -> Result<(), AppError>;
}

impl<T: validator::Validate> ValidateRequest for T {
    fn validate_request(&self) -> Result<(), AppError> {
        self.validate().map_err(AppError::from)
    }
}
