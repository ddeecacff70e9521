use serde_json::Value;
use shared_types::{AdminUser, AppError, AuthResponse, LoginRequest, RegisterRequest, UpdateAdminRequest};

use super::{segment, StudioClient};
use crate::error_convert::ValidateRequest;

/// Unwrap `{user: {...}}` or accept the account object directly.
fn parse_user(body: Value) -> Result<AdminUser, AppError> {
    let user = match body {
        Value::Object(mut map) if map.contains_key("user") => map.remove("user").unwrap_or(Value::Null),
        other => other,
    };
    serde_json::from_value(user).map_err(|e| AppError::internal(format!("Malformed user record: {}", e)))
}

impl StudioClient {
    /// `POST /admin/register`.
    #[tracing::instrument(skip(self, request), fields(username = %request.username))]
    pub async fn register(&self, request: &RegisterRequest) -> Result<(), AppError> {
        request.validate_request()?;
        self.send(self.http.post(self.url("admin/register")).json(request))
            .await?;
        tracing::info!("Account registered");
        Ok(())
    }

    /// `POST /admin/login`; the response must carry a token and a user.
    #[tracing::instrument(skip(self, request), fields(username = %request.username))]
    pub async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, AppError> {
        request.validate_request()?;
        let body = self
            .send(self.http.post(self.url("admin/login")).json(request))
            .await?;
        let auth: AuthResponse = serde_json::from_value(body)
            .map_err(|e| AppError::internal(format!("Login response missing token or user: {}", e)))?;
        tracing::info!(user_id = %auth.user.id, "Signed in");
        Ok(auth)
    }

    /// `GET /admin/me` with the bearer token.
    #[tracing::instrument(skip(self))]
    pub async fn me(&self) -> Result<AdminUser, AppError> {
        if self.token.is_none() {
            return Err(AppError::unauthorized("Not signed in"));
        }
        parse_user(self.send(self.http.get(self.url("admin/me"))).await?)
    }

    /// `PUT /admin/update`.
    #[tracing::instrument(skip(self, request))]
    pub async fn update_admin(&self, request: &UpdateAdminRequest) -> Result<(), AppError> {
        if self.token.is_none() {
            return Err(AppError::unauthorized("Not signed in"));
        }
        self.send(self.http.put(self.url("admin/update")).json(request))
            .await?;
        tracing::info!("Account updated");
        Ok(())
    }

    /// `DELETE /admin/delete/{id}`.
    #[tracing::instrument(skip(self))]
    pub async fn delete_admin(&self, id: &str) -> Result<(), AppError> {
        if self.token.is_none() {
            return Err(AppError::unauthorized("Not signed in"));
        }
        let path = format!("admin/delete/{}", segment(id));
        self.send(self.http.delete(self.url(&path))).await?;
        tracing::info!(user_id = id, "Account deleted");
        Ok(())
    }
}
