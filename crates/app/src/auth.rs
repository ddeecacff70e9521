use shared_types::{AppError, LoginRequest, SessionRecord};
use studio_client::{SessionContext, StudioClient};

pub const MISSING_CREDENTIALS: &str = "Please enter both username and password.";
pub const REGISTERED: &str = "Account created successfully! Please sign in.";
const LOGIN_FAILURE: &str = "Login failed.";
const REGISTER_FAILURE: &str = "Registration failed.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    #[default]
    Login,
    Register,
}

/// Message shown under the login form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthMessage {
    Success(String),
    Error(String),
}

impl AuthMessage {
    pub fn text(&self) -> &str {
        match self {
            Self::Success(text) | Self::Error(text) => text,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

/// Admin sign-in / sign-up form.
#[derive(Debug, Clone, Default)]
pub struct LoginFlow {
    pub username: String,
    pub password: String,
    mode: AuthMode,
    message: Option<AuthMessage>,
}

impl LoginFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> AuthMode {
        self.mode
    }

    pub fn message(&self) -> Option<&AuthMessage> {
        self.message.as_ref()
    }

    /// Switch between signing in and creating an account.
    pub fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            AuthMode::Login => AuthMode::Register,
            AuthMode::Register => AuthMode::Login,
        };
        self.message = None;
    }

    fn credentials(&self) -> Option<LoginRequest> {
        if self.username.is_empty() || self.password.is_empty() {
            return None;
        }
        Some(LoginRequest {
            username: self.username.clone(),
            password: self.password.clone(),
        })
    }

    /// Run the current mode against the backend.
    ///
    /// A successful login is persisted to `session`; a successful sign-up
    /// flips the form back to login mode.
    pub async fn submit(&mut self, client: &StudioClient, session: &SessionContext) -> &AuthMessage {
        let message = match self.credentials() {
            None => AuthMessage::Error(MISSING_CREDENTIALS.to_string()),
            Some(request) => match self.mode {
                AuthMode::Login => match login(client, session, &request).await {
                    Ok(name) => AuthMessage::Success(format!("Welcome back, {}!", name)),
                    Err(e) => AuthMessage::Error(e.user_message(LOGIN_FAILURE)),
                },
                AuthMode::Register => match client.register(&request).await {
                    Ok(()) => {
                        self.mode = AuthMode::Login;
                        AuthMessage::Success(REGISTERED.to_string())
                    }
                    Err(e) => AuthMessage::Error(e.user_message(REGISTER_FAILURE)),
                },
            },
        };
        if message.is_error() {
            tracing::warn!(mode = ?self.mode, message = message.text(), "Authentication failed");
        }
        self.message.insert(message)
    }
}

async fn login(client: &StudioClient, session: &SessionContext, request: &LoginRequest) -> Result<String, AppError> {
    let auth = client.login(request).await?;
    let name = Some(auth.user.username.clone())
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| request.username.clone());
    session.set(SessionRecord::from(auth))?;
    Ok(name)
}
