use shared_types::{AppError, SessionRecord};
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};
use tokio::sync::watch;

use crate::api::StudioClient;
use crate::config;

static GLOBAL: OnceLock<Arc<SessionContext>> = OnceLock::new();

/// The signed-in account, shared by every component of the process.
///
/// The session file is parsed once at [`init`](Self::init); afterwards all
/// reads go through this object. Changes are broadcast on a watch channel.
#[derive(Debug)]
pub struct SessionContext {
    path: PathBuf,
    tx: watch::Sender<Option<SessionRecord>>,
}

impl SessionContext {
    /// Load the persisted session, if any. A corrupt file is treated as signed out.
    pub fn init(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let record = read_session_file(&path);
        let (tx, _) = watch::channel(record);
        Self { path, tx }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn current(&self) -> Option<SessionRecord> {
        self.tx.borrow().clone()
    }

    pub fn token(&self) -> Option<String> {
        self.tx.borrow().as_ref().map(|s| s.token.clone())
    }

    pub fn username(&self) -> Option<String> {
        self.tx.borrow().as_ref().map(|s| s.user.username.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.tx.borrow().is_some()
    }

    /// Persist a new session and notify subscribers.
    pub fn set(&self, record: SessionRecord) -> Result<(), AppError> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)
                .map_err(|e| AppError::internal(format!("Failed to create session directory: {}", e)))?;
        }
        let json = serde_json::to_string_pretty(&record)
            .map_err(|e| AppError::internal(format!("Failed to encode session: {}", e)))?;
        std::fs::write(&self.path, json)
            .map_err(|e| AppError::internal(format!("Failed to write session: {}", e)))?;
        tracing::info!(username = %record.user.username, "Session stored");
        self.tx.send_replace(Some(record));
        Ok(())
    }

    /// Sign out: remove the persisted session and notify subscribers.
    pub fn clear(&self) -> Result<(), AppError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(AppError::internal(format!("Failed to remove session: {}", e))),
        }
        self.tx.send_replace(None);
        tracing::info!("Session cleared");
        Ok(())
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<SessionRecord>> {
        self.tx.subscribe()
    }

    /// A client carrying this session's bearer token.
    pub fn authorized(&self, client: &StudioClient) -> StudioClient {
        client.clone().with_token(self.token())
    }
}

fn read_session_file(path: &Path) -> Option<SessionRecord> {
    let contents = std::fs::read_to_string(path).ok()?;
    match serde_json::from_str(&contents) {
        Ok(record) => Some(record),
        Err(e) => {
            tracing::warn!(error = %e, path = %path.display(), "Ignoring unreadable session file");
            None
        }
    }
}

/// Process-wide session, initialized from `[session] path` on first use.
pub fn global() -> Arc<SessionContext> {
    GLOBAL
        .get_or_init(|| Arc::new(SessionContext::init(&config::config().session.path)))
        .clone()
}
