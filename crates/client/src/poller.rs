use shared_types::{build_notifications, AppError, Notification};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::api::StudioClient;
use crate::session::SessionContext;

/// Consecutive failures after which polling errors are logged at error level.
const ERROR_ESCALATION_THRESHOLD: u32 = 10;

/// Periodically rebuilds the signed-in user's notifications.
#[derive(Debug, Clone)]
pub struct NotificationPoller {
    client: StudioClient,
    session: Arc<SessionContext>,
    interval: Duration,
}

impl NotificationPoller {
    pub fn new(client: StudioClient, session: Arc<SessionContext>, interval: Duration) -> Self {
        Self {
            client,
            session,
            interval,
        }
    }

    /// One fetch for the current user. `Ok(None)` when nobody is signed in;
    /// no request is made in that case.
    #[tracing::instrument(skip(self))]
    pub async fn fetch_once(&self) -> Result<Option<Vec<Notification>>, AppError> {
        let Some(username) = self.session.username() else {
            return Ok(None);
        };
        let client = self.session.authorized(&self.client);
        let (bookings, students) = tokio::try_join!(
            client.list_user_bookings(&username),
            client.list_user_students(&username),
        )?;
        Ok(Some(build_notifications(&bookings, &students)))
    }

    /// Start polling: immediately, then every `interval`, and again whenever
    /// the session changes. Polling stops when the handle is dropped.
    pub fn spawn(self) -> PollerHandle {
        let (tx, rx) = watch::channel(Vec::new());
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(self.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut session_rx = self.session.subscribe();
            let mut consecutive_errors: u32 = 0;

            loop {
                tokio::select! {
                    _ = ticker.tick() => {}
                    Ok(()) = session_rx.changed() => {}
                }
                match self.fetch_once().await {
                    Ok(Some(list)) => {
                        consecutive_errors = 0;
                        tracing::debug!(count = list.len(), "Notifications refreshed");
                        tx.send_replace(list);
                    }
                    Ok(None) => {
                        consecutive_errors = 0;
                        tx.send_if_modified(|list| {
                            let had_items = !list.is_empty();
                            list.clear();
                            had_items
                        });
                    }
                    Err(e) => {
                        consecutive_errors += 1;
                        if consecutive_errors >= ERROR_ESCALATION_THRESHOLD {
                            tracing::error!(error = %e, consecutive_errors, "Notification polling keeps failing");
                        } else {
                            tracing::warn!(error = %e, "Failed to fetch notifications; keeping previous list");
                        }
                    }
                }
            }
        });
        PollerHandle { task, rx }
    }
}

/// Owner of a running poller. Dropping it stops the task.
#[derive(Debug)]
pub struct PollerHandle {
    task: JoinHandle<()>,
    rx: watch::Receiver<Vec<Notification>>,
}

impl PollerHandle {
    pub fn subscribe(&self) -> watch::Receiver<Vec<Notification>> {
        self.rx.clone()
    }

    /// Most recently published list.
    pub fn latest(&self) -> Vec<Notification> {
        self.rx.borrow().clone()
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }

    pub fn stop(self) {
        self.task.abort();
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}
