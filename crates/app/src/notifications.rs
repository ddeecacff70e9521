use std::collections::HashMap;

use shared_types::Notification;

/// Bell-menu state over the poller's latest list.
///
/// Read receipts are kept in memory only. Each remembers the status that was
/// read, so an entry stays read across refreshes until its status changes.
#[derive(Debug, Clone, Default)]
pub struct NotificationCenter {
    items: Vec<Notification>,
    read: HashMap<String, String>,
    open: bool,
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take a freshly polled list, carrying over read flags.
    pub fn apply(&mut self, latest: Vec<Notification>) {
        self.items = latest;
        for item in &mut self.items {
            item.is_read = self.read.get(&item.id) == Some(&item.status);
        }
    }

    pub fn items(&self) -> &[Notification] {
        &self.items
    }

    pub fn unread_count(&self) -> usize {
        self.items.iter().filter(|n| !n.is_read).count()
    }

    pub fn mark_read(&mut self, id: &str) -> bool {
        match self.items.iter_mut().find(|n| n.id == id) {
            Some(item) => {
                item.is_read = true;
                self.read.insert(item.id.clone(), item.status.clone());
                true
            }
            None => false,
        }
    }

    pub fn mark_all_read(&mut self) {
        for item in &mut self.items {
            item.is_read = true;
            self.read.insert(item.id.clone(), item.status.clone());
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    pub fn close(&mut self) {
        self.open = false;
    }
}
