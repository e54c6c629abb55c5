//! Transient user-facing notifications.
//!
//! Every view-model operation ends with a success or error message for the
//! user. They are collected here so whatever front end is attached can show
//! them and then drain the queue.

use chrono::{DateTime, Utc};
use log::debug;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
    pub at: DateTime<Utc>,
}

impl Notification {
    pub fn is_error(&self) -> bool {
        self.level == NotificationLevel::Error
    }
}

/// Shared notification queue. Clones share the same queue.
#[derive(Clone, Default)]
pub struct Notifier {
    entries: Arc<Mutex<Vec<Notification>>>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn success(&self, message: impl Into<String>) {
        self.push(NotificationLevel::Success, message.into());
    }

    pub fn info(&self, message: impl Into<String>) {
        self.push(NotificationLevel::Info, message.into());
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(NotificationLevel::Error, message.into());
    }

    fn push(&self, level: NotificationLevel, message: String) {
        debug!("notify [{:?}] {}", level, message);

        if let Ok(mut entries) = self.entries.lock() {
            entries.push(Notification {
                level,
                message,
                at: Utc::now(),
            });
        }
    }

    /// Most recent notification, if any.
    pub fn latest(&self) -> Option<Notification> {
        self.entries.lock().ok().and_then(|entries| entries.last().cloned())
    }

    /// All notifications, newest first.
    pub fn all(&self) -> Vec<Notification> {
        match self.entries.lock() {
            Ok(entries) => entries.iter().rev().cloned().collect(),
            Err(_) => Vec::new(),
        }
    }

    /// Take every queued notification in the order they were raised.
    pub fn drain(&self) -> Vec<Notification> {
        match self.entries.lock() {
            Ok(mut entries) => std::mem::take(&mut *entries),
            Err(_) => Vec::new(),
        }
    }

    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.clear();
        }
    }
}
