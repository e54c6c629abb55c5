use std::sync::Arc;

use crate::backend::{Backend, BackendError};
use crate::constants::ERROR_ACTIVITY_LOAD_FAILED;
use crate::entities::{ActivityItem, User};

/// Read-only "recent activity" list shown on the dashboard.
///
/// Failures are kept as an inline message rather than a notification.
pub struct ActivityFeed {
    backend: Arc<dyn Backend>,
    items: Vec<ActivityItem>,
    loading: bool,
    error: Option<String>,
}

impl ActivityFeed {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self {
            backend,
            items: Vec::new(),
            loading: false,
            error: None,
        }
    }

    pub fn items(&self) -> &[ActivityItem] {
        &self.items
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub async fn load(&mut self) -> Result<(), BackendError> {
        self.loading = true;
        self.error = None;
        let result = self.backend.fetch_activity().await;
        self.loading = false;

        match result {
            Ok(items) => {
                self.items = items;
                Ok(())
            }
            Err(e) => {
                self.items.clear();
                self.error = Some(ERROR_ACTIVITY_LOAD_FAILED.to_string());
                Err(e)
            }
        }
    }
}

/// Dashboard greeting for the signed-in user.
pub fn greeting(user: Option<&User>) -> String {
    let name = user.map(User::display_name).unwrap_or("User");
    format!("👋 Welcome back, {}!", name)
}
