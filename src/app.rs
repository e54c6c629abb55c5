//! Application wiring.
//!
//! Builds the backend, session store, notifier and session described by a
//! [`Config`], and hands out view-models that share them.

use anyhow::{anyhow, Context, Result};
use log::info;
use std::sync::Arc;

use crate::backend::rest::RestBackend;
use crate::backend::Backend;
use crate::config::Config;
use crate::constants::ERROR_NOT_SIGNED_IN;
use crate::notify::Notifier;
use crate::session::{FileSessionStore, MemorySessionStore, Session, SessionStore};
use crate::sync::{ActivityFeed, CalendarView, HabitsView, NotesView, TasksView};

/// Create a backend instance by type name.
pub fn create_backend(backend_type: &str, config: &Config) -> Result<Arc<dyn Backend>> {
    match backend_type {
        "rest" => {
            let backend = RestBackend::new(config.api.base_url.clone())
                .map_err(|e| anyhow!("Failed to create REST backend: {}", e))?;
            Ok(Arc::new(backend))
        }
        _ => Err(anyhow!("Unknown backend type: {}", backend_type)),
    }
}

/// Session store selected by `session.persist`.
pub fn create_session_store(config: &Config) -> Result<Box<dyn SessionStore>> {
    if config.session.persist {
        let path = config.session_file().context("Failed to resolve session file")?;
        Ok(Box::new(FileSessionStore::new(path)))
    } else {
        Ok(Box::new(MemorySessionStore::new()))
    }
}

pub struct App {
    pub session: Session,
    pub notifier: Notifier,
    backend: Arc<dyn Backend>,
}

impl App {
    /// Build everything from `config` and restore any persisted session.
    pub fn from_config(config: &Config) -> Result<Self> {
        let backend = create_backend("rest", config)?;
        let store = create_session_store(config)?;
        Ok(Self::with_parts(backend, store))
    }

    /// Assemble an app from an existing backend and store, then boot the session.
    pub fn with_parts(backend: Arc<dyn Backend>, store: Box<dyn SessionStore>) -> Self {
        let notifier = Notifier::new();
        let mut session = Session::new(Arc::clone(&backend), store, notifier.clone());
        session.boot();
        info!("MindAlign ready ({} backend)", backend.backend_type());
        Self {
            session,
            notifier,
            backend,
        }
    }

    pub fn backend(&self) -> Arc<dyn Backend> {
        Arc::clone(&self.backend)
    }

    /// Fail unless someone is signed in. Module views are only reachable after login.
    pub fn require_auth(&self) -> Result<()> {
        if self.session.is_authenticated() {
            Ok(())
        } else {
            Err(anyhow!(ERROR_NOT_SIGNED_IN))
        }
    }

    pub fn tasks(&self) -> TasksView {
        TasksView::new(self.backend(), self.notifier.clone())
    }

    pub fn notes(&self) -> NotesView {
        NotesView::new(self.backend(), self.notifier.clone())
    }

    pub fn habits(&self) -> HabitsView {
        HabitsView::new(self.backend(), self.notifier.clone())
    }

    pub fn calendar(&self) -> CalendarView {
        CalendarView::new(self.backend(), self.notifier.clone())
    }

    pub fn activity(&self) -> ActivityFeed {
        ActivityFeed::new(self.backend())
    }
}
