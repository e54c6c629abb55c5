//! View-models for the MindAlign modules.
//!
//! Each module keeps a local copy of one server list and follows the same
//! loop:
//!
//! - on mount, fetch the whole list;
//! - on create, POST and then refetch;
//! - on toggle or delete, patch the local list first, then call the server,
//!   and refetch the list if the server refuses.
//!
//! The refetch is the only recovery: the optimistic change is never undone
//! by hand, server truth simply replaces it. Every outcome also lands in the
//! shared [`Notifier`](crate::notify::Notifier).

pub mod activity;
pub mod calendar;
pub mod habits;
pub mod notes;
pub mod tasks;

pub use activity::ActivityFeed;
pub use calendar::CalendarView;
pub use habits::HabitsView;
pub use notes::NotesView;
pub use tasks::TasksView;

use crate::backend::BackendError;
use crate::entities::{CalendarEvent, Habit, Note, Task};

/// Outcome of the most recent list load.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SyncStatus {
    /// Nothing loaded yet
    #[default]
    Idle,
    /// A load is running
    InProgress,
    /// The last load succeeded
    Success,
    /// The last load failed
    Error {
        /// Human-readable error message describing what went wrong
        message: String,
    },
}

/// Anything kept in a view list, addressed by its server id.
pub trait Identified {
    fn id(&self) -> &str;
}

impl Identified for Task {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Identified for Note {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Identified for Habit {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Identified for CalendarEvent {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Local list plus the bookkeeping every view shares.
#[derive(Debug, Clone)]
pub struct ListState<T> {
    items: Vec<T>,
    loading: bool,
    updating_id: Option<String>,
    status: SyncStatus,
}

impl<T> Default for ListState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            updating_id: None,
            status: SyncStatus::Idle,
        }
    }
}

impl<T: Identified> ListState<T> {
    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Id of the item whose mutation is in flight, if any.
    pub fn updating_id(&self) -> Option<&str> {
        self.updating_id.as_deref()
    }

    pub fn status(&self) -> &SyncStatus {
        &self.status
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub(crate) fn get_mut(&mut self, id: &str) -> Option<&mut T> {
        self.items.iter_mut().find(|item| item.id() == id)
    }

    pub(crate) fn remove(&mut self, id: &str) -> Option<T> {
        let idx = self.items.iter().position(|item| item.id() == id)?;
        Some(self.items.remove(idx))
    }

    pub(crate) fn begin_load(&mut self) {
        self.loading = true;
        self.status = SyncStatus::InProgress;
    }

    /// Apply a fetch result. A failed fetch leaves the list empty.
    pub(crate) fn finish_load(&mut self, result: Result<Vec<T>, BackendError>) -> Result<(), BackendError> {
        self.loading = false;
        match result {
            Ok(items) => {
                self.items = items;
                self.status = SyncStatus::Success;
                Ok(())
            }
            Err(e) => {
                self.items.clear();
                self.status = SyncStatus::Error { message: e.to_string() };
                Err(e)
            }
        }
    }

    pub(crate) fn mark_updating(&mut self, id: Option<&str>) {
        self.updating_id = id.map(str::to_string);
    }
}

/// Trim user input and cut it to `max` characters. `None` when nothing is left.
pub fn clean_text(input: &str, max: usize) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.chars().take(max).collect())
}
