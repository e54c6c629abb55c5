use log::debug;
use std::sync::Arc;

use super::{clean_text, ListState};
use crate::backend::{Backend, BackendError};
use crate::constants::{
    ERROR_EMPTY_TEXT, ERROR_TASK_CREATE_FAILED, ERROR_TASK_DELETE_FAILED, ERROR_TASK_LOAD_FAILED,
    ERROR_TASK_TOGGLE_FAILED, SUCCESS_TASK_CREATED, SUCCESS_TASK_DELETED, TASK_MAX_CHARS,
};
use crate::entities::Task;
use crate::notify::Notifier;

/// To-do list view-model.
pub struct TasksView {
    backend: Arc<dyn Backend>,
    notifier: Notifier,
    state: ListState<Task>,
}

impl TasksView {
    pub fn new(backend: Arc<dyn Backend>, notifier: Notifier) -> Self {
        Self {
            backend,
            notifier,
            state: ListState::default(),
        }
    }

    pub fn state(&self) -> &ListState<Task> {
        &self.state
    }

    pub fn tasks(&self) -> &[Task] {
        self.state.items()
    }

    pub fn completed_count(&self) -> usize {
        self.tasks().iter().filter(|t| t.completed).count()
    }

    /// Replace the local list with the server's.
    pub async fn load(&mut self) -> Result<(), BackendError> {
        self.state.begin_load();
        let result = self.backend.fetch_tasks().await;
        let outcome = self.state.finish_load(result);
        if outcome.is_err() {
            self.notifier.error(ERROR_TASK_LOAD_FAILED);
        } else {
            debug!("Loaded {} tasks", self.tasks().len());
        }
        outcome
    }

    /// Create a task (trimmed, cut to 80 characters) and refetch.
    pub async fn add(&mut self, text: &str) -> Result<(), BackendError> {
        let text = clean_text(text, TASK_MAX_CHARS).ok_or_else(|| BackendError::validation(ERROR_EMPTY_TEXT))?;

        if let Err(e) = self.backend.create_task(&text).await {
            self.notifier.error(ERROR_TASK_CREATE_FAILED);
            return Err(e);
        }
        let _ = self.load().await;
        self.notifier.success(SUCCESS_TASK_CREATED);
        Ok(())
    }

    /// Flip `completed` locally, then tell the server. Refetch if it refuses.
    pub async fn toggle(&mut self, id: &str) -> Result<(), BackendError> {
        if let Some(task) = self.state.get_mut(id) {
            task.completed = !task.completed;
        }

        self.state.mark_updating(Some(id));
        let result = self.backend.toggle_task(id).await;
        self.state.mark_updating(None);

        if let Err(e) = result {
            let _ = self.load().await;
            self.notifier.error(ERROR_TASK_TOGGLE_FAILED);
            return Err(e);
        }
        Ok(())
    }

    /// Drop the task locally, then delete it on the server. Refetch if it refuses.
    pub async fn delete(&mut self, id: &str) -> Result<(), BackendError> {
        self.state.remove(id);

        self.state.mark_updating(Some(id));
        let result = self.backend.delete_task(id).await;
        self.state.mark_updating(None);

        match result {
            Ok(()) => {
                self.notifier.success(SUCCESS_TASK_DELETED);
                Ok(())
            }
            Err(e) => {
                let _ = self.load().await;
                self.notifier.error(ERROR_TASK_DELETE_FAILED);
                Err(e)
            }
        }
    }
}
