use std::sync::Arc;

use super::{clean_text, ListState};
use crate::backend::{Backend, BackendError};
use crate::constants::{
    ERROR_EMPTY_TEXT, ERROR_NOTE_CREATE_FAILED, ERROR_NOTE_DELETE_FAILED, ERROR_NOTE_LOAD_FAILED, NOTE_MAX_CHARS,
    SUCCESS_NOTE_CREATED, SUCCESS_NOTE_DELETED,
};
use crate::entities::Note;
use crate::notify::Notifier;

pub struct NotesView {
    backend: Arc<dyn Backend>,
    notifier: Notifier,
    state: ListState<Note>,
}

impl NotesView {
    pub fn new(backend: Arc<dyn Backend>, notifier: Notifier) -> Self {
        Self {
            backend,
            notifier,
            state: ListState::default(),
        }
    }

    pub fn state(&self) -> &ListState<Note> {
        &self.state
    }

    pub fn notes(&self) -> &[Note] {
        self.state.items()
    }

    pub async fn load(&mut self) -> Result<(), BackendError> {
        self.state.begin_load();
        let result = self.backend.fetch_notes().await;
        let outcome = self.state.finish_load(result);
        if outcome.is_err() {
            self.notifier.error(ERROR_NOTE_LOAD_FAILED);
        }
        outcome
    }

    /// Save a note (trimmed, cut to 500 characters) and refetch.
    pub async fn add(&mut self, content: &str) -> Result<(), BackendError> {
        let content =
            clean_text(content, NOTE_MAX_CHARS).ok_or_else(|| BackendError::validation(ERROR_EMPTY_TEXT))?;

        if let Err(e) = self.backend.create_note(&content).await {
            self.notifier.error(ERROR_NOTE_CREATE_FAILED);
            return Err(e);
        }
        let _ = self.load().await;
        self.notifier.success(SUCCESS_NOTE_CREATED);
        Ok(())
    }

    pub async fn delete(&mut self, id: &str) -> Result<(), BackendError> {
        self.state.remove(id);

        self.state.mark_updating(Some(id));
        let result = self.backend.delete_note(id).await;
        self.state.mark_updating(None);

        match result {
            Ok(()) => {
                self.notifier.success(SUCCESS_NOTE_DELETED);
                Ok(())
            }
            Err(e) => {
                let _ = self.load().await;
                self.notifier.error(ERROR_NOTE_DELETE_FAILED);
                Err(e)
            }
        }
    }
}
