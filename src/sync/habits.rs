use log::debug;
use std::sync::Arc;

use super::{clean_text, ListState};
use crate::backend::{Backend, BackendError};
use crate::constants::{
    ERROR_EMPTY_TEXT, ERROR_HABIT_CREATE_FAILED, ERROR_HABIT_DELETE_FAILED, ERROR_HABIT_LOAD_FAILED,
    ERROR_HABIT_TOGGLE_FAILED, ERROR_INVALID_DAY, SUCCESS_HABIT_CREATED, SUCCESS_HABIT_DELETED,
};
use crate::entities::habit::DAYS_IN_WEEK;
use crate::entities::Habit;
use crate::notify::Notifier;

/// Weekly habit tracker. Days are indexed 0 (Monday) to 6 (Sunday).
pub struct HabitsView {
    backend: Arc<dyn Backend>,
    notifier: Notifier,
    state: ListState<Habit>,
}

impl HabitsView {
    pub fn new(backend: Arc<dyn Backend>, notifier: Notifier) -> Self {
        Self {
            backend,
            notifier,
            state: ListState::default(),
        }
    }

    pub fn state(&self) -> &ListState<Habit> {
        &self.state
    }

    pub fn habits(&self) -> &[Habit] {
        self.state.items()
    }

    pub async fn load(&mut self) -> Result<(), BackendError> {
        self.state.begin_load();
        let result = self.backend.fetch_habits().await;
        let outcome = self.state.finish_load(result);
        if outcome.is_err() {
            self.notifier.error(ERROR_HABIT_LOAD_FAILED);
        }
        outcome
    }

    pub async fn add(&mut self, name: &str) -> Result<(), BackendError> {
        let name = clean_text(name, usize::MAX).ok_or_else(|| BackendError::validation(ERROR_EMPTY_TEXT))?;

        if let Err(e) = self.backend.create_habit(&name).await {
            self.notifier.error(ERROR_HABIT_CREATE_FAILED);
            return Err(e);
        }
        let _ = self.load().await;
        self.notifier.success(SUCCESS_HABIT_CREATED);
        Ok(())
    }

    /// Flip one day of the week locally, then on the server. Refetch if it refuses.
    pub async fn toggle_day(&mut self, id: &str, day: usize) -> Result<(), BackendError> {
        if day >= DAYS_IN_WEEK {
            return Err(BackendError::validation(ERROR_INVALID_DAY));
        }

        if let Some(habit) = self.state.get_mut(id) {
            if let Some(done) = habit.week_data.toggle(day) {
                debug!("Habit {} day {} -> {}", id, day, done);
            }
        }

        self.state.mark_updating(Some(id));
        let result = self.backend.toggle_habit_day(id, day).await;
        self.state.mark_updating(None);

        if let Err(e) = result {
            let _ = self.load().await;
            self.notifier.error(ERROR_HABIT_TOGGLE_FAILED);
            return Err(e);
        }
        Ok(())
    }

    pub async fn delete(&mut self, id: &str) -> Result<(), BackendError> {
        self.state.remove(id);

        self.state.mark_updating(Some(id));
        let result = self.backend.delete_habit(id).await;
        self.state.mark_updating(None);

        match result {
            Ok(()) => {
                self.notifier.success(SUCCESS_HABIT_DELETED);
                Ok(())
            }
            Err(e) => {
                let _ = self.load().await;
                self.notifier.error(ERROR_HABIT_DELETE_FAILED);
                Err(e)
            }
        }
    }
}
