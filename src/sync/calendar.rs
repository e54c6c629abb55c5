use chrono::{DateTime, Local, TimeZone, Utc};
use log::{debug, warn};
use std::collections::HashMap;
use std::sync::Arc;

use super::ListState;
use crate::backend::{Backend, BackendError};
use crate::constants::{
    ERROR_EMPTY_TITLE, ERROR_EVENT_DELETE_FAILED, ERROR_EVENT_LOAD_FAILED, ERROR_EVENT_RANGE,
    ERROR_EVENT_SAVE_FAILED, REPEAT_OCCURRENCES, SUCCESS_EVENT_CREATED, SUCCESS_EVENT_DELETED,
    SUCCESS_EVENT_UPDATED,
};
use crate::entities::{CalendarEvent, EventDraft};
use crate::notify::Notifier;
use crate::utils::datetime::normalize_midnight_end;

/// The extra occurrences of a repeating draft, each shifted from the original
/// on the wall clock of `tz`.
///
/// The original itself is not included. A draft without a repeat rule yields
/// nothing, as does any shift that overflows the calendar.
pub fn expand_occurrences<Tz: TimeZone>(draft: &EventDraft, count: u32, tz: &Tz) -> Vec<EventDraft> {
    let Some(rule) = draft.repeat else {
        return Vec::new();
    };

    (1..=count)
        .map_while(|i| {
            let start = rule.shift(draft.start, i, tz)?;
            let end = rule.shift(draft.end, i, tz)?;
            Some(EventDraft {
                id: None,
                start,
                end,
                all_day: false,
                ..draft.clone()
            })
        })
        .collect()
}

/// Prepare a fetched event for display in `tz`.
pub fn normalize_event<Tz: TimeZone>(mut event: CalendarEvent, tz: &Tz) -> CalendarEvent {
    event.end = normalize_midnight_end(event.end, tz);
    event.all_day = false;
    event
}

/// Reject drafts with an empty title or an end that is not after the start.
pub fn validate_draft(draft: &EventDraft) -> Result<(), BackendError> {
    if draft.title.trim().is_empty() {
        return Err(BackendError::validation(ERROR_EMPTY_TITLE));
    }
    if draft.start >= draft.end {
        return Err(BackendError::validation(ERROR_EVENT_RANGE));
    }
    Ok(())
}

pub struct CalendarView {
    backend: Arc<dyn Backend>,
    notifier: Notifier,
    state: ListState<CalendarEvent>,
    /// End times as the server stored them, before midnight normalization
    stored_ends: HashMap<String, DateTime<Utc>>,
}

impl CalendarView {
    pub fn new(backend: Arc<dyn Backend>, notifier: Notifier) -> Self {
        Self {
            backend,
            notifier,
            state: ListState::default(),
            stored_ends: HashMap::new(),
        }
    }

    pub fn state(&self) -> &ListState<CalendarEvent> {
        &self.state
    }

    pub fn events(&self) -> &[CalendarEvent] {
        self.state.items()
    }

    /// Editor draft for a loaded event, with the end as the server stored it.
    pub fn draft_for(&self, id: &str) -> Option<EventDraft> {
        let mut draft = EventDraft::from_event(self.state.get(id)?);
        if let Some(end) = self.stored_ends.get(id) {
            draft.end = *end;
        }
        Some(draft)
    }

    /// Fetch every event, normalized for the local time zone.
    pub async fn load(&mut self) -> Result<(), BackendError> {
        self.load_in(&Local).await
    }

    /// Fetch every event, normalized for `tz`.
    pub async fn load_in<Tz: TimeZone + Sync>(&mut self, tz: &Tz) -> Result<(), BackendError> {
        self.state.begin_load();
        let fetched = self.backend.fetch_events().await;
        self.stored_ends = fetched
            .as_ref()
            .map(|events| events.iter().map(|e| (e.id.clone(), e.end)).collect())
            .unwrap_or_default();
        let result = fetched.map(|events| events.into_iter().map(|e| normalize_event(e, tz)).collect());
        let outcome = self.state.finish_load(result);
        if outcome.is_err() {
            self.notifier.error(ERROR_EVENT_LOAD_FAILED);
        }
        outcome
    }

    /// Create or update an event in the local time zone, then reload.
    pub async fn save(&mut self, draft: &EventDraft) -> Result<(), BackendError> {
        self.save_in(draft, &Local).await
    }

    /// Create or update an event, repeating and reloading in `tz`.
    ///
    /// A draft with an id is updated in place. A new draft with a repeat rule
    /// is followed by its extra occurrences, posted one at a time; the first
    /// failure stops the sequence and whatever was already created stays.
    pub async fn save_in<Tz: TimeZone + Sync>(&mut self, draft: &EventDraft, tz: &Tz) -> Result<(), BackendError> {
        validate_draft(draft)?;

        let mut draft = draft.clone();
        draft.title = draft.title.trim().to_string();
        draft.all_day = false;

        let result = match draft.id.clone() {
            Some(id) => self.backend.update_event(&id, &draft).await,
            None => self.create_with_occurrences(&draft, tz).await,
        };

        let _ = self.load_in(tz).await;

        match result {
            Ok(()) => {
                let message = if draft.id.is_some() {
                    SUCCESS_EVENT_UPDATED
                } else {
                    SUCCESS_EVENT_CREATED
                };
                self.notifier.success(message);
                Ok(())
            }
            Err(e) => {
                self.notifier.error(ERROR_EVENT_SAVE_FAILED);
                Err(e)
            }
        }
    }

    async fn create_with_occurrences<Tz: TimeZone + Sync>(&self, draft: &EventDraft, tz: &Tz) -> Result<(), BackendError> {
        self.backend.create_event(draft).await?;

        let occurrences = expand_occurrences(draft, REPEAT_OCCURRENCES, tz);
        for (i, occurrence) in occurrences.iter().enumerate() {
            if let Err(e) = self.backend.create_event(occurrence).await {
                warn!("⚠️  Repeat stopped after {} of {} occurrences: {}", i, occurrences.len(), e);
                return Err(e);
            }
        }
        debug!("Created event with {} extra occurrences", occurrences.len());
        Ok(())
    }

    pub async fn delete(&mut self, id: &str) -> Result<(), BackendError> {
        self.state.remove(id);

        self.state.mark_updating(Some(id));
        let result = self.backend.delete_event(id).await;
        self.state.mark_updating(None);

        match result {
            Ok(()) => {
                self.notifier.success(SUCCESS_EVENT_DELETED);
                Ok(())
            }
            Err(e) => {
                let _ = self.load().await;
                self.notifier.error(ERROR_EVENT_DELETE_FAILED);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Repeat;
    use chrono::{Duration, Utc};

    fn draft(repeat: Option<Repeat>) -> EventDraft {
        let start = Utc.with_ymd_and_hms(2024, 1, 31, 9, 0, 0).unwrap();
        EventDraft::new("Review", start, start + Duration::hours(1)).with_repeat(repeat)
    }

    #[test]
    fn test_no_rule_no_occurrences() {
        assert!(expand_occurrences(&draft(None), 5, &Utc).is_empty());
    }

    #[test]
    fn test_monthly_clamps_to_month_end() {
        let occurrences = expand_occurrences(&draft(Some(Repeat::Monthly)), 5, &Utc);
        let days: Vec<_> = occurrences.iter().map(|o| o.start.date_naive().to_string()).collect();
        assert_eq!(
            days,
            vec!["2024-02-29", "2024-03-31", "2024-04-30", "2024-05-31", "2024-06-30"]
        );
        assert!(occurrences.iter().all(|o| o.end - o.start == Duration::hours(1)));
        assert!(occurrences.iter().all(|o| o.repeat == Some(Repeat::Monthly)));
    }

    #[test]
    fn test_monthly_follows_local_day() {
        // 21:30 on Jan 31 at UTC-3 is Feb 1 in UTC
        let tz = chrono::FixedOffset::west_opt(3 * 3600).unwrap();
        let start = tz.with_ymd_and_hms(2024, 1, 31, 21, 30, 0).unwrap().with_timezone(&Utc);
        let d = EventDraft::new("Review", start, start + Duration::hours(1)).with_repeat(Some(Repeat::Monthly));
        let days: Vec<_> = expand_occurrences(&d, 3, &tz)
            .iter()
            .map(|o| o.start.with_timezone(&tz).format("%Y-%m-%d %H:%M").to_string())
            .collect();
        assert_eq!(days, vec!["2024-02-29 21:30", "2024-03-31 21:30", "2024-04-30 21:30"]);
    }

    #[test]
    fn test_occurrences_drop_id() {
        let occurrences = expand_occurrences(&draft(Some(Repeat::Weekly)).with_id("e1"), 2, &Utc);
        assert!(occurrences.iter().all(|o| o.id.is_none()));
    }

    #[test]
    fn test_validate_draft() {
        let mut d = draft(None);
        assert!(validate_draft(&d).is_ok());

        d.title = "   ".to_string();
        assert_eq!(validate_draft(&d), Err(BackendError::validation(ERROR_EMPTY_TITLE)));

        let mut d = draft(None);
        d.end = d.start;
        assert_eq!(validate_draft(&d), Err(BackendError::validation(ERROR_EVENT_RANGE)));
    }

    #[test]
    fn test_normalize_event_midnight_end() {
        let event = CalendarEvent {
            id: "1".to_string(),
            title: "Trip".to_string(),
            start: Utc.with_ymd_and_hms(2024, 5, 1, 20, 0, 0).unwrap(),
            end: Utc.with_ymd_and_hms(2024, 5, 2, 0, 0, 0).unwrap(),
            repeat: None,
            all_day: true,
        };
        let normalized = normalize_event(event, &Utc);
        assert_eq!(normalized.end, Utc.with_ymd_and_hms(2024, 5, 1, 23, 59, 0).unwrap());
        assert!(!normalized.all_day);
    }
}
