use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::utils::datetime;

/// Repetition rule attached to a calendar event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Repeat {
    Weekly,
    Monthly,
}

impl Repeat {
    /// Shift `dt` forward by `n` periods of this rule, counted on the calendar of `tz`.
    ///
    /// Monthly shifts clamp to the last day of shorter months.
    pub fn shift<Tz: TimeZone>(&self, dt: DateTime<Utc>, n: u32, tz: &Tz) -> Option<DateTime<Utc>> {
        match self {
            Repeat::Weekly => datetime::add_weeks(dt, n, tz),
            Repeat::Monthly => datetime::add_months(dt, n, tz),
        }
    }
}

impl fmt::Display for Repeat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Repeat::Weekly => write!(f, "weekly"),
            Repeat::Monthly => write!(f, "monthly"),
        }
    }
}

impl FromStr for Repeat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "weekly" | "week" => Ok(Repeat::Weekly),
            "monthly" | "month" => Ok(Repeat::Monthly),
            other => Err(format!("unknown repeat rule '{}', expected 'weekly' or 'monthly'", other)),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    #[serde(deserialize_with = "super::deserialize_id")]
    pub id: String,
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repeat: Option<Repeat>,
    #[serde(rename = "allDay", default)]
    pub all_day: bool,
}

/// An event as submitted from the editor, before the server assigns an id.
///
/// `id` is set when editing an existing event; saving then updates instead of creating.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EventDraft {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub id: Option<String>,
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repeat: Option<Repeat>,
    #[serde(rename = "allDay", default)]
    pub all_day: bool,
}

impl EventDraft {
    pub fn new(title: impl Into<String>, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            id: None,
            title: title.into(),
            start,
            end,
            repeat: None,
            all_day: false,
        }
    }

    pub fn with_repeat(mut self, repeat: Option<Repeat>) -> Self {
        self.repeat = repeat;
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Prefill an editor from a stored event.
    pub fn from_event(event: &CalendarEvent) -> Self {
        Self {
            id: Some(event.id.clone()),
            title: event.title.clone(),
            start: event.start,
            end: event.end,
            repeat: event.repeat,
            all_day: false,
        }
    }

    /// Default draft for a clicked slot: one hour starting at `at`.
    pub fn starting_at(at: DateTime<Utc>) -> Self {
        Self::new(String::new(), at, at + chrono::Duration::hours(1))
    }
}
