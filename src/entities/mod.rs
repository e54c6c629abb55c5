//! Wire models for the MindAlign REST API.
//!
//! These are plain serde structs mirroring the JSON the server sends back.
//! The server owns every entity; the client only ever holds a disposable copy.

pub mod activity;
pub mod event;
pub mod habit;
pub mod note;
pub mod task;
pub mod user;

pub use activity::{ActivityItem, ActivityKind};
pub use event::{CalendarEvent, EventDraft, Repeat};
pub use habit::{Habit, WeekMarks};
pub use note::Note;
pub use task::Task;
pub use user::{AuthResponse, User};

use serde::{Deserialize, Deserializer};

/// Accept an identifier sent either as a JSON string or a JSON number.
///
/// Older API builds used integer primary keys, newer ones use opaque strings.
pub(crate) fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(i64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
    })
}
