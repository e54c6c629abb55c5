use serde::{Deserialize, Serialize};

/// Which module produced an activity entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Event,
    Note,
    Habit,
    Task,
    #[serde(other)]
    Unknown,
}

impl ActivityKind {
    pub fn label(&self) -> &'static str {
        match self {
            ActivityKind::Event => "event",
            ActivityKind::Note => "note",
            ActivityKind::Habit => "habit",
            ActivityKind::Task => "task",
            ActivityKind::Unknown => "other",
        }
    }
}

/// One row of the dashboard "recent activity" feed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActivityItem {
    #[serde(deserialize_with = "super::deserialize_id")]
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    pub content: String,
    pub date: String,
}
