use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    #[serde(deserialize_with = "super::deserialize_id")]
    pub id: String,
    pub content: String,
    /// Creation timestamp as sent by the server (ISO 8601).
    #[serde(default)]
    pub date: String,
}
