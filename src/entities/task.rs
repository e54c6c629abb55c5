use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    #[serde(deserialize_with = "super::deserialize_id")]
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub completed: bool,
}
