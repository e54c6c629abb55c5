use serde::{Deserialize, Serialize};

/// The authenticated account as returned by the auth endpoints.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(deserialize_with = "super::deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    pub email: String,
    #[serde(default)]
    pub image: Option<String>,
}

impl User {
    /// Name used for greetings, falling back to a generic label.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().filter(|n| !n.trim().is_empty()).unwrap_or("User")
    }
}

/// Body of a successful `/api/auth/login` or `/api/auth/google` call.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    pub user: User,
    pub token: String,
}
