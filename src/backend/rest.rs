//! REST backend implementation.

use async_trait::async_trait;
use log::warn;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};

use super::{Backend, BackendError, RegisterArgs};
use crate::api::{ApiClient, ApiError};
use crate::entities::{ActivityItem, AuthResponse, CalendarEvent, EventDraft, Habit, Note, Task};

/// Backend talking to the MindAlign HTTP API.
pub struct RestBackend {
    client: ApiClient,
}

#[derive(Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct GoogleToken<'a> {
    token: &'a str,
}

#[derive(Serialize)]
struct NewTask<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct NewNote<'a> {
    content: &'a str,
}

#[derive(Serialize)]
struct NewHabit<'a> {
    name: &'a str,
}

#[derive(Serialize)]
struct HabitDay {
    day: usize,
}

impl RestBackend {
    /// Create a REST backend rooted at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Result<Self, BackendError> {
        Ok(Self {
            client: ApiClient::new(base_url)?,
        })
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    // Helper: fetch a list endpoint. A non-array body is treated as an empty list.
    async fn fetch_list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, BackendError> {
        let value: Value = self.client.get(path).await?;
        match value {
            Value::Array(_) => serde_json::from_value(value).map_err(|e| BackendError::InvalidData(e.to_string())),
            other => {
                warn!("⚠️  {} returned a non-array body ({}), using an empty list", path, kind_of(&other));
                Ok(Vec::new())
            }
        }
    }

    // Helper: run a mutation and drop whatever the server echoes back.
    async fn discard(result: impl std::future::Future<Output = Result<Value, ApiError>>) -> Result<(), BackendError> {
        result.await.map(|_| ()).map_err(BackendError::from)
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[async_trait]
impl Backend for RestBackend {
    fn backend_type(&self) -> &str {
        "rest"
    }

    fn set_token(&self, token: Option<String>) {
        self.client.set_token(token);
    }

    async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, BackendError> {
        Ok(self
            .client
            .post("/api/auth/login", &Credentials { email, password })
            .await?)
    }

    async fn login_with_google(&self, google_token: &str) -> Result<AuthResponse, BackendError> {
        Ok(self
            .client
            .post("/api/auth/google", &GoogleToken { token: google_token })
            .await?)
    }

    async fn register(&self, args: RegisterArgs) -> Result<(), BackendError> {
        Self::discard(self.client.post::<Value, _>("/api/auth/register", &args)).await
    }

    async fn fetch_tasks(&self) -> Result<Vec<Task>, BackendError> {
        self.fetch_list("/api/tasks").await
    }

    async fn create_task(&self, text: &str) -> Result<(), BackendError> {
        Self::discard(self.client.post::<Value, _>("/api/tasks", &NewTask { text })).await
    }

    async fn toggle_task(&self, id: &str) -> Result<(), BackendError> {
        Self::discard(self.client.patch::<Value, _>(&format!("/api/tasks/{}/toggle", id), &json!({}))).await
    }

    async fn delete_task(&self, id: &str) -> Result<(), BackendError> {
        Self::discard(self.client.delete::<Value>(&format!("/api/tasks/{}", id))).await
    }

    async fn fetch_notes(&self) -> Result<Vec<Note>, BackendError> {
        self.fetch_list("/api/notes").await
    }

    async fn create_note(&self, content: &str) -> Result<(), BackendError> {
        Self::discard(self.client.post::<Value, _>("/api/notes", &NewNote { content })).await
    }

    async fn delete_note(&self, id: &str) -> Result<(), BackendError> {
        Self::discard(self.client.delete::<Value>(&format!("/api/notes/{}", id))).await
    }

    async fn fetch_habits(&self) -> Result<Vec<Habit>, BackendError> {
        self.fetch_list("/api/habits").await
    }

    async fn create_habit(&self, name: &str) -> Result<(), BackendError> {
        Self::discard(self.client.post::<Value, _>("/api/habits", &NewHabit { name })).await
    }

    async fn toggle_habit_day(&self, id: &str, day: usize) -> Result<(), BackendError> {
        Self::discard(self.client.put::<Value, _>(&format!("/api/habits/{}/toggle", id), &HabitDay { day })).await
    }

    async fn delete_habit(&self, id: &str) -> Result<(), BackendError> {
        Self::discard(self.client.delete::<Value>(&format!("/api/habits/{}", id))).await
    }

    async fn fetch_events(&self) -> Result<Vec<CalendarEvent>, BackendError> {
        self.fetch_list("/api/calendar").await
    }

    async fn create_event(&self, draft: &EventDraft) -> Result<(), BackendError> {
        Self::discard(self.client.post::<Value, _>("/api/calendar", draft)).await
    }

    async fn update_event(&self, id: &str, draft: &EventDraft) -> Result<(), BackendError> {
        Self::discard(self.client.put::<Value, _>(&format!("/api/calendar/{}", id), draft)).await
    }

    async fn delete_event(&self, id: &str) -> Result<(), BackendError> {
        Self::discard(self.client.delete::<Value>(&format!("/api/calendar/{}", id))).await
    }

    async fn fetch_activity(&self) -> Result<Vec<ActivityItem>, BackendError> {
        self.fetch_list("/api/activity").await
    }
}
