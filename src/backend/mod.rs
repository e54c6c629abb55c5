//! Backend abstraction layer.
//!
//! This module defines the interface the session and the view-models use to
//! reach the MindAlign service, along with the error type every operation
//! returns. [`rest::RestBackend`] is the HTTP implementation; tests provide
//! in-memory ones.

use async_trait::async_trait;
use serde::Serialize;

use crate::api::ApiError;
use crate::entities::{ActivityItem, AuthResponse, CalendarEvent, EventDraft, Habit, Note, Task};

pub mod rest;

/// Common error type for backend operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackendError {
    /// 401/403 from the server.
    #[error("{message}")]
    Unauthorized { status: u16, message: String },

    #[error("{0}")]
    NotFound(String),

    /// Any other non-2xx answer, carrying the server message.
    #[error("{message}")]
    Rejected { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Input refused on the client before any request was made.
    #[error("{0}")]
    Validation(String),
}

impl BackendError {
    /// HTTP status behind this error, when the server produced one.
    pub fn status(&self) -> Option<u16> {
        match self {
            BackendError::Unauthorized { status, .. } => Some(*status),
            BackendError::NotFound(_) => Some(404),
            BackendError::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Credentials refused with a plain 401.
    pub fn unauthorized(msg: impl Into<String>) -> Self {
        BackendError::Unauthorized {
            status: 401,
            message: msg.into(),
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        BackendError::Validation(msg.into())
    }
}

impl From<ApiError> for BackendError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Status {
                status: status @ (401 | 403),
                message,
            } => BackendError::Unauthorized { status, message },
            ApiError::Status { status: 404, message } => BackendError::NotFound(message),
            ApiError::Status { status, message } => BackendError::Rejected { status, message },
            ApiError::Network(message) => BackendError::Network(message),
            ApiError::Decode(message) => BackendError::InvalidData(message),
        }
    }
}

/// Arguments for creating a new account.
#[derive(Clone, Debug, Serialize)]
pub struct RegisterArgs {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Interface to the MindAlign service.
///
/// Mutating calls return `()`: the view-models always refetch after a create,
/// so whatever the server echoes back is not needed.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Returns the backend type identifier (e.g., "rest").
    fn backend_type(&self) -> &str;

    /// Bearer token attached to later calls; `None` clears it.
    fn set_token(&self, token: Option<String>);

    // Authentication
    async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, BackendError>;
    async fn login_with_google(&self, google_token: &str) -> Result<AuthResponse, BackendError>;
    async fn register(&self, args: RegisterArgs) -> Result<(), BackendError>;

    // Tasks
    async fn fetch_tasks(&self) -> Result<Vec<Task>, BackendError>;
    async fn create_task(&self, text: &str) -> Result<(), BackendError>;
    async fn toggle_task(&self, id: &str) -> Result<(), BackendError>;
    async fn delete_task(&self, id: &str) -> Result<(), BackendError>;

    // Notes
    async fn fetch_notes(&self) -> Result<Vec<Note>, BackendError>;
    async fn create_note(&self, content: &str) -> Result<(), BackendError>;
    async fn delete_note(&self, id: &str) -> Result<(), BackendError>;

    // Habits
    async fn fetch_habits(&self) -> Result<Vec<Habit>, BackendError>;
    async fn create_habit(&self, name: &str) -> Result<(), BackendError>;
    async fn toggle_habit_day(&self, id: &str, day: usize) -> Result<(), BackendError>;
    async fn delete_habit(&self, id: &str) -> Result<(), BackendError>;

    // Calendar
    async fn fetch_events(&self) -> Result<Vec<CalendarEvent>, BackendError>;
    async fn create_event(&self, draft: &EventDraft) -> Result<(), BackendError>;
    async fn update_event(&self, id: &str, draft: &EventDraft) -> Result<(), BackendError>;
    async fn delete_event(&self, id: &str) -> Result<(), BackendError>;

    // Dashboard
    async fn fetch_activity(&self) -> Result<Vec<ActivityItem>, BackendError>;
}
