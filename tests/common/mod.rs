#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use mindalign::backend::{Backend, BackendError, RegisterArgs};
use mindalign::entities::{
    ActivityItem, AuthResponse, CalendarEvent, EventDraft, Habit, Note, Task, User, WeekMarks,
};

/// In-memory stand-in for the MindAlign server.
///
/// Individual operations can be made to fail by name (e.g. `"toggle_task"`),
/// and every call is recorded so tests can check what reached the "server".
#[derive(Default)]
pub struct FakeBackend {
    state: Mutex<FakeState>,
}

#[derive(Default)]
pub struct FakeState {
    pub accounts: Vec<(User, String)>,
    pub tasks: Vec<Task>,
    pub notes: Vec<Note>,
    pub habits: Vec<Habit>,
    pub events: Vec<CalendarEvent>,
    pub activity: Vec<ActivityItem>,
    pub token: Option<String>,
    pub calls: Vec<String>,
    pub failing: HashSet<String>,
    /// Event creations allowed before `create_event` starts failing.
    pub event_create_budget: Option<usize>,
    next_id: u64,
}

impl FakeState {
    fn next_id(&mut self) -> String {
        self.next_id += 1;
        format!("srv-{}", self.next_id)
    }
}

pub fn user(id: &str, name: &str, email: &str) -> User {
    User {
        id: id.to_string(),
        name: Some(name.to_string()),
        email: email.to_string(),
        image: None,
    }
}

pub fn task(id: &str, text: &str, completed: bool) -> Task {
    Task {
        id: id.to_string(),
        text: text.to_string(),
        completed,
    }
}

pub fn habit(id: &str, name: &str) -> Habit {
    Habit {
        id: id.to_string(),
        name: name.to_string(),
        week_data: WeekMarks::default(),
    }
}

pub fn note(id: &str, content: &str) -> Note {
    Note {
        id: id.to_string(),
        content: content.to_string(),
        date: "2024-03-05T14:07:00Z".to_string(),
    }
}

fn server_error(op: &str) -> BackendError {
    BackendError::Rejected {
        status: 500,
        message: format!("{} failed", op),
    }
}

impl FakeBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Mutate the server-side data directly.
    pub fn with<R>(&self, f: impl FnOnce(&mut FakeState) -> R) -> R {
        let mut state = self.state.lock().unwrap();
        f(&mut state)
    }

    pub fn fail(&self, op: &str) {
        self.with(|s| s.failing.insert(op.to_string()));
    }

    pub fn recover(&self, op: &str) {
        self.with(|s| s.failing.remove(op));
    }

    pub fn calls(&self) -> Vec<String> {
        self.with(|s| s.calls.clone())
    }

    pub fn call_count(&self, op: &str) -> usize {
        self.with(|s| s.calls.iter().filter(|c| *c == op).count())
    }

    pub fn token(&self) -> Option<String> {
        self.with(|s| s.token.clone())
    }

    pub fn add_account(&self, user: User, password: &str) {
        self.with(|s| s.accounts.push((user, password.to_string())));
    }

    // Record the call and fail it if requested.
    fn enter(&self, op: &str) -> Result<(), BackendError> {
        self.with(|s| {
            s.calls.push(op.to_string());
            if s.failing.contains(op) {
                Err(server_error(op))
            } else {
                Ok(())
            }
        })
    }
}

fn not_found(what: &str, id: &str) -> BackendError {
    BackendError::NotFound(format!("{} {} not found", what, id))
}

#[async_trait]
impl Backend for FakeBackend {
    fn backend_type(&self) -> &str {
        "fake"
    }

    fn set_token(&self, token: Option<String>) {
        self.with(|s| s.token = token);
    }

    async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, BackendError> {
        self.enter("login")?;
        self.with(|s| {
            s.accounts
                .iter()
                .find(|(u, p)| u.email == email && p == password)
                .map(|(u, _)| AuthResponse {
                    user: u.clone(),
                    token: format!("token-{}", u.id),
                })
                .ok_or_else(|| BackendError::unauthorized("Invalid credentials"))
        })
    }

    async fn login_with_google(&self, google_token: &str) -> Result<AuthResponse, BackendError> {
        self.enter("login_with_google")?;
        if google_token != "google-ok" {
            return Err(BackendError::unauthorized("Invalid Google token"));
        }
        Ok(AuthResponse {
            user: user("g1", "Gabi", "gabi@example.com"),
            token: "token-google".to_string(),
        })
    }

    async fn register(&self, args: RegisterArgs) -> Result<(), BackendError> {
        self.enter("register")?;
        self.with(|s| {
            if s.accounts.iter().any(|(u, _)| u.email == args.email) {
                return Err(BackendError::Rejected {
                    status: 409,
                    message: "Email already registered".to_string(),
                });
            }
            let id = s.next_id();
            s.accounts.push((user(&id, &args.name, &args.email), args.password));
            Ok(())
        })
    }

    async fn fetch_tasks(&self) -> Result<Vec<Task>, BackendError> {
        self.enter("fetch_tasks")?;
        Ok(self.with(|s| s.tasks.clone()))
    }

    async fn create_task(&self, text: &str) -> Result<(), BackendError> {
        self.enter("create_task")?;
        self.with(|s| {
            let id = s.next_id();
            s.tasks.push(task(&id, text, false));
        });
        Ok(())
    }

    async fn toggle_task(&self, id: &str) -> Result<(), BackendError> {
        self.enter("toggle_task")?;
        self.with(|s| {
            let t = s.tasks.iter_mut().find(|t| t.id == id).ok_or_else(|| not_found("Task", id))?;
            t.completed = !t.completed;
            Ok(())
        })
    }

    async fn delete_task(&self, id: &str) -> Result<(), BackendError> {
        self.enter("delete_task")?;
        self.with(|s| {
            let before = s.tasks.len();
            s.tasks.retain(|t| t.id != id);
            if s.tasks.len() == before {
                Err(not_found("Task", id))
            } else {
                Ok(())
            }
        })
    }

    async fn fetch_notes(&self) -> Result<Vec<Note>, BackendError> {
        self.enter("fetch_notes")?;
        Ok(self.with(|s| s.notes.clone()))
    }

    async fn create_note(&self, content: &str) -> Result<(), BackendError> {
        self.enter("create_note")?;
        self.with(|s| {
            let id = s.next_id();
            s.notes.push(note(&id, content));
        });
        Ok(())
    }

    async fn delete_note(&self, id: &str) -> Result<(), BackendError> {
        self.enter("delete_note")?;
        self.with(|s| {
            let before = s.notes.len();
            s.notes.retain(|n| n.id != id);
            if s.notes.len() == before {
                Err(not_found("Note", id))
            } else {
                Ok(())
            }
        })
    }

    async fn fetch_habits(&self) -> Result<Vec<Habit>, BackendError> {
        self.enter("fetch_habits")?;
        Ok(self.with(|s| s.habits.clone()))
    }

    async fn create_habit(&self, name: &str) -> Result<(), BackendError> {
        self.enter("create_habit")?;
        self.with(|s| {
            let id = s.next_id();
            s.habits.push(habit(&id, name));
        });
        Ok(())
    }

    async fn toggle_habit_day(&self, id: &str, day: usize) -> Result<(), BackendError> {
        self.enter("toggle_habit_day")?;
        self.with(|s| {
            let h = s.habits.iter_mut().find(|h| h.id == id).ok_or_else(|| not_found("Habit", id))?;
            h.week_data
                .toggle(day)
                .map(|_| ())
                .ok_or_else(|| BackendError::Rejected {
                    status: 400,
                    message: "Invalid day".to_string(),
                })
        })
    }

    async fn delete_habit(&self, id: &str) -> Result<(), BackendError> {
        self.enter("delete_habit")?;
        self.with(|s| {
            let before = s.habits.len();
            s.habits.retain(|h| h.id != id);
            if s.habits.len() == before {
                Err(not_found("Habit", id))
            } else {
                Ok(())
            }
        })
    }

    async fn fetch_events(&self) -> Result<Vec<CalendarEvent>, BackendError> {
        self.enter("fetch_events")?;
        Ok(self.with(|s| s.events.clone()))
    }

    async fn create_event(&self, draft: &EventDraft) -> Result<(), BackendError> {
        self.enter("create_event")?;
        self.with(|s| {
            if let Some(budget) = s.event_create_budget.as_mut() {
                if *budget == 0 {
                    return Err(server_error("create_event"));
                }
                *budget -= 1;
            }
            let id = s.next_id();
            s.events.push(CalendarEvent {
                id,
                title: draft.title.clone(),
                start: draft.start,
                end: draft.end,
                repeat: draft.repeat,
                all_day: draft.all_day,
            });
            Ok(())
        })
    }

    async fn update_event(&self, id: &str, draft: &EventDraft) -> Result<(), BackendError> {
        self.enter("update_event")?;
        self.with(|s| {
            let e = s.events.iter_mut().find(|e| e.id == id).ok_or_else(|| not_found("Event", id))?;
            e.title = draft.title.clone();
            e.start = draft.start;
            e.end = draft.end;
            e.repeat = draft.repeat;
            e.all_day = draft.all_day;
            Ok(())
        })
    }

    async fn delete_event(&self, id: &str) -> Result<(), BackendError> {
        self.enter("delete_event")?;
        self.with(|s| {
            let before = s.events.len();
            s.events.retain(|e| e.id != id);
            if s.events.len() == before {
                Err(not_found("Event", id))
            } else {
                Ok(())
            }
        })
    }

    async fn fetch_activity(&self) -> Result<Vec<ActivityItem>, BackendError> {
        self.enter("fetch_activity")?;
        Ok(self.with(|s| s.activity.clone()))
    }
}
