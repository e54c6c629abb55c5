//! Constants used throughout the application
//!
//! This module centralizes limits, file names and user-facing messages.

// Input limits
/// Longest task text the client will send
pub const TASK_MAX_CHARS: usize = 80;
/// Longest note the client will send
pub const NOTE_MAX_CHARS: usize = 500;
/// Extra occurrences created for a repeating event, on top of the original
pub const REPEAT_OCCURRENCES: u32 = 5;

// Files and environment
pub const LOCAL_CONFIG_FILE: &str = "mindalign.toml";
pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const SESSION_FILE_NAME: &str = "session.json";
pub const LOG_FILE_NAME: &str = "mindalign.log";
pub const API_URL_ENV: &str = "MINDALIGN_API_URL";

// Auth messages
pub const SUCCESS_LOGIN: &str = "✅ Signed in. Welcome back to MindAlign.";
pub const SUCCESS_GOOGLE_LOGIN: &str = "✅ Signed in with Google";
pub const SUCCESS_REGISTERED: &str = "✅ Account created. Sign in to continue.";
pub const SUCCESS_LOGOUT: &str = "👋 Signed out";
pub const ERROR_LOGIN_FAILED: &str = "❌ Invalid credentials";
pub const ERROR_GOOGLE_LOGIN_FAILED: &str = "❌ Google sign-in failed";
pub const ERROR_REGISTER_FAILED: &str = "❌ Could not create account";
pub const ERROR_PASSWORD_MISMATCH: &str = "❌ Passwords do not match";
pub const ERROR_PASSWORD_WEAK: &str = "❌ Password does not meet the minimum requirements";

// Task messages
pub const SUCCESS_TASK_CREATED: &str = "✅ Task added";
pub const SUCCESS_TASK_DELETED: &str = "✅ Task deleted";
pub const ERROR_TASK_LOAD_FAILED: &str = "❌ Failed to load tasks";
pub const ERROR_TASK_CREATE_FAILED: &str = "❌ Failed to add task";
pub const ERROR_TASK_TOGGLE_FAILED: &str = "❌ Failed to toggle task";
pub const ERROR_TASK_DELETE_FAILED: &str = "❌ Failed to delete task";

// Note messages
pub const SUCCESS_NOTE_CREATED: &str = "✅ Note saved";
pub const SUCCESS_NOTE_DELETED: &str = "✅ Note deleted";
pub const ERROR_NOTE_LOAD_FAILED: &str = "❌ Failed to load notes";
pub const ERROR_NOTE_CREATE_FAILED: &str = "❌ Failed to save note";
pub const ERROR_NOTE_DELETE_FAILED: &str = "❌ Failed to delete note";

// Habit messages
pub const SUCCESS_HABIT_CREATED: &str = "✅ Habit added";
pub const SUCCESS_HABIT_DELETED: &str = "✅ Habit removed";
pub const ERROR_HABIT_LOAD_FAILED: &str = "❌ Failed to load habits";
pub const ERROR_HABIT_CREATE_FAILED: &str = "❌ Failed to add habit";
pub const ERROR_HABIT_TOGGLE_FAILED: &str = "❌ Failed to update habit";
pub const ERROR_HABIT_DELETE_FAILED: &str = "❌ Failed to remove habit";

// Calendar messages
pub const SUCCESS_EVENT_CREATED: &str = "✅ Event created";
pub const SUCCESS_EVENT_UPDATED: &str = "✅ Event updated";
pub const SUCCESS_EVENT_DELETED: &str = "✅ Event deleted";
pub const ERROR_EVENT_LOAD_FAILED: &str = "❌ Failed to load events";
pub const ERROR_EVENT_SAVE_FAILED: &str = "❌ Failed to save event";
pub const ERROR_EVENT_DELETE_FAILED: &str = "❌ Failed to delete event";

// Dashboard messages
pub const ERROR_ACTIVITY_LOAD_FAILED: &str = "❌ Failed to load recent activity";

// Validation messages
pub const ERROR_EMPTY_TEXT: &str = "❌ Text cannot be empty";
pub const ERROR_EMPTY_TITLE: &str = "❌ Event title cannot be empty";
pub const ERROR_EVENT_RANGE: &str = "❌ Event must end after it starts";
pub const ERROR_INVALID_DAY: &str = "❌ Day must be between 0 (Monday) and 6 (Sunday)";
pub const ERROR_UNKNOWN_ITEM: &str = "❌ No item with that id";

// CLI messages
pub const CONFIG_GENERATED: &str = "✅ Generated default configuration file";
pub const ERROR_NOT_SIGNED_IN: &str = "❌ Not signed in. Run `mindalign login` first.";
