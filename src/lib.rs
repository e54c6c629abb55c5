//! MindAlign - a terminal client for the MindAlign productivity service
//!
//! This library talks to the MindAlign REST API and keeps a local, optimistic
//! view of the signed-in user's tasks, notes, habits, calendar events and
//! recent activity.
//!
//! # Modules
//!
//! The library is organized into several key modules:
//!
//! * [`api`] - HTTP client with bearer-token handling
//! * [`backend`] - Service interface and its REST implementation
//! * [`session`] - Sign-in state, registration rules and persistence
//! * [`sync`] - Per-module view-models with optimistic updates
//! * [`config`] - Application configuration management
//! * [`utils`] - Date and time helpers

/// HTTP client for the MindAlign API
pub mod api;

/// Wiring of backend, session and view-models from configuration
pub mod app;

/// Backend abstraction layer
pub mod backend;

/// Configuration module for managing application settings
pub mod config;

/// Application constants and user-facing messages
pub mod constants;

/// Data models exchanged with the API
pub mod entities;

/// Logging setup for the binary
pub mod logger;

/// Transient user notifications
pub mod notify;

/// Authentication session
pub mod session;

/// View-models that keep local lists in step with the server
pub mod sync;

/// Utility functions for date/time handling
pub mod utils;

pub use entities::{ActivityItem, CalendarEvent, EventDraft, Habit, Note, Repeat, Task, User};
