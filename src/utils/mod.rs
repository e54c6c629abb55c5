//! Utility modules shared across the client.
//!
//! - [`datetime`] - timestamp parsing, repeat shifting and display formatting

pub mod datetime;
