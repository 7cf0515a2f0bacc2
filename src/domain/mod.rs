/// Domain module containing core business logic and data types
///
/// This module defines the core entities (Habit, SessionRecord, Goal) and
/// their validation rules, plus the streak advancement rule. These types
/// represent the fundamental concepts in the session and progress engine.

pub mod habit;
pub mod session;
pub mod goal;
pub mod streak;
pub mod types;

// Re-export public types for easy access
pub use habit::*;
pub use session::*;
pub use goal::*;
pub use streak::*;
pub use types::*;

use thiserror::Error;

/// Errors that can occur during engine operations
///
/// Every error is recoverable and local: a failing command leaves all
/// engine state unchanged.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Malformed caller input: empty name, non-positive minutes,
    /// unparseable date, missing custom-goal date range.
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    /// A timer transition that is not legal from the current state,
    /// e.g. starting an already-running habit.
    #[error("Invalid transition: {message}")]
    InvalidTransition { message: String },

    /// Operation referenced an unknown habit or goal.
    #[error("Not found: {0}")]
    NotFound(String),
}

impl EngineError {
    pub(crate) fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput { message: message.into() }
    }

    pub(crate) fn invalid_transition(message: impl Into<String>) -> Self {
        Self::InvalidTransition { message: message.into() }
    }
}
