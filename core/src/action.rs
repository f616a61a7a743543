//! Action vocabulary and entry-point validation.
//!
//! Actions are the closed set of mutation requests that can be applied to the
//! collection. They are plain values: submitting one has no effect until the
//! store folds it through the reducer.

use crate::types::TodoId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum accepted todo text length, in bytes.
pub const MAX_TEXT_LEN: usize = 500;

/// A mutation request against the todo collection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TodoAction {
    /// Create a todo with a freshly allocated id and `done = false`.
    NewTodo {
        /// Text for the new item.
        text: String,
    },
    /// Replace the text of an existing todo. No-op for unknown ids.
    EditTodo {
        /// Target item.
        id: TodoId,
        /// Replacement text.
        text: String,
    },
    /// Flip the completion flag of an existing todo. No-op for unknown ids.
    ToggleTodo {
        /// Target item.
        id: TodoId,
    },
    /// Remove a todo from the collection. No-op for unknown ids.
    DeleteTodo {
        /// Target item.
        id: TodoId,
    },
}

/// Rejection reasons for malformed command payloads.
///
/// These are checked at the store entry points, before an action is ever
/// constructed; the reducer itself stays total over the action vocabulary.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CommandError {
    /// The text was empty (or whitespace only).
    #[error("todo text cannot be empty")]
    EmptyText,
    /// The text exceeded [`MAX_TEXT_LEN`].
    #[error("todo text too long ({len} bytes, max {MAX_TEXT_LEN})")]
    TextTooLong {
        /// Actual length of the rejected text.
        len: usize,
    },
}

/// Validates todo text before it is turned into a `NewTodo` action.
///
/// # Errors
///
/// Returns [`CommandError::EmptyText`] if the text is empty after trimming,
/// or [`CommandError::TextTooLong`] if it exceeds [`MAX_TEXT_LEN`] bytes.
pub fn validate_text(text: &str) -> Result<(), CommandError> {
    if text.trim().is_empty() {
        return Err(CommandError::EmptyText);
    }
    if text.len() > MAX_TEXT_LEN {
        return Err(CommandError::TextTooLong { len: text.len() });
    }
    Ok(())
}
