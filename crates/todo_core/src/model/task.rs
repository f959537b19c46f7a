//! Task value type.
//!
//! # Invariants
//! - Text is stored exactly as provided; trimming is only used for validation.
//! - Serialized form is a bare JSON string.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// User-facing warning text shown when an empty task is submitted.
pub const TASK_REQUIRED_MESSAGE: &str = "Add a task, please";

/// One free-form to-do entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Task {
    text: String,
}

impl Task {
    /// Creates a task from user input after checking it is not blank.
    ///
    /// The stored text is the untrimmed input.
    pub fn new(text: impl Into<String>) -> Result<Self, TaskValidationError> {
        let text = text.into();
        validate_task_text(&text)?;
        Ok(Self { text })
    }

    /// Creates a task without validation.
    ///
    /// Used for edit commits and snapshot loads, which accept any text.
    pub fn from_raw(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

impl Display for Task {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

impl From<Task> for String {
    fn from(value: Task) -> Self {
        value.text
    }
}

/// Validation failures for new task input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskValidationError {
    /// Text is empty or whitespace-only.
    EmptyText,
}

impl TaskValidationError {
    /// Stable machine-readable code for envelopes and logs.
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyText => "task_required",
        }
    }
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyText => f.write_str(TASK_REQUIRED_MESSAGE),
        }
    }
}

impl Error for TaskValidationError {}

/// Checks the add-task contract: text trimmed of surrounding whitespace must
/// be non-empty.
pub fn validate_task_text(text: &str) -> Result<(), TaskValidationError> {
    if text.trim().is_empty() {
        return Err(TaskValidationError::EmptyText);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{validate_task_text, Task, TaskValidationError, TASK_REQUIRED_MESSAGE};

    #[test]
    fn new_keeps_surrounding_whitespace() {
        let task = Task::new("  Buy milk ").expect("non-blank text should be accepted");
        assert_eq!(task.text(), "  Buy milk ");
    }

    #[test]
    fn blank_text_is_rejected() {
        for input in ["", "   ", "\t\n"] {
            assert_eq!(
                validate_task_text(input),
                Err(TaskValidationError::EmptyText),
                "input {input:?} should be rejected"
            );
        }
    }

    #[test]
    fn validation_error_renders_user_warning() {
        assert_eq!(
            TaskValidationError::EmptyText.to_string(),
            TASK_REQUIRED_MESSAGE
        );
        assert_eq!(TaskValidationError::EmptyText.code(), "task_required");
    }

    #[test]
    fn from_raw_accepts_empty_text() {
        assert_eq!(Task::from_raw("").text(), "");
    }
}
