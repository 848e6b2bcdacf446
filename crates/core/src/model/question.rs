use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QuestionError {
    #[error("Question text must not be empty.")]
    Empty,
}

/// A single question: trimmed, never empty.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Question(String);

impl Question {
    /// Parse a single line of question text.
    ///
    /// Surrounding whitespace is removed; whitespace-only input is rejected.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::Empty` when the input contains no visible text.
    pub fn parse(s: impl AsRef<str>) -> Result<Self, QuestionError> {
        let trimmed = s.as_ref().trim();
        if trimmed.is_empty() {
            return Err(QuestionError::Empty);
        }
        Ok(Self(trimmed.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
