//! Question bank configuration
//!
//! This module defines [`Quiz`], the static and validated input of a
//! session: a title, the countdown for the whole session and the ordered
//! list of questions. Banks are either compiled in (see
//! [`super::bank`]) or loaded from JSON.

use std::path::Path;

use garde::Validate;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use web_time::Duration;

use super::question::Question;

type ValidationResult = garde::Result;

/// Validates that a duration falls within specified bounds.
///
/// # Errors
///
/// Returns a `garde::Error` if the duration is not a whole number of
/// seconds or is outside the inclusive range `[MIN_SECONDS, MAX_SECONDS]`.
fn validate_duration<const MIN_SECONDS: u64, const MAX_SECONDS: u64>(
    field: &'static str,
    val: &Duration,
) -> ValidationResult {
    if val.subsec_nanos() != 0 {
        Err(garde::Error::new(format!(
            "{field} must be a whole number of seconds"
        )))
    } else if (MIN_SECONDS..=MAX_SECONDS).contains(&val.as_secs()) {
        Ok(())
    } else {
        Err(garde::Error::new(format!(
            "{field} is outside of the bounds [{MIN_SECONDS},{MAX_SECONDS}]",
        )))
    }
}

/// Validates the countdown of a whole session
fn validate_time_limit(val: &Duration) -> ValidationResult {
    validate_duration::<
        { crate::constants::quiz::MIN_TIME_LIMIT },
        { crate::constants::quiz::MAX_TIME_LIMIT },
    >("time_limit", val)
}

/// Validates that every question id is used once
fn validate_unique_ids(questions: &[Question]) -> ValidationResult {
    match questions.iter().map(Question::id).duplicates().next() {
        Some(id) => Err(garde::Error::new(format!("question id {id} is not unique"))),
        None => Ok(()),
    }
}

fn default_time_limit() -> Duration {
    Duration::from_secs(crate::constants::quiz::DEFAULT_TIME_LIMIT)
}

/// Errors raised while loading a question bank
#[derive(Error, Debug)]
pub enum LoadError {
    /// The bank file could not be read
    #[error("failed to read question bank: {0}")]
    Io(#[from] std::io::Error),
    /// The bank is not well-formed JSON for a [`Quiz`]
    #[error("failed to parse question bank: {0}")]
    Json(#[from] serde_json::Error),
    /// The bank parsed but breaks one of the limits
    #[error("invalid question bank: {0}")]
    Invalid(#[from] garde::Report),
}

/// A complete question bank
///
/// The question order is the presentation order. A bank is never empty
/// once validated.
#[serde_with::serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Quiz {
    /// Heading shown while the quiz is running
    #[serde(default)]
    #[garde(length(max = crate::constants::quiz::MAX_TITLE_LENGTH))]
    title: String,

    /// Countdown for the whole session
    #[serde(default = "default_time_limit")]
    #[serde_as(as = "serde_with::DurationSeconds<u64>")]
    #[garde(custom(|v, _| validate_time_limit(v)))]
    time_limit: Duration,

    /// The questions in presentation order
    #[garde(
        length(min = 1, max = crate::constants::quiz::MAX_QUESTION_COUNT),
        dive,
        custom(|v: &Vec<Question>, _| validate_unique_ids(v))
    )]
    questions: Vec<Question>,
}

impl Quiz {
    /// Creates a bank without validating it
    pub fn new(title: impl Into<String>, time_limit: Duration, questions: Vec<Question>) -> Self {
        Self {
            title: title.into(),
            time_limit,
            questions,
        }
    }

    /// Parses and validates a bank from JSON text
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Json`] for malformed input and
    /// [`LoadError::Invalid`] when the bank breaks a limit.
    pub fn from_json_str(json: &str) -> Result<Self, LoadError> {
        let quiz: Self = serde_json::from_str(json)?;
        quiz.validate()?;
        Ok(quiz)
    }

    /// Reads, parses and validates a bank from a JSON file
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Io`] if the file cannot be read, otherwise the
    /// same errors as [`Quiz::from_json_str`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Returns this bank with a different countdown
    #[must_use]
    pub fn with_time_limit(self, time_limit: Duration) -> Self {
        Self { time_limit, ..self }
    }

    /// Returns the title
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the countdown for a whole session
    pub fn time_limit(&self) -> Duration {
        self.time_limit
    }

    /// Returns the questions in presentation order
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Returns the question at `index`, if any
    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    /// Returns the number of questions
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Checks if this bank has no questions
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}
