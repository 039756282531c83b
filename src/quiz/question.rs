//! A single multiple choice question
//!
//! Questions are immutable once built. A question owns its prompt, the
//! ordered options shown to the user and the one option that counts as
//! correct.

use garde::Validate;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

type ValidationResult = garde::Result;

/// Stable identifier of a question inside a bank
pub type QuestionId = u32;

/// Checks that no option text appears twice
fn validate_distinct_options(options: &[String]) -> ValidationResult {
    match options.iter().duplicates().next() {
        Some(duplicate) => Err(garde::Error::new(format!(
            "option {duplicate:?} appears more than once"
        ))),
        None => Ok(()),
    }
}

/// Checks that the correct option is one of the declared options
fn validate_correct_option(
    options: &[String],
) -> impl FnOnce(&String, &()) -> ValidationResult + '_ {
    move |correct_option, _| {
        if options.contains(correct_option) {
            Ok(())
        } else {
            Err(garde::Error::new(format!(
                "{correct_option:?} is not one of the options"
            )))
        }
    }
}

/// One question of a quiz
///
/// Deserialization also accepts `question` for the prompt and `answer`
/// for the correct option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Question {
    /// Unique positive identifier, also used as the ordering key
    #[garde(range(min = 1))]
    id: QuestionId,
    /// Text asked to the user
    #[serde(alias = "question")]
    #[garde(length(min = 1, max = crate::constants::question::MAX_PROMPT_LENGTH))]
    prompt: String,
    /// Choices in display order
    #[garde(
        length(
            min = crate::constants::question::MIN_OPTION_COUNT,
            max = crate::constants::question::MAX_OPTION_COUNT
        ),
        inner(length(min = 1, max = crate::constants::question::MAX_OPTION_LENGTH)),
        custom(|v: &Vec<String>, _| validate_distinct_options(v))
    )]
    options: Vec<String>,
    /// The option that scores a point
    #[serde(alias = "answer")]
    #[garde(custom(validate_correct_option(&self.options)))]
    correct_option: String,
}

impl Question {
    /// Creates a question without validating it
    ///
    /// Call [`Validate::validate`] (or load it through a [`crate::quiz::Quiz`])
    /// before handing it to a session.
    pub fn new(
        id: QuestionId,
        prompt: impl Into<String>,
        options: impl IntoIterator<Item = impl Into<String>>,
        correct_option: impl Into<String>,
    ) -> Self {
        Self {
            id,
            prompt: prompt.into(),
            options: options.into_iter().map(Into::into).collect_vec(),
            correct_option: correct_option.into(),
        }
    }

    /// Returns the identifier of this question
    pub fn id(&self) -> QuestionId {
        self.id
    }

    /// Returns the prompt text
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Returns the options in display order
    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Returns the correct option
    pub fn correct_option(&self) -> &str {
        &self.correct_option
    }

    /// Whether `option` is one of the declared options
    pub fn has_option(&self, option: &str) -> bool {
        self.options.iter().any(|o| o == option)
    }

    /// Whether `option` matches the correct option exactly
    ///
    /// Matching is case sensitive and performs no normalization.
    pub fn is_correct(&self, option: &str) -> bool {
        self.correct_option == option
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    fn create_test_question() -> Question {
        Question::new(
            1,
            "What does HTML stand for?",
            [
                "Hyper Text Markup Language",
                "Home Tool Markup Language",
                "Hyperlinks and Text Markup Language",
            ],
            "Hyper Text Markup Language",
        )
    }

    #[test]
    fn test_question_validation() {
        assert!(create_test_question().validate().is_ok());
    }

    #[test]
    fn test_question_zero_id() {
        let mut question = create_test_question();
        question.id = 0;
        assert!(question.validate().is_err());
    }

    #[test]
    fn test_question_empty_prompt() {
        let mut question = create_test_question();
        question.prompt = String::new();
        assert!(question.validate().is_err());
    }

    #[test]
    fn test_question_prompt_too_long() {
        let mut question = create_test_question();
        question.prompt = "a".repeat(crate::constants::question::MAX_PROMPT_LENGTH + 1);
        assert!(question.validate().is_err());
    }

    #[test]
    fn test_question_too_few_options() {
        let question = Question::new(1, "Pick", ["Only"], "Only");
        assert!(question.validate().is_err());
    }

    #[test]
    fn test_question_too_many_options() {
        let options = (0..=crate::constants::question::MAX_OPTION_COUNT)
            .map(|i| format!("Option {i}"))
            .collect_vec();
        let question = Question::new(1, "Pick", options, "Option 0");
        assert!(question.validate().is_err());
    }

    #[test]
    fn test_question_duplicate_options() {
        let question = Question::new(1, "Pick", ["Same", "Same", "Other"], "Other");
        assert!(question.validate().is_err());
    }

    #[test]
    fn test_question_empty_option() {
        let question = Question::new(1, "Pick", ["", "Other"], "Other");
        assert!(question.validate().is_err());
    }

    #[test]
    fn test_question_correct_option_missing() {
        let question = Question::new(1, "Pick", ["A", "B"], "C");
        assert!(question.validate().is_err());
    }

    #[test]
    fn test_is_correct_is_exact() {
        let question = create_test_question();
        assert!(question.is_correct("Hyper Text Markup Language"));
        assert!(!question.is_correct("hyper text markup language"));
        assert!(!question.is_correct("Hyper Text Markup Language "));
    }

    #[test]
    fn test_has_option() {
        let question = create_test_question();
        assert!(question.has_option("Home Tool Markup Language"));
        assert!(!question.has_option("Hypertext Preprocessor"));
    }

    #[test]
    fn test_deserialize_with_aliases() {
        let question: Question = serde_json::from_str(
            r#"{
                "id": 2,
                "question": "Which library is used for animations in React?",
                "options": ["GSAP", "Framer Motion", "Anime.js"],
                "answer": "Framer Motion"
            }"#,
        )
        .unwrap();

        assert_eq!(question.id(), 2);
        assert_eq!(
            question.prompt(),
            "Which library is used for animations in React?"
        );
        assert_eq!(question.correct_option(), "Framer Motion");
        assert!(question.validate().is_ok());
    }
}
