//! Scoring and the results view
//!
//! This module turns the answers recorded by a session into a score, a
//! pass/fail verdict and a per-question review. Everything here is derived
//! from the static bank plus the answer record; no extra state is kept.

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::{
    game::AnswerRecord,
    quiz::{QuestionId, Quiz},
};

/// Why a session stopped accepting answers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
pub enum FinishReason {
    /// The last question was answered
    #[display("all questions answered")]
    Completed,
    /// The countdown reached zero
    #[display("time ran out")]
    TimedOut,
}

/// What the user did with a question
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum AnswerMark {
    /// The user picked this option
    Answered(String),
    /// The session ended before the user reached or answered the question
    Unanswered,
}

impl AnswerMark {
    /// Returns the picked option, if any
    pub fn as_answer(&self) -> Option<&str> {
        match self {
            Self::Answered(option) => Some(option),
            Self::Unanswered => None,
        }
    }
}

/// One row of the results view
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionReview {
    /// Identifier of the reviewed question
    pub id: QuestionId,
    /// Prompt of the reviewed question
    pub prompt: String,
    /// The user's answer or an explicit unanswered marker
    pub answer: AnswerMark,
    /// The option that would have scored
    pub correct_option: String,
    /// Whether the recorded answer scored
    pub correct: bool,
}

/// Counts recorded answers that match their question's correct option
///
/// Unanswered questions simply do not contribute.
pub fn score(quiz: &Quiz, answers: &AnswerRecord) -> usize {
    quiz.questions()
        .iter()
        .filter(|question| {
            answers
                .get(&question.id())
                .is_some_and(|answer| question.is_correct(answer))
        })
        .count()
}

/// Whether `score` reaches half of `count`
///
/// Equivalent to `score >= count / 2` in real arithmetic, so a tie passes
/// and with three questions two are needed.
pub fn passed(score: usize, count: usize) -> bool {
    2 * score >= count
}

/// The complete results of a finished session
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Why the session finished
    reason: FinishReason,
    /// Number of correct answers
    score: usize,
    /// Number of questions in the bank
    count: usize,
    /// Whether the score reaches the pass threshold
    passed: bool,
    /// Seconds left on the countdown when the session finished
    time_remaining: u64,
    /// One review per question, in bank order
    reviews: Vec<QuestionReview>,
}

impl Summary {
    /// Builds the results view for a bank and its recorded answers
    pub fn new(
        quiz: &Quiz,
        answers: &AnswerRecord,
        reason: FinishReason,
        time_remaining: u64,
    ) -> Self {
        let reviews = quiz
            .questions()
            .iter()
            .map(|question| {
                let answer = answers
                    .get(&question.id())
                    .map_or(AnswerMark::Unanswered, |a| AnswerMark::Answered(a.clone()));
                QuestionReview {
                    id: question.id(),
                    prompt: question.prompt().to_owned(),
                    correct: answer
                        .as_answer()
                        .is_some_and(|a| question.is_correct(a)),
                    answer,
                    correct_option: question.correct_option().to_owned(),
                }
            })
            .collect_vec();

        let score = reviews.iter().filter(|review| review.correct).count();
        let count = quiz.len();

        Self {
            reason,
            score,
            count,
            passed: passed(score, count),
            time_remaining,
            reviews,
        }
    }

    /// Returns why the session finished
    pub fn reason(&self) -> FinishReason {
        self.reason
    }

    /// Returns the number of correct answers
    pub fn score(&self) -> usize {
        self.score
    }

    /// Returns the number of questions
    pub fn count(&self) -> usize {
        self.count
    }

    /// Whether the session passed
    pub fn passed(&self) -> bool {
        self.passed
    }

    /// Returns the seconds left when the session finished
    pub fn time_remaining(&self) -> u64 {
        self.time_remaining
    }

    /// Returns the per-question review in bank order
    pub fn reviews(&self) -> &[QuestionReview] {
        &self.reviews
    }
}
