//! Compiled-in question bank
//!
//! Used whenever no bank file is supplied.

use once_cell_serde::sync::Lazy;
use web_time::Duration;

use super::{Question, Quiz};

/// The default web development quiz with a 30 second countdown
pub static DEFAULT: Lazy<Quiz> = Lazy::new(|| {
    Quiz::new(
        "Quiz Website",
        Duration::from_secs(crate::constants::quiz::DEFAULT_TIME_LIMIT),
        vec![
            Question::new(
                1,
                "What does HTML stand for?",
                [
                    "Hyper Text Markup Language",
                    "Home Tool Markup Language",
                    "Hyperlinks and Text Markup Language",
                ],
                "Hyper Text Markup Language",
            ),
            Question::new(
                2,
                "Which library is used for animations in React?",
                ["GSAP", "Framer Motion", "Anime.js"],
                "Framer Motion",
            ),
            Question::new(
                3,
                "Tailwind CSS is a?",
                ["CSS Framework", "Utility-first CSS framework", "CSS Library"],
                "Utility-first CSS framework",
            ),
        ],
    )
});

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use garde::Validate;

    use super::*;

    #[test]
    fn test_default_bank_is_valid() {
        assert!(DEFAULT.validate().is_ok());
    }

    #[test]
    fn test_default_bank_shape() {
        assert_eq!(DEFAULT.title(), "Quiz Website");
        assert_eq!(DEFAULT.time_limit(), Duration::from_secs(30));
        assert_eq!(DEFAULT.len(), 3);
        assert_eq!(
            DEFAULT.questions().iter().map(Question::id).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
    }
}
