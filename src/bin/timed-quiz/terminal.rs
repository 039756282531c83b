//! Plain text renderer for a quiz session

use std::io::Write;

use itertools::Itertools;
use timed_quiz::{
    SyncMessage, UpdateMessage,
    quiz::Question,
    results::{AnswerMark, Summary},
    session::Tunnel,
};

/// Prints session messages to stdout
#[derive(Debug, Clone, Copy)]
pub struct Terminal {
    /// Print the results as JSON instead of text
    json: bool,
}

impl Terminal {
    pub fn new(json: bool) -> Self {
        Self { json }
    }

    fn print(lines: &[String]) {
        for line in lines {
            println!("{line}");
        }
    }
}

impl Tunnel for Terminal {
    fn send_message(&self, message: &UpdateMessage) {
        match message {
            UpdateMessage::Results(summary) if self.json => print_json(summary),
            _ => Self::print(&render_update(message)),
        }
    }

    fn send_state(&self, state: &SyncMessage) {
        match state {
            SyncMessage::Results(summary) if self.json => print_json(summary),
            _ => Self::print(&render_state(state)),
        }
    }

    fn close(self) {
        if let Err(error) = std::io::stdout().flush() {
            log::warn!("failed to flush output: {error}");
        }
    }
}

fn print_json(summary: &Summary) {
    match serde_json::to_string_pretty(summary) {
        Ok(json) => println!("{json}"),
        Err(error) => log::error!("failed to serialize results: {error}"),
    }
}

fn seconds(count: u64) -> String {
    pluralizer::pluralize("second", isize::try_from(count).unwrap_or(isize::MAX), true)
}

/// Countdown updates worth interrupting the user for
fn is_time_notable(remaining: u64) -> bool {
    remaining % 10 == 0 || remaining <= 5
}

fn render_question(index: usize, count: usize, prompt: &str, options: &[String]) -> Vec<String> {
    std::iter::once(String::new())
        .chain(std::iter::once(format!(
            "Question {}/{count}: {prompt}",
            index + 1
        )))
        .chain(
            options
                .iter()
                .enumerate()
                .map(|(i, option)| format!("  {}) {option}", i + 1)),
        )
        .collect_vec()
}

pub fn render_update(message: &UpdateMessage) -> Vec<String> {
    match message {
        UpdateMessage::QuestionAnnouncement {
            index,
            count,
            prompt,
            options,
        } => render_question(*index, *count, prompt, options),
        UpdateMessage::TimeRemaining(0) => Vec::new(),
        UpdateMessage::TimeRemaining(remaining) if is_time_notable(*remaining) => {
            vec![format!("[{} left]", seconds(*remaining))]
        }
        UpdateMessage::TimeRemaining(_) => Vec::new(),
        UpdateMessage::Rejected { reason } => vec![format!("Not accepted: {reason}")],
        UpdateMessage::Results(summary) => render_summary(summary),
    }
}

pub fn render_state(state: &SyncMessage) -> Vec<String> {
    match state {
        SyncMessage::Question {
            title,
            index,
            count,
            prompt,
            options,
            time_remaining,
            ..
        } => title
            .iter()
            .cloned()
            .chain(std::iter::once(format!("[{} left]", seconds(*time_remaining))))
            .chain(render_question(*index, *count, prompt, options))
            .collect_vec(),
        SyncMessage::Results(summary) => render_summary(summary),
    }
}

pub fn render_summary(summary: &Summary) -> Vec<String> {
    let mut lines = vec![String::new(), "Results".to_owned()];

    for review in summary.reviews() {
        let verdict = if review.correct { "correct" } else { "wrong" };
        lines.push(String::new());
        lines.push(review.prompt.clone());
        lines.push(match &review.answer {
            AnswerMark::Answered(answer) => format!("  Your answer: {answer} ({verdict})"),
            AnswerMark::Unanswered => "  Your answer: Not Answered".to_owned(),
        });
        lines.push(format!("  Correct: {}", review.correct_option));
    }

    lines.push(String::new());
    lines.push(format!("Score: {}/{}", summary.score(), summary.count()));
    lines.push(
        if summary.passed() {
            "You Passed!"
        } else {
            "You Failed!"
        }
        .to_owned(),
    );
    lines
}

/// Maps what the user typed to an option text
///
/// A number picks the option at that 1-based position; anything else is
/// taken as the option text itself.
pub fn resolve_choice(question: &Question, input: &str) -> String {
    let input = input.trim();

    input
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| question.options().get(i))
        .map_or_else(|| input.to_owned(), Clone::clone)
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use timed_quiz::{
        game::QuizSession,
        quiz::bank,
        results::FinishReason,
    };

    use super::*;

    #[test]
    fn test_resolve_choice_by_number() {
        let question = &bank::DEFAULT.questions()[1];
        assert_eq!(resolve_choice(question, "2"), "Framer Motion");
        assert_eq!(resolve_choice(question, " 3 \n"), "Anime.js");
    }

    #[test]
    fn test_resolve_choice_by_text() {
        let question = &bank::DEFAULT.questions()[1];
        assert_eq!(resolve_choice(question, "GSAP"), "GSAP");
    }

    #[test]
    fn test_resolve_choice_out_of_range() {
        let question = &bank::DEFAULT.questions()[1];
        assert_eq!(resolve_choice(question, "0"), "0");
        assert_eq!(resolve_choice(question, "4"), "4");
    }

    #[test]
    fn test_render_state_question() {
        let session = QuizSession::new(bank::DEFAULT.clone());
        let lines = render_state(&session.state_message());

        assert_eq!(lines[0], "Quiz Website");
        assert_eq!(lines[1], "[30 seconds left]");
        assert!(lines.contains(&"Question 1/3: What does HTML stand for?".to_owned()));
        assert!(lines.contains(&"  1) Hyper Text Markup Language".to_owned()));
    }

    #[test]
    fn test_render_countdown_is_sparse() {
        assert_eq!(
            render_update(&UpdateMessage::TimeRemaining(20)),
            vec!["[20 seconds left]"]
        );
        assert_eq!(
            render_update(&UpdateMessage::TimeRemaining(1)),
            vec!["[1 second left]"]
        );
        assert!(render_update(&UpdateMessage::TimeRemaining(17)).is_empty());
        assert!(render_update(&UpdateMessage::TimeRemaining(0)).is_empty());
    }

    #[test]
    fn test_render_summary() {
        let mut session = QuizSession::new(bank::DEFAULT.clone());
        session.submit_answer("Home Tool Markup Language").unwrap();
        for _ in 0..30 {
            session.tick();
        }
        let summary = session.summary().unwrap();
        assert_eq!(summary.reason(), FinishReason::TimedOut);

        let lines = render_summary(summary);
        assert!(lines.contains(&"  Your answer: Home Tool Markup Language (wrong)".to_owned()));
        assert!(lines.contains(&"  Your answer: Not Answered".to_owned()));
        assert!(lines.contains(&"  Correct: Framer Motion".to_owned()));
        assert!(lines.contains(&"Score: 0/3".to_owned()));
        assert_eq!(lines.last().map(String::as_str), Some("You Failed!"));
    }
}
