//! Core quiz session logic and state management
//!
//! This module contains the state machine that drives a single quiz
//! session: it walks forward through a static bank one question at a
//! time, records the option picked for each question and counts a global
//! countdown down to zero. A session finishes either when the last
//! question is answered or when the countdown runs out, and nothing leaves
//! the finished state.
//!
//! [`SessionState`] holds the mutable core and can be driven on its own.
//! [`QuizSession`] wraps it with the bank, an identifier, the rendering
//! sink and the scheduling of the one second tick.

use std::collections::BTreeMap;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use thiserror::Error;
use web_time::Duration;

use crate::{
    quiz::{Question, QuestionId, Quiz},
    results::{self, FinishReason, Summary},
    session::Tunnel,
    session_id::SessionId,
};

/// Recorded answers keyed by question id
pub type AnswerRecord = BTreeMap<QuestionId, String>;

/// The phase of a session
///
/// A session starts `InProgress` and moves to `Finished` exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum State {
    /// Accepting answers and counting down
    InProgress,
    /// Terminal state, carrying why the session stopped
    Finished(FinishReason),
}

/// Errors returned when an answer is not accepted
///
/// A rejected submission never changes the session.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The submitted text is not one of the current question's options
    #[error("{option:?} is not one of the current options")]
    InvalidOption {
        /// The rejected text
        option: String,
    },
    /// The session no longer accepts answers
    #[error("the quiz has already finished")]
    Finished,
}

/// The observable effect of feeding one event into a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The event arrived after the session finished and changed nothing
    Ignored,
    /// The countdown moved on; carries the seconds left
    Ticked(u64),
    /// An answer was recorded and the session moved to this question index
    Advanced(usize),
    /// The session entered its terminal state
    Finished(FinishReason),
}

/// The mutable core of a session
///
/// Invariants kept by the transition methods:
/// - `current_index` never decreases and stays below the question count
/// - `answers` only grows, with at most one entry per question up to
///   `current_index`
/// - `time_remaining` never goes below zero
/// - once finished, nothing changes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    /// Index of the question currently shown
    current_index: usize,
    /// Options picked so far
    answers: AnswerRecord,
    /// Seconds left on the countdown
    time_remaining: u64,
    /// Current phase
    state: State,
}

impl SessionState {
    /// Creates the initial state for a bank
    ///
    /// The countdown starts from the bank's time limit, rounded up to whole
    /// seconds. A bank without questions has nothing to ask and starts
    /// finished.
    pub fn new(quiz: &Quiz) -> Self {
        let time_limit = quiz.time_limit();

        Self {
            current_index: 0,
            answers: AnswerRecord::new(),
            time_remaining: time_limit.as_secs() + u64::from(time_limit.subsec_nanos() > 0),
            state: if quiz.is_empty() {
                State::Finished(FinishReason::Completed)
            } else {
                State::InProgress
            },
        }
    }

    /// Returns the index of the question currently shown
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Returns the answers recorded so far
    pub fn answers(&self) -> &AnswerRecord {
        &self.answers
    }

    /// Returns the seconds left on the countdown
    pub fn time_remaining(&self) -> u64 {
        self.time_remaining
    }

    /// Returns the current phase
    pub fn state(&self) -> State {
        self.state
    }

    /// Whether the session reached its terminal state
    pub fn is_finished(&self) -> bool {
        matches!(self.state, State::Finished(_))
    }

    /// Returns the question to display, or `None` once finished
    pub fn current_question<'a>(&self, quiz: &'a Quiz) -> Option<&'a Question> {
        match self.state {
            State::InProgress => quiz.get(self.current_index),
            State::Finished(_) => None,
        }
    }

    /// Attempts to transition from one phase to another
    ///
    /// # Returns
    ///
    /// `true` if the transition was successful, `false` if the current phase
    /// didn't match `before`
    fn change_state(&mut self, before: State, after: State) -> bool {
        if self.state == before {
            self.state = after;

            true
        } else {
            false
        }
    }

    /// Applies one elapsed second
    ///
    /// Decrements the countdown and finishes the session when it reaches
    /// zero. Does nothing once finished.
    pub fn tick(&mut self) -> Transition {
        if self.is_finished() {
            return Transition::Ignored;
        }

        self.time_remaining = self.time_remaining.saturating_sub(1);

        if self.time_remaining == 0
            && self.change_state(
                State::InProgress,
                State::Finished(FinishReason::TimedOut),
            )
        {
            Transition::Finished(FinishReason::TimedOut)
        } else {
            Transition::Ticked(self.time_remaining)
        }
    }

    /// Records `option` for the current question and moves forward
    ///
    /// Answering the last question finishes the session.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Finished`] once the session is over and
    /// [`Error::InvalidOption`] if `option` is not one of the current
    /// question's options. Neither case changes the state.
    pub fn submit_answer(&mut self, quiz: &Quiz, option: &str) -> Result<Transition, Error> {
        let question = self.current_question(quiz).ok_or(Error::Finished)?;

        if !question.has_option(option) {
            return Err(Error::InvalidOption {
                option: option.to_owned(),
            });
        }

        self.answers.insert(question.id(), option.to_owned());

        if self.current_index + 1 >= quiz.len() {
            self.change_state(
                State::InProgress,
                State::Finished(FinishReason::Completed),
            );
            Ok(Transition::Finished(FinishReason::Completed))
        } else {
            self.current_index += 1;
            Ok(Transition::Advanced(self.current_index))
        }
    }

    /// Returns the state one second later, leaving `self` untouched
    #[must_use]
    pub fn after_tick(&self) -> Self {
        let mut next = self.clone();
        next.tick();
        next
    }

    /// Returns the state after answering with `option`, leaving `self` untouched
    ///
    /// # Errors
    ///
    /// Same as [`SessionState::submit_answer`].
    pub fn after_answer(&self, quiz: &Quiz, option: &str) -> Result<Self, Error> {
        let mut next = self.clone();
        next.submit_answer(quiz, option)?;
        Ok(next)
    }
}

/// Update messages sent to the renderer as the session changes
#[derive(Debug, Serialize, Clone)]
pub enum UpdateMessage {
    /// A new question is shown
    QuestionAnnouncement {
        /// Index of the question (0-based)
        index: usize,
        /// Total number of questions
        count: usize,
        /// The question text
        prompt: String,
        /// The options in display order
        options: Vec<String>,
    },
    /// The countdown moved on
    TimeRemaining(u64),
    /// A submission was not accepted
    Rejected {
        /// Human readable reason
        reason: String,
    },
    /// The session finished
    Results(Summary),
}

/// Full view of a session, used for an initial render or a redraw
#[skip_serializing_none]
#[derive(Debug, Serialize, Clone)]
pub enum SyncMessage {
    /// The session is running
    Question {
        /// Title of the bank
        title: Option<String>,
        /// Index of the current question (0-based)
        index: usize,
        /// Total number of questions
        count: usize,
        /// The question text
        prompt: String,
        /// The options in display order
        options: Vec<String>,
        /// Seconds left on the countdown
        time_remaining: u64,
        /// Number of questions already answered
        answered_count: usize,
    },
    /// The session finished
    Results(Summary),
}

/// Alarm messages for timed events
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlarmMessage {
    /// One second of the countdown has elapsed
    Tick {
        /// Session the tick was scheduled for
        session: SessionId,
    },
}

/// A quiz session bound to its bank
///
/// The session never schedules its own timer. Instead [`QuizSession::play`]
/// and [`QuizSession::receive_alarm`] hand the next tick to a
/// `schedule_message` callback, and stop doing so once finished.
#[derive(Debug)]
pub struct QuizSession {
    /// Identifier carried by the alarms of this session
    id: SessionId,
    /// The static bank
    quiz: Quiz,
    /// The mutable core
    state: SessionState,
    /// Results view (computed once the session finishes)
    summary: once_cell_serde::sync::OnceCell<Summary>,
}

impl QuizSession {
    /// Creates a session at the first question with a full countdown
    pub fn new(quiz: Quiz) -> Self {
        let state = SessionState::new(&quiz);
        let id = SessionId::new();

        debug!(
            "session {id} created with {} questions and {}s",
            quiz.len(),
            state.time_remaining()
        );

        Self {
            id,
            quiz,
            state,
            summary: once_cell_serde::sync::OnceCell::new(),
        }
    }

    /// Returns the identifier of this session
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Returns the bank this session runs over
    pub fn quiz(&self) -> &Quiz {
        &self.quiz
    }

    /// Returns the mutable core
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Whether the session reached its terminal state
    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    /// Returns the question to display, or `None` once finished
    pub fn current_question(&self) -> Option<&Question> {
        self.state.current_question(&self.quiz)
    }

    /// Starts the session
    ///
    /// Sends the full view to the renderer and schedules the first tick.
    ///
    /// # Arguments
    ///
    /// * `tunnel` - Rendering sink
    /// * `schedule_message` - Function to schedule delayed alarms
    pub fn play<T: Tunnel, S: FnMut(AlarmMessage, Duration)>(
        &self,
        tunnel: &T,
        mut schedule_message: S,
    ) {
        tunnel.send_state(&self.state_message());

        if !self.is_finished() {
            self.schedule_tick(&mut schedule_message);
        }
    }

    fn schedule_tick<S: FnMut(AlarmMessage, Duration)>(&self, schedule_message: &mut S) {
        schedule_message(
            AlarmMessage::Tick { session: self.id },
            Duration::from_secs(crate::constants::timer::TICK_PERIOD),
        );
    }

    /// Applies one elapsed second to the countdown
    pub fn tick(&mut self) -> Transition {
        let transition = self.state.tick();

        match transition {
            Transition::Ticked(remaining) => debug!("session {}: {remaining}s left", self.id),
            Transition::Finished(reason) => self.log_finish(reason),
            Transition::Ignored | Transition::Advanced(_) => (),
        }

        transition
    }

    /// Records an answer for the current question
    ///
    /// # Errors
    ///
    /// See [`SessionState::submit_answer`].
    pub fn submit_answer(&mut self, option: &str) -> Result<Transition, Error> {
        let transition = self
            .state
            .submit_answer(&self.quiz, option)
            .inspect_err(|error| warn!("session {}: rejected answer: {error}", self.id))?;

        match transition {
            Transition::Advanced(index) => {
                debug!("session {}: answered, moving to question {index}", self.id);
            }
            Transition::Finished(reason) => self.log_finish(reason),
            Transition::Ignored | Transition::Ticked(_) => (),
        }

        Ok(transition)
    }

    /// Records an answer and reports the outcome to the renderer
    ///
    /// On success the next question or the results are announced. On
    /// failure a [`UpdateMessage::Rejected`] is sent.
    ///
    /// # Errors
    ///
    /// See [`SessionState::submit_answer`].
    pub fn submit<T: Tunnel>(&mut self, tunnel: &T, option: &str) -> Result<Transition, Error> {
        match self.submit_answer(option) {
            Ok(transition) => {
                self.announce(tunnel, transition);
                Ok(transition)
            }
            Err(error) => {
                tunnel.send_message(
                    &UpdateMessage::Rejected {
                        reason: error.to_string(),
                    },
                );
                Err(error)
            }
        }
    }

    /// Handles a scheduled alarm
    ///
    /// A tick for this session advances the countdown, reports it and
    /// schedules the next tick while the session is still running. Alarms
    /// addressed to another session are ignored.
    ///
    /// # Arguments
    ///
    /// * `tunnel` - Rendering sink
    /// * `schedule_message` - Function to schedule delayed alarms
    /// * `message` - The alarm that fired
    pub fn receive_alarm<T: Tunnel, S: FnMut(AlarmMessage, Duration)>(
        &mut self,
        tunnel: &T,
        mut schedule_message: S,
        message: &AlarmMessage,
    ) -> Transition {
        if !self.id.owns(message) {
            warn!("session {}: ignoring stale alarm {message:?}", self.id);
            return Transition::Ignored;
        }

        let transition = self.tick();
        self.announce(tunnel, transition);

        if let Transition::Ticked(_) = transition {
            self.schedule_tick(&mut schedule_message);
        }

        transition
    }

    fn announce<T: Tunnel>(&self, tunnel: &T, transition: Transition) {
        match transition {
            Transition::Ignored => (),
            Transition::Ticked(remaining) => {
                tunnel.send_message(&UpdateMessage::TimeRemaining(remaining));
            }
            Transition::Advanced(index) => {
                if let Some(question) = self.quiz.get(index) {
                    tunnel.send_message(
                        &UpdateMessage::QuestionAnnouncement {
                            index,
                            count: self.quiz.len(),
                            prompt: question.prompt().to_owned(),
                            options: question.options().to_vec(),
                        },
                    );
                }
            }
            Transition::Finished(_) => {
                if let Some(summary) = self.summary() {
                    tunnel.send_message(&UpdateMessage::Results(summary.clone()));
                }
            }
        }
    }

    fn log_finish(&self, reason: FinishReason) {
        info!(
            "session {} finished ({reason}) with score {}/{}",
            self.id,
            self.score(),
            self.quiz.len()
        );
    }

    /// Counts recorded answers matching their question's correct option
    pub fn score(&self) -> usize {
        results::score(&self.quiz, self.state.answers())
    }

    /// Whether the current score reaches half of the question count
    pub fn passed(&self) -> bool {
        results::passed(self.score(), self.quiz.len())
    }

    /// Returns the results view once the session has finished
    pub fn summary(&self) -> Option<&Summary> {
        match self.state.state() {
            State::InProgress => None,
            State::Finished(reason) => Some(self.summary.get_or_init(|| {
                Summary::new(
                    &self.quiz,
                    self.state.answers(),
                    reason,
                    self.state.time_remaining(),
                )
            })),
        }
    }

    /// Projects the session into a full view for the renderer
    ///
    /// # Panics
    ///
    /// Panics if a running session has no current question, which the
    /// transitions of [`SessionState`] rule out.
    pub fn state_message(&self) -> SyncMessage {
        match (self.summary(), self.current_question()) {
            (Some(summary), _) => SyncMessage::Results(summary.clone()),
            (None, Some(question)) => SyncMessage::Question {
                title: Some(self.quiz.title().to_owned()).filter(|title| !title.is_empty()),
                index: self.state.current_index(),
                count: self.quiz.len(),
                prompt: question.prompt().to_owned(),
                options: question.options().to_vec(),
                time_remaining: self.state.time_remaining(),
                answered_count: self.state.answers().len(),
            },
            (None, None) => unreachable!("a running session always has a current question"),
        }
    }
}
