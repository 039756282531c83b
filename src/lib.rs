//! # Timed Quiz Library
//!
//! This library provides the core logic of a single-player, timed,
//! multiple choice quiz. A session presents a fixed bank of questions one
//! at a time, records the option picked for each, counts a global
//! countdown down to zero and, once the last question is answered or time
//! runs out, exposes a scored results view.
//!
//! The state machine lives in [`game`], the bank model in [`quiz`], the
//! scoring in [`results`] and the cancellable countdown in [`timer`].

#![cfg_attr(all(coverage_nightly, test), feature(coverage_attribute))]
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::doc_markdown)]

pub mod constants;

pub mod game;
pub mod quiz;
pub mod results;
pub mod session;
pub mod session_id;
pub mod timer;

pub use game::{AlarmMessage, SyncMessage, UpdateMessage};

impl SyncMessage {
    /// Converts the sync message to a JSON string for transmission
    ///
    /// # Panics
    ///
    /// This method panics if serialization fails, which should never happen
    /// with the default JSON serializer for well-formed data.
    pub fn to_message(&self) -> String {
        serde_json::to_string(self).expect("default serializer cannot fail")
    }
}

impl UpdateMessage {
    /// Converts the update message to a JSON string for transmission
    ///
    /// # Panics
    ///
    /// This method panics if serialization fails, which should never happen
    /// with the default JSON serializer for well-formed data.
    pub fn to_message(&self) -> String {
        serde_json::to_string(self).expect("default serializer cannot fail")
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::{game::QuizSession, quiz::bank};

    #[test]
    fn test_sync_message_to_message() {
        let session = QuizSession::new(bank::DEFAULT.clone());
        let json_str = session.state_message().to_message();

        assert!(json_str.contains("Question"));
        assert!(json_str.contains("What does HTML stand for?"));
        assert!(json_str.contains("Quiz Website"));
    }

    #[test]
    fn test_update_message_to_message() {
        let update_msg = UpdateMessage::TimeRemaining(12);
        let json_str = update_msg.to_message();

        assert_eq!(json_str, r#"{"TimeRemaining":12}"#);
    }

    #[test]
    fn test_rejected_message_to_message() {
        let update_msg = UpdateMessage::Rejected {
            reason: "nope".to_owned(),
        };

        assert_eq!(update_msg.to_message(), r#"{"Rejected":{"reason":"nope"}}"#);
    }
}
