//! Question bank model
//!
//! This module contains the static input of a session: individual
//! questions, the validated bank that groups them and the compiled-in
//! default bank.

pub mod bank;
pub mod config;
pub mod question;

pub use config::{LoadError, Quiz};
pub use question::{Question, QuestionId};
