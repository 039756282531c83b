//! Configuration constants for the quiz
//!
//! This module contains the limits and defaults used to validate a
//! question bank and to drive the countdown of a session.

/// Question bank configuration constants
pub mod quiz {
    /// Maximum number of questions allowed in a single bank
    pub const MAX_QUESTION_COUNT: usize = 100;
    /// Maximum length of a quiz title in characters
    pub const MAX_TITLE_LENGTH: usize = 200;
    /// Countdown in seconds used when a bank does not specify one
    pub const DEFAULT_TIME_LIMIT: u64 = 30;
    /// Minimum countdown in seconds for a whole session
    pub const MIN_TIME_LIMIT: u64 = 1;
    /// Maximum countdown in seconds for a whole session
    pub const MAX_TIME_LIMIT: u64 = 3600;
}

/// Single question configuration constants
pub mod question {
    /// Maximum length of a question prompt
    pub const MAX_PROMPT_LENGTH: usize = 200;
    /// Minimum number of options a question must offer
    pub const MIN_OPTION_COUNT: usize = 2;
    /// Maximum number of options a question may offer
    pub const MAX_OPTION_COUNT: usize = 8;
    /// Maximum length of a single option
    pub const MAX_OPTION_LENGTH: usize = 200;
}

/// Countdown timer constants
pub mod timer {
    /// Seconds between two ticks of the countdown
    pub const TICK_PERIOD: u64 = 1;
}
