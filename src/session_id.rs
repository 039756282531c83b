//! Session identifiers
//!
//! Ticks are scheduled ahead of time and may still be in flight after the
//! session that asked for them has finished or been replaced. Every
//! [`AlarmMessage`] therefore names its session, and a session only acts on
//! ticks carrying its own id.

use derive_more::{Display, FromStr};
use serde_with::{DeserializeFromStr, SerializeDisplay};
use uuid::Uuid;

use crate::AlarmMessage;

/// Identity of one run through a question bank
///
/// Two sessions over the same bank never share an id, so a tick left over
/// from an earlier run is recognised as stale by [`SessionId::owns`].
/// Serialized as the hyphenated UUID string.
#[derive(
    Debug,
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    Display,
    FromStr,
    DeserializeFromStr,
    SerializeDisplay,
)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Draws a fresh random id for a new session
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Whether `alarm` was scheduled by the session with this id
    pub fn owns(self, alarm: &AlarmMessage) -> bool {
        match alarm {
            AlarmMessage::Tick { session } => *session == self,
        }
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn test_new_ids_differ() {
        assert_ne!(SessionId::new(), SessionId::new());
    }

    #[test]
    fn test_display_parses_back() {
        let id = SessionId::new();
        assert_eq!(id.to_string().parse::<SessionId>().unwrap(), id);
    }

    #[test]
    fn test_from_str_rejects_garbage() {
        assert!("not-a-session".parse::<SessionId>().is_err());
    }

    #[test]
    fn test_serializes_as_string() {
        let id = SessionId::new();
        assert_eq!(
            serde_json::to_value(id).unwrap(),
            serde_json::Value::String(id.to_string())
        );
    }

    #[test]
    fn test_owns_only_its_own_ticks() {
        let id = SessionId::new();

        assert!(id.owns(&AlarmMessage::Tick { session: id }));
        assert!(!id.owns(&AlarmMessage::Tick {
            session: SessionId::new()
        }));
    }
}
