//! Rendering sink
//!
//! This module defines the trait through which a session reports its view
//! to whatever draws it. The session only produces messages; a terminal,
//! a test recorder or a GUI decides how to show them.

use super::{SyncMessage, UpdateMessage};

/// Trait for sending messages to the renderer of a session
pub trait Tunnel {
    /// Sends an incremental update
    ///
    /// Update messages report a single change: a new question, a tick of
    /// the countdown, a rejected answer or the final results.
    ///
    /// # Arguments
    ///
    /// * `message` - The update message to send
    fn send_message(&self, message: &UpdateMessage);

    /// Sends the full view of the session
    ///
    /// Used for the first render and whenever the renderer needs to redraw
    /// from scratch.
    ///
    /// # Arguments
    ///
    /// * `state` - The synchronization message to send
    fn send_state(&self, state: &SyncMessage);

    /// Closes the tunnel once the session is torn down
    fn close(self);
}
