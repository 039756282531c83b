//! Cancellable alarms for the countdown
//!
//! [`Alarms`] is the scheduler handed to [`crate::game::QuizSession`] as its
//! `schedule_message` callback. Every scheduled alarm is a tokio task that
//! sleeps and then forwards the message over a channel. The tasks live in a
//! [`JoinSet`], so cancelling or dropping the scheduler aborts every alarm
//! that has not fired yet.

use tokio::{sync::mpsc, task::JoinSet};
use web_time::Duration;

use crate::AlarmMessage;

/// Owner of all pending alarms of a session
///
/// Must be created inside a tokio runtime.
#[derive(Debug)]
pub struct Alarms {
    tasks: JoinSet<()>,
    sender: mpsc::UnboundedSender<AlarmMessage>,
}

impl Alarms {
    /// Creates a scheduler and the receiver its alarms are delivered to
    pub fn new() -> (Self, mpsc::UnboundedReceiver<AlarmMessage>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (
            Self {
                tasks: JoinSet::new(),
                sender,
            },
            receiver,
        )
    }

    /// Delivers `message` after `delay`
    pub fn schedule(&mut self, message: AlarmMessage, delay: Duration) {
        while self.tasks.try_join_next().is_some() {}

        let sender = self.sender.clone();
        self.tasks.spawn(async move {
            tokio::time::sleep(delay).await;
            // the receiver is gone once the driver has shut down
            let _ = sender.send(message);
        });
    }

    /// Returns the number of alarms that have not been reaped yet
    pub fn pending(&self) -> usize {
        self.tasks.len()
    }

    /// Aborts every alarm that has not fired yet
    pub fn cancel_all(&mut self) {
        if !self.tasks.is_empty() {
            log::debug!("cancelling {} pending alarms", self.tasks.len());
        }
        self.tasks.abort_all();
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::session_id::SessionId;

    fn tick() -> AlarmMessage {
        AlarmMessage::Tick {
            session: SessionId::new(),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_alarm_fires_after_delay() {
        let (mut alarms, mut receiver) = Alarms::new();
        let message = tick();
        let start = tokio::time::Instant::now();

        alarms.schedule(message.clone(), Duration::from_secs(1));

        assert_eq!(receiver.recv().await, Some(message));
        assert!(start.elapsed() >= Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_alarms_fire_in_order() {
        let (mut alarms, mut receiver) = Alarms::new();
        let first = tick();
        let second = tick();

        alarms.schedule(second.clone(), Duration::from_secs(2));
        alarms.schedule(first.clone(), Duration::from_secs(1));

        assert_eq!(receiver.recv().await, Some(first));
        assert_eq!(receiver.recv().await, Some(second));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_all_drops_pending() {
        let (mut alarms, mut receiver) = Alarms::new();

        alarms.schedule(tick(), Duration::from_secs(1));
        alarms.cancel_all();

        let waited = tokio::time::timeout(Duration::from_secs(5), receiver.recv()).await;
        assert!(waited.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_releases_everything() {
        let (mut alarms, mut receiver) = Alarms::new();

        alarms.schedule(tick(), Duration::from_secs(1));
        alarms.schedule(tick(), Duration::from_secs(2));
        drop(alarms);

        assert_eq!(receiver.recv().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fired_alarms_are_reaped() {
        let (mut alarms, mut receiver) = Alarms::new();

        alarms.schedule(tick(), Duration::from_secs(1));
        receiver.recv().await;
        tokio::task::yield_now().await;

        alarms.schedule(tick(), Duration::from_secs(1));
        assert_eq!(alarms.pending(), 1);
    }
}
