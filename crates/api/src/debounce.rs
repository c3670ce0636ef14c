//! Debounce combinator.
//!
//! Every push restarts the quiet period. Only the last value pushed within a
//! window is delivered.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Cancellable timer that forwards the last pushed value after `delay`.
///
/// Dropping the debouncer cancels a pending delivery.
#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    sink: mpsc::UnboundedSender<T>,
    pending: Option<JoinHandle<()>>,
}

impl<T: Send + 'static> Debouncer<T> {
    /// Creates a debouncer and the receiver its values are delivered to.
    #[must_use]
    pub fn new(delay: Duration) -> (Self, mpsc::UnboundedReceiver<T>) {
        let (sink, rx) = mpsc::unbounded_channel();
        let debouncer = Self {
            delay,
            sink,
            pending: None,
        };
        (debouncer, rx)
    }

    /// Schedules `value`, replacing any value still waiting.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn push(&mut self, value: T) {
        self.cancel();

        let sink = self.sink.clone();
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Receiver gone means nobody is listening any more.
            let _ = sink.send(value);
        }));
    }
}

impl<T> Debouncer<T> {
    /// Drops the waiting value, if any.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    /// Returns true if a value is waiting for its quiet period to end.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Quiet period.
    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(400);

    #[tokio::test(start_paused = true)]
    async fn test_only_last_value_within_window_survives() {
        let (mut debouncer, mut rx) = Debouncer::new(DELAY);

        debouncer.push("abc".to_string());
        tokio::time::sleep(Duration::from_millis(150)).await;
        debouncer.push("abcd".to_string());

        assert_eq!(rx.recv().await.as_deref(), Some("abcd"));

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_values_outside_window_all_delivered() {
        let (mut debouncer, mut rx) = Debouncer::new(DELAY);

        debouncer.push(1);
        tokio::time::sleep(Duration::from_millis(500)).await;
        debouncer.push(2);
        tokio::time::sleep(Duration::from_millis(500)).await;

        assert_eq!(rx.try_recv().ok(), Some(1));
        assert_eq!(rx.try_recv().ok(), Some(2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_value_not_delivered_before_delay() {
        let (mut debouncer, mut rx) = Debouncer::new(DELAY);

        debouncer.push("x");
        assert!(debouncer.is_pending());
        tokio::time::sleep(Duration::from_millis(399)).await;
        assert!(rx.try_recv().is_err());

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(rx.try_recv().ok(), Some("x"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_drops_pending_value() {
        let (mut debouncer, mut rx) = Debouncer::new(DELAY);

        debouncer.push("gone");
        debouncer.cancel();
        assert!(!debouncer.is_pending());

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(rx.try_recv().is_err());
        assert_eq!(debouncer.delay(), DELAY);
    }
}
