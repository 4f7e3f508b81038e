//! Search-input debounce
//!
//! Keystrokes restart a fixed-delay timer; only the timer's firing delivers
//! the text as the active search criterion. Cancellation is timer
//! invalidation, not computation interruption: nothing is in flight during
//! the delay.

use std::time::Duration;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;

/// Debounces search text onto an unbounded channel.
///
/// Must live on a tokio runtime; each `submit` aborts the pending timer (if
/// any) and arms a fresh one.
pub struct SearchDebouncer {
    delay: Duration,
    sender: UnboundedSender<String>,
    pending: Option<JoinHandle<()>>,
}

impl SearchDebouncer {
    /// Returns the debouncer and the receiving end that observes only the
    /// searches that survived the delay
    pub fn new(delay: Duration) -> (Self, UnboundedReceiver<String>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (
            Self {
                delay,
                sender,
                pending: None,
            },
            receiver,
        )
    }

    /// Register a keystroke's current text, cancelling any pending timer
    pub fn submit(&mut self, text: impl Into<String>) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }

        let text = text.into();
        let delay = self.delay;
        let sender = self.sender.clone();
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Receiver dropped means the view is gone; nothing to do
            let _ = sender.send(text);
        }));
    }

    /// Cancel the pending timer without delivering anything
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

impl Drop for SearchDebouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_only_last_keystroke_survives() {
        let (mut debouncer, mut receiver) = SearchDebouncer::new(Duration::from_millis(20));

        debouncer.submit("h");
        debouncer.submit("he");
        debouncer.submit("hero");

        let delivered = receiver.recv().await;
        assert_eq!(delivered.as_deref(), Some("hero"));

        // Nothing else arrives
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(receiver.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_spaced_keystrokes_each_delivered() {
        let (mut debouncer, mut receiver) = SearchDebouncer::new(Duration::from_millis(10));

        debouncer.submit("first");
        tokio::time::sleep(Duration::from_millis(40)).await;
        debouncer.submit("second");

        assert_eq!(receiver.recv().await.as_deref(), Some("first"));
        assert_eq!(receiver.recv().await.as_deref(), Some("second"));
    }

    #[tokio::test]
    async fn test_cancel_suppresses_delivery() {
        let (mut debouncer, mut receiver) = SearchDebouncer::new(Duration::from_millis(10));

        debouncer.submit("doomed");
        debouncer.cancel();

        tokio::time::sleep(Duration::from_millis(40)).await;
        assert!(receiver.try_recv().is_err());
    }
}
