//! # Filter Debounce Pipeline
//!
//! Turns a burst of filter edits into at most one settled intent per quiet
//! period. Each edit cancels the pending timer and starts a new one; when a
//! timer survives the full quiet period its intent is forwarded through a
//! channel. Intents equal to the last emitted one are swallowed.

use crate::app::models::FilterIntent;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Quiet period a filter edit must survive before it settles
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(500);

/// Debounces filter edits; one pending timer per instance
pub struct FilterDebouncer {
    quiet_period: Duration,
    /// Timer of the most recent edit, if it has not fired yet
    pending: Option<JoinHandle<()>>,
    sender: mpsc::UnboundedSender<FilterIntent>,
    receiver: mpsc::UnboundedReceiver<FilterIntent>,
    last_emitted: Option<FilterIntent>,
}

impl FilterDebouncer {
    pub fn new(quiet_period: Duration) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self {
            quiet_period,
            pending: None,
            sender,
            receiver,
            last_emitted: None,
        }
    }

    pub fn quiet_period(&self) -> Duration {
        self.quiet_period
    }

    /// Schedule `intent` to settle after the quiet period
    ///
    /// Must be called from within a tokio runtime.
    pub fn on_filter_changed(&mut self, intent: FilterIntent) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }

        tracing::debug!("Filter changed to {:?}, waiting {:?}", intent, self.quiet_period);

        let sender = self.sender.clone();
        let quiet_period = self.quiet_period;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(quiet_period).await;
            // Receiver lives as long as the debouncer; a send error means it is gone
            let _ = sender.send(intent);
        }));
    }

    /// Whether an edit is still waiting for its quiet period
    pub fn has_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Last intent that made it through the pipeline
    pub fn last_emitted(&self) -> Option<FilterIntent> {
        self.last_emitted
    }

    /// Next settled intent that has already fired, without waiting
    pub fn poll_settled(&mut self) -> Option<FilterIntent> {
        while let Ok(intent) = self.receiver.try_recv() {
            if let Some(settled) = self.distinct(intent) {
                return Some(settled);
            }
        }
        None
    }

    /// Wait for the next settled intent
    pub async fn next_settled(&mut self) -> Option<FilterIntent> {
        while let Some(intent) = self.receiver.recv().await {
            if let Some(settled) = self.distinct(intent) {
                return Some(settled);
            }
        }
        None
    }

    /// Weak handle to the timer channel; upgrades while any timer or the
    /// debouncer itself still holds a sender
    #[cfg(test)]
    fn weak_sender(&self) -> mpsc::WeakUnboundedSender<FilterIntent> {
        self.sender.downgrade()
    }

    fn distinct(&mut self, intent: FilterIntent) -> Option<FilterIntent> {
        if self.last_emitted == Some(intent) {
            tracing::debug!("Filter {:?} unchanged since last emission, skipping", intent);
            return None;
        }
        self.last_emitted = Some(intent);
        Some(intent)
    }
}

impl Default for FilterDebouncer {
    fn default() -> Self {
        Self::new(DEFAULT_QUIET_PERIOD)
    }
}

impl Drop for FilterDebouncer {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}
