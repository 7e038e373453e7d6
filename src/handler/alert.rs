use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::sleep;

use hue::api::AlertMode;

pub const SELECT_DURATION: Duration = Duration::from_millis(2000);
pub const LSELECT_DURATION: Duration = Duration::from_millis(15000);

/// How long the bridge keeps running an alert before it returns to idle
#[must_use]
pub const fn alert_duration(mode: AlertMode) -> Option<Duration> {
    match mode {
        AlertMode::Select => Some(SELECT_DURATION),
        AlertMode::LSelect => Some(LSELECT_DURATION),
        AlertMode::None => None,
    }
}

/// Posted back to the owning handler once a pending alert has run its course
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct AlertExpired {
    pub generation: u64,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PendingAlert {
    pub generation: u64,
    pub mode: AlertMode,
    pub duration: Duration,
}

#[derive(Debug)]
struct AlertTimer {
    alert: PendingAlert,
    task: JoinHandle<()>,
}

/// Keeps track of the (at most one) alert waiting to be reported as idle.
///
/// Timers do not touch handler state. They only post an [`AlertExpired`]
/// into the handler's queue, and the handler calls [`AlertRestorer::expire`]
/// from its own loop. Expiries from superseded timers carry an old generation
/// and are ignored.
#[derive(Debug)]
pub struct AlertRestorer {
    tx: UnboundedSender<AlertExpired>,
    pending: Option<AlertTimer>,
    generation: u64,
}

impl AlertRestorer {
    #[must_use]
    pub fn new(tx: UnboundedSender<AlertExpired>) -> Self {
        Self {
            tx,
            pending: None,
            generation: 0,
        }
    }

    /// Replace any pending timer with one for `mode`.
    ///
    /// Idle modes only cancel.
    pub fn schedule(&mut self, mode: AlertMode) -> Option<PendingAlert> {
        self.cancel_pending();

        let duration = alert_duration(mode)?;

        self.generation += 1;
        let alert = PendingAlert {
            generation: self.generation,
            mode,
            duration,
        };

        let tx = self.tx.clone();
        let task = tokio::spawn(async move {
            sleep(duration).await;

            let _ = tx.send(AlertExpired {
                generation: alert.generation,
            });
        });

        self.pending = Some(AlertTimer { alert, task });
        Some(alert)
    }

    pub fn cancel_pending(&mut self) {
        if let Some(timer) = self.pending.take() {
            log::trace!(
                "Cancelling {} alert restore (generation {})",
                timer.alert.mode,
                timer.alert.generation
            );
            timer.task.abort();
        }
    }

    #[must_use]
    pub fn pending(&self) -> Option<PendingAlert> {
        self.pending.as_ref().map(|timer| timer.alert)
    }

    /// Consume an expiry. Returns the alert that ended, or [`None`] if the
    /// expiry belongs to a timer that has since been replaced or cancelled.
    pub fn expire(&mut self, expired: AlertExpired) -> Option<PendingAlert> {
        let current = self
            .pending
            .as_ref()
            .is_some_and(|timer| timer.alert.generation == expired.generation);

        if current {
            self.pending.take().map(|timer| timer.alert)
        } else {
            None
        }
    }
}

impl Drop for AlertRestorer {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::sync::mpsc::{self, error::TryRecvError};

    use hue::api::AlertMode;

    use crate::handler::alert::{AlertExpired, AlertRestorer, alert_duration};

    #[test]
    fn durations() {
        assert_eq!(
            alert_duration(AlertMode::LSelect),
            Some(Duration::from_secs(15))
        );
        assert_eq!(
            alert_duration(AlertMode::Select),
            Some(Duration::from_secs(2))
        );
        assert_eq!(alert_duration(AlertMode::None), None);
    }

    #[tokio::test(start_paused = true)]
    async fn select_fires_once() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut restorer = AlertRestorer::new(tx);

        let alert = restorer.schedule(AlertMode::Select).unwrap();
        assert_eq!(alert.duration, Duration::from_secs(2));

        let expired = rx.recv().await.unwrap();
        assert_eq!(restorer.expire(expired), Some(alert));
        assert_eq!(restorer.pending(), None);
        assert_eq!(restorer.expire(expired), None);
    }

    #[tokio::test(start_paused = true)]
    async fn later_schedule_supersedes() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut restorer = AlertRestorer::new(tx);

        let first = restorer.schedule(AlertMode::LSelect).unwrap();
        let second = restorer.schedule(AlertMode::Select).unwrap();
        assert_eq!(restorer.pending(), Some(second));

        let expired = rx.recv().await.unwrap();
        assert_eq!(expired.generation, second.generation);
        assert_eq!(restorer.expire(expired), Some(second));

        tokio::time::sleep(Duration::from_secs(30)).await;
        assert_eq!(rx.try_recv(), Err(TryRecvError::Empty));

        let stale = AlertExpired {
            generation: first.generation,
        };
        assert_eq!(restorer.expire(stale), None);
    }

    #[tokio::test(start_paused = true)]
    async fn idle_mode_cancels() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut restorer = AlertRestorer::new(tx);

        restorer.schedule(AlertMode::LSelect).unwrap();
        assert_eq!(restorer.schedule(AlertMode::None), None);
        assert_eq!(restorer.pending(), None);

        tokio::time::sleep(Duration::from_secs(30)).await;
        assert_eq!(rx.try_recv(), Err(TryRecvError::Empty));
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_without_pending_is_noop() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut restorer = AlertRestorer::new(tx);
        restorer.cancel_pending();
        assert_eq!(restorer.pending(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn drop_cancels_timer() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut restorer = AlertRestorer::new(tx);
        restorer.schedule(AlertMode::Select).unwrap();
        drop(restorer);

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(rx.try_recv(), Err(TryRecvError::Disconnected));
    }
}
