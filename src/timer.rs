use crate::event::{Event, EventSender};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::debug;

static NEXT_TIMER_ID: AtomicU64 = AtomicU64::new(1);

/// What a periodic timer drives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// Home view avatar carousel
    Carousel,
    /// Home view trivia rotation
    Trivia,
    /// Update view face scan progress
    Scan,
}

/// A periodic task owned by a view.
///
/// The task posts [`Event::Timer`] into the event loop every `period`. It is
/// aborted when the owner drops the timer, so leaving a view releases every
/// timer it started regardless of how the view is left.
pub struct ScopedTimer {
    id: u64,
    kind: TimerKind,
    handle: JoinHandle<()>,
}

impl ScopedTimer {
    /// Must be called from within a tokio runtime.
    pub fn every(period: Duration, kind: TimerKind, tx: EventSender) -> Self {
        let id = NEXT_TIMER_ID.fetch_add(1, Ordering::Relaxed);
        debug!(id, ?kind, ?period, "starting timer");

        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            // First tick completes immediately
            interval.tick().await;
            loop {
                interval.tick().await;
                if tx.send(Event::Timer { timer: id, kind }).is_err() {
                    break;
                }
            }
        });

        Self { id, kind, handle }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn kind(&self) -> TimerKind {
        self.kind
    }

    /// True when `timer` came from this instance
    pub fn owns(&self, timer: u64) -> bool {
        self.id == timer
    }
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        debug!(id = self.id, kind = ?self.kind, "cancelling timer");
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn posts_ticks_tagged_with_its_id() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let timer = ScopedTimer::every(Duration::from_millis(5), TimerKind::Trivia, tx);

        match rx.recv().await {
            Some(Event::Timer { timer: id, kind }) => {
                assert!(timer.owns(id));
                assert_eq!(kind, TimerKind::Trivia);
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[tokio::test]
    async fn dropping_the_timer_stops_the_task() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let timer = ScopedTimer::every(Duration::from_millis(5), TimerKind::Carousel, tx);
        drop(timer);

        // Once the aborted task releases its sender the channel closes.
        let drained = tokio::time::timeout(Duration::from_secs(1), async {
            while rx.recv().await.is_some() {}
        })
        .await;
        assert!(drained.is_ok());
    }

    #[tokio::test]
    async fn ids_are_unique() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let a = ScopedTimer::every(Duration::from_secs(60), TimerKind::Scan, tx.clone());
        let b = ScopedTimer::every(Duration::from_secs(60), TimerKind::Scan, tx);
        assert_ne!(a.id(), b.id());
        assert!(!a.owns(b.id()));
    }
}
