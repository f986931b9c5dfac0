//! Simulated server latency.
//!
//! Every delayed operation is a tokio task that sleeps and then posts an
//! [`AppEvent`] to the event loop. Tasks never touch page state themselves;
//! the page applies the event when it arrives and checks the generation first.

use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::sleep;

use crate::events::{AppEvent, EventSender};

/// Posts `event` after `delay`. The returned handle may be dropped to detach.
pub fn spawn_delayed(tx: EventSender, delay: Duration, event: AppEvent) -> JoinHandle<()> {
    tokio::spawn(async move {
        if !delay.is_zero() {
            sleep(delay).await;
        }
        if tx.send(event).is_err() {
            tracing::debug!("event loop closed; dropping delayed completion");
        }
    })
}

/// Holds at most one in-flight operation. Starting a new one aborts the old
/// task and bumps the generation, so a completion that was already queued
/// is recognised as stale and dropped.
#[derive(Debug, Default)]
pub struct TaskSlot {
    generation: u64,
    in_flight: Option<JoinHandle<()>>,
}

impl TaskSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Supersedes whatever is running and schedules `make(generation)`.
    pub fn restart<F>(&mut self, tx: &EventSender, delay: Duration, make: F) -> u64
    where
        F: FnOnce(u64) -> AppEvent,
    {
        self.cancel();
        let generation = self.generation;
        self.in_flight = Some(spawn_delayed(tx.clone(), delay, make(generation)));
        generation
    }

    /// Aborts the in-flight task (if any) and invalidates its generation.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
        self.generation += 1;
    }

    /// Accepts a completion only if it belongs to the current operation.
    pub fn settle(&mut self, generation: u64) -> bool {
        if generation != self.generation || self.in_flight.is_none() {
            return false;
        }
        self.in_flight = None;
        true
    }

    pub fn is_pending(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl Drop for TaskSlot {
    fn drop(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events;

    #[tokio::test(start_paused = true)]
    async fn delayed_event_arrives_after_delay() {
        let (tx, mut rx) = events::channel();
        let started = tokio::time::Instant::now();
        spawn_delayed(tx, Duration::from_millis(800), AppEvent::FeedPageLoaded { generation: 7 });
        let event = rx.recv().await.expect("event");
        assert_eq!(event, AppEvent::FeedPageLoaded { generation: 7 });
        assert!(started.elapsed() >= Duration::from_millis(800));
    }

    #[tokio::test(start_paused = true)]
    async fn restart_aborts_the_previous_task() {
        let (tx, mut rx) = events::channel();
        let mut slot = TaskSlot::new();
        let first = slot.restart(&tx, Duration::from_millis(800), |generation| {
            AppEvent::FeedPageLoaded { generation }
        });
        tokio::time::advance(Duration::from_millis(400)).await;
        let second = slot.restart(&tx, Duration::from_millis(800), |generation| {
            AppEvent::FeedPageLoaded { generation }
        });
        assert_ne!(first, second);

        let event = rx.recv().await.expect("event");
        assert_eq!(event, AppEvent::FeedPageLoaded { generation: second });
        assert!(slot.settle(second));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn queued_stale_completion_is_rejected() {
        let (tx, mut rx) = events::channel();
        let mut slot = TaskSlot::new();
        let stale = slot.restart(&tx, Duration::ZERO, |generation| AppEvent::SearchCompleted {
            generation,
        });
        // Let the zero-delay task post its event before superseding it.
        let queued = rx.recv().await.expect("event");
        let fresh = slot.restart(&tx, Duration::from_millis(10), |generation| {
            AppEvent::SearchCompleted { generation }
        });

        assert_eq!(queued, AppEvent::SearchCompleted { generation: stale });
        assert!(!slot.settle(stale));
        assert!(slot.is_pending());
        assert!(slot.settle(fresh));
        assert!(!slot.is_pending());
    }

    #[test]
    fn cancel_without_task_still_invalidates() {
        let mut slot = TaskSlot::new();
        let before = slot.generation();
        slot.cancel();
        assert_eq!(slot.generation(), before + 1);
        assert!(!slot.settle(before));
    }
}
