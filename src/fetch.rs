use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Guards a screen against a slow earlier response overwriting a newer one:
/// each fetch takes a ticket, and only the ticket from the most recent fetch
/// is allowed to apply its result.
#[derive(Debug, Default, Clone)]
pub struct FetchCoordinator {
    generation: Arc<AtomicU64>,
}

#[derive(Debug)]
pub struct FetchTicket {
    generation: u64,
    counter: Arc<AtomicU64>,
}

impl FetchCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self) -> FetchTicket {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        FetchTicket {
            generation,
            counter: Arc::clone(&self.generation),
        }
    }
}

impl FetchTicket {
    /// False once a newer fetch has started; the holder must drop its result.
    pub fn is_current(&self) -> bool {
        self.counter.load(Ordering::SeqCst) == self.generation
    }
}

/// At most one in-flight task per screen: spawning a replacement aborts the
/// previous task instead of letting both race to completion.
#[derive(Debug, Default)]
pub struct LatestTask {
    handle: Option<JoinHandle<()>>,
}

impl LatestTask {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn<F>(&mut self, future: F)
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        if let Some(previous) = self.handle.take() {
            previous.abort();
        }
        self.handle = Some(tokio::spawn(future));
    }

    pub fn cancel(&mut self) {
        if let Some(previous) = self.handle.take() {
            previous.abort();
        }
    }

    pub async fn join(&mut self) {
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

impl Drop for LatestTask {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::{FetchCoordinator, LatestTask};
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    #[test]
    fn stale_ticket_is_rejected() {
        let coordinator = FetchCoordinator::new();
        let first = coordinator.begin();
        assert!(first.is_current());
        let second = coordinator.begin();
        assert!(!first.is_current());
        assert!(second.is_current());
    }

    #[tokio::test]
    async fn respawn_aborts_the_previous_task() {
        let applied = Arc::new(AtomicU32::new(0));
        let mut task = LatestTask::new();

        let slow_applied = Arc::clone(&applied);
        task.spawn(async move {
            tokio::time::sleep(Duration::from_secs(5)).await;
            slow_applied.fetch_add(1, Ordering::SeqCst);
        });

        let fast_applied = Arc::clone(&applied);
        task.spawn(async move {
            fast_applied.fetch_add(10, Ordering::SeqCst);
        });

        task.join().await;
        assert_eq!(applied.load(Ordering::SeqCst), 10);
    }

    #[tokio::test]
    async fn ticket_pattern_drops_the_stale_result() {
        let coordinator = FetchCoordinator::new();
        let applied = Arc::new(AtomicU32::new(0));

        let slow = coordinator.begin();
        let fast = coordinator.begin();

        // The slow request completes last but was issued first; its ticket is
        // stale so its result must not be applied.
        for (ticket, value) in [(fast, 2u32), (slow, 1u32)] {
            if ticket.is_current() {
                applied.store(value, Ordering::SeqCst);
            }
        }
        assert_eq!(applied.load(Ordering::SeqCst), 2);
    }
}
