use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};

const TICK: Duration = Duration::from_secs(1);

/// Publishes whole seconds since `start` once per second.
///
/// Subscribers always see the latest value. The task is aborted on `stop`,
/// on restart and on drop.
#[derive(Debug)]
pub struct ElapsedTicker {
    sender: Arc<watch::Sender<u64>>,
    task: Option<JoinHandle<()>>,
}

impl Default for ElapsedTicker {
    fn default() -> Self {
        Self::new()
    }
}

impl ElapsedTicker {
    #[must_use]
    pub fn new() -> Self {
        let (sender, _) = watch::channel(0);
        Self {
            sender: Arc::new(sender),
            task: None,
        }
    }

    /// Resets to zero and starts counting. Must be called inside a tokio runtime.
    pub fn start(&mut self) {
        self.stop();
        self.sender.send_replace(0);

        let sender = Arc::clone(&self.sender);
        let started = Instant::now();
        self.task = Some(tokio::spawn(async move {
            let mut interval = interval_at(started + TICK, TICK);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                interval.tick().await;
                sender.send_replace(started.elapsed().as_secs());
            }
        }));
    }

    /// Freezes the published value.
    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    #[must_use]
    pub fn seconds(&self) -> u64 {
        *self.sender.borrow()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.sender.subscribe()
    }
}

impl Drop for ElapsedTicker {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn settle() {
        for _ in 0..4 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn counts_whole_seconds() {
        let mut ticker = ElapsedTicker::new();
        ticker.start();
        settle().await;
        assert_eq!(ticker.seconds(), 0);

        tokio::time::advance(Duration::from_millis(2500)).await;
        settle().await;
        assert_eq!(ticker.seconds(), 2);
        assert!(ticker.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn stop_freezes_value() {
        let mut ticker = ElapsedTicker::new();
        let mut updates = ticker.subscribe();
        ticker.start();

        tokio::time::advance(Duration::from_secs(1)).await;
        settle().await;
        updates.changed().await.unwrap();
        assert_eq!(*updates.borrow_and_update(), 1);

        ticker.stop();
        tokio::time::advance(Duration::from_secs(5)).await;
        settle().await;
        assert_eq!(ticker.seconds(), 1);
        assert!(!ticker.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn restart_resets_to_zero() {
        let mut ticker = ElapsedTicker::new();
        ticker.start();
        tokio::time::advance(Duration::from_secs(3)).await;
        settle().await;
        assert_eq!(ticker.seconds(), 3);

        ticker.start();
        assert_eq!(ticker.seconds(), 0);
    }
}
