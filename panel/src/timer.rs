//! Periodic tasks tied to the lifetime of their owner.

use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// A repeating local task that is cancelled when the guard is dropped.
///
/// The first run happens immediately, then once per `period`. A run that
/// overlaps the next tick delays it rather than bursting to catch up.
/// Must be created inside a `tokio::task::LocalSet`.
pub struct ScopedInterval {
    name: &'static str,
    handle: JoinHandle<()>,
}

impl ScopedInterval {
    pub fn spawn_local<F, Fut>(name: &'static str, period: Duration, mut run: F) -> Self
    where
        F: FnMut() -> Fut + 'static,
        Fut: Future<Output = ()> + 'static,
    {
        let handle = tokio::task::spawn_local(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                run().await;
            }
        });
        tracing::debug!(name, ?period, "timer started");
        Self { name, handle }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }
}

impl Drop for ScopedInterval {
    fn drop(&mut self) {
        self.handle.abort();
        tracing::debug!(name = self.name, "timer stopped");
    }
}
