// src/ingest/scheduler.rs
use std::time::Duration;
use tokio::task::JoinHandle;

use crate::notify::Notifier;
use crate::watcher::DealWatcher;

#[derive(Clone, Copy, Debug)]
pub struct PollSchedulerCfg {
    pub interval_secs: u64,
}

/// Run one cycle and hand any payload to `notifier`. Errors are logged and
/// swallowed; the next tick simply tries again.
pub async fn tick(watcher: &mut DealWatcher, notifier: &dyn Notifier) {
    match watcher.run().await {
        Ok(Some(payload)) => {
            if let Err(e) = notifier.send(&payload).await {
                tracing::warn!(target: "poll", "notify failed: {e:#}");
            }
        }
        Ok(None) => tracing::debug!(target: "poll", "no new deals"),
        Err(e) => {
            let e = anyhow::Error::from(e);
            tracing::warn!(target: "poll", "poll cycle failed: {e:#}");
        }
    }
}

/// Spawn the poll loop. The first cycle runs immediately.
pub fn spawn_poll_scheduler<N>(
    cfg: PollSchedulerCfg,
    mut watcher: DealWatcher,
    notifier: N,
) -> JoinHandle<()>
where
    N: Notifier + 'static,
{
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(Duration::from_secs(cfg.interval_secs.max(1)));
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            tick(&mut watcher, &notifier).await;
        }
    })
}
