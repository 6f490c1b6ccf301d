use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use super::collector::StatsProvider;
use super::snapshot::MetricsSnapshot;

pub fn spawn(
    provider: Box<dyn StatsProvider>,
    interval: Duration,
    tx: mpsc::Sender<Arc<MetricsSnapshot>>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut provider = provider;
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tracing::info!(interval_ms = interval.as_millis() as u64, "sampler started");

        loop {
            tokio::select! {
                _ = tx.closed() => break,
                _ = ticker.tick() => {}
            }

            let collected = tokio::task::spawn_blocking(move || {
                let snapshot = provider.collect();
                (provider, snapshot)
            })
            .await;

            let (returned, snapshot) = match collected {
                Ok(pair) => pair,
                Err(err) => {
                    tracing::warn!(error = %err, "collection task failed");
                    break;
                }
            };
            provider = returned;

            if tx.send(Arc::new(snapshot)).await.is_err() {
                break;
            }
        }

        tracing::info!("sampler stopped");
    })
}
