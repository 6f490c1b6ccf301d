use std::future::Future;
use std::io;
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent, KeyEvent};
use futures::{Stream, StreamExt};
use tokio::sync::mpsc;

use crate::system::collector::StatsProvider;
use crate::system::sampler;
use crate::system::snapshot::MetricsSnapshot;

#[derive(Clone, Debug)]
pub enum Event {
    Key(KeyEvent),
    Resize(u16, u16),
    Snapshot(Arc<MetricsSnapshot>),
    Interrupt,
}

pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<Event>,
    input_task: tokio::task::JoinHandle<()>,
    sampler_task: tokio::task::JoinHandle<()>,
}

impl EventHandler {
    pub fn new(refresh_interval: Duration, provider: Box<dyn StatsProvider>) -> Self {
        Self::with_sources(
            event::EventStream::new(),
            tokio::signal::ctrl_c(),
            refresh_interval,
            provider,
        )
    }

    fn with_sources<S, F>(
        mut reader: S,
        interrupt: F,
        refresh_interval: Duration,
        provider: Box<dyn StatsProvider>,
    ) -> Self
    where
        S: Stream<Item = io::Result<CrosstermEvent>> + Unpin + Send + 'static,
        F: Future<Output = io::Result<()>> + Send + 'static,
    {
        let (tx, rx) = mpsc::unbounded_channel::<Event>();
        let (snapshot_tx, mut snapshot_rx) = mpsc::channel::<Arc<MetricsSnapshot>>(1);
        let sampler_task = sampler::spawn(provider, refresh_interval, snapshot_tx);

        let input_task = tokio::spawn(async move {
            tokio::pin!(interrupt);
            let mut signal_armed = true;
            let mut sampler_alive = true;

            loop {
                let next = tokio::select! {
                    maybe_event = reader.next() => match maybe_event {
                        Some(Ok(CrosstermEvent::Key(key))) => Some(Event::Key(key)),
                        Some(Ok(CrosstermEvent::Resize(width, height))) => {
                            Some(Event::Resize(width, height))
                        }
                        Some(Ok(_)) => None,
                        Some(Err(err)) => {
                            tracing::warn!(error = %err, "terminal input failed");
                            Some(Event::Interrupt)
                        }
                        None => Some(Event::Interrupt),
                    },
                    maybe_snapshot = snapshot_rx.recv(), if sampler_alive => match maybe_snapshot {
                        Some(snapshot) => Some(Event::Snapshot(snapshot)),
                        None => {
                            // Keep serving input with the last snapshot on screen.
                            tracing::warn!("sampler ended, display frozen");
                            sampler_alive = false;
                            None
                        }
                    },
                    result = &mut interrupt, if signal_armed => match result {
                        Ok(()) => Some(Event::Interrupt),
                        Err(err) => {
                            tracing::warn!(error = %err, "ctrl-c handler unavailable");
                            signal_armed = false;
                            None
                        }
                    },
                };

                if let Some(e) = next {
                    let stop = matches!(e, Event::Interrupt);
                    if tx.send(e).is_err() || stop {
                        break;
                    }
                }
            }
        });

        Self {
            rx,
            input_task,
            sampler_task,
        }
    }

    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }
}

impl Drop for EventHandler {
    fn drop(&mut self) {
        self.input_task.abort();
        self.sampler_task.abort();
    }
}
