//! Periodic polling
//!
//! Every tick fires a request without waiting for the previous one, so two
//! requests may be in flight at once. Each request carries a sequence number
//! and completions are funneled back into the polling task, which applies
//! them one at a time and lets the handler drop stale ones.

use crate::overview::ServiceOverview;
use crate::source::OccupancySource;
use crate::ClientResult;
use shared::table::TableTransition;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{MissedTickBehavior, interval};
use tokio_util::sync::CancellationToken;

/// Drive `fetch` every `period` until `cancel` fires
///
/// `handle` receives `(sequence, result)` in completion order, which is not
/// necessarily request order.
pub(crate) async fn run_sequenced<T, F, Fut, H>(
    period: Duration,
    cancel: CancellationToken,
    fetch: F,
    mut handle: H,
) where
    T: Send + 'static,
    F: Fn() -> Fut,
    Fut: Future<Output = ClientResult<T>> + Send + 'static,
    H: FnMut(u64, ClientResult<T>),
{
    let (tx, mut rx) = mpsc::unbounded_channel::<(u64, ClientResult<T>)>();
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut next_seq: u64 = 0;

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = ticker.tick() => {
                next_seq += 1;
                let seq = next_seq;
                let tx = tx.clone();
                let request = fetch();
                tokio::spawn(async move {
                    // Receiver is gone once the view is torn down
                    let _ = tx.send((seq, request.await));
                });
            }
            Some((seq, result)) = rx.recv() => handle(seq, result),
        }
    }
}

/// Polls table occupancy and reconciles the overview
pub struct OccupancyPoller<S> {
    source: Arc<S>,
    interval: Duration,
    overview: ServiceOverview,
    sink: Option<mpsc::UnboundedSender<Vec<TableTransition>>>,
}

impl<S: OccupancySource + 'static> OccupancyPoller<S> {
    pub fn new(source: Arc<S>, interval: Duration, overview: ServiceOverview) -> Self {
        Self {
            source,
            interval,
            overview,
            sink: None,
        }
    }

    /// Forward non-empty transition batches to the renderer
    pub fn with_sink(mut self, sink: mpsc::UnboundedSender<Vec<TableTransition>>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Poll until cancelled, then hand the overview back
    ///
    /// Failed polls are logged and otherwise ignored; the next tick retries.
    pub async fn run(self, cancel: CancellationToken) -> ServiceOverview {
        let Self {
            source,
            interval,
            mut overview,
            sink,
        } = self;

        tracing::info!(interval_ms = interval.as_millis() as u64, "Occupancy polling started");

        let fetch = move || {
            let source = Arc::clone(&source);
            async move { source.fetch_occupancy().await }
        };

        run_sequenced(interval, cancel, fetch, |seq, result| match result {
            Ok(snapshot) => {
                let Some(transitions) = overview.apply_snapshot(seq, snapshot) else {
                    return;
                };
                if transitions.is_empty() {
                    return;
                }
                if let Some(sink) = &sink
                    && sink.send(transitions).is_err()
                {
                    tracing::debug!("Transition sink closed");
                }
            }
            Err(e) => {
                tracing::warn!(seq, error = %e, "Occupancy poll failed");
            }
        })
        .await;

        tracing::info!("Occupancy polling stopped");
        overview
    }
}
