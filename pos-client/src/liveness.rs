//! Liveness monitor - up/down indicator for the bar view
//!
//! Polls a bar's feed on a fixed interval. A successful response replaces
//! the shown fragment and marks the server up; a failed one only flips the
//! indicator to down and keeps the last fragment. There is no backoff, the
//! next tick is the retry.

use crate::poller::run_sequenced;
use crate::source::LivenessSource;
use shared::SequenceGuard;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ServerStatus {
    /// The page was just served, so the server starts out up
    #[default]
    Up,
    Down,
}

impl ServerStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Up => "Server is up",
            Self::Down => "Server is down",
        }
    }
}

/// What the bar view renders
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LivenessState {
    pub status: ServerStatus,
    /// Last successfully fetched feed body
    pub fragment: Option<String>,
}

pub struct LivenessMonitor<S> {
    source: Arc<S>,
    bar: String,
    interval: Duration,
    state: watch::Sender<LivenessState>,
}

impl<S: LivenessSource + 'static> LivenessMonitor<S> {
    /// Create the monitor and the receiver the view watches
    pub fn new(
        source: Arc<S>,
        bar: impl Into<String>,
        interval: Duration,
    ) -> (Self, watch::Receiver<LivenessState>) {
        let (state, rx) = watch::channel(LivenessState::default());
        let monitor = Self {
            source,
            bar: bar.into(),
            interval,
            state,
        };
        (monitor, rx)
    }

    /// Poll until cancelled
    pub async fn run(self, cancel: CancellationToken) {
        let Self {
            source,
            bar,
            interval,
            state,
        } = self;

        tracing::info!(bar = %bar, interval_ms = interval.as_millis() as u64, "Liveness monitor started");

        let fetch = {
            let bar = bar.clone();
            move || {
                let source = Arc::clone(&source);
                let bar = bar.clone();
                async move { source.fetch_fragment(&bar).await }
            }
        };

        let mut sequence = SequenceGuard::new();
        run_sequenced(interval, cancel, fetch, |seq, result| {
            if !sequence.admit(seq) {
                tracing::debug!(seq, "Discarding stale liveness response");
                return;
            }
            match result {
                Ok(fragment) => state.send_modify(|s| {
                    if s.status == ServerStatus::Down {
                        tracing::info!(bar = %bar, "Server is up again");
                    }
                    s.status = ServerStatus::Up;
                    s.fragment = Some(fragment);
                }),
                Err(e) => state.send_modify(|s| {
                    if s.status == ServerStatus::Up {
                        tracing::warn!(bar = %bar, error = %e, "Server is down");
                    }
                    s.status = ServerStatus::Down;
                }),
            }
        })
        .await;

        tracing::info!(bar = %bar, "Liveness monitor stopped");
    }
}
