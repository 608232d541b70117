//! Swarm list refresh lifecycle.
//!
//! The controller owns the Loading / Loaded / Error state machine. Fetches run
//! as spawned tasks and report back over a channel that the UI loop drains,
//! so the render path never waits on the network.
//!
//! Every fetch is tagged with a sequence number. A response older than the
//! newest one already applied is dropped, so a slow request can never
//! overwrite fresher data.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use chrono::{DateTime, Local};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::model::Swarm;
use crate::source::{SourceError, SwarmSource};

/// Default period between scheduled refreshes.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(10);

/// What the monitor currently has to show.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ListState {
    #[default]
    Loading,
    Loaded(Vec<Swarm>),
    Error(String),
}

/// Result of applying one fetch response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Update {
    /// The response replaced the current state.
    Applied,
    /// A newer response had already been applied.
    Stale,
}

struct FetchOutcome {
    seq: u64,
    result: Result<Vec<Swarm>, SourceError>,
}

/// Issues fetches. Cloned into the poller task so both share one sequence.
#[derive(Clone)]
struct Fetcher {
    source: Arc<dyn SwarmSource>,
    tx: mpsc::UnboundedSender<FetchOutcome>,
    issued: Arc<AtomicU64>,
}

impl Fetcher {
    fn issue(&self) -> u64 {
        let seq = self.issued.fetch_add(1, Ordering::Relaxed) + 1;
        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();

        tokio::spawn(async move {
            let result = source.get_swarms().await;
            // The controller may be gone by now; the response is dropped.
            if tx.send(FetchOutcome { seq, result }).is_err() {
                debug!(seq, "Monitor closed, discarding swarm list response");
            }
        });

        seq
    }
}

struct Poller {
    shutdown: CancellationToken,
    handle: JoinHandle<()>,
}

/// Owns the swarm list and its refresh schedule.
pub struct SwarmListController {
    state: ListState,
    fetcher: Fetcher,
    rx: mpsc::UnboundedReceiver<FetchOutcome>,
    /// Highest sequence number applied to `state`.
    applied: u64,
    /// Highest sequence number that has answered, applied or not.
    answered: u64,
    interval: Duration,
    poller: Option<Poller>,
    last_updated: Option<DateTime<Local>>,
}

impl std::fmt::Debug for SwarmListController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SwarmListController")
            .field("state", &self.state)
            .field("applied", &self.applied)
            .field("interval", &self.interval)
            .field("active", &self.is_active())
            .finish_non_exhaustive()
    }
}

impl SwarmListController {
    /// Creates a controller in the `Loading` state.
    pub fn new(source: Arc<dyn SwarmSource>) -> Self {
        Self::with_interval(source, DEFAULT_REFRESH_INTERVAL)
    }

    /// Creates a controller with a custom refresh period.
    pub fn with_interval(source: Arc<dyn SwarmSource>, interval: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            state: ListState::Loading,
            fetcher: Fetcher {
                source,
                tx,
                issued: Arc::new(AtomicU64::new(0)),
            },
            rx,
            applied: 0,
            answered: 0,
            interval,
            poller: None,
            last_updated: None,
        }
    }

    pub fn state(&self) -> &ListState {
        &self.state
    }

    /// The loaded swarms, empty while loading or failed.
    pub fn swarms(&self) -> &[Swarm] {
        match &self.state {
            ListState::Loaded(swarms) => swarms,
            ListState::Loading | ListState::Error(_) => &[],
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Local time of the last successful refresh.
    pub fn last_updated(&self) -> Option<DateTime<Local>> {
        self.last_updated
    }

    /// True while a request newer than every response is outstanding.
    pub fn in_flight(&self) -> bool {
        self.fetcher.issued.load(Ordering::Relaxed) > self.answered
    }

    /// True between `activate` and `deactivate`.
    pub fn is_active(&self) -> bool {
        self.poller.is_some()
    }

    /// Requests the full swarm list. Must be called inside a tokio runtime.
    ///
    /// Returns the sequence number of the request.
    pub fn refresh(&self) -> u64 {
        let seq = self.fetcher.issue();
        debug!(seq, "Swarm refresh issued");
        seq
    }

    /// Refreshes now and then on every interval until deactivated.
    ///
    /// Calling this while already active is a no-op.
    pub fn activate(&mut self) {
        if self.poller.is_some() {
            return;
        }

        self.refresh();

        let shutdown = CancellationToken::new();
        let token = shutdown.clone();
        let fetcher = self.fetcher.clone();
        let period = self.interval;

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => break,
                    _ = ticker.tick() => {
                        let seq = fetcher.issue();
                        debug!(seq, "Scheduled swarm refresh issued");
                    }
                }
            }
        });

        info!(interval_secs = period.as_secs_f64(), "Swarm polling started");
        self.poller = Some(Poller { shutdown, handle });
    }

    /// Cancels the refresh schedule. In-flight fetches are left to finish.
    pub fn deactivate(&mut self) {
        if let Some(poller) = self.poller.take() {
            poller.shutdown.cancel();
            poller.handle.abort();
            info!("Swarm polling stopped");
        }
    }

    /// Applies every response that has arrived. Returns true if the state
    /// changed.
    pub fn poll_updates(&mut self) -> bool {
        let mut changed = false;
        while let Ok(outcome) = self.rx.try_recv() {
            changed |= self.apply(outcome) == Update::Applied;
        }
        changed
    }

    /// Waits for the next response and applies it.
    pub async fn next_update(&mut self) -> Option<Update> {
        let outcome = self.rx.recv().await?;
        Some(self.apply(outcome))
    }

    fn apply(&mut self, outcome: FetchOutcome) -> Update {
        let FetchOutcome { seq, result } = outcome;
        self.answered = self.answered.max(seq);

        if seq < self.applied {
            debug!(seq, applied = self.applied, "Discarding stale swarm list");
            return Update::Stale;
        }
        self.applied = seq;

        self.state = match result {
            Ok(swarms) => {
                debug!(seq, count = swarms.len(), "Swarm list loaded");
                self.last_updated = Some(Local::now());
                ListState::Loaded(swarms)
            }
            Err(e) => {
                warn!(seq, error = %e, "Swarm list fetch failed");
                ListState::Error(e.display_message())
            }
        };

        Update::Applied
    }
}

impl Drop for SwarmListController {
    fn drop(&mut self) {
        self.deactivate();
    }
}
