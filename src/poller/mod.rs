//! Periodic refresh of bot status and activity.
//!
//! The poller owns the only writable `StatusSnapshot`. Everyone else reads
//! clones of it.

mod error;
mod snapshot;
mod stats;

pub use error::PollerError;
pub use snapshot::StatusSnapshot;
pub use stats::PollStats;

use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex as StdMutex, PoisonError};
use std::time::Duration;

use chrono::Utc;
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::config::PollerConfig;
use crate::gateway::Gateway;

/// Refresh is what command issuers need from the poller: a way to ask for
/// fresh remote state right now.
pub trait Refresh: Send + Sync {
    /// Requests an out-of-band poll. Never blocks on the network.
    fn request_refresh(&self);
}

/// State shared between the poller handle and its tasks.
struct Shared {
    gateway: Arc<dyn Gateway>,
    activity_limit: Option<u32>,
    snapshot: RwLock<StatusSnapshot>,
    stats: Mutex<PollStats>,
    running: AtomicBool,
    /// Bumped on every start and stop; results from an older epoch are dropped.
    epoch: AtomicU64,
    /// The run started by the latest `start`.
    run: StdMutex<Run>,
}

/// One start..stop span. Fetch rounds count against the run they began in,
/// so rounds left over from a stopped run never hold back a new one.
#[derive(Clone, Default)]
struct Run {
    epoch: u64,
    in_flight: Arc<AtomicUsize>,
}

/// Decrements the in-flight counter when a fetch round ends, however it ends.
struct InFlight(Arc<AtomicUsize>);

impl InFlight {
    fn enter(counter: &Arc<AtomicUsize>) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(Arc::clone(counter))
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl Shared {
    fn is_current(&self, epoch: u64) -> bool {
        self.running.load(Ordering::SeqCst) && self.epoch.load(Ordering::SeqCst) == epoch
    }

    fn current_run(&self) -> Run {
        self.run
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn set_run(&self, run: Run) {
        *self.run.lock().unwrap_or_else(PoisonError::into_inner) = run;
    }

    /// Regular schedule. Each tick spawns a fetch round unless one is outstanding.
    async fn run_loop(self: Arc<Self>, interval: Duration, run: Run) {
        let epoch = run.epoch;
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            ticker.tick().await;
            if !self.is_current(epoch) {
                break;
            }

            if run.in_flight.load(Ordering::SeqCst) > 0 {
                debug!("previous poll still in flight, skipping tick");
                self.stats.lock().await.ticks_skipped += 1;
                continue;
            }

            let guard = InFlight::enter(&run.in_flight);
            let shared = Arc::clone(&self);
            tokio::spawn(async move {
                shared.poll(epoch).await;
                drop(guard);
            });
        }
    }

    /// One fetch round: status and activity in parallel, applied independently.
    async fn poll(&self, epoch: u64) {
        let (status, activity) = tokio::join!(
            self.gateway.status(),
            self.gateway.activity(self.activity_limit)
        );

        if let Err(ref e) = status {
            warn!(error = %e, kind = %e.kind(), "status fetch failed, keeping previous status");
        }
        if let Err(ref e) = activity {
            warn!(error = %e, kind = %e.kind(), "activity fetch failed, keeping previous log");
        }

        let mut snapshot = self.snapshot.write().await;
        let mut stats = self.stats.lock().await;

        if !self.is_current(epoch) {
            debug!(epoch, "poller stopped, discarding poll result");
            stats.polls_discarded += 1;
            return;
        }

        let now = Utc::now();
        if !snapshot.record_status(status, now) {
            stats.status_failures += 1;
        }
        if !snapshot.record_activity(activity, now) {
            stats.activity_failures += 1;
        }
        stats.polls_applied += 1;
    }
}

/// StatusPoller keeps the status snapshot fresh on a fixed interval.
pub struct StatusPoller {
    shared: Arc<Shared>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl StatusPoller {
    /// Creates a stopped poller. `activity_limit` is forwarded to the activity endpoint.
    pub fn new(gateway: Arc<dyn Gateway>, activity_limit: Option<u32>) -> Self {
        Self {
            shared: Arc::new(Shared {
                gateway,
                activity_limit,
                snapshot: RwLock::new(StatusSnapshot::default()),
                stats: Mutex::new(PollStats::default()),
                running: AtomicBool::new(false),
                epoch: AtomicU64::new(0),
                run: StdMutex::new(Run::default()),
            }),
            task: Mutex::new(None),
        }
    }

    pub fn from_config(gateway: Arc<dyn Gateway>, config: &PollerConfig) -> Self {
        Self::new(gateway, Some(config.activity_limit))
    }

    /// Starts polling: one fetch immediately, then one per `interval` until `stop`.
    pub async fn start(&self, interval: Duration) -> Result<(), PollerError> {
        if interval.is_zero() {
            return Err(PollerError::InvalidInterval);
        }

        let mut task = self.task.lock().await;
        if self.shared.running.load(Ordering::SeqCst) {
            return Err(PollerError::AlreadyRunning);
        }

        let epoch = self.shared.epoch.fetch_add(1, Ordering::SeqCst) + 1;
        let run = Run {
            epoch,
            in_flight: Arc::new(AtomicUsize::new(0)),
        };
        self.shared.set_run(run.clone());
        self.shared.running.store(true, Ordering::SeqCst);

        let shared = Arc::clone(&self.shared);
        *task = Some(tokio::spawn(shared.run_loop(interval, run)));

        info!(interval = ?interval, epoch, "Status poller started");
        Ok(())
    }

    /// Stops polling. Results of fetches still in flight are discarded.
    pub async fn stop(&self) {
        let mut task = self.task.lock().await;
        if !self.shared.running.load(Ordering::SeqCst) {
            return;
        }

        {
            // Holding the write lock orders this against any apply in progress.
            let _snapshot = self.shared.snapshot.write().await;
            self.shared.running.store(false, Ordering::SeqCst);
            self.shared.epoch.fetch_add(1, Ordering::SeqCst);
        }

        if let Some(handle) = task.take() {
            handle.abort();
        }

        info!("Status poller stopped");
    }

    /// Triggers a fetch round immediately without touching the regular schedule.
    ///
    /// Returns `None` when the poller is not running.
    pub fn refresh_now(&self) -> Option<JoinHandle<()>> {
        let run = self.shared.current_run();
        if !self.shared.is_current(run.epoch) {
            debug!("refresh requested while poller is stopped, ignoring");
            return None;
        }

        let guard = InFlight::enter(&run.in_flight);
        let shared = Arc::clone(&self.shared);
        Some(tokio::spawn(async move {
            shared.poll(run.epoch).await;
            drop(guard);
        }))
    }

    /// Returns a copy of the current snapshot.
    pub async fn snapshot(&self) -> StatusSnapshot {
        self.shared.snapshot.read().await.clone()
    }

    /// Returns a copy of the runtime counters.
    pub async fn stats(&self) -> PollStats {
        self.shared.stats.lock().await.clone()
    }

    /// Returns true if the regular schedule is active.
    pub fn is_running(&self) -> bool {
        self.shared.running.load(Ordering::SeqCst)
    }

    /// Returns true while a fetch round of the latest run is outstanding.
    pub fn is_fetching(&self) -> bool {
        self.shared.current_run().in_flight.load(Ordering::SeqCst) > 0
    }
}

impl Refresh for StatusPoller {
    fn request_refresh(&self) {
        let _ = self.refresh_now();
    }
}
