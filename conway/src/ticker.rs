// ticker.rs - Periodic generation trigger on a tokio runtime

use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, warn};

use crate::controller::Schedule;

/// One firing of the timer, stamped with the schedule that produced it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    pub epoch: u64,
}

/// Sends a [`Tick`] every period from a background task.
///
/// Every (re)schedule and every cancel moves to a new epoch, so ticks a
/// cancelled schedule already queued are dropped by [`Ticker::drain`]
/// instead of reaching the grid.
pub struct Ticker {
    handle: Handle,
    tx: mpsc::UnboundedSender<Tick>,
    rx: mpsc::UnboundedReceiver<Tick>,
    epoch: u64,
    task: Option<JoinHandle<()>>,
    wake: Arc<dyn Fn() + Send + Sync>,
}

impl Ticker {
    /// `wake` runs after each tick is sent, e.g. to request a repaint
    pub fn new(handle: Handle, wake: impl Fn() + Send + Sync + 'static) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { handle, tx, rx, epoch: 0, task: None, wake: Arc::new(wake) }
    }

    pub fn apply(&mut self, schedule: Schedule) {
        match schedule {
            Schedule::Every(period) => self.start(period),
            Schedule::Cancel => self.cancel(),
            Schedule::Unchanged => {}
        }
    }

    /// Replace any running schedule with one ticking every `period`.
    /// The first tick comes one full period from now.
    pub fn start(&mut self, period: Duration) {
        self.cancel();
        let epoch = self.epoch;
        let tx = self.tx.clone();
        let wake = Arc::clone(&self.wake);

        self.task = Some(self.handle.spawn(async move {
            let mut interval = time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if tx.send(Tick { epoch }).is_err() {
                    break;
                }
                wake();
            }
        }));
        debug!(epoch, ?period, "scheduled ticks");
    }

    pub fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            debug!(epoch = self.epoch, "cancelled ticks");
        }
        self.epoch += 1;
    }

    pub fn is_active(&self) -> bool {
        self.task.is_some()
    }

    /// Take every queued tick and return how many belong to the current
    /// schedule.
    pub fn drain(&mut self) -> usize {
        let mut current = 0;
        let mut stale = 0;
        while let Ok(tick) = self.rx.try_recv() {
            if tick.epoch == self.epoch && self.task.is_some() {
                current += 1;
            } else {
                stale += 1;
            }
        }
        if stale > 0 {
            warn!(stale, "dropped ticks from a cancelled schedule");
        }
        current
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
