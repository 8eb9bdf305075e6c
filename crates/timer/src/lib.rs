//! Gravity timer - a cancellable, re-armable repeating task
//!
//! Bridges the synchronous game loop with a tokio interval. Ticks are delivered
//! through a channel and drained with [`GravityTimer::try_recv`].
//!
//! Every arm or cancel starts a new generation. Ticks already queued by an older
//! generation are discarded on receipt, so a cancel takes effect immediately even
//! if the old task had fired in the meantime.
//!
//! # Example
//!
//! ```no_run
//! use classic_tetris_timer::GravityTimer;
//!
//! let mut timer = GravityTimer::new()?;
//! timer.sync(Some(1000));
//! // ... later, in the game loop
//! while timer.try_recv().is_some() {
//!     // session.tick();
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```

use std::time::Duration;

use anyhow::{Context, Result};
use tokio::runtime::Runtime;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

/// One firing of the gravity timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GravityTick {
    pub generation: u64,
}

/// Running timer instance.
pub struct GravityTimer {
    rt: Runtime,
    tick_tx: mpsc::UnboundedSender<GravityTick>,
    tick_rx: mpsc::UnboundedReceiver<GravityTick>,
    task: Option<JoinHandle<()>>,
    period_ms: Option<u32>,
    generation: u64,
}

impl GravityTimer {
    pub fn new() -> Result<Self> {
        let rt = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("gravity-timer")
            .enable_time()
            .build()
            .context("Failed to create tokio runtime for the gravity timer")?;
        let (tick_tx, tick_rx) = mpsc::unbounded_channel::<GravityTick>();

        Ok(Self {
            rt,
            tick_tx,
            tick_rx,
            task: None,
            period_ms: None,
            generation: 0,
        })
    }

    /// Currently armed period, `None` when cancelled
    pub fn period_ms(&self) -> Option<u32> {
        self.period_ms
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Match the timer to the session's gravity interval.
    ///
    /// Re-arms (restarting the phase) only when the period actually changed.
    /// Returns true if the timer was re-armed or cancelled.
    pub fn sync(&mut self, period_ms: Option<u32>) -> bool {
        if period_ms == self.period_ms {
            return false;
        }
        match period_ms {
            Some(ms) => self.arm(ms),
            None => self.cancel(),
        }
        true
    }

    /// Start ticking every `period_ms`, replacing any running schedule.
    pub fn arm(&mut self, period_ms: u32) {
        self.cancel();

        let tx = self.tick_tx.clone();
        let generation = self.generation;
        let period = Duration::from_millis(period_ms.max(1) as u64);

        self.task = Some(self.rt.spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                if tx.send(GravityTick { generation }).is_err() {
                    break;
                }
            }
        }));
        self.period_ms = Some(period_ms);
    }

    /// Stop ticking. Pending ticks from the old schedule are invalidated.
    pub fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
        self.period_ms = None;
        self.generation = self.generation.wrapping_add(1);
    }

    /// Next tick of the current schedule, if one has fired.
    pub fn try_recv(&mut self) -> Option<GravityTick> {
        while let Ok(tick) = self.tick_rx.try_recv() {
            if tick.generation == self.generation {
                return Some(tick);
            }
        }
        None
    }
}

impl Drop for GravityTimer {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
