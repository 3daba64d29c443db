//! Background thread driving the periodic tick.
//!
//! Sleeps on a wake channel between ticks so `stop` returns promptly instead
//! of waiting out the interval.

use std::thread;
use std::time::Duration;

use crossbeam_channel::{bounded, RecvTimeoutError, Sender};
use tracing::{debug, warn};

use super::hooks::SyncHooks;
use crate::compat::{Arc, AtomicU64, Ordering};
use crate::{AtomicFlag, Result};

const THREAD_NAME: &str = "lockstep-sync-poller";

/// Clears the running flag however the thread body exits, panics included.
struct ExitGuard(Arc<AtomicFlag>);

impl Drop for ExitGuard {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

pub struct SyncPoller {
    running: Arc<AtomicFlag>,
    ticks: Arc<AtomicU64>,
    wake_tx: Sender<()>,
    thread: Option<thread::JoinHandle<()>>,
}

impl SyncPoller {
    /// Start ticking `hooks` every `interval`.
    pub(crate) fn spawn(hooks: SyncHooks, interval: Duration) -> Result<Self> {
        let running = Arc::new(AtomicFlag::new(true));
        let ticks = Arc::new(AtomicU64::new(0));
        let (wake_tx, wake_rx) = bounded::<()>(1);

        let running_clone = Arc::clone(&running);
        let ticks_clone = Arc::clone(&ticks);
        let thread = thread::Builder::new()
            .name(THREAD_NAME.into())
            .spawn(move || {
                let _exit = ExitGuard(Arc::clone(&running_clone));
                loop {
                    match wake_rx.recv_timeout(interval) {
                        Err(RecvTimeoutError::Timeout) => {}
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }
                    if !running_clone.get() {
                        break;
                    }
                    hooks.on_periodic_tick();
                    ticks_clone.fetch_add(1, Ordering::AcqRel);
                }
            })?;

        debug!(?interval, "Sync poller started");
        Ok(Self {
            running,
            ticks,
            wake_tx,
            thread: Some(thread),
        })
    }

    /// False once stopped, or once the thread has died on a panicking tick.
    pub fn is_running(&self) -> bool {
        self.running.get()
            && self
                .thread
                .as_ref()
                .is_some_and(|thread| !thread.is_finished())
    }

    /// Ticks completed so far.
    pub fn tick_count(&self) -> u64 {
        self.ticks.load(Ordering::Acquire)
    }

    /// Stop the thread and wait for it. Returns once no tick can run any more.
    pub fn stop(&mut self) {
        self.running.set(false);
        let _ = self.wake_tx.try_send(());
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                warn!("Sync poller thread panicked");
            } else {
                debug!(ticks = self.tick_count(), "Sync poller stopped");
            }
        }
    }
}

impl Drop for SyncPoller {
    fn drop(&mut self) {
        self.stop();
    }
}
