// Migration progress simulation.
//
// There is no real transfer behind this: the simulator is a policy object
// (increment per tick) whose `tick()` is pure, plus a background driver that
// fires it on a fixed period and reports each value through a callback. The
// driver is cancellable through its handle; once 100 is reached it stops on
// its own.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use log::info;
use uuid::Uuid;

/// Default advancement per tick.
pub const PROGRESS_INCREMENT: u8 = 10;
/// Default tick period.
pub const PROGRESS_PERIOD: Duration = Duration::from_millis(500);

/// Monotonically increasing progress counter, saturating at exactly 100.
#[derive(Debug, Clone)]
pub struct MigrationSimulator {
    progress: u8,
    increment: u8,
}

impl MigrationSimulator {
    pub fn new(increment: u8) -> Self {
        Self {
            progress: 0,
            increment,
        }
    }

    pub fn progress(&self) -> u8 {
        self.progress
    }

    pub fn is_done(&self) -> bool {
        self.progress >= 100
    }

    /// Advance one tick and return the new value. Past 100 this is a no-op.
    pub fn tick(&mut self) -> u8 {
        if !self.is_done() {
            self.progress = self.progress.saturating_add(self.increment).min(100);
        }
        self.progress
    }
}

impl Default for MigrationSimulator {
    fn default() -> Self {
        Self::new(PROGRESS_INCREMENT)
    }
}

/// Handle to a running progress driver. Dropping the handle does not stop the
/// driver (fire-and-forget, like the session it simulates); `cancel()` does.
pub struct ProgressTask {
    run_id: Uuid,
    cancelled: Arc<AtomicBool>,
    handle: Option<thread::JoinHandle<()>>,
}

impl ProgressTask {
    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    /// Stop the driver. The thread exits at its next wakeup; pending callbacks
    /// already in flight are the caller's to drain or drop.
    pub fn cancel(&mut self) {
        self.cancelled.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

/// Start the background driver: every `period`, advance the simulator and hand
/// the new value to `on_tick`, until 100 is reached or the task is cancelled.
pub fn spawn_progress<F>(mut simulator: MigrationSimulator, period: Duration, mut on_tick: F) -> ProgressTask
where
    F: FnMut(u8) + Send + 'static,
{
    let run_id = Uuid::new_v4();
    let cancelled = Arc::new(AtomicBool::new(false));
    let cancel_flag = cancelled.clone();

    info!(
        "[PHASE: migration] [STEP: start] Progress driver starting run_id={}",
        run_id
    );

    let handle = thread::spawn(move || {
        while !simulator.is_done() {
            thread::sleep(period);
            if cancel_flag.load(Ordering::Relaxed) {
                return;
            }
            on_tick(simulator.tick());
        }
        info!(
            "[PHASE: migration] [STEP: done] Progress reached 100 run_id={}",
            run_id
        );
    });

    ProgressTask {
        run_id,
        cancelled,
        handle: Some(handle),
    }
}

/// Convenience wiring for the TUI: report ticks over an mpsc channel.
pub fn spawn_progress_channel(period: Duration, tx: mpsc::Sender<u8>) -> ProgressTask {
    spawn_progress(MigrationSimulator::default(), period, move |p| {
        let _ = tx.send(p);
    })
}
