//! Periodic interval timers, independent of the frame scheduler.
//!
//! [`IntervalTimer`] is the injection seam: production code registers
//! callbacks on a [`ThreadIntervalTimer`], tests drive a
//! [`ManualIntervalTimer`] through simulated time.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::error::{Error, Result};

/// Callback fired once per elapsed interval.
pub type TickCallback = Box<dyn FnMut() + Send + 'static>;

/// Something that can fire a callback on a fixed period.
pub trait IntervalTimer {
    /// Fire `callback` every `interval`, starting one interval from now.
    fn on_tick(&mut self, interval: Duration, callback: TickCallback) -> Result<()>;
}

fn check_interval(interval: Duration) -> Result<()> {
    if interval.is_zero() {
        return Err(Error::Config("interval must be greater than zero".into()));
    }
    Ok(())
}

struct ManualEntry {
    interval: Duration,
    next_due: Duration,
    callback: TickCallback,
}

/// Interval timer driven by simulated time.
#[derive(Default)]
pub struct ManualIntervalTimer {
    now: Duration,
    entries: Vec<ManualEntry>,
}

impl ManualIntervalTimer {
    /// Create a timer at simulated time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current simulated time.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Advance simulated time by `by`, firing every callback that comes due,
    /// in due-time order. Returns the number of callbacks fired.
    pub fn advance(&mut self, by: Duration) -> usize {
        let target = self.now + by;
        let mut fired = 0;

        loop {
            let next = self
                .entries
                .iter_mut()
                .filter(|entry| entry.next_due <= target)
                .min_by_key(|entry| entry.next_due);
            let Some(entry) = next else {
                break;
            };

            self.now = entry.next_due;
            entry.next_due += entry.interval;
            (entry.callback)();
            fired += 1;
        }

        self.now = target;
        fired
    }
}

impl IntervalTimer for ManualIntervalTimer {
    fn on_tick(&mut self, interval: Duration, callback: TickCallback) -> Result<()> {
        check_interval(interval)?;
        self.entries.push(ManualEntry {
            interval,
            next_due: self.now + interval,
            callback,
        });
        Ok(())
    }
}

/// Interval timer running each registration on its own thread.
///
/// Deadlines are computed from the registration instant, so a late wake-up
/// does not push later ticks back. [`stop`](Self::stop) and `Drop` cancel
/// immediately: threads are unparked, exit without firing again, and are
/// joined.
pub struct ThreadIntervalTimer {
    stopped: Arc<AtomicBool>,
    workers: Vec<JoinHandle<()>>,
}

impl Default for ThreadIntervalTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl ThreadIntervalTimer {
    /// Create a timer with no registrations.
    pub fn new() -> Self {
        Self {
            stopped: Arc::new(AtomicBool::new(false)),
            workers: Vec::new(),
        }
    }

    /// Stop all registrations and wait for their threads to exit.
    /// Callbacks already running finish normally.
    pub fn stop(&mut self) {
        if !self.stopped.swap(true, Ordering::AcqRel) {
            tracing::debug!(workers = self.workers.len(), "interval timer stopped");
        }
        for worker in &self.workers {
            worker.thread().unpark();
        }
        for worker in self.workers.drain(..) {
            if worker.join().is_err() {
                tracing::warn!("interval callback panicked");
            }
        }
    }

    /// Whether [`stop`](Self::stop) has been called.
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Acquire)
    }
}

impl IntervalTimer for ThreadIntervalTimer {
    fn on_tick(&mut self, interval: Duration, mut callback: TickCallback) -> Result<()> {
        check_interval(interval)?;
        if self.is_stopped() {
            return Err(Error::Timer("timer already stopped".into()));
        }

        let stopped = Arc::clone(&self.stopped);
        let worker = thread::Builder::new()
            .name("orbit-interval".into())
            .spawn(move || {
                let start = Instant::now();
                let mut ticks: u32 = 0;
                loop {
                    ticks = ticks.saturating_add(1);
                    let deadline = start + interval.saturating_mul(ticks);
                    loop {
                        if stopped.load(Ordering::Acquire) {
                            return;
                        }
                        let now = Instant::now();
                        if now >= deadline {
                            break;
                        }
                        thread::park_timeout(deadline - now);
                    }
                    callback();
                }
            })?;

        tracing::debug!(?interval, "interval timer registered");
        self.workers.push(worker);
        Ok(())
    }
}

impl Drop for ThreadIntervalTimer {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    fn counter() -> (Arc<AtomicUsize>, TickCallback) {
        let count = Arc::new(AtomicUsize::new(0));
        let inner = Arc::clone(&count);
        let callback: TickCallback = Box::new(move || {
            inner.fetch_add(1, Ordering::SeqCst);
        });
        (count, callback)
    }

    #[test]
    fn test_manual_fires_once_per_interval() {
        let mut timer = ManualIntervalTimer::new();
        let (count, callback) = counter();
        timer.on_tick(Duration::from_millis(2000), callback).unwrap();

        assert_eq!(timer.advance(Duration::from_millis(1999)), 0);
        assert_eq!(timer.advance(Duration::from_millis(1)), 1);
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(timer.now(), Duration::from_millis(2000));
    }

    #[test]
    fn test_manual_fires_several_in_one_advance() {
        let mut timer = ManualIntervalTimer::new();
        let (count, callback) = counter();
        timer.on_tick(Duration::from_millis(100), callback).unwrap();

        assert_eq!(timer.advance(Duration::from_millis(350)), 3);
        assert_eq!(count.load(Ordering::SeqCst), 3);
        assert_eq!(timer.advance(Duration::from_millis(50)), 1);
    }

    #[test]
    fn test_manual_orders_by_due_time() {
        let mut timer = ManualIntervalTimer::new();
        let log = Arc::new(std::sync::Mutex::new(Vec::new()));

        let slow = Arc::clone(&log);
        timer
            .on_tick(
                Duration::from_millis(30),
                Box::new(move || slow.lock().unwrap().push("slow")),
            )
            .unwrap();
        let fast = Arc::clone(&log);
        timer
            .on_tick(
                Duration::from_millis(20),
                Box::new(move || fast.lock().unwrap().push("fast")),
            )
            .unwrap();

        timer.advance(Duration::from_millis(60));
        assert_eq!(
            *log.lock().unwrap(),
            vec!["fast", "slow", "fast", "slow", "fast"]
        );
    }

    #[test]
    fn test_drop_joins_workers() {
        let (count, callback) = counter();
        {
            let mut timer = ThreadIntervalTimer::new();
            timer.on_tick(Duration::from_millis(1), callback).unwrap();
            thread::sleep(Duration::from_millis(5));
        }
        // The callback owned the only other handle; joining dropped it.
        assert_eq!(Arc::strong_count(&count), 1);
    }

    #[test]
    fn test_zero_interval_rejected() {
        let mut timer = ManualIntervalTimer::new();
        let (_, callback) = counter();
        assert!(matches!(
            timer.on_tick(Duration::ZERO, callback),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_thread_timer_ticks_and_stops() {
        let mut timer = ThreadIntervalTimer::new();
        let (count, callback) = counter();
        timer.on_tick(Duration::from_millis(5), callback).unwrap();

        let deadline = Instant::now() + Duration::from_secs(5);
        while count.load(Ordering::SeqCst) < 2 && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(1));
        }
        assert!(count.load(Ordering::SeqCst) >= 2);

        timer.stop();
        assert!(timer.is_stopped());
        assert!(timer.workers.is_empty());

        // Workers are joined, so no tick can land after stop returns.
        let settled = count.load(Ordering::SeqCst);
        thread::sleep(Duration::from_millis(20));
        assert_eq!(count.load(Ordering::SeqCst), settled);
        let (_, late) = counter();
        assert!(matches!(
            timer.on_tick(Duration::from_millis(5), late),
            Err(Error::Timer(_))
        ));
    }
}
