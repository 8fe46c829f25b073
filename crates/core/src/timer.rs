//! High-resolution timer used as the host timestamp source.

use std::time::{Duration, Instant};

/// Source of raw frame timestamps, in milliseconds since an arbitrary epoch.
///
/// The epoch only has to stay fixed for the lifetime of the source;
/// [`AnimationClock`](crate::AnimationClock) rebases on the first tick.
pub trait TimeSource {
    /// Current timestamp in milliseconds.
    fn now_ms(&self) -> f64;
}

/// High-resolution timer for measuring elapsed time.
#[derive(Debug)]
pub struct Timer {
    start: Instant,
}

impl Timer {
    /// Create a new timer, starting from now.
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Get the total elapsed time since the timer was created.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Get the elapsed time in seconds since the timer was created.
    pub fn elapsed_secs(&self) -> f32 {
        self.elapsed().as_secs_f32()
    }

    /// Reset the timer to the current time.
    pub fn reset(&mut self) {
        self.start = Instant::now();
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for Timer {
    fn now_ms(&self) -> f64 {
        self.elapsed().as_secs_f64() * 1000.0
    }
}
