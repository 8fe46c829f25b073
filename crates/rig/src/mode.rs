//! Tracking / fixed-framing mode toggled on a wall-clock interval.
//!
//! The flag is an atomic so the toggling timer may live on another thread.
//! Readers use `Acquire`, the toggle uses `AcqRel`.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use orbit_core::{IntervalTimer, Result};

/// Camera behavior mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Camera rides the orbiting object and looks ahead.
    Tracking,
    /// Camera holds the fixed framing pose.
    Fixed,
}

impl Mode {
    fn from_flag(tracking: bool) -> Self {
        if tracking { Self::Tracking } else { Self::Fixed }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tracking => f.write_str("tracking"),
            Self::Fixed => f.write_str("fixed"),
        }
    }
}

/// Shared mode flag, flipped every `interval` once attached to a timer.
#[derive(Clone, Debug)]
pub struct ModeFlag {
    tracking: Arc<AtomicBool>,
    interval: Duration,
}

impl ModeFlag {
    /// Default toggle interval.
    pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(2000);

    /// Create a flag in [`Mode::Tracking`].
    pub fn new(interval: Duration) -> Self {
        Self {
            tracking: Arc::new(AtomicBool::new(true)),
            interval,
        }
    }

    /// Current mode.
    pub fn mode(&self) -> Mode {
        Mode::from_flag(self.is_tracking())
    }

    /// Whether the camera should track the object.
    pub fn is_tracking(&self) -> bool {
        self.tracking.load(Ordering::Acquire)
    }

    /// Toggle period.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Flip the mode and return the new one.
    pub fn toggle(&self) -> Mode {
        let was_tracking = self.tracking.fetch_xor(true, Ordering::AcqRel);
        Mode::from_flag(!was_tracking)
    }

    /// Register the periodic flip on `timer`.
    pub fn attach<T: IntervalTimer + ?Sized>(&self, timer: &mut T) -> Result<()> {
        let flag = self.clone();
        timer.on_tick(
            self.interval,
            Box::new(move || {
                let mode = flag.toggle();
                tracing::info!(%mode, "camera mode toggled");
            }),
        )
    }
}

impl Default for ModeFlag {
    fn default() -> Self {
        Self::new(Self::DEFAULT_INTERVAL)
    }
}
