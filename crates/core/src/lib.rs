//! Core utilities for the orbit rig.
//!
//! This crate provides foundational types and utilities used across the rig:
//! - Error types and result aliases
//! - Logging initialization
//! - Timer and frame clock
//! - Frame scheduler and interval timers

mod clock;
mod error;
mod interval;
mod logging;
mod scheduler;
mod timer;

pub use clock::AnimationClock;
pub use error::{Error, Result};
pub use interval::{IntervalTimer, ManualIntervalTimer, ThreadIntervalTimer, TickCallback};
pub use logging::{DEFAULT_FILTER, init_logging};
pub use scheduler::{FixedRateRefresh, FrameHandler, FrameScheduler, RefreshSource};
pub use timer::{TimeSource, Timer};
