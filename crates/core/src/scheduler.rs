//! Cooperative frame scheduler.
//!
//! The scheduler runs one frame callback per display refresh signal. The
//! refresh signal itself belongs to the host (a window system, a renderer,
//! or a test script) and is modelled by [`RefreshSource`]. Between ticks
//! the loop is suspended inside the source; nothing inside a tick blocks.

use std::ops::ControlFlow;
use std::thread;
use std::time::Duration;

use crate::clock::AnimationClock;
use crate::timer::{TimeSource, Timer};

/// Per-frame callback invoked with elapsed seconds since the first tick.
pub trait FrameHandler {
    /// Run one frame. Returning `Break` stops scheduling further ticks.
    fn on_frame(&mut self, elapsed_secs: f32) -> ControlFlow<()>;
}

impl<F> FrameHandler for F
where
    F: FnMut(f32) -> ControlFlow<()>,
{
    fn on_frame(&mut self, elapsed_secs: f32) -> ControlFlow<()> {
        self(elapsed_secs)
    }
}

/// Host-owned display refresh signal.
pub trait RefreshSource {
    /// Wait for the next refresh and return its timestamp in milliseconds,
    /// or `None` when the host will not refresh any more.
    fn next_refresh(&mut self) -> Option<f64>;
}

/// Frame loop state: clock, run flag and frame counter.
#[derive(Debug)]
pub struct FrameScheduler {
    clock: AnimationClock,
    running: bool,
    frames: u64,
}

impl Default for FrameScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameScheduler {
    /// Create a scheduler that will run on the next refresh signal.
    pub fn new() -> Self {
        Self {
            clock: AnimationClock::new(),
            running: true,
            frames: 0,
        }
    }

    /// Handle one refresh signal.
    ///
    /// Returns `true` when the next tick is scheduled. After `stop()` (or a
    /// handler `Break`) further signals are ignored.
    pub fn on_refresh<H: FrameHandler + ?Sized>(&mut self, raw_ms: f64, handler: &mut H) -> bool {
        if !self.running {
            return false;
        }

        let elapsed = self.clock.tick(raw_ms);
        self.frames += 1;

        if handler.on_frame(elapsed).is_break() {
            tracing::debug!(frame = self.frames, elapsed, "frame handler requested stop");
            self.running = false;
        }
        self.running
    }

    /// Drive frames from `source` until it ends or the loop is stopped.
    ///
    /// Returns the number of frames run by this call.
    pub fn run<S, H>(&mut self, source: &mut S, handler: &mut H) -> u64
    where
        S: RefreshSource + ?Sized,
        H: FrameHandler + ?Sized,
    {
        let start = self.frames;
        while self.running {
            let Some(raw_ms) = source.next_refresh() else {
                tracing::debug!("refresh source ended");
                break;
            };
            self.on_refresh(raw_ms, handler);
        }
        self.frames - start
    }

    /// Stop scheduling further ticks. An in-flight tick is not interrupted.
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Whether the next refresh signal will run a frame.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Total frames run.
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    /// Elapsed seconds as of the last frame.
    pub fn elapsed_secs(&self) -> f32 {
        self.clock.elapsed_secs()
    }
}

/// Refresh source that paces frames at a fixed rate.
///
/// Stands in for a display's vsync when no window system is present. It
/// sleeps until the next deadline, and deadlines are computed from the
/// first frame so oversleeping does not accumulate drift.
#[derive(Debug)]
pub struct FixedRateRefresh {
    timer: Timer,
    period: Duration,
    frame_limit: Option<u64>,
    issued: u64,
}

impl FixedRateRefresh {
    /// Default refresh rate in Hz.
    pub const DEFAULT_RATE_HZ: u32 = 60;

    /// Create a source refreshing `rate_hz` times per second. A rate of 0
    /// falls back to [`Self::DEFAULT_RATE_HZ`].
    pub fn new(rate_hz: u32) -> Self {
        let rate = if rate_hz == 0 {
            Self::DEFAULT_RATE_HZ
        } else {
            rate_hz
        };
        Self {
            timer: Timer::new(),
            period: Duration::from_secs(1) / rate,
            frame_limit: None,
            issued: 0,
        }
    }

    /// End the source after `frames` refresh signals.
    pub fn with_frame_limit(mut self, frames: u64) -> Self {
        self.frame_limit = Some(frames);
        self
    }

    /// Time between refresh signals.
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Offset of refresh `frame` from the first one.
    fn deadline(&self, frame: u64) -> Duration {
        Duration::from_secs_f64(self.period.as_secs_f64() * frame as f64)
    }
}

impl RefreshSource for FixedRateRefresh {
    fn next_refresh(&mut self) -> Option<f64> {
        if self.frame_limit.is_some_and(|limit| self.issued >= limit) {
            return None;
        }

        if self.issued == 0 {
            self.timer.reset();
        } else {
            let deadline = self.deadline(self.issued);
            let now = self.timer.elapsed();
            if deadline > now {
                thread::sleep(deadline - now);
            }
        }

        self.issued += 1;
        Some(self.timer.now_ms())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Scripted(std::vec::IntoIter<f64>);

    impl RefreshSource for Scripted {
        fn next_refresh(&mut self) -> Option<f64> {
            self.0.next()
        }
    }

    #[test]
    fn test_one_callback_per_refresh() {
        let mut scheduler = FrameScheduler::new();
        let mut seen = Vec::new();
        let mut handler = |t: f32| -> ControlFlow<()> {
            seen.push(t);
            ControlFlow::Continue(())
        };
        let mut source = Scripted(vec![1000.0, 1016.0, 1032.0].into_iter());

        let frames = scheduler.run(&mut source, &mut handler);

        assert_eq!(frames, 3);
        assert_eq!(seen.len(), 3);
        assert_eq!(seen[0], 0.0);
        assert!((seen[2] - 0.032).abs() < 1e-6);
    }

    #[test]
    fn test_handler_break_stops_loop() {
        let mut scheduler = FrameScheduler::new();
        let mut calls = 0;
        let mut handler = |_t: f32| -> ControlFlow<()> {
            calls += 1;
            if calls == 2 {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        };
        let mut source = Scripted(vec![0.0, 16.0, 32.0, 48.0].into_iter());

        assert_eq!(scheduler.run(&mut source, &mut handler), 2);
        assert!(!scheduler.is_running());
    }

    #[test]
    fn test_stop_ignores_later_signals() {
        let mut scheduler = FrameScheduler::new();
        let mut calls = 0;
        let mut handler = |_t: f32| -> ControlFlow<()> {
            calls += 1;
            ControlFlow::Continue(())
        };

        assert!(scheduler.on_refresh(0.0, &mut handler));
        scheduler.stop();
        assert!(!scheduler.on_refresh(16.0, &mut handler));
        assert_eq!(calls, 1);
        assert_eq!(scheduler.frame_count(), 1);
    }

    #[test]
    fn test_fixed_rate_frame_limit() {
        let mut source = FixedRateRefresh::new(1000).with_frame_limit(3);
        let a = source.next_refresh().unwrap();
        let b = source.next_refresh().unwrap();
        let c = source.next_refresh().unwrap();
        assert!(source.next_refresh().is_none());
        assert!(a <= b && b <= c);
        assert!(c - a >= 2.0 - 0.5);
    }

    #[test]
    fn test_deadline_past_u32_frames() {
        let source = FixedRateRefresh::new(60);
        let wrap = u64::from(u32::MAX) + 1;
        assert!(source.deadline(wrap) > source.deadline(wrap - 1));
        assert!(source.deadline(wrap) > source.deadline(1));
        let expected = source.period().as_secs_f64() * wrap as f64;
        assert!((source.deadline(wrap).as_secs_f64() - expected).abs() < 1e-3);
    }

    #[test]
    fn test_fixed_rate_zero_uses_default() {
        let source = FixedRateRefresh::new(0);
        assert_eq!(
            source.period(),
            Duration::from_secs(1) / FixedRateRefresh::DEFAULT_RATE_HZ
        );
    }
}
