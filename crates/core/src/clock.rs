//! Frame clock converting raw host timestamps into elapsed animation time.

/// Milliseconds to seconds.
const MS_TO_SECS: f64 = 0.001;

/// Elapsed-time clock fed by raw millisecond timestamps.
///
/// The first tick defines time zero. Elapsed seconds never decrease, even
/// when the timestamp source has coarse resolution or jitters backwards.
#[derive(Clone, Debug, Default)]
pub struct AnimationClock {
    first_ms: Option<f64>,
    last_ms: f64,
    elapsed_secs: f32,
}

impl AnimationClock {
    /// Create a clock that has not ticked yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the current raw timestamp and return elapsed seconds.
    ///
    /// The millisecond to second conversion happens here, once per frame.
    pub fn tick(&mut self, raw_ms: f64) -> f32 {
        if !raw_ms.is_finite() {
            return self.elapsed_secs;
        }
        let first = match self.first_ms {
            Some(first) => first,
            None => {
                self.first_ms = Some(raw_ms);
                self.last_ms = raw_ms;
                raw_ms
            }
        };
        let raw_ms = raw_ms.max(self.last_ms);
        self.last_ms = raw_ms;

        let elapsed = ((raw_ms - first) * MS_TO_SECS) as f32;
        self.elapsed_secs = self.elapsed_secs.max(elapsed);
        self.elapsed_secs
    }

    /// Elapsed seconds as of the last tick (0 before the first tick).
    pub fn elapsed_secs(&self) -> f32 {
        self.elapsed_secs
    }

    /// Last raw timestamp seen, after clamping.
    pub fn last_raw_ms(&self) -> Option<f64> {
        self.first_ms.map(|_| self.last_ms)
    }

    /// Whether the clock has received its first tick.
    pub fn has_started(&self) -> bool {
        self.first_ms.is_some()
    }
}
