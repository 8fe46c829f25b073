//! Configuration for the orbit rig.
//!
//! One [`RigConfig`] covers every scene variant: camera tracking on or
//! off, the light kind, and the timing constants.

use std::time::Duration;

use glam::Vec3;

use orbit_core::{Error, Result};
use orbit_scene::{LightKind, check_aim};

use crate::tracking::LightTracking;

/// A camera position and the point it looks at.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPose {
    /// Eye position in world space
    pub position: Vec3,
    /// Aim target in world space
    pub target: Vec3,
}

impl CameraPose {
    /// Create a pose at `position` looking at `target`.
    pub fn new(position: Vec3, target: Vec3) -> Self {
        Self { position, target }
    }
}

impl Default for CameraPose {
    fn default() -> Self {
        Self {
            position: Vec3::new(7.0, 7.0, 0.0),
            target: Vec3::ZERO,
        }
    }
}

/// Settings for building an [`OrbitRig`](crate::OrbitRig).
///
/// Defaults reproduce the demo scene. Setters consume and return the
/// config; call [`validate`](Self::validate) (or let the rig do it) before
/// use.
#[derive(Clone, Debug, PartialEq)]
pub struct RigConfig {
    /// Start pose, also used as the fixed framing pose.
    pub camera_start: CameraPose,
    /// Vertical field of view in degrees
    pub fov_y_degrees: f32,
    /// Near clip distance
    pub near: f32,
    /// Far clip distance
    pub far: f32,
    /// Kind of the tracked light
    pub light_kind: LightKind,
    /// Initial light position
    pub light_position: Vec3,
    /// Initial light aim target
    pub light_target: Vec3,
    /// When the light follows the orbiting object
    pub light_tracking: LightTracking,
    /// Whether the camera alternates between tracking and fixed framing.
    /// When off the camera stays at `camera_start`.
    pub tracking_enabled: bool,
    /// Period of the tracking / fixed toggle.
    pub toggle_interval: Duration,
    /// Angular velocity of both pivots.
    pub orbit_speed_deg_per_sec: f32,
    /// Lead of the look-ahead pivot over the orbit pivot, in degrees.
    pub look_ahead_phase_deg: f32,
    /// Offset of the orbiting object from its pivot.
    pub orbit_offset: Vec3,
    /// Number of static decorative pivots around the center.
    pub ring_count: u32,
}

impl Default for RigConfig {
    fn default() -> Self {
        Self {
            camera_start: CameraPose::default(),
            fov_y_degrees: 75.0,
            near: 0.1,
            far: 100.0,
            light_kind: LightKind::spot_degrees(30.0),
            light_position: Vec3::new(0.0, 5.0, 0.0),
            light_target: Vec3::ZERO,
            light_tracking: LightTracking::Always,
            tracking_enabled: true,
            toggle_interval: Duration::from_millis(2000),
            orbit_speed_deg_per_sec: 50.0,
            look_ahead_phase_deg: 10.0,
            orbit_offset: Vec3::new(3.0, 0.5, 0.0),
            ring_count: 8,
        }
    }
}

impl RigConfig {
    /// Create a config with the demo defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the start pose, also used for fixed framing.
    pub fn camera_start(mut self, pose: CameraPose) -> Self {
        self.camera_start = pose;
        self
    }

    /// Set the light kind.
    pub fn light_kind(mut self, kind: LightKind) -> Self {
        self.light_kind = kind;
        self
    }

    /// Set the initial light position and aim target.
    pub fn light_pose(mut self, position: Vec3, target: Vec3) -> Self {
        self.light_position = position;
        self.light_target = target;
        self
    }

    /// Set when the light follows the orbiting object.
    pub fn light_tracking(mut self, policy: LightTracking) -> Self {
        self.light_tracking = policy;
        self
    }

    /// Enable or disable camera tracking.
    pub fn tracking_enabled(mut self, enabled: bool) -> Self {
        self.tracking_enabled = enabled;
        self
    }

    /// Set the mode toggle period.
    pub fn toggle_interval(mut self, interval: Duration) -> Self {
        self.toggle_interval = interval;
        self
    }

    /// Set the pivot angular velocity in degrees per second.
    pub fn orbit_speed(mut self, deg_per_sec: f32) -> Self {
        self.orbit_speed_deg_per_sec = deg_per_sec;
        self
    }

    /// Set the look-ahead lead in degrees.
    pub fn look_ahead_phase(mut self, degrees: f32) -> Self {
        self.look_ahead_phase_deg = degrees;
        self
    }

    /// Set the orbiting object's offset from its pivot.
    pub fn orbit_offset(mut self, offset: Vec3) -> Self {
        self.orbit_offset = offset;
        self
    }

    /// Set the number of decorative ring pivots.
    pub fn ring_count(mut self, count: u32) -> Self {
        self.ring_count = count;
        self
    }

    /// Set the field of view (degrees) and clip range.
    pub fn projection(mut self, fov_y_degrees: f32, near: f32, far: f32) -> Self {
        self.fov_y_degrees = fov_y_degrees;
        self.near = near;
        self.far = far;
        self
    }

    /// Check the values before any scene is built.
    pub fn validate(&self) -> Result<()> {
        if self.toggle_interval.is_zero() {
            return Err(Error::Config("toggle interval must be greater than zero".into()));
        }
        if !self.orbit_speed_deg_per_sec.is_finite() {
            return Err(Error::Config(format!(
                "orbit speed must be finite, got {}",
                self.orbit_speed_deg_per_sec
            )));
        }
        if !self.look_ahead_phase_deg.is_finite() {
            return Err(Error::Config("look-ahead phase must be finite".into()));
        }
        if !(self.fov_y_degrees > 0.0 && self.fov_y_degrees < 180.0) {
            return Err(Error::Config(format!(
                "field of view must be in (0, 180) degrees, got {}",
                self.fov_y_degrees
            )));
        }
        if !(self.near > 0.0 && self.far > self.near) {
            return Err(Error::Config(format!(
                "clip range must satisfy 0 < near < far, got {}..{}",
                self.near, self.far
            )));
        }
        if check_aim(self.camera_start.position, self.camera_start.target).is_err() {
            return Err(Error::Config(
                "camera start position and target coincide".into(),
            ));
        }
        if self.light_kind.is_aimed() && check_aim(self.light_position, self.light_target).is_err()
        {
            return Err(Error::Config("light position and target coincide".into()));
        }
        Ok(())
    }
}
