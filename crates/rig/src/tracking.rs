//! Camera and light aiming from world positions of tracked nodes.

use std::fmt;

use orbit_scene::{Camera, DegenerateAim, SceneGraph, SceneResult, TrackedLight, check_aim};

use crate::config::{CameraPose, RigConfig};
use crate::mode::Mode;
use crate::setup::RigNodes;

/// When the light follows the orbiting object.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LightTracking {
    /// Every frame, whatever the camera mode.
    #[default]
    Always,
    /// Only while the camera is in [`Mode::Tracking`]; frozen otherwise.
    FollowMode,
    /// Never; the light keeps its configured pose.
    Off,
}

impl LightTracking {
    fn follows(self, mode: Mode) -> bool {
        match self {
            Self::Always => true,
            Self::FollowMode => mode == Mode::Tracking,
            Self::Off => false,
        }
    }
}

/// What a degenerate aim was rejected for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AimSubject {
    /// The camera pose
    Camera,
    /// The light position or target
    Light,
}

impl fmt::Display for AimSubject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Camera => f.write_str("camera"),
            Self::Light => f.write_str("light"),
        }
    }
}

/// Non-fatal warning: a pose was rejected and the previous one kept.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AimWarning {
    /// What was being aimed
    pub subject: AimSubject,
    /// The pose that was refused
    pub rejected: DegenerateAim,
}

/// Writes camera and light state from the tracked nodes' world positions.
#[derive(Clone, Debug)]
pub struct TrackingController {
    camera: Camera,
    light: TrackedLight,
    fixed_pose: CameraPose,
    camera_tracking: bool,
    light_tracking: LightTracking,
}

impl TrackingController {
    /// Controller that tracks with the camera and always moves the light.
    /// `fixed_pose` is restored in [`Mode::Fixed`].
    pub fn new(camera: Camera, light: TrackedLight, fixed_pose: CameraPose) -> Self {
        Self {
            camera,
            light,
            fixed_pose,
            camera_tracking: true,
            light_tracking: LightTracking::default(),
        }
    }

    /// Controller with camera and light initialised from `config`.
    ///
    /// `config` is expected to be validated; a degenerate start pose falls
    /// back to the camera defaults.
    pub fn from_config(config: &RigConfig) -> Self {
        let start = config.camera_start;
        let mut camera = Camera::looking_at(start.position, start.target).unwrap_or_default();
        camera.set_perspective(
            config.fov_y_degrees.to_radians(),
            camera.projection.aspect,
            config.near,
            config.far,
        );

        let mut light = TrackedLight::new(
            config.light_kind,
            config.light_position,
            config.light_target,
        );
        light.tracking = config.light_tracking != LightTracking::Off;

        Self::new(camera, light, start)
            .with_camera_tracking(config.tracking_enabled)
            .with_light_tracking(config.light_tracking)
    }

    /// When off, the camera is left alone every frame.
    pub fn with_camera_tracking(mut self, enabled: bool) -> Self {
        self.camera_tracking = enabled;
        self
    }

    /// Set when the light follows the orbiting object.
    pub fn with_light_tracking(mut self, policy: LightTracking) -> Self {
        self.light_tracking = policy;
        self.light.tracking = policy != LightTracking::Off;
        self
    }

    /// Current camera state.
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Mutable camera, for viewport changes.
    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    /// Current light state.
    pub fn light(&self) -> &TrackedLight {
        &self.light
    }

    /// Mutable light, for clearing the helper flag.
    pub fn light_mut(&mut self) -> &mut TrackedLight {
        &mut self.light
    }

    /// Active light tracking policy.
    pub fn light_tracking(&self) -> LightTracking {
        self.light_tracking
    }

    /// Aim camera and light for this frame. Rejected poses are pushed onto
    /// `warnings`, one per occurrence, and logged.
    pub fn update(
        &mut self,
        graph: &SceneGraph,
        nodes: &RigNodes,
        mode: Mode,
        warnings: &mut Vec<AimWarning>,
    ) -> SceneResult<()> {
        let tracked = graph.world_position(nodes.orbit_object)?;

        if self.camera_tracking {
            let result = match mode {
                Mode::Tracking => {
                    let ahead = graph.world_position(nodes.look_ahead_target)?;
                    // An object on top of the camera gives no direction to follow.
                    check_aim(self.camera.position(), tracked)
                        .and_then(|()| self.camera.set_pose(tracked, ahead))
                }
                Mode::Fixed => self
                    .camera
                    .set_pose(self.fixed_pose.position, self.fixed_pose.target),
            };
            if let Err(rejected) = result {
                warn(warnings, AimSubject::Camera, rejected);
            }
        }

        if self.light.tracking && self.light_tracking.follows(mode) {
            let result = if self.light.kind.is_aimed() {
                self.light.set_target(tracked)
            } else {
                self.light.set_position(tracked)
            };
            if let Err(rejected) = result {
                warn(warnings, AimSubject::Light, rejected);
            }
        }

        Ok(())
    }
}

fn warn(warnings: &mut Vec<AimWarning>, subject: AimSubject, rejected: DegenerateAim) {
    tracing::warn!(
        %subject,
        position = ?rejected.position,
        target = ?rejected.target,
        "degenerate aim, keeping previous pose"
    );
    warnings.push(AimWarning { subject, rejected });
}
