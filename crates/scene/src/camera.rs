//! Camera state consumed by the external renderer.

use glam::{Mat4, Vec3};

use crate::aim::{DegenerateAim, check_aim};

/// Perspective projection settings.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Perspective {
    /// Vertical field of view in radians
    pub fov_y: f32,
    /// Width over height
    pub aspect: f32,
    /// Near clip distance
    pub near: f32,
    /// Far clip distance
    pub far: f32,
}

impl Default for Perspective {
    fn default() -> Self {
        Self {
            fov_y: 75.0_f32.to_radians(),
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

/// A camera defined by an eye position and an aim target.
///
/// Position and target never coincide: setters reject such poses and keep
/// the previous one.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    position: Vec3,
    target: Vec3,
    /// Projection settings
    pub projection: Perspective,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(7.0, 7.0, 0.0),
            target: Vec3::ZERO,
            projection: Perspective::default(),
        }
    }
}

impl Camera {
    /// Create a new camera with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a camera at `position` looking at `target`.
    pub fn looking_at(position: Vec3, target: Vec3) -> Result<Self, DegenerateAim> {
        check_aim(position, target)?;
        Ok(Self {
            position,
            target,
            ..Self::default()
        })
    }

    /// Camera position in world space.
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Aim target in world space.
    pub fn target(&self) -> Vec3 {
        self.target
    }

    /// Move the camera and aim it in one step.
    ///
    /// A degenerate pose is rejected and the previous pose is kept.
    pub fn set_pose(&mut self, position: Vec3, target: Vec3) -> Result<(), DegenerateAim> {
        check_aim(position, target)?;
        self.position = position;
        self.target = target;
        Ok(())
    }

    /// Aim at `target` from the current position.
    pub fn look_at(&mut self, target: Vec3) -> Result<(), DegenerateAim> {
        self.set_pose(self.position, target)
    }

    /// Set the perspective projection. `fov_y` is in radians.
    pub fn set_perspective(&mut self, fov_y: f32, aspect: f32, near: f32, far: f32) {
        self.projection = Perspective {
            fov_y,
            aspect,
            near,
            far,
        };
    }

    /// Update the aspect ratio.
    pub fn set_aspect(&mut self, aspect: f32) {
        self.projection.aspect = aspect;
    }

    /// Update the aspect ratio from a viewport size. A zero-sized viewport
    /// (minimized window) leaves the aspect unchanged.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.set_aspect(width as f32 / height as f32);
    }

    /// Get the view matrix.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up_hint())
    }

    /// Get the projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        let p = &self.projection;
        Mat4::perspective_rh(p.fov_y, p.aspect, p.near, p.far)
    }

    /// Get the view-projection matrix.
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Get the forward direction vector.
    pub fn forward(&self) -> Vec3 {
        (self.target - self.position).normalize()
    }

    /// +Y, or +Z when looking straight up or down.
    fn up_hint(&self) -> Vec3 {
        if self.forward().cross(Vec3::Y).length_squared() < 1e-8 {
            Vec3::Z
        } else {
            Vec3::Y
        }
    }
}
