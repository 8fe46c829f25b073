//! Local transform of a scene node.
//!
//! This module provides the [`Transform`] struct for representing position,
//! rotation, and scale relative to a parent node. Hierarchy lives in
//! [`SceneGraph`](crate::SceneGraph), which composes these local transforms
//! into world matrices.
//!
//! # Rotation convention
//!
//! Right-handed, +Y up. A positive yaw rotates +X towards -Z, so a point at
//! (3, 0.5, 0) yawed by 90 degrees ends at (0, 0.5, -3).
//!
//! # Example
//!
//! ```
//! use orbit_scene::Transform;
//! use glam::Vec3;
//!
//! let t = Transform::new()
//!     .with_position(Vec3::new(3.0, 0.5, 0.0))
//!     .with_yaw_degrees(90.0);
//! let p = t.local_matrix().transform_point3(Vec3::X);
//! assert!(p.abs_diff_eq(Vec3::new(3.0, 0.5, -1.0), 1e-5));
//! ```

use glam::{Mat4, Quat, Vec3};

/// A transform representing position, rotation, and scale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    /// Position in local space (relative to parent if any)
    pub position: Vec3,
    /// Rotation as a quaternion
    pub rotation: Quat,
    /// Scale factor
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// Create a new transform at the origin.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a transform from all three components.
    pub fn from_parts(position: Vec3, rotation: Quat, scale: Vec3) -> Self {
        Self {
            position,
            rotation,
            scale,
        }
    }

    /// Create a transform with the given position.
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Create a transform with the given rotation.
    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    /// Create a transform rotated `degrees` about +Y.
    pub fn with_yaw_degrees(mut self, degrees: f32) -> Self {
        self.rotation = yaw_degrees(degrees);
        self
    }

    /// Create a transform with the given scale.
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Replace position, rotation and scale at once.
    pub fn set(&mut self, position: Vec3, rotation: Quat, scale: Vec3) {
        self.position = position;
        self.rotation = rotation;
        self.scale = scale;
    }

    /// Set the rotation to `degrees` about +Y, keeping position and scale.
    pub fn set_yaw_degrees(&mut self, degrees: f32) {
        self.rotation = yaw_degrees(degrees);
    }

    /// Get the local transformation matrix.
    ///
    /// Scale is applied first, then rotation, then translation.
    pub fn local_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }
}

/// Rotation of `degrees` about +Y.
pub fn yaw_degrees(degrees: f32) -> Quat {
    Quat::from_rotation_y(degrees.to_radians())
}
