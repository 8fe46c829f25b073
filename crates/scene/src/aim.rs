//! Aim validation shared by cameras and lights.

use glam::Vec3;

/// Minimum distance between an eye and the point it looks at.
pub const AIM_EPSILON: f32 = 1e-5;

/// A pose whose position and aim target coincide, so no look direction
/// exists. The rejected pose is carried for logging.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DegenerateAim {
    /// Requested eye position.
    pub position: Vec3,
    /// Requested aim target.
    pub target: Vec3,
}

/// Check that `position` and `target` are far enough apart to define a
/// look direction.
pub fn check_aim(position: Vec3, target: Vec3) -> Result<(), DegenerateAim> {
    if position.distance_squared(target) < AIM_EPSILON * AIM_EPSILON {
        Err(DegenerateAim { position, target })
    } else {
        Ok(())
    }
}
