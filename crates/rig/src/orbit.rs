//! Time-driven pivot rotation.
//!
//! Angles are recomputed from absolute elapsed time every frame rather than
//! integrated from frame deltas, so the animation is independent of frame
//! rate and accumulates no drift.

use orbit_scene::{NodeKey, SceneGraph, SceneResult};

/// Default angular velocity in degrees per second.
pub const DEFAULT_SPEED_DEG_PER_SEC: f32 = 50.0;
/// Default lead of the look-ahead pivot in degrees.
pub const DEFAULT_PHASE_DEG: f32 = 10.0;

/// Yaw angle in `[0, 360)` degrees after `elapsed_secs` at `speed`.
pub fn orbit_angle(speed_deg_per_sec: f32, elapsed_secs: f32, phase_deg: f32) -> f32 {
    // f64 keeps precision when elapsed time grows large.
    let degrees = f64::from(speed_deg_per_sec) * f64::from(elapsed_secs) + f64::from(phase_deg);
    let wrapped = degrees.rem_euclid(360.0) as f32;
    // rem_euclid can round up to exactly 360 for tiny negative inputs.
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Pivot angles computed for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitAngles {
    /// Orbit pivot yaw in degrees
    pub orbit_deg: f32,
    /// Look-ahead pivot yaw in degrees
    pub look_ahead_deg: f32,
}

/// Rotates the orbit pivot and the look-ahead pivot at a shared speed.
#[derive(Clone, Debug)]
pub struct OrbitAnimator {
    orbit_pivot: NodeKey,
    look_ahead_pivot: NodeKey,
    speed_deg_per_sec: f32,
    phase_deg: f32,
}

impl OrbitAnimator {
    /// Animate the two pivots with the default speed and phase.
    pub fn new(orbit_pivot: NodeKey, look_ahead_pivot: NodeKey) -> Self {
        Self {
            orbit_pivot,
            look_ahead_pivot,
            speed_deg_per_sec: DEFAULT_SPEED_DEG_PER_SEC,
            phase_deg: DEFAULT_PHASE_DEG,
        }
    }

    /// Set the angular velocity in degrees per second.
    pub fn with_speed(mut self, deg_per_sec: f32) -> Self {
        self.speed_deg_per_sec = deg_per_sec;
        self
    }

    /// Set the look-ahead lead in degrees.
    pub fn with_phase(mut self, degrees: f32) -> Self {
        self.phase_deg = degrees;
        self
    }

    /// Angular velocity in degrees per second.
    pub fn speed(&self) -> f32 {
        self.speed_deg_per_sec
    }

    /// Look-ahead lead in degrees.
    pub fn phase(&self) -> f32 {
        self.phase_deg
    }

    /// Angles for `elapsed_secs`, without touching the graph.
    pub fn angles(&self, elapsed_secs: f32) -> OrbitAngles {
        OrbitAngles {
            orbit_deg: orbit_angle(self.speed_deg_per_sec, elapsed_secs, 0.0),
            look_ahead_deg: orbit_angle(self.speed_deg_per_sec, elapsed_secs, self.phase_deg),
        }
    }

    /// Set both pivot rotations for `elapsed_secs`.
    pub fn advance(&self, graph: &mut SceneGraph, elapsed_secs: f32) -> SceneResult<OrbitAngles> {
        let angles = self.angles(elapsed_secs);
        graph.set_yaw_degrees(self.orbit_pivot, angles.orbit_deg)?;
        graph.set_yaw_degrees(self.look_ahead_pivot, angles.look_ahead_deg)?;
        Ok(angles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use orbit_scene::Transform;

    const EPSILON: f32 = 1e-4;

    fn rig() -> (SceneGraph, OrbitAnimator, NodeKey) {
        let mut graph = SceneGraph::new();
        let pivot = graph.add_root(Transform::new());
        let child = graph
            .add_child(pivot, Transform::new().with_position(Vec3::new(3.0, 0.5, 0.0)))
            .unwrap();
        let look_ahead = graph.add_root(Transform::new());
        (graph, OrbitAnimator::new(pivot, look_ahead), child)
    }

    #[test]
    fn test_angle_formula() {
        let (mut graph, animator, _) = rig();
        let angles = animator.advance(&mut graph, 2.0).unwrap();
        assert!((angles.orbit_deg - 100.0).abs() < EPSILON);
        assert!((angles.look_ahead_deg - 110.0).abs() < EPSILON);
    }

    #[test]
    fn test_angle_wraps() {
        // 50 deg/s * 8 s = 400 -> 40
        assert!((orbit_angle(50.0, 8.0, 0.0) - 40.0).abs() < EPSILON);
        assert!((orbit_angle(50.0, 7.0, 10.0) - 0.0).abs() < EPSILON);
        assert!((orbit_angle(-50.0, 1.0, 0.0) - 310.0).abs() < EPSILON);
        let a = orbit_angle(50.0, 1.0e6, 0.0);
        assert!((0.0..360.0).contains(&a));
    }

    #[test]
    fn test_phase_offset_constant() {
        let (_, animator, _) = rig();
        for t in [0.0, 0.5, 3.3, 7.19, 100.0] {
            let a = animator.angles(t);
            let lead = (a.look_ahead_deg - a.orbit_deg).rem_euclid(360.0);
            assert!((lead - 10.0).abs() < 1e-2, "t = {t}: lead {lead}");
        }
    }

    #[test]
    fn test_advance_is_idempotent() {
        let (mut graph, animator, child) = rig();
        let first = animator.advance(&mut graph, 4.2).unwrap();
        let p1 = graph.world_position(child).unwrap();
        let second = animator.advance(&mut graph, 4.2).unwrap();
        let p2 = graph.world_position(child).unwrap();
        assert_eq!(first, second);
        assert_eq!(p1, p2);
    }

    #[test]
    fn test_advance_zero_keeps_offset() {
        let (mut graph, animator, child) = rig();
        animator.advance(&mut graph, 0.0).unwrap();
        let p = graph.world_position(child).unwrap();
        assert!(p.abs_diff_eq(Vec3::new(3.0, 0.5, 0.0), EPSILON));
    }

    #[test]
    fn test_quarter_turn() {
        // 90 degrees at the default speed takes 1.8 s.
        let (mut graph, animator, child) = rig();
        animator.advance(&mut graph, 1.8).unwrap();
        let p = graph.world_position(child).unwrap();
        assert!(
            p.abs_diff_eq(Vec3::new(0.0, 0.5, -3.0), EPSILON),
            "Expected (0, 0.5, -3), got {:?}",
            p
        );
    }
}
