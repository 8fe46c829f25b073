//! Scene construction and resolution of the nodes the rig drives.

use glam::Quat;

use orbit_scene::{NodeKey, SceneGraph, Transform};

use crate::config::RigConfig;
use crate::error::{RigError, RigResult};

/// Registered name of the pivot carrying the orbiting object.
pub const ORBIT_PIVOT: &str = "orbitPivot";
/// Registered name of the pivot carrying the look-ahead target.
pub const LOOK_AHEAD_PIVOT: &str = "lookAheadPivot";

/// Keys of the four nodes the rig animates and reads back.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RigNodes {
    /// Pivot carrying the orbiting object
    pub orbit_pivot: NodeKey,
    /// Object the camera rides and the light follows
    pub orbit_object: NodeKey,
    /// Pivot leading the orbit by the look-ahead phase
    pub look_ahead_pivot: NodeKey,
    /// Point the camera aims at while tracking
    pub look_ahead_target: NodeKey,
}

impl RigNodes {
    /// Find the rig nodes by name; the tracked nodes are each pivot's first
    /// child.
    pub fn resolve(graph: &SceneGraph) -> RigResult<Self> {
        let (orbit_pivot, orbit_object) = pivot_and_child(graph, ORBIT_PIVOT)?;
        let (look_ahead_pivot, look_ahead_target) = pivot_and_child(graph, LOOK_AHEAD_PIVOT)?;
        Ok(Self {
            orbit_pivot,
            orbit_object,
            look_ahead_pivot,
            look_ahead_target,
        })
    }
}

fn pivot_and_child(graph: &SceneGraph, name: &str) -> RigResult<(NodeKey, NodeKey)> {
    let pivot = graph
        .lookup(name)
        .ok_or_else(|| RigError::MissingNode(name.to_owned()))?;
    let child = graph
        .node(pivot)
        .and_then(|node| node.first_child())
        .ok_or_else(|| RigError::EmptyPivot(name.to_owned()))?;
    Ok((pivot, child))
}

/// Build the demo scene: ground, center sphere, a static ring of pivots,
/// and the two named pivots the rig animates.
pub fn build_scene(config: &RigConfig) -> RigResult<(SceneGraph, RigNodes)> {
    let mut graph = SceneGraph::new();

    // Ground plane and hemisphere are authored in XY; tip them into XZ.
    let upright = Transform::new().with_rotation(Quat::from_rotation_x(-90f32.to_radians()));
    graph.add_named_root("ground", upright)?;
    graph.add_named_root("centerSphere", upright)?;

    let offset = Transform::new().with_position(config.orbit_offset);
    if config.ring_count > 0 {
        let step = 360.0 / config.ring_count as f32;
        for i in 0..config.ring_count {
            let pivot = graph.add_root(Transform::new().with_yaw_degrees(step * i as f32));
            graph.add_child(pivot, offset)?;
        }
    }

    let orbit_pivot = graph.add_named_root(ORBIT_PIVOT, Transform::new())?;
    graph.add_named_child(orbit_pivot, "orbitObject", offset)?;

    let look_ahead_pivot = graph.add_named_root(LOOK_AHEAD_PIVOT, Transform::new())?;
    graph.add_named_child(look_ahead_pivot, "lookAheadTarget", offset)?;

    let nodes = RigNodes::resolve(&graph)?;
    tracing::debug!(
        nodes = graph.len(),
        ring = config.ring_count,
        "scene built"
    );
    Ok((graph, nodes))
}
