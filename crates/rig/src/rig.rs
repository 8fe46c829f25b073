//! The assembled rig: scene graph, animator, mode flag and controller.
//!
//! [`OrbitRig::on_frame`] is the per-frame entry point. It runs the full
//! update sequence and leaves [`camera`](OrbitRig::camera) and
//! [`light`](OrbitRig::light) ready for the renderer.

use std::ops::ControlFlow;

use orbit_core::{FrameHandler, IntervalTimer};
use orbit_scene::{Camera, SceneGraph, TrackedLight};

use crate::config::RigConfig;
use crate::error::RigResult;
use crate::mode::{Mode, ModeFlag};
use crate::orbit::{OrbitAngles, OrbitAnimator};
use crate::setup::{RigNodes, build_scene};
use crate::tracking::{AimWarning, TrackingController};

/// Outcome of one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameReport {
    /// Elapsed time the frame was computed for
    pub elapsed_secs: f32,
    /// Mode observed at the start of the frame
    pub mode: Mode,
    /// Pivot angles applied
    pub angles: OrbitAngles,
    /// Poses rejected this frame
    pub warnings: Vec<AimWarning>,
}

/// Scene graph animation and tracking controller.
#[derive(Debug)]
pub struct OrbitRig {
    graph: SceneGraph,
    nodes: RigNodes,
    animator: OrbitAnimator,
    controller: TrackingController,
    mode: ModeFlag,
    last_report: Option<FrameReport>,
}

impl OrbitRig {
    /// Validate `config` and build the demo scene around the rig.
    pub fn new(config: &RigConfig) -> RigResult<Self> {
        config.validate()?;
        let (graph, nodes) = build_scene(config)?;
        Ok(Self::assemble(config, graph, nodes))
    }

    /// Drive an existing graph. It must contain the named orbit and
    /// look-ahead pivots, each with a child.
    pub fn with_graph(config: &RigConfig, graph: SceneGraph) -> RigResult<Self> {
        config.validate()?;
        let nodes = RigNodes::resolve(&graph)?;
        Ok(Self::assemble(config, graph, nodes))
    }

    fn assemble(config: &RigConfig, graph: SceneGraph, nodes: RigNodes) -> Self {
        let animator = OrbitAnimator::new(nodes.orbit_pivot, nodes.look_ahead_pivot)
            .with_speed(config.orbit_speed_deg_per_sec)
            .with_phase(config.look_ahead_phase_deg);

        tracing::info!(
            light = ?config.light_kind,
            tracking = config.tracking_enabled,
            interval_ms = config.toggle_interval.as_millis() as u64,
            speed = config.orbit_speed_deg_per_sec,
            "orbit rig ready"
        );

        Self {
            graph,
            nodes,
            animator,
            controller: TrackingController::from_config(config),
            mode: ModeFlag::new(config.toggle_interval),
            last_report: None,
        }
    }

    /// Register the mode toggle on `timer`. Without this the rig stays in
    /// [`Mode::Tracking`].
    pub fn attach_mode_timer<T: IntervalTimer + ?Sized>(&self, timer: &mut T) -> RigResult<()> {
        self.mode.attach(timer)?;
        Ok(())
    }

    /// Run one frame: animate pivots, resolve world positions, aim camera
    /// and light. Never fails; problems are logged and the last good state
    /// is kept.
    pub fn on_frame(&mut self, elapsed_secs: f32) -> &FrameReport {
        let mode = self.mode.mode();
        let mut warnings = Vec::new();

        let angles = match self.animator.advance(&mut self.graph, elapsed_secs) {
            Ok(angles) => angles,
            Err(e) => {
                tracing::error!(error = %e, "orbit update failed");
                self.animator.angles(elapsed_secs)
            }
        };

        if let Err(e) = self
            .controller
            .update(&self.graph, &self.nodes, mode, &mut warnings)
        {
            tracing::error!(error = %e, "tracking update failed");
        }

        tracing::trace!(elapsed_secs, %mode, orbit = angles.orbit_deg, "frame");
        self.last_report.insert(FrameReport {
            elapsed_secs,
            mode,
            angles,
            warnings,
        })
    }

    /// Forward a viewport change to the camera. Animation state and the
    /// mode timer are unaffected.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.controller.camera_mut().set_viewport(width, height);
    }

    /// Camera state for the renderer.
    pub fn camera(&self) -> &Camera {
        self.controller.camera()
    }

    /// Light state for the renderer.
    pub fn light(&self) -> &TrackedLight {
        self.controller.light()
    }

    /// Read and clear the light helper's dirty flag.
    pub fn take_light_helper_dirty(&mut self) -> bool {
        self.controller.light_mut().take_helper_dirty()
    }

    /// The animated scene graph.
    pub fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    /// Keys of the pivots and tracked nodes.
    pub fn nodes(&self) -> &RigNodes {
        &self.nodes
    }

    /// Current camera mode.
    pub fn mode(&self) -> Mode {
        self.mode.mode()
    }

    /// Handle to the mode flag, for hosts driving the toggle themselves.
    pub fn mode_flag(&self) -> &ModeFlag {
        &self.mode
    }

    /// Report of the most recent frame, `None` before the first.
    pub fn last_report(&self) -> Option<&FrameReport> {
        self.last_report.as_ref()
    }
}

impl FrameHandler for OrbitRig {
    fn on_frame(&mut self, elapsed_secs: f32) -> ControlFlow<()> {
        OrbitRig::on_frame(self, elapsed_secs);
        ControlFlow::Continue(())
    }
}
