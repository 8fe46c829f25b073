//! Seam to the external rendering library.

use orbit_scene::{Camera, SceneGraph, TrackedLight};

use crate::rig::OrbitRig;

/// What the rig needs from a renderer: draw a frame and accept viewport
/// changes. Everything else (materials, shadows, windowing) stays on the
/// renderer side.
pub trait RenderBackend {
    /// Draw `graph` as seen by `camera`, lit by `light`.
    fn render(&mut self, graph: &SceneGraph, camera: &Camera, light: &TrackedLight);

    /// The output surface changed size.
    fn set_viewport(&mut self, width: u32, height: u32);
}

impl OrbitRig {
    /// Hand the current state to `backend`.
    pub fn render_with<B: RenderBackend + ?Sized>(&self, backend: &mut B) {
        backend.render(self.graph(), self.camera(), self.light());
    }

    /// Resize the backend and update the camera aspect together.
    pub fn resize<B: RenderBackend + ?Sized>(&mut self, backend: &mut B, width: u32, height: u32) {
        backend.set_viewport(width, height);
        self.set_viewport(width, height);
    }
}
