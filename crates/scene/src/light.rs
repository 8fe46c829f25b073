//! Tracked light state and its GPU-ready views.
//!
//! [`TrackedLight`] is what the rig writes every frame. The renderer turns
//! it into one of the `#[repr(C)]` light structs below for upload.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use crate::aim::{DegenerateAim, check_aim};

/// Kind of light and its kind-specific parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LightKind {
    /// Sun-like light; only the position to target direction matters.
    Directional,
    /// Omnidirectional light. `distance` of 0 means unlimited range.
    Point { distance: f32 },
    /// Cone-shaped light. `angle` is the half-angle in radians, `penumbra`
    /// the fraction of the cone that is attenuated (0 = hard edge).
    Spot { angle: f32, penumbra: f32 },
}

impl LightKind {
    /// Spot light with the given half-angle in degrees and a hard edge.
    pub fn spot_degrees(angle: f32) -> Self {
        Self::Spot {
            angle: angle.to_radians(),
            penumbra: 0.0,
        }
    }

    /// Whether the light is oriented by an aim target.
    pub fn is_aimed(&self) -> bool {
        !matches!(self, Self::Point { .. })
    }
}

/// Light state the rig keeps in sync with the tracked object.
#[derive(Clone, Debug, PartialEq)]
pub struct TrackedLight {
    /// Light kind and parameters
    pub kind: LightKind,
    position: Vec3,
    target: Vec3,
    /// Light color
    pub color: Vec3,
    /// Light intensity
    pub intensity: f32,
    /// Whether the light follows the tracked object
    pub tracking: bool,
    helper_dirty: bool,
}

impl Default for TrackedLight {
    fn default() -> Self {
        Self {
            kind: LightKind::spot_degrees(30.0),
            position: Vec3::new(0.0, 5.0, 0.0),
            target: Vec3::ZERO,
            color: Vec3::ONE,
            intensity: 1.0,
            tracking: true,
            helper_dirty: false,
        }
    }
}

impl TrackedLight {
    /// Create a light of `kind` at `position` aiming at `target`.
    pub fn new(kind: LightKind, position: Vec3, target: Vec3) -> Self {
        Self {
            kind,
            position,
            target,
            ..Self::default()
        }
    }

    /// Light position in world space.
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Aim target in world space.
    pub fn target(&self) -> Vec3 {
        self.target
    }

    /// Move the aim target. Rejected when it would coincide with the
    /// position of an aimed light.
    pub fn set_target(&mut self, target: Vec3) -> Result<(), DegenerateAim> {
        if self.kind.is_aimed() {
            check_aim(self.position, target)?;
        }
        self.target = target;
        self.helper_dirty = true;
        Ok(())
    }

    /// Move the light. Rejected when it would coincide with the target of
    /// an aimed light.
    pub fn set_position(&mut self, position: Vec3) -> Result<(), DegenerateAim> {
        if self.kind.is_aimed() {
            check_aim(position, self.target)?;
        }
        self.position = position;
        self.helper_dirty = true;
        Ok(())
    }

    /// Whether the visualization helper needs to resynchronize.
    pub fn helper_dirty(&self) -> bool {
        self.helper_dirty
    }

    /// Read and clear the helper dirty flag.
    pub fn take_helper_dirty(&mut self) -> bool {
        std::mem::take(&mut self.helper_dirty)
    }

    /// Normalized direction from position to target, `-Y` when undefined.
    pub fn direction(&self) -> Vec3 {
        (self.target - self.position).try_normalize().unwrap_or(Vec3::NEG_Y)
    }

    /// GPU view of this light.
    pub fn to_gpu(&self) -> GpuLight {
        match self.kind {
            LightKind::Directional => GpuLight::Directional(DirectionalLight {
                direction: self.direction(),
                _pad0: 0.0,
                color: self.color,
                intensity: self.intensity,
            }),
            LightKind::Point { distance } => GpuLight::Point(PointLight {
                position: self.position,
                radius: distance,
                color: self.color,
                intensity: self.intensity,
            }),
            LightKind::Spot { angle, penumbra } => GpuLight::Spot(SpotLight {
                position: self.position,
                _pad0: 0.0,
                direction: self.direction(),
                _pad1: 0.0,
                color: self.color,
                intensity: self.intensity,
                inner_cutoff: (angle * (1.0 - penumbra.clamp(0.0, 1.0))).cos(),
                outer_cutoff: angle.cos(),
                _pad2: [0.0; 2],
            }),
        }
    }
}

/// One of the GPU light layouts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GpuLight {
    /// Upload as a [`DirectionalLight`]
    Directional(DirectionalLight),
    /// Upload as a [`PointLight`]
    Point(PointLight),
    /// Upload as a [`SpotLight`]
    Spot(SpotLight),
}

/// A directional light (sun-like).
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct DirectionalLight {
    /// Light direction (normalized)
    pub direction: Vec3,
    pub _pad0: f32,
    /// Light color
    pub color: Vec3,
    /// Light intensity
    pub intensity: f32,
}

/// A point light (omnidirectional).
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct PointLight {
    /// Light position in world space
    pub position: Vec3,
    /// Attenuation radius, 0 for unlimited
    pub radius: f32,
    /// Light color
    pub color: Vec3,
    /// Light intensity
    pub intensity: f32,
}

/// A spot light (cone-shaped).
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct SpotLight {
    /// Light position in world space
    pub position: Vec3,
    pub _pad0: f32,
    /// Light direction (normalized)
    pub direction: Vec3,
    pub _pad1: f32,
    /// Light color
    pub color: Vec3,
    /// Light intensity
    pub intensity: f32,
    /// Inner cone angle cosine
    pub inner_cutoff: f32,
    /// Outer cone angle cosine
    pub outer_cutoff: f32,
    pub _pad2: [f32; 2],
}
