//! Scene-graph animation and tracking controller.
//!
//! This crate drives a pivot hierarchy from elapsed time and aims a camera
//! and a light at the resulting world positions:
//! - Orbit animator for the pivots
//! - Mode flag toggled on a wall-clock interval
//! - Tracking controller writing camera and light state
//! - [`OrbitRig`], the per-frame entry point
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use orbit_core::ManualIntervalTimer;
//! use orbit_rig::{Mode, OrbitRig, RigConfig};
//!
//! let mut rig = OrbitRig::new(&RigConfig::default()).unwrap();
//! let mut timer = ManualIntervalTimer::new();
//! rig.attach_mode_timer(&mut timer).unwrap();
//!
//! let report = rig.on_frame(2.0);
//! assert_eq!(report.mode, Mode::Tracking);
//! assert!((report.angles.orbit_deg - 100.0).abs() < 1e-4);
//!
//! timer.advance(Duration::from_millis(2000));
//! rig.on_frame(2.5);
//! assert_eq!(rig.camera().position(), glam::Vec3::new(7.0, 7.0, 0.0));
//! ```

mod backend;
mod config;
mod error;
mod mode;
mod orbit;
mod rig;
mod setup;
mod tracking;

pub use backend::RenderBackend;
pub use config::{CameraPose, RigConfig};
pub use error::{RigError, RigResult};
pub use mode::{Mode, ModeFlag};
pub use orbit::{
    DEFAULT_PHASE_DEG, DEFAULT_SPEED_DEG_PER_SEC, OrbitAngles, OrbitAnimator, orbit_angle,
};
pub use rig::{FrameReport, OrbitRig};
pub use setup::{LOOK_AHEAD_PIVOT, ORBIT_PIVOT, RigNodes, build_scene};
pub use tracking::{AimSubject, AimWarning, LightTracking, TrackingController};
