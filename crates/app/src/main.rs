//! Orbit rig - headless entry point
//!
//! Runs the tracking rig against a fixed-rate refresh source and a backend
//! that logs what a renderer would draw. The mode toggle runs on its own
//! timer thread.
//!
//! Environment overrides:
//! - `ORBIT_LIGHT`: `spot` (default), `point` or `directional`
//! - `ORBIT_LIGHT_TRACKING`: `always` (default), `follow` or `off`
//! - `ORBIT_TRACKING`: `1` (default) or `0` to keep the camera fixed
//! - `ORBIT_FRAMES`: number of frames to run (default 600)

use std::ops::ControlFlow;

use anyhow::{Context, Result, bail};
use tracing::info;

use orbit_core::{FixedRateRefresh, FrameScheduler, ThreadIntervalTimer};
use orbit_rig::{LightTracking, OrbitRig, RenderBackend, RigConfig};
use orbit_scene::{Camera, LightKind, SceneGraph, TrackedLight};

const DEFAULT_FRAMES: u64 = 600;
const LOG_EVERY: u64 = 30;

/// Stand-in for the external renderer.
struct LogBackend {
    frames: u64,
    width: u32,
    height: u32,
}

impl LogBackend {
    fn new(width: u32, height: u32) -> Self {
        Self {
            frames: 0,
            width,
            height,
        }
    }
}

impl RenderBackend for LogBackend {
    fn render(&mut self, graph: &SceneGraph, camera: &Camera, light: &TrackedLight) {
        if self.frames % LOG_EVERY == 0 {
            info!(
                frame = self.frames,
                nodes = graph.len(),
                viewport = ?(self.width, self.height),
                camera = ?camera.position(),
                aim = ?camera.target(),
                light = ?light.position(),
                light_aim = ?light.target(),
                "render"
            );
        }
        self.frames += 1;
    }

    fn set_viewport(&mut self, width: u32, height: u32) {
        info!("Viewport resized to {}x{}", width, height);
        self.width = width;
        self.height = height;
    }
}

fn parse_light_kind(value: &str) -> Result<LightKind> {
    Ok(match value.to_ascii_lowercase().as_str() {
        "spot" => LightKind::spot_degrees(30.0),
        "point" => LightKind::Point { distance: 10.0 },
        "directional" => LightKind::Directional,
        other => bail!("unknown light kind '{other}'"),
    })
}

fn parse_light_tracking(value: &str) -> Result<LightTracking> {
    Ok(match value.to_ascii_lowercase().as_str() {
        "always" => LightTracking::Always,
        "follow" => LightTracking::FollowMode,
        "off" => LightTracking::Off,
        other => bail!("unknown light tracking policy '{other}'"),
    })
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Ok(true),
        "0" | "false" | "off" | "no" => Ok(false),
        other => bail!("expected a boolean, got '{other}'"),
    }
}

/// Build the config from a variable lookup, so tests need not touch the
/// process environment.
fn config_from(lookup: impl Fn(&str) -> Option<String>) -> Result<(RigConfig, u64)> {
    let mut config = RigConfig::default();

    if let Some(value) = lookup("ORBIT_LIGHT") {
        config = config.light_kind(parse_light_kind(&value).context("ORBIT_LIGHT")?);
    }
    if let Some(value) = lookup("ORBIT_LIGHT_TRACKING") {
        config = config.light_tracking(
            parse_light_tracking(&value).context("ORBIT_LIGHT_TRACKING")?,
        );
    }
    if let Some(value) = lookup("ORBIT_TRACKING") {
        config = config.tracking_enabled(parse_flag(&value).context("ORBIT_TRACKING")?);
    }
    let frames = match lookup("ORBIT_FRAMES") {
        Some(value) => value
            .parse()
            .with_context(|| format!("ORBIT_FRAMES: invalid frame count '{value}'"))?,
        None => DEFAULT_FRAMES,
    };

    Ok((config, frames))
}

fn main() -> Result<()> {
    // Initialize logging
    orbit_core::init_logging();
    info!("Starting orbit rig");

    let (config, frames) = config_from(|key| std::env::var(key).ok())?;
    let mut rig = OrbitRig::new(&config).context("failed to build rig")?;

    // Mode toggle runs independently of the frame loop.
    let mut mode_timer = ThreadIntervalTimer::new();
    rig.attach_mode_timer(&mut mode_timer)?;

    let mut backend = LogBackend::new(0, 0);
    rig.resize(&mut backend, 1280, 720);

    let mut source = FixedRateRefresh::new(FixedRateRefresh::DEFAULT_RATE_HZ).with_frame_limit(frames);
    let mut scheduler = FrameScheduler::new();
    let mut warnings = 0usize;

    let mut handler = |elapsed: f32| -> ControlFlow<()> {
        warnings += rig.on_frame(elapsed).warnings.len();
        if rig.take_light_helper_dirty() {
            tracing::trace!("light helper resynced");
        }
        rig.render_with(&mut backend);
        ControlFlow::Continue(())
    };
    let ran = scheduler.run(&mut source, &mut handler);

    mode_timer.stop();
    info!(
        frames = ran,
        elapsed = scheduler.elapsed_secs(),
        warnings,
        "Shutting down"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let (config, frames) = config_from(lookup(&[])).unwrap();
        assert_eq!(config, RigConfig::default());
        assert_eq!(frames, DEFAULT_FRAMES);
    }

    #[test]
    fn test_overrides() {
        let (config, frames) = config_from(lookup(&[
            ("ORBIT_LIGHT", "Point"),
            ("ORBIT_LIGHT_TRACKING", "follow"),
            ("ORBIT_TRACKING", "0"),
            ("ORBIT_FRAMES", "12"),
        ]))
        .unwrap();

        assert_eq!(config.light_kind, LightKind::Point { distance: 10.0 });
        assert_eq!(config.light_tracking, LightTracking::FollowMode);
        assert!(!config.tracking_enabled);
        assert_eq!(frames, 12);
    }

    #[test]
    fn test_bad_values() {
        assert!(config_from(lookup(&[("ORBIT_LIGHT", "laser")])).is_err());
        assert!(config_from(lookup(&[("ORBIT_FRAMES", "-3")])).is_err());
        assert!(config_from(lookup(&[("ORBIT_TRACKING", "maybe")])).is_err());
    }

    #[test]
    fn test_log_backend_counts_frames() {
        let rig = OrbitRig::new(&RigConfig::default()).unwrap();
        let mut backend = LogBackend::new(640, 480);
        rig.render_with(&mut backend);
        rig.render_with(&mut backend);
        assert_eq!(backend.frames, 2);
    }
}
