//! Scene graph and components.
//!
//! This crate provides scene management:
//! - Transform hierarchy with a name registry
//! - Camera state
//! - Tracked light state and GPU light layouts

mod error;

pub mod aim;
pub mod camera;
pub mod graph;
pub mod light;
pub mod node;
pub mod registry;
pub mod transform;

pub use aim::{AIM_EPSILON, DegenerateAim, check_aim};
pub use camera::{Camera, Perspective};
pub use error::{SceneError, SceneResult};
pub use graph::{Descendants, SceneGraph};
pub use light::{DirectionalLight, GpuLight, LightKind, PointLight, SpotLight, TrackedLight};
pub use node::{Node, NodeKey};
pub use registry::NameRegistry;
pub use transform::{Transform, yaw_degrees};
