//! Error types for rig construction.

use thiserror::Error;

use orbit_scene::SceneError;

/// Error type for building and wiring the rig.
#[derive(Error, Debug)]
pub enum RigError {
    /// Scene graph construction failed.
    #[error("Scene error: {0}")]
    Scene(#[from] SceneError),

    /// Configuration or timer error from the core crate.
    #[error(transparent)]
    Core(#[from] orbit_core::Error),

    /// A node the rig depends on is not registered.
    #[error("required node '{0}' is not registered")]
    MissingNode(String),

    /// A registered pivot has no child to track.
    #[error("pivot '{0}' has no child")]
    EmptyPivot(String),
}

/// Result type alias for rig operations.
pub type RigResult<T> = Result<T, RigError>;
