//! Orbit camera and renderer-agnostic scene interface.
//!
//! # Invariants
//! - Renderers borrow the simulation immutably and cannot change world state.
//! - The camera focal point is recomputed from live bodies every frame.

pub mod camera;
mod renderer;

pub use camera::{Camera, CameraSettings, FollowMode, Ray};
pub use renderer::{DebugTextRenderer, PlacementPreview, Renderer, SceneView};

pub fn crate_info() -> &'static str {
    "planets-render v0.1.0"
}
