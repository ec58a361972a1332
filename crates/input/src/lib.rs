//! Input routing and the frame loop.
//!
//! # Invariants
//! - The placing controller sees every pointer event before the camera.
//! - Keyboard and gamepad buttons share one action set and one executor.
//! - The simulation never advances while a draft exists.

pub mod action;
pub mod event;
pub mod gamepad;
pub mod router;
pub mod session;

pub use action::Action;
pub use event::{InputEvent, Key, KeyBindings, MouseButton};
pub use gamepad::{GamepadButton, GamepadMapper, GamepadState};
pub use router::{InputRouter, InputSettings};
pub use session::{Session, SessionSettings};

pub fn crate_info() -> &'static str {
    "planets-input v0.1.0"
}
