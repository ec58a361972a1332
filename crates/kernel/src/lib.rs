//! Simulation kernel: the facade the front-end talks to, plus a reference
//! body store that implements it.
//!
//! # Invariants
//! - Body handles are generation-tagged; a stale handle is never valid again.
//! - Iteration order over live bodies is creation order and stable.
//! - All state mutations flow through explicit operations.

pub mod facade;
pub mod universe;

pub use facade::{SimulationFacade, UniverseError};
pub use universe::{Body, EVENT_LOG_CAPACITY, Universe, UniverseEvent};
