//! Shared types for the planets front-end: body handles, body specifications
//! and simulation unit constants.

pub mod types;
pub mod units;

pub use types::{BodyId, BodySpec, PlacingStep};
