//! Interactive body authoring: the placing state machine and its orbit math.
//!
//! # Invariants
//! - A draft exists only outside NotPlacing and Firing.
//! - The orbited body is held by handle and re-checked on every use.
//! - Nothing reaches the simulation except through a commit.

pub mod orbit;
mod placing;

pub use placing::{Handled, PlacingController, PlacingSettings};

pub fn crate_info() -> &'static str {
    "planets-author v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("author"));
    }
}
