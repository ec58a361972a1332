//! Developer tooling: read-only inspection of a universe.
//!
//! # Invariants
//! - Inspection never mutates the universe.

mod inspector;

pub use inspector::{BodyInfo, UniverseInspector, UniverseSummary};

pub fn crate_info() -> &'static str {
    "planets-tools v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("tools"));
    }
}
