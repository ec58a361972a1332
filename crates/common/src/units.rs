//! Simulation unit constants.
//!
//! Time is measured in microseconds. Velocities shown to the user are scaled
//! by [`VELOCITY_FACTOR`] (UI velocity × factor = internal velocity).

/// Gravitational constant in internal units.
pub const GRAVITY_CONSTANT: f32 = 6.67e-11;

/// UI velocity × this = internal velocity.
pub const VELOCITY_FACTOR: f32 = 1.0e-5;

/// UI limits on body mass.
pub const MIN_MASS: f32 = 1.0;
pub const MAX_MASS: f32 = 1.0e9;

/// Mass given to newly drafted bodies.
pub const DEFAULT_MASS: f32 = 100.0;

/// Radius of a body of mass `mass`. Non-positive masses have zero radius.
pub fn radius_for_mass(mass: f32) -> f32 {
    if mass <= 0.0 {
        0.0
    } else {
        ((3.0 * mass / 4.0) * std::f32::consts::PI).cbrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn radius_grows_with_mass() {
        assert!(radius_for_mass(1000.0) > radius_for_mass(100.0));
    }

    #[test]
    fn massless_bodies_have_no_radius() {
        assert_eq!(radius_for_mass(0.0), 0.0);
        assert_eq!(radius_for_mass(-5.0), 0.0);
    }

    #[test]
    fn default_mass_within_limits() {
        assert!((MIN_MASS..=MAX_MASS).contains(&DEFAULT_MASS));
    }
}
