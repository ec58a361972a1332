use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Generation-tagged handle to a body in the simulation.
///
/// The index names a storage slot; the generation is bumped every time that
/// slot is freed, so a handle to a removed body never aliases a newer one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BodyId {
    pub index: u32,
    pub generation: u32,
}

impl BodyId {
    pub const fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }
}

impl std::fmt::Display for BodyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}v{}", self.index, self.generation)
    }
}

/// Everything needed to create a body: position, velocity and mass.
///
/// Also used as the draft while a body is being authored interactively.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodySpec {
    pub position: Vec3,
    pub velocity: Vec3,
    pub mass: f32,
}

impl BodySpec {
    pub fn new(position: Vec3, velocity: Vec3, mass: f32) -> Self {
        Self {
            position,
            velocity,
            mass,
        }
    }

    /// A body at rest at `position`.
    pub fn at(position: Vec3, mass: f32) -> Self {
        Self::new(position, Vec3::ZERO, mass)
    }

    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.velocity.is_finite() && self.mass.is_finite()
    }
}

impl Default for BodySpec {
    fn default() -> Self {
        Self::at(Vec3::ZERO, crate::units::DEFAULT_MASS)
    }
}

/// Current state of the body placing state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PlacingStep {
    #[default]
    NotPlacing,
    /// Draft follows the pointer on a camera-facing plane.
    Interactive,
    /// Tilting the plane of a new orbit.
    OrbitalPlane,
    /// Choosing radius and angle inside the orbital plane.
    OrbitalPlanet,
    /// Aiming and scaling the draft velocity.
    FreeVelocity,
    /// Every click fires a projectile body.
    Firing,
}

impl PlacingStep {
    /// Whether the simulation may advance while in this step.
    pub fn allows_advance(self) -> bool {
        matches!(self, Self::NotPlacing | Self::Firing)
    }

    /// Whether a draft body exists in this step.
    pub fn has_draft(self) -> bool {
        !self.allows_advance()
    }
}

impl std::fmt::Display for PlacingStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::NotPlacing => "not placing",
            Self::Interactive => "interactive",
            Self::OrbitalPlane => "orbital plane",
            Self::OrbitalPlanet => "orbital planet",
            Self::FreeVelocity => "free velocity",
            Self::Firing => "firing",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_idle_and_firing_allow_advance() {
        assert!(PlacingStep::NotPlacing.allows_advance());
        assert!(PlacingStep::Firing.allows_advance());
        for step in [
            PlacingStep::Interactive,
            PlacingStep::OrbitalPlane,
            PlacingStep::OrbitalPlanet,
            PlacingStep::FreeVelocity,
        ] {
            assert!(!step.allows_advance());
            assert!(step.has_draft());
        }
    }

    #[test]
    fn body_id_orders_by_index_then_generation() {
        let a = BodyId::new(1, 0);
        let b = BodyId::new(1, 1);
        let c = BodyId::new(2, 0);
        assert!(a < b);
        assert!(b < c);
        assert_ne!(a, b);
    }

    #[test]
    fn body_id_display() {
        assert_eq!(BodyId::new(3, 7).to_string(), "#3v7");
    }

    #[test]
    fn spec_default_is_at_rest() {
        let s = BodySpec::default();
        assert_eq!(s.position, Vec3::ZERO);
        assert_eq!(s.velocity, Vec3::ZERO);
        assert!(s.mass > 0.0);
    }

    #[test]
    fn spec_finiteness() {
        assert!(BodySpec::default().is_finite());
        let bad = BodySpec::new(Vec3::new(f32::NAN, 0.0, 0.0), Vec3::ZERO, 1.0);
        assert!(!bad.is_finite());
        let inf = BodySpec::at(Vec3::ZERO, f32::INFINITY);
        assert!(!inf.is_finite());
    }
}
