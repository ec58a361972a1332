use glam::Vec3;
use planets_common::{BodyId, BodySpec};

/// Errors from body store operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum UniverseError {
    #[error("body specification is not finite: {0:?}")]
    NonFinite(BodySpec),
    #[error("body mass must be positive, got {0}")]
    NonPositiveMass(f32),
}

/// The narrow interface the camera, the placing controller and the frame
/// loop use to talk to the simulation.
///
/// Handles returned by [`add_body`](Self::add_body) are weak: they do not keep
/// a body alive and every query returns `None` once the body is gone.
pub trait SimulationFacade {
    /// Create a body and return its handle.
    fn add_body(&mut self, spec: BodySpec) -> Result<BodyId, UniverseError>;

    /// Remove a body. Returns false if the handle was already stale.
    fn remove_body(&mut self, id: BodyId) -> bool;

    fn is_valid(&self, id: BodyId) -> bool;

    fn position(&self, id: BodyId) -> Option<Vec3>;
    fn velocity(&self, id: BodyId) -> Option<Vec3>;
    fn radius(&self, id: BodyId) -> Option<f32>;
    fn mass(&self, id: BodyId) -> Option<f32>;

    /// Overwrite a body's velocity. Returns false if the handle is stale.
    fn set_velocity(&mut self, id: BodyId, velocity: Vec3) -> bool;

    /// The selection reference. May be stale.
    fn selected(&self) -> Option<BodyId>;
    fn set_selected(&mut self, id: Option<BodyId>);

    fn is_selected_valid(&self) -> bool {
        self.selected().is_some_and(|id| self.is_valid(id))
    }

    /// The selection, only if it still refers to a live body.
    fn valid_selection(&self) -> Option<BodyId> {
        self.selected().filter(|&id| self.is_valid(id))
    }

    /// Snapshot of live handles in stable creation order. Callers may remove
    /// bodies while walking the snapshot.
    fn body_ids(&self) -> Vec<BodyId>;

    fn body_count(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.body_count() == 0
    }

    /// Advance the simulation by `time` microseconds (before speed scaling).
    fn advance(&mut self, time: f32);

    fn gravity_constant(&self) -> f32;

    /// UI velocity × this = internal velocity.
    fn velocity_factor(&self) -> f32;

    /// Simulation speed multiplier; zero pauses.
    fn speed(&self) -> f32;
    fn set_speed(&mut self, speed: f32);
}
