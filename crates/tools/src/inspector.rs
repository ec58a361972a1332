use glam::Vec3;
use planets_common::BodyId;
use planets_kernel::{SimulationFacade, Universe};
use serde::Serialize;

/// Read-only queries against a universe for debugging and CLI output.
pub struct UniverseInspector;

impl UniverseInspector {
    pub fn summary(universe: &Universe) -> UniverseSummary {
        let mut total_mass = 0.0;
        let mut weighted = Vec3::ZERO;
        let mut momentum = Vec3::ZERO;
        let mut kinetic = 0.0;
        for (_, body) in universe.iter() {
            let m = body.mass();
            total_mass += m;
            weighted += body.position * m;
            momentum += body.velocity * m;
            kinetic += 0.5 * m * body.velocity.length_squared();
        }
        let center_of_mass = if total_mass > 0.0 {
            weighted / total_mass
        } else {
            Vec3::ZERO
        };

        UniverseSummary {
            seed: universe.seed(),
            body_count: universe.body_count(),
            total_mass,
            center_of_mass: center_of_mass.to_array(),
            momentum: momentum.to_array(),
            kinetic_energy: kinetic,
            speed: universe.speed(),
            selected: universe.valid_selection(),
            pending_events: universe.events().len(),
            state_hash: universe.state_hash(),
        }
    }

    /// Details of one body, with velocity in UI units.
    pub fn inspect_body(universe: &Universe, id: BodyId) -> Option<BodyInfo> {
        let body = universe.get(id)?;
        Some(BodyInfo {
            id,
            position: body.position.to_array(),
            velocity: (body.velocity / universe.velocity_factor()).to_array(),
            mass: body.mass(),
            radius: body.radius(),
            trail_points: body.path.len(),
        })
    }

    pub fn list_bodies(universe: &Universe) -> Vec<BodyInfo> {
        universe
            .body_ids()
            .into_iter()
            .filter_map(|id| Self::inspect_body(universe, id))
            .collect()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UniverseSummary {
    pub seed: u64,
    pub body_count: usize,
    pub total_mass: f32,
    pub center_of_mass: [f32; 3],
    pub momentum: [f32; 3],
    pub kinetic_energy: f32,
    pub speed: f32,
    pub selected: Option<BodyId>,
    pub pending_events: usize,
    pub state_hash: u64,
}

impl std::fmt::Display for UniverseSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let c = self.center_of_mass;
        write!(
            f,
            "Universe: bodies={} mass={:.1} com=({:.2}, {:.2}, {:.2}) speed={} hash={:016x}",
            self.body_count, self.total_mass, c[0], c[1], c[2], self.speed, self.state_hash
        )?;
        if let Some(id) = self.selected {
            write!(f, " selected={id}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BodyInfo {
    pub id: BodyId,
    pub position: [f32; 3],
    /// UI units.
    pub velocity: [f32; 3],
    pub mass: f32,
    pub radius: f32,
    pub trail_points: usize,
}

impl std::fmt::Display for BodyInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let p = self.position;
        let v = self.velocity;
        write!(
            f,
            "Body {} pos=({:.2}, {:.2}, {:.2}) vel=({:.3}, {:.3}, {:.3}) mass={:.1} radius={:.2}",
            self.id, p[0], p[1], p[2], v[0], v[1], v[2], self.mass, self.radius
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use planets_common::BodySpec;

    #[test]
    fn summary_empty_universe() {
        let u = Universe::new();
        let summary = UniverseInspector::summary(&u);
        assert_eq!(summary.body_count, 0);
        assert_eq!(summary.total_mass, 0.0);
        assert_eq!(summary.center_of_mass, [0.0; 3]);
        assert!(summary.to_string().contains("bodies=0"));
    }

    #[test]
    fn summary_center_of_mass() {
        let mut u = Universe::new();
        u.add_body(BodySpec::at(Vec3::ZERO, 300.0)).unwrap();
        let b = u
            .add_body(BodySpec::new(Vec3::new(100.0, 0.0, 0.0), Vec3::Y, 100.0))
            .unwrap();
        u.set_selected(Some(b));

        let summary = UniverseInspector::summary(&u);
        assert_eq!(summary.body_count, 2);
        assert_eq!(summary.total_mass, 400.0);
        assert_eq!(summary.center_of_mass, [25.0, 0.0, 0.0]);
        assert_eq!(summary.momentum, [0.0, 100.0, 0.0]);
        assert_eq!(summary.pending_events, 2);
        assert!(summary.to_string().contains(&format!("selected={b}")));
    }

    #[test]
    fn inspect_body_reports_ui_velocity() {
        let mut u = Universe::new();
        let vf = u.velocity_factor();
        let id = u
            .add_body(BodySpec::new(Vec3::new(1.0, 2.0, 3.0), Vec3::X * vf * 4.0, 100.0))
            .unwrap();
        let info = UniverseInspector::inspect_body(&u, id).unwrap();
        assert_eq!(info.position, [1.0, 2.0, 3.0]);
        assert!((info.velocity[0] - 4.0).abs() < 1e-4);
        assert!(info.to_string().starts_with(&format!("Body {id}")));
    }

    #[test]
    fn inspect_removed_body() {
        let mut u = Universe::new();
        let id = u.add_body(BodySpec::default()).unwrap();
        u.remove_body(id);
        assert!(UniverseInspector::inspect_body(&u, id).is_none());
        assert!(UniverseInspector::list_bodies(&u).is_empty());
    }

    #[test]
    fn list_bodies_in_creation_order() {
        let mut u = Universe::new();
        let a = u.add_body(BodySpec::default()).unwrap();
        let b = u.add_body(BodySpec::at(Vec3::X * 50.0, 100.0)).unwrap();
        let ids: Vec<_> = UniverseInspector::list_bodies(&u)
            .into_iter()
            .map(|info| info.id)
            .collect();
        assert_eq!(ids, vec![a, b]);
    }
}
