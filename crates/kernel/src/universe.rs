use crate::facade::{SimulationFacade, UniverseError};
use glam::Vec3;
use planets_common::units::{self, GRAVITY_CONSTANT, VELOCITY_FACTOR};
use planets_common::{BodyId, BodySpec};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Squared distance from the centre of mass past which a body counts as escaped.
const ESCAPE_DISTANCE_SQ: f32 = 1.0e12;

/// Events kept before the oldest are dropped.
pub const EVENT_LOG_CAPACITY: usize = 1024;

/// An event record produced by every mutation to the universe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum UniverseEvent {
    Added { id: BodyId, spec: BodySpec },
    Removed { id: BodyId },
    /// Two bodies collided; `absorbed` no longer exists.
    Merged { survivor: BodyId, absorbed: BodyId },
    /// The simulation advanced by `time` microseconds of wall time.
    Advanced { time: f32 },
}

/// A massive body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    pub position: Vec3,
    pub velocity: Vec3,
    mass: f32,
    radius: f32,
    /// Creation sequence number, defines iteration order.
    seq: u64,
    /// Recent positions, oldest first.
    pub path: Vec<Vec3>,
}

impl Body {
    fn new(spec: BodySpec, seq: u64) -> Self {
        Self {
            position: spec.position,
            velocity: spec.velocity,
            mass: spec.mass,
            radius: units::radius_for_mass(spec.mass),
            seq,
            path: Vec::new(),
        }
    }

    pub fn mass(&self) -> f32 {
        self.mass
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn set_mass(&mut self, mass: f32) {
        self.mass = mass;
        self.radius = units::radius_for_mass(mass);
    }

    pub fn spec(&self) -> BodySpec {
        BodySpec::new(self.position, self.velocity, self.mass)
    }

    fn update_path(&mut self, max_len: usize, record_distance_sq: f32) {
        let n = self.path.len();
        if n < 2 || self.path[n - 2].distance_squared(self.position) > record_distance_sq {
            self.path.push(self.position);
        } else if let Some(last) = self.path.last_mut() {
            *last = self.position;
        }
        if self.path.len() > max_len {
            let excess = self.path.len() - max_len;
            self.path.drain(..excess);
        }
    }
}

#[derive(Debug, Clone, Default)]
struct Slot {
    generation: u32,
    body: Option<Body>,
}

/// Reference body store with direct-summation gravity.
///
/// Bodies live in generation-tagged slots. Freed slots are reused, but their
/// generation is bumped first, so old handles stay invalid. Iteration goes
/// through a BTreeMap keyed by creation sequence for a stable order.
#[derive(Debug, Clone)]
pub struct Universe {
    slots: Vec<Slot>,
    free: Vec<u32>,
    order: BTreeMap<u64, BodyId>,
    next_seq: u64,
    selected: Option<BodyId>,
    speed: f32,
    steps_per_frame: u32,
    /// Seed for the body generator, advanced with splitmix64.
    seed: u64,
    path_length: usize,
    path_record_distance_sq: f32,
    event_log: Vec<UniverseEvent>,
}

impl Default for Universe {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            order: BTreeMap::new(),
            next_seq: 0,
            selected: None,
            speed: 1.0,
            steps_per_frame: 20,
            seed: 0,
            path_length: 200,
            path_record_distance_sq: 25.0,
            event_log: Vec::new(),
        }
    }
}

impl Universe {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a universe whose random generator starts from `seed`.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Default::default()
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn steps_per_frame(&self) -> u32 {
        self.steps_per_frame
    }

    pub fn set_steps_per_frame(&mut self, steps: u32) {
        self.steps_per_frame = steps.max(1);
    }

    pub fn set_path_length(&mut self, len: usize) {
        self.path_length = len;
    }

    /// Minimum distance travelled before a new trail point is recorded.
    pub fn set_path_record_distance(&mut self, distance: f32) {
        self.path_record_distance_sq = distance * distance;
    }

    pub fn get(&self, id: BodyId) -> Option<&Body> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.body.as_ref())
    }

    pub fn get_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.body.as_mut())
    }

    /// Live bodies in creation order.
    pub fn iter(&self) -> impl Iterator<Item = (BodyId, &Body)> + '_ {
        self.order
            .values()
            .filter_map(move |&id| self.get(id).map(|b| (id, b)))
    }

    /// Recent events, oldest first. At most [`EVENT_LOG_CAPACITY`].
    pub fn events(&self) -> &[UniverseEvent] {
        &self.event_log
    }

    pub fn drain_events(&mut self) -> Vec<UniverseEvent> {
        std::mem::take(&mut self.event_log)
    }

    fn record(&mut self, event: UniverseEvent) {
        if self.event_log.len() >= EVENT_LOG_CAPACITY {
            let excess = self.event_log.len() + 1 - EVENT_LOG_CAPACITY;
            self.event_log.drain(..excess);
        }
        self.event_log.push(event);
    }

    fn insert(&mut self, spec: BodySpec) -> BodyId {
        let seq = self.next_seq;
        self.next_seq += 1;
        let body = Body::new(spec, seq);

        let id = match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                slot.body = Some(body);
                BodyId::new(index, slot.generation)
            }
            None => {
                let index = self.slots.len() as u32;
                self.slots.push(Slot {
                    generation: 0,
                    body: Some(body),
                });
                BodyId::new(index, 0)
            }
        };
        self.order.insert(seq, id);
        self.record(UniverseEvent::Added { id, spec });
        id
    }

    fn take(&mut self, id: BodyId) -> Option<Body> {
        let slot = self
            .slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)?;
        let body = slot.body.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        self.order.remove(&body.seq);
        Some(body)
    }

    /// Remove every body and clear the selection.
    pub fn delete_all(&mut self) {
        for id in self.body_ids() {
            self.remove_body(id);
        }
        self.selected = None;
    }

    pub fn delete_selected(&mut self) -> bool {
        match self.valid_selection() {
            Some(id) => self.remove_body(id),
            None => false,
        }
    }

    fn center_of_mass(&self) -> Option<(Vec3, Vec3)> {
        let mut position = Vec3::ZERO;
        let mut velocity = Vec3::ZERO;
        let mut total = 0.0;
        for (_, body) in self.iter() {
            position += body.position * body.mass;
            velocity += body.velocity * body.mass;
            total += body.mass;
        }
        (total > 0.0).then(|| (position / total, velocity / total))
    }

    /// Shift every body so the centre of mass sits at rest at the origin.
    pub fn center_all(&mut self) {
        let Some((position, velocity)) = self.center_of_mass() else {
            return;
        };
        let epsilon = f32::EPSILON;
        if position.abs_diff_eq(Vec3::ZERO, epsilon)
            && velocity.abs_diff_eq(Vec3::ZERO, epsilon)
        {
            return;
        }
        for slot in &mut self.slots {
            if let Some(body) = slot.body.as_mut() {
                body.position -= position;
                body.velocity -= velocity;
                body.path.clear();
            }
        }
        tracing::debug!(?position, ?velocity, "centred universe");
    }

    /// Remove bodies that have drifted far away from the centre of mass.
    /// Returns how many were removed.
    pub fn delete_escapees(&mut self) -> usize {
        let Some((center, _)) = self.center_of_mass() else {
            return 0;
        };
        let escaped: Vec<BodyId> = self
            .iter()
            .filter(|(_, b)| b.position.distance_squared(center) > ESCAPE_DISTANCE_SQ)
            .map(|(id, _)| id)
            .collect();
        for &id in &escaped {
            self.remove_body(id);
        }
        escaped.len()
    }

    fn next_unit(&mut self) -> f32 {
        self.seed = splitmix64(self.seed);
        (self.seed >> 40) as f32 / (1u64 << 24) as f32
    }

    fn next_range(&mut self, min: f32, max: f32) -> f32 {
        min + (max - min) * self.next_unit()
    }

    /// Add `count` bodies with uniformly random position, velocity and mass.
    ///
    /// Deterministic for a given seed.
    pub fn generate_random(
        &mut self,
        count: usize,
        position_range: f32,
        max_speed: f32,
        max_mass: f32,
    ) -> Vec<BodyId> {
        let max_mass = max_mass.max(units::MIN_MASS);
        let mut ids = Vec::with_capacity(count);
        for _ in 0..count {
            let position = Vec3::new(
                self.next_range(-position_range, position_range),
                self.next_range(-position_range, position_range),
                self.next_range(-position_range, position_range),
            );
            let velocity = Vec3::new(
                self.next_range(-max_speed, max_speed),
                self.next_range(-max_speed, max_speed),
                self.next_range(-max_speed, max_speed),
            );
            let mass = self.next_range(units::MIN_MASS, max_mass);
            ids.push(self.insert(BodySpec::new(position, velocity, mass)));
        }
        tracing::debug!(count, "generated random bodies");
        ids
    }

    /// One integration sub-step of `dt` microseconds.
    fn step(&mut self, dt: f32) {
        let ids = self.body_ids();
        let mut particles: Vec<Option<Body>> = ids
            .iter()
            .map(|&id| self.get(id).cloned())
            .collect();
        let mut merged: Vec<(usize, usize)> = Vec::new();

        for i in 0..particles.len() {
            for j in (i + 1)..particles.len() {
                let (head, tail) = particles.split_at_mut(j);
                let (Some(a), Some(b)) = (head[i].as_mut(), tail[0].as_mut()) else {
                    continue;
                };
                let direction = b.position - a.position;
                let distance_sq = direction.length_squared();
                let reach = a.radius + b.radius;

                if distance_sq < reach * reach {
                    let mass = a.mass + b.mass;
                    a.position = (a.position * a.mass + b.position * b.mass) / mass;
                    a.velocity = (a.velocity * a.mass + b.velocity * b.mass) / mass;
                    a.set_mass(mass);
                    a.path.clear();
                    tail[0] = None;
                    merged.push((i, j));
                } else {
                    let impulse = direction
                        * (GRAVITY_CONSTANT * dt * (a.mass * b.mass) / distance_sq)
                        / distance_sq.sqrt();
                    a.velocity += impulse / a.mass;
                    b.velocity -= impulse / b.mass;
                }
            }
            if let Some(body) = particles[i].as_mut() {
                body.position += body.velocity * dt;
                body.update_path(self.path_length, self.path_record_distance_sq);
            }
        }

        for (i, j) in merged {
            let (survivor, absorbed) = (ids[i], ids[j]);
            self.take(absorbed);
            if self.selected == Some(absorbed) {
                self.selected = Some(survivor);
            }
            self.record(UniverseEvent::Merged { survivor, absorbed });
            tracing::debug!(%survivor, %absorbed, "bodies merged");
        }
        for (id, particle) in ids.into_iter().zip(particles) {
            if let (Some(updated), Some(body)) = (particle, self.get_mut(id)) {
                *body = updated;
            }
        }
    }

    /// Deterministic hash of the body state, in canonical order.
    pub fn state_hash(&self) -> u64 {
        let mut h: u64 = 0xcbf2_9ce4_8422_2325; // FNV offset basis
        let mix = |h: &mut u64, bytes: &[u8]| {
            for &b in bytes {
                *h ^= b as u64;
                *h = h.wrapping_mul(0x0100_0000_01b3);
            }
        };
        for (id, body) in self.iter() {
            mix(&mut h, &id.index.to_le_bytes());
            mix(&mut h, &id.generation.to_le_bytes());
            for v in [body.position, body.velocity] {
                mix(&mut h, &v.x.to_le_bytes());
                mix(&mut h, &v.y.to_le_bytes());
                mix(&mut h, &v.z.to_le_bytes());
            }
            mix(&mut h, &body.mass.to_le_bytes());
        }
        h
    }
}

impl SimulationFacade for Universe {
    fn add_body(&mut self, spec: BodySpec) -> Result<BodyId, UniverseError> {
        if !spec.is_finite() {
            return Err(UniverseError::NonFinite(spec));
        }
        if spec.mass <= 0.0 {
            return Err(UniverseError::NonPositiveMass(spec.mass));
        }
        Ok(self.insert(spec))
    }

    fn remove_body(&mut self, id: BodyId) -> bool {
        let removed = self.take(id).is_some();
        if removed {
            self.record(UniverseEvent::Removed { id });
        }
        removed
    }

    fn is_valid(&self, id: BodyId) -> bool {
        self.get(id).is_some()
    }

    fn position(&self, id: BodyId) -> Option<Vec3> {
        self.get(id).map(|b| b.position)
    }

    fn velocity(&self, id: BodyId) -> Option<Vec3> {
        self.get(id).map(|b| b.velocity)
    }

    fn radius(&self, id: BodyId) -> Option<f32> {
        self.get(id).map(|b| b.radius)
    }

    fn mass(&self, id: BodyId) -> Option<f32> {
        self.get(id).map(|b| b.mass)
    }

    fn set_velocity(&mut self, id: BodyId, velocity: Vec3) -> bool {
        match self.get_mut(id) {
            Some(body) => {
                body.velocity = velocity;
                true
            }
            None => false,
        }
    }

    fn selected(&self) -> Option<BodyId> {
        self.selected
    }

    fn set_selected(&mut self, id: Option<BodyId>) {
        self.selected = id;
    }

    fn body_ids(&self) -> Vec<BodyId> {
        self.order.values().copied().collect()
    }

    fn body_count(&self) -> usize {
        self.order.len()
    }

    fn advance(&mut self, time: f32) {
        let dt = time * self.speed / self.steps_per_frame as f32;
        if dt > 0.0 {
            for _ in 0..self.steps_per_frame {
                self.step(dt);
            }
        }
        self.record(UniverseEvent::Advanced { time });
    }

    fn gravity_constant(&self) -> f32 {
        GRAVITY_CONSTANT
    }

    fn velocity_factor(&self) -> f32 {
        VELOCITY_FACTOR
    }

    fn speed(&self) -> f32 {
        self.speed
    }

    fn set_speed(&mut self, speed: f32) {
        self.speed = speed.max(0.0);
    }
}

/// Splitmix64 step, used to advance the generator seed reproducibly.
fn splitmix64(mut state: u64) -> u64 {
    state = state.wrapping_add(0x9e37_79b9_7f4a_7c15);
    let mut z = state;
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(x: f32) -> BodySpec {
        BodySpec::at(Vec3::new(x, 0.0, 0.0), 100.0)
    }

    #[test]
    fn universe_starts_empty() {
        let u = Universe::new();
        assert!(u.is_empty());
        assert_eq!(u.selected(), None);
        assert!(!u.is_selected_valid());
    }

    #[test]
    fn add_and_remove() {
        let mut u = Universe::new();
        let id = u.add_body(spec(0.0)).unwrap();
        assert_eq!(u.body_count(), 1);
        assert_eq!(u.mass(id), Some(100.0));
        assert!(u.remove_body(id));
        assert!(!u.is_valid(id));
        assert!(!u.remove_body(id));
        assert_eq!(u.body_count(), 0);
    }

    #[test]
    fn recycled_slot_does_not_alias_stale_handle() {
        let mut u = Universe::new();
        let old = u.add_body(spec(0.0)).unwrap();
        u.remove_body(old);
        let new = u.add_body(spec(50.0)).unwrap();

        assert_eq!(old.index, new.index);
        assert_ne!(old, new);
        assert!(!u.is_valid(old));
        assert_eq!(u.position(old), None);
        assert_eq!(u.position(new), Some(Vec3::new(50.0, 0.0, 0.0)));
    }

    #[test]
    fn iteration_follows_creation_order_across_reuse() {
        let mut u = Universe::new();
        let a = u.add_body(spec(0.0)).unwrap();
        let b = u.add_body(spec(100.0)).unwrap();
        u.remove_body(a);
        let c = u.add_body(spec(200.0)).unwrap();
        // c reuses a's slot index but was created last.
        assert_eq!(u.body_ids(), vec![b, c]);
    }

    #[test]
    fn rejects_invalid_specs() {
        let mut u = Universe::new();
        let nan = BodySpec::at(Vec3::new(f32::NAN, 0.0, 0.0), 1.0);
        assert!(matches!(u.add_body(nan), Err(UniverseError::NonFinite(_))));
        assert_eq!(
            u.add_body(BodySpec::at(Vec3::ZERO, 0.0)),
            Err(UniverseError::NonPositiveMass(0.0))
        );
        assert!(u.is_empty());
    }

    #[test]
    fn stale_selection_is_invalid() {
        let mut u = Universe::new();
        let id = u.add_body(spec(0.0)).unwrap();
        u.set_selected(Some(id));
        assert_eq!(u.valid_selection(), Some(id));
        u.remove_body(id);
        assert_eq!(u.selected(), Some(id));
        assert_eq!(u.valid_selection(), None);
    }

    #[test]
    fn advance_attracts_bodies() {
        let mut u = Universe::new();
        let a = u.add_body(BodySpec::at(Vec3::new(-50.0, 0.0, 0.0), 1000.0)).unwrap();
        let b = u.add_body(BodySpec::at(Vec3::new(50.0, 0.0, 0.0), 1000.0)).unwrap();
        for _ in 0..10 {
            u.advance(10_000.0);
        }
        assert!(u.velocity(a).unwrap().x > 0.0);
        assert!(u.velocity(b).unwrap().x < 0.0);
    }

    #[test]
    fn zero_speed_freezes_bodies() {
        let mut u = Universe::new();
        let id = u
            .add_body(BodySpec::new(Vec3::ZERO, Vec3::X, 100.0))
            .unwrap();
        u.set_speed(0.0);
        u.advance(10_000.0);
        assert_eq!(u.position(id), Some(Vec3::ZERO));
    }

    #[test]
    fn overlapping_bodies_merge_and_keep_selection() {
        let mut u = Universe::new();
        let a = u.add_body(BodySpec::at(Vec3::ZERO, 100.0)).unwrap();
        let b = u.add_body(BodySpec::at(Vec3::new(1.0, 0.0, 0.0), 100.0)).unwrap();
        u.set_selected(Some(b));
        u.advance(1.0);

        assert_eq!(u.body_count(), 1);
        assert!(u.is_valid(a));
        assert!(!u.is_valid(b));
        assert_eq!(u.mass(a), Some(200.0));
        assert_eq!(u.selected(), Some(a));
        assert!(u
            .events()
            .iter()
            .any(|e| *e == UniverseEvent::Merged { survivor: a, absorbed: b }));
    }

    #[test]
    fn center_all_moves_center_of_mass_to_origin() {
        let mut u = Universe::new();
        u.add_body(BodySpec::new(Vec3::new(10.0, 0.0, 0.0), Vec3::Y, 100.0))
            .unwrap();
        u.add_body(BodySpec::new(Vec3::new(30.0, 0.0, 0.0), Vec3::Y, 100.0))
            .unwrap();
        u.center_all();
        let (position, velocity) = u.center_of_mass().unwrap();
        assert!(position.length() < 1e-4);
        assert!(velocity.length() < 1e-4);
    }

    #[test]
    fn delete_escapees_removes_far_bodies() {
        let mut u = Universe::new();
        for _ in 0..10 {
            u.add_body(BodySpec::at(Vec3::ZERO, 1000.0)).unwrap();
        }
        let far = u.add_body(BodySpec::at(Vec3::new(1.0e7, 0.0, 0.0), 1.0)).unwrap();
        assert_eq!(u.delete_escapees(), 1);
        assert!(!u.is_valid(far));
    }

    #[test]
    fn delete_all_invalidates_handles() {
        let mut u = Universe::new();
        let id = u.add_body(spec(0.0)).unwrap();
        u.set_selected(Some(id));
        u.delete_all();
        assert!(u.is_empty());
        assert_eq!(u.selected(), None);
        assert!(!u.is_valid(id));
    }

    #[test]
    fn generate_random_is_deterministic() {
        let mut u1 = Universe::with_seed(42);
        let mut u2 = Universe::with_seed(42);
        u1.generate_random(20, 100.0, 1.0e-5, 500.0);
        u2.generate_random(20, 100.0, 1.0e-5, 500.0);
        assert_eq!(u1.body_count(), 20);
        assert_eq!(u1.state_hash(), u2.state_hash());
        for (_, body) in u1.iter() {
            assert!(body.position.abs().max_element() <= 100.0);
            assert!((units::MIN_MASS..=500.0).contains(&body.mass()));
        }
    }

    #[test]
    fn different_seeds_diverge() {
        let mut u1 = Universe::with_seed(1);
        let mut u2 = Universe::with_seed(2);
        u1.generate_random(5, 100.0, 0.0, 100.0);
        u2.generate_random(5, 100.0, 0.0, 100.0);
        assert_ne!(u1.state_hash(), u2.state_hash());
    }

    #[test]
    fn trails_are_bounded() {
        let mut u = Universe::new();
        u.set_path_length(5);
        u.set_path_record_distance(0.5);
        let id = u
            .add_body(BodySpec::new(Vec3::ZERO, Vec3::new(1.0e-3, 0.0, 0.0), 100.0))
            .unwrap();
        for _ in 0..50 {
            u.advance(1000.0);
        }
        let body = u.get(id).unwrap();
        assert!(body.path.len() <= 5);
        assert!(body.path.len() >= 2);
    }

    #[test]
    fn events_are_recorded() {
        let mut u = Universe::new();
        let id = u.add_body(spec(0.0)).unwrap();
        u.advance(1.0);
        u.remove_body(id);
        let events = u.drain_events();
        assert_eq!(events.len(), 3);
        assert!(u.events().is_empty());
    }

    #[test]
    fn event_log_is_bounded() {
        let mut u = Universe::new();
        for _ in 0..EVENT_LOG_CAPACITY * 3 {
            u.advance(1.0);
        }
        let id = u.add_body(spec(0.0)).unwrap();
        assert_eq!(u.events().len(), EVENT_LOG_CAPACITY);
        assert_eq!(
            u.events().last(),
            Some(&UniverseEvent::Added { id, spec: spec(0.0) })
        );
    }
}
