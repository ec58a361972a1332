use glam::{Mat4, Quat, Vec2, Vec3};
use planets_common::units::{DEFAULT_MASS, MAX_MASS, MIN_MASS, radius_for_mass};
use planets_common::{BodyId, BodySpec, PlacingStep};
use planets_kernel::SimulationFacade;
use planets_render::{Camera, PlacementPreview};
use serde::{Deserialize, Serialize};

use crate::orbit;

/// Outcome of offering an input event to the placing controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handled {
    /// Not used; the camera may react to the event.
    Ignored,
    Consumed,
    /// Consumed, and the pointer should stay captured for a relative drag.
    ConsumedWithAux,
}

impl Handled {
    pub fn is_consumed(self) -> bool {
        !matches!(self, Self::Ignored)
    }

    pub fn is_aux(self) -> bool {
        matches!(self, Self::ConsumedWithAux)
    }
}

/// Tunables for body placement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacingSettings {
    pub default_mass: f32,
    pub min_mass: f32,
    pub max_mass: f32,
    /// Relative mass change per wheel unit.
    pub mass_wheel_rate: f32,
    /// UI speed change per wheel unit.
    pub speed_wheel_step: f32,
    /// Radians per pixel of pointer drag.
    pub rotate_rate: f32,
    /// New orbits start at this multiple of the orbited body's radius.
    pub orbit_radius_factor: f32,
    pub min_orbit_radius: f32,
    pub firing_mass: f32,
    /// UI units; scaled by the simulation's velocity factor when firing.
    pub firing_speed: f32,
}

impl Default for PlacingSettings {
    fn default() -> Self {
        Self {
            default_mass: DEFAULT_MASS,
            min_mass: MIN_MASS,
            max_mass: MAX_MASS,
            mass_wheel_rate: 1.0e-3,
            speed_wheel_step: 1.0e-3,
            rotate_rate: 0.05,
            orbit_radius_factor: 4.0,
            min_orbit_radius: 1.0,
            firing_mass: 25.0,
            firing_speed: 10.0,
        }
    }
}

/// State machine that turns pointer and stick input into a new body.
///
/// The draft lives here until it is committed through the
/// [`SimulationFacade`]. The orbited body is held by handle only and is
/// re-validated whenever it is used.
#[derive(Debug, Clone)]
pub struct PlacingController {
    settings: PlacingSettings,
    step: PlacingStep,
    draft: BodySpec,
    orbited: Option<BodyId>,
    /// Local X points from the orbited body to the draft; local Z is the
    /// orbital plane normal.
    orbit_frame: Quat,
    orbital_radius: f32,
    /// Draft velocity direction is `aim * Z`.
    aim: Quat,
    /// Draft speed in internal units.
    speed: f32,
    firing_enabled: bool,
    firing_mass: f32,
    firing_speed: f32,
    firing_aim: Option<Vec2>,
}

impl Default for PlacingController {
    fn default() -> Self {
        Self::new(PlacingSettings::default())
    }
}

impl PlacingController {
    pub fn new(settings: PlacingSettings) -> Self {
        Self {
            settings,
            step: PlacingStep::NotPlacing,
            draft: BodySpec::at(Vec3::ZERO, settings.default_mass),
            orbited: None,
            orbit_frame: Quat::IDENTITY,
            orbital_radius: 0.0,
            aim: Quat::IDENTITY,
            speed: 0.0,
            firing_enabled: false,
            firing_mass: settings.firing_mass,
            firing_speed: settings.firing_speed,
            firing_aim: None,
        }
    }

    pub fn step(&self) -> PlacingStep {
        self.step
    }

    pub fn settings(&self) -> &PlacingSettings {
        &self.settings
    }

    /// The body under construction. Only meaningful while a draft exists.
    pub fn draft(&self) -> &BodySpec {
        &self.draft
    }

    pub fn orbited(&self) -> Option<BodyId> {
        self.orbited
    }

    pub fn orbital_radius(&self) -> f32 {
        self.orbital_radius
    }

    pub fn orbital_plane_normal(&self) -> Vec3 {
        self.orbit_frame * Vec3::Z
    }

    pub fn firing_enabled(&self) -> bool {
        self.firing_enabled
    }

    pub fn firing_mass(&self) -> f32 {
        self.firing_mass
    }

    pub fn firing_speed(&self) -> f32 {
        self.firing_speed
    }

    /// Last pointer position seen while firing.
    pub fn firing_aim(&self) -> Option<Vec2> {
        self.firing_aim
    }

    fn set_step(&mut self, step: PlacingStep) {
        if self.step != step {
            tracing::debug!(from = %self.step, to = %step, "placing step");
            self.step = step;
        }
    }

    fn reset_draft(&mut self, position: Vec3) {
        self.draft = BodySpec::at(position, self.settings.default_mass);
        self.orbited = None;
        self.orbit_frame = Quat::IDENTITY;
        self.orbital_radius = 0.0;
        self.aim = Quat::IDENTITY;
        self.speed = 0.0;
    }

    /// Start placing a body at the camera's focal point.
    pub fn begin_interactive_creation(&mut self, camera: &Camera) {
        self.reset_draft(camera.focal_point());
        self.set_step(PlacingStep::Interactive);
    }

    /// Start placing a body in orbit around the selection. Returns false and
    /// changes nothing when there is no valid selection.
    pub fn begin_orbital_creation(&mut self, sim: &dyn SimulationFacade) -> bool {
        let Some(id) = sim.valid_selection() else {
            return false;
        };
        let (Some(center), Some(radius)) = (sim.position(id), sim.radius(id)) else {
            return false;
        };
        self.reset_draft(center);
        self.orbited = Some(id);
        self.orbital_radius =
            (radius * self.settings.orbit_radius_factor).max(self.settings.min_orbit_radius);
        self.draft.position = center + Vec3::X * self.orbital_radius;
        self.set_step(PlacingStep::OrbitalPlane);
        true
    }

    /// Enabling drops any draft and clears the selection.
    pub fn enable_firing_mode(&mut self, enable: bool, sim: &mut dyn SimulationFacade) {
        self.firing_enabled = enable;
        if enable {
            self.orbited = None;
            self.orbital_radius = 0.0;
            sim.set_selected(None);
            self.set_step(PlacingStep::Firing);
        } else if self.step == PlacingStep::Firing {
            self.firing_aim = None;
            self.set_step(PlacingStep::NotPlacing);
        }
    }

    /// Discard the draft and leave firing mode.
    pub fn cancel(&mut self) {
        self.firing_enabled = false;
        self.firing_aim = None;
        self.orbited = None;
        self.set_step(PlacingStep::NotPlacing);
    }

    /// The orbited body's position, if it still exists.
    fn orbited_position(&self, sim: &dyn SimulationFacade) -> Option<Vec3> {
        self.orbited.and_then(|id| sim.position(id))
    }

    fn rotate_local(rotation: Quat, delta: Vec2) -> Quat {
        (rotation * Quat::from_rotation_x(delta.x) * Quat::from_rotation_y(delta.y)).normalize()
    }

    fn aim_velocity(&mut self) {
        self.draft.velocity = self.aim * Vec3::Z * self.speed;
    }

    fn tilt_orbit(&mut self, delta: Vec2, center: Vec3) {
        self.orbit_frame = Self::rotate_local(self.orbit_frame, delta);
        self.draft.position = center + self.orbit_frame * Vec3::X * self.orbital_radius;
    }

    /// Put the draft at `relative` from the orbited body, keeping the plane.
    fn place_in_orbit(&mut self, center: Vec3, relative: Vec3) {
        let radius = relative.length();
        if radius <= f32::EPSILON || !relative.is_finite() {
            return;
        }
        let normal = self.orbital_plane_normal();
        self.orbit_frame = orbit::frame_from_radial(relative, normal, self.orbit_frame);
        self.orbital_radius = radius;
        self.draft.position = center + self.orbit_frame * Vec3::X * radius;
    }

    pub fn handle_mouse_move(
        &mut self,
        pos: Vec2,
        delta: Vec2,
        camera: &Camera,
        sim: &dyn SimulationFacade,
    ) -> Handled {
        if !(pos.is_finite() && delta.is_finite()) {
            return Handled::Ignored;
        }
        let delta = delta * self.settings.rotate_rate;
        match self.step {
            PlacingStep::NotPlacing => Handled::Ignored,
            PlacingStep::Interactive => {
                let ray = camera.ray(pos);
                let hit = ray.intersect_plane(camera.focal_point(), camera.view_direction());
                if let Some(hit) = hit {
                    self.draft.position = hit;
                }
                Handled::Consumed
            }
            PlacingStep::OrbitalPlane => match self.orbited_position(sim) {
                Some(center) => {
                    self.tilt_orbit(delta, center);
                    Handled::ConsumedWithAux
                }
                None => Handled::Ignored,
            },
            PlacingStep::OrbitalPlanet => match self.orbited_position(sim) {
                Some(center) => {
                    let ray = camera.ray(pos);
                    if let Some(hit) = ray.intersect_plane(center, self.orbital_plane_normal()) {
                        self.place_in_orbit(center, hit - center);
                    }
                    Handled::Consumed
                }
                None => Handled::Ignored,
            },
            PlacingStep::FreeVelocity => {
                self.aim = Self::rotate_local(self.aim, delta);
                self.aim_velocity();
                Handled::ConsumedWithAux
            }
            PlacingStep::Firing => {
                self.firing_aim = Some(pos);
                Handled::Ignored
            }
        }
    }

    pub fn handle_mouse_click(
        &mut self,
        pos: Vec2,
        camera: &Camera,
        sim: &mut dyn SimulationFacade,
    ) -> Handled {
        match self.step {
            PlacingStep::NotPlacing => Handled::Ignored,
            PlacingStep::Interactive => {
                self.draft.velocity = Vec3::ZERO;
                self.commit(sim);
                Handled::Consumed
            }
            PlacingStep::OrbitalPlane => {
                if self.orbited_position(sim).is_none() {
                    tracing::debug!("orbited body is gone, dropping draft");
                    self.cancel_draft();
                    return Handled::Ignored;
                }
                self.set_step(PlacingStep::OrbitalPlanet);
                Handled::Consumed
            }
            PlacingStep::OrbitalPlanet => {
                let Some((center, mass)) = self
                    .orbited
                    .and_then(|id| Some((sim.position(id)?, sim.mass(id)?)))
                else {
                    tracing::debug!("orbited body is gone, dropping draft");
                    self.cancel_draft();
                    return Handled::Ignored;
                };
                let relative = self.draft.position - center;
                let velocity = orbit::circular_velocity(
                    sim.gravity_constant(),
                    mass,
                    relative,
                    self.orbital_plane_normal(),
                );
                self.speed = velocity.length();
                self.aim = Quat::from_rotation_arc(Vec3::Z, self.orbit_frame * Vec3::Y);
                self.draft.velocity = velocity;
                self.set_step(PlacingStep::FreeVelocity);
                Handled::Consumed
            }
            PlacingStep::FreeVelocity => {
                self.commit(sim);
                Handled::Consumed
            }
            PlacingStep::Firing if pos.is_finite() => {
                self.fire(pos, camera, sim);
                Handled::Consumed
            }
            PlacingStep::Firing => Handled::Ignored,
        }
    }

    pub fn handle_mouse_wheel(&mut self, delta: f32, sim: &dyn SimulationFacade) -> Handled {
        if !delta.is_finite() {
            return Handled::Ignored;
        }
        match self.step {
            PlacingStep::Interactive | PlacingStep::OrbitalPlane | PlacingStep::OrbitalPlanet => {
                let mass = self.draft.mass;
                self.draft.mass = (mass + delta * mass * self.settings.mass_wheel_rate)
                    .clamp(self.settings.min_mass, self.settings.max_mass);
                Handled::Consumed
            }
            PlacingStep::FreeVelocity => {
                self.speed = (self.speed
                    + delta * self.settings.speed_wheel_step * sim.velocity_factor())
                .max(0.0);
                self.aim_velocity();
                Handled::Consumed
            }
            PlacingStep::NotPlacing | PlacingStep::Firing => Handled::Ignored,
        }
    }

    /// Gamepad stick motion, already deadzoned and scaled by frame time.
    /// `modifier` switches FreeVelocity from aiming to changing speed.
    pub fn handle_analog_stick(
        &mut self,
        stick: Vec2,
        modifier: bool,
        camera: &Camera,
        sim: &dyn SimulationFacade,
    ) -> Handled {
        if stick == Vec2::ZERO || !stick.is_finite() {
            return Handled::Ignored;
        }
        match self.step {
            PlacingStep::Interactive => {
                let (right, up) = camera.screen_axes();
                self.draft.position += (right * stick.x + up * stick.y) * camera.distance();
                Handled::Consumed
            }
            PlacingStep::OrbitalPlane => match self.orbited_position(sim) {
                Some(center) => {
                    self.tilt_orbit(stick, center);
                    Handled::Consumed
                }
                None => Handled::Ignored,
            },
            PlacingStep::OrbitalPlanet => match self.orbited_position(sim) {
                Some(center) => {
                    let radius = (self.orbital_radius * (1.0 + stick.y)).max(f32::EPSILON * 16.0);
                    let spin = Quat::from_axis_angle(self.orbital_plane_normal(), stick.x);
                    let relative = spin * (self.orbit_frame * Vec3::X) * radius;
                    self.place_in_orbit(center, relative);
                    Handled::Consumed
                }
                None => Handled::Ignored,
            },
            PlacingStep::FreeVelocity => {
                if modifier {
                    self.speed = (self.speed + stick.y * sim.velocity_factor()).max(0.0);
                } else {
                    self.aim = Self::rotate_local(self.aim, stick);
                }
                self.aim_velocity();
                Handled::Consumed
            }
            PlacingStep::NotPlacing | PlacingStep::Firing => Handled::Ignored,
        }
    }

    fn cancel_draft(&mut self) {
        self.orbited = None;
        self.orbital_radius = 0.0;
        self.set_step(PlacingStep::NotPlacing);
    }

    /// Hand the draft to the simulation and select the new body.
    fn commit(&mut self, sim: &mut dyn SimulationFacade) {
        let mut spec = self.draft;
        // Orbited body velocity and mass, for recoil.
        let mut recoil = None;
        if let Some(orbited) = self.orbited {
            match (sim.velocity(orbited), sim.mass(orbited)) {
                (Some(base), Some(mass)) => {
                    spec.velocity += base;
                    recoil = Some((orbited, base - self.draft.velocity * (spec.mass / mass)));
                }
                _ => tracing::debug!(%orbited, "orbited body is gone, committing free body"),
            }
        }

        match sim.add_body(spec) {
            Ok(id) => {
                tracing::info!(%id, mass = spec.mass, "body placed");
                if let Some((orbited, velocity)) = recoil {
                    sim.set_velocity(orbited, velocity);
                }
                sim.set_selected(Some(id));
            }
            Err(err) => tracing::warn!(%err, "body rejected"),
        }

        self.orbited = None;
        self.orbital_radius = 0.0;
        let next = if self.firing_enabled {
            PlacingStep::Firing
        } else {
            PlacingStep::NotPlacing
        };
        self.set_step(next);
    }

    fn fire(&mut self, pos: Vec2, camera: &Camera, sim: &mut dyn SimulationFacade) {
        let ray = camera.ray(pos);
        let velocity = ray.direction * self.firing_speed * sim.velocity_factor();
        match sim.add_body(BodySpec::new(ray.origin, velocity, self.firing_mass)) {
            Ok(id) => tracing::debug!(%id, "projectile fired"),
            Err(err) => tracing::warn!(%err, "projectile rejected"),
        }
    }

    /// Draft position for the preview sphere.
    pub fn position(&self) -> Vec3 {
        self.draft.position
    }

    /// Draft radius for the preview sphere.
    pub fn radius(&self) -> f32 {
        radius_for_mass(self.draft.mass)
    }

    fn in_orbital_flow(&self) -> bool {
        self.orbited.is_some()
            && matches!(
                self.step,
                PlacingStep::OrbitalPlane | PlacingStep::OrbitalPlanet | PlacingStep::FreeVelocity
            )
    }

    /// Circle the new body will follow, centred on the live orbited body.
    pub fn orbital_circle_mat(&self, sim: &dyn SimulationFacade) -> Option<Mat4> {
        if !self.in_orbital_flow() {
            return None;
        }
        let center = self.orbited_position(sim)?;
        Some(orbit::circle_mat(center, self.orbit_frame, self.orbital_radius))
    }

    /// Circle the orbited body will trace around the barycentre.
    pub fn orbited_circle_mat(&self, sim: &dyn SimulationFacade) -> Option<Mat4> {
        if !self.in_orbital_flow() {
            return None;
        }
        let id = self.orbited?;
        let (center, mass) = (sim.position(id)?, sim.mass(id)?);
        let radius = orbit::barycentric_radius(self.orbital_radius, self.draft.mass, mass);
        Some(orbit::circle_mat(center, self.orbit_frame, radius))
    }

    /// Unit arrow along +Z placed at the draft and turned to the velocity.
    pub fn arrow_mat(&self) -> Option<Mat4> {
        if self.step != PlacingStep::FreeVelocity {
            return None;
        }
        Some(Mat4::from_scale_rotation_translation(
            Vec3::splat(self.radius()),
            self.aim,
            self.draft.position,
        ))
    }

    pub fn arrow_length(&self) -> f32 {
        self.draft.velocity.length()
    }

    /// Everything the renderer needs to draw the draft, or None when idle.
    pub fn preview(&self, sim: &dyn SimulationFacade) -> Option<PlacementPreview> {
        if !self.step.has_draft() {
            return None;
        }
        Some(PlacementPreview {
            position: self.position(),
            radius: self.radius(),
            orbital_circle: self.orbital_circle_mat(sim),
            orbited_circle: self.orbited_circle_mat(sim),
            arrow: self.arrow_mat(),
            arrow_length: self.arrow_length(),
        })
    }
}
