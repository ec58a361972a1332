use glam::{Mat3, Mat4, Vec2, Vec3, Vec4};
use planets_common::BodyId;
use planets_kernel::SimulationFacade;
use serde::{Deserialize, Serialize};
use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI, TAU};

/// World-space direction of the scene light, before the view transform.
const LIGHT_DIR: Vec3 = Vec3::splat(0.577_35);

/// Window depth of the far end of a pick ray (GL depth range).
const RAY_END_DEPTH: f32 = 0.9;

/// Limits and projection parameters for the orbit camera.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    pub min_distance: f32,
    pub max_distance: f32,
    /// Pitch is clamped to `[-max_pitch, max_pitch]`.
    pub max_pitch: f32,
    pub default_distance: f32,
    pub default_pitch: f32,
    /// Vertical field of view in radians.
    pub fov: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            min_distance: 10.0,
            max_distance: 1.0e4,
            max_pitch: FRAC_PI_2,
            default_distance: 100.0,
            default_pitch: FRAC_PI_4,
            fov: FRAC_PI_4,
            near: 0.1,
            far: 1.0e6,
        }
    }
}

/// What the camera orbits around.
///
/// Variants carrying a [`BodyId`] hold a weak reference. When the body is
/// gone the mode falls back to `None` the next time the focal point is
/// computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FollowMode {
    #[default]
    None,
    Previous(BodyId),
    Next(BodyId),
    PlainAverage,
    WeightedAverage,
    Selection(BodyId),
}

impl FollowMode {
    /// The followed body, for modes that follow a single one.
    pub fn target(self) -> Option<BodyId> {
        match self {
            Self::Previous(id) | Self::Next(id) | Self::Selection(id) => Some(id),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Unit length, pointing away from the eye.
    pub direction: Vec3,
}

impl Ray {
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Intersection with the plane through `point` with normal `normal`.
    /// None when the ray runs parallel to the plane.
    pub fn intersect_plane(&self, point: Vec3, normal: Vec3) -> Option<Vec3> {
        let denom = self.direction.dot(normal);
        if denom.abs() <= f32::EPSILON {
            return None;
        }
        let t = (point - self.origin).dot(normal) / denom;
        let hit = self.at(t);
        hit.is_finite().then_some(hit)
    }
}

/// Orbit camera circling a focal point.
///
/// The world is Z-up. `xrotation` tilts the camera above the XY plane and
/// `zrotation` spins it around the Z axis. Distance and angles are clamped
/// after every mutation, and the focal point is recomputed from live body
/// positions on every [`setup`](Self::setup).
#[derive(Debug, Clone)]
pub struct Camera {
    distance: f32,
    xrotation: f32,
    zrotation: f32,
    focal_point: Vec3,
    follow: FollowMode,
    settings: CameraSettings,
    viewport: Vec2,
    projection: Mat4,
    view: Mat4,
    camera: Mat4,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(CameraSettings::default())
    }
}

/// Wrap a radian value into `[-pi, pi)`.
fn wrap_rad(rad: f32) -> f32 {
    (rad + PI).rem_euclid(TAU) - PI
}

impl Camera {
    pub fn new(settings: CameraSettings) -> Self {
        let mut camera = Self {
            distance: settings.default_distance,
            xrotation: settings.default_pitch,
            zrotation: 0.0,
            focal_point: Vec3::ZERO,
            follow: FollowMode::None,
            settings,
            viewport: Vec2::ONE,
            projection: Mat4::IDENTITY,
            view: Mat4::IDENTITY,
            camera: Mat4::IDENTITY,
        };
        camera.reset();
        camera.resize_viewport(1280.0, 720.0);
        camera.compose();
        camera
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn xrotation(&self) -> f32 {
        self.xrotation
    }

    pub fn zrotation(&self) -> f32 {
        self.zrotation
    }

    pub fn focal_point(&self) -> Vec3 {
        self.focal_point
    }

    pub fn follow(&self) -> FollowMode {
        self.follow
    }

    pub fn settings(&self) -> &CameraSettings {
        &self.settings
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    /// Clamp distance and pitch, wrap yaw. Idempotent. Non-finite fields
    /// fall back to their defaults.
    pub fn bound(&mut self) {
        let s = &self.settings;
        if !self.distance.is_finite() {
            self.distance = s.default_distance;
        }
        if !self.xrotation.is_finite() {
            self.xrotation = s.default_pitch;
        }
        if !self.zrotation.is_finite() {
            self.zrotation = 0.0;
        }
        if !self.focal_point.is_finite() {
            self.focal_point = Vec3::ZERO;
        }
        self.distance = self.distance.clamp(s.min_distance, s.max_distance);
        self.xrotation = self.xrotation.clamp(-s.max_pitch, s.max_pitch);
        self.zrotation = wrap_rad(self.zrotation);
    }

    /// Restore default zoom and angles, stop following and recentre.
    pub fn reset(&mut self) {
        self.distance = self.settings.default_distance;
        self.xrotation = self.settings.default_pitch;
        self.zrotation = 0.0;
        self.focal_point = Vec3::ZERO;
        self.follow = FollowMode::None;
        self.bound();
    }

    /// Move the focal point back to the origin without touching angle or
    /// zoom. Stops following so the move sticks.
    pub fn recenter(&mut self) {
        self.follow = FollowMode::None;
        self.focal_point = Vec3::ZERO;
    }

    pub fn rotate(&mut self, delta_yaw: f32, delta_pitch: f32) {
        if !(delta_yaw.is_finite() && delta_pitch.is_finite()) {
            return;
        }
        self.zrotation += delta_yaw;
        self.xrotation += delta_pitch;
        self.bound();
    }

    /// Additive zoom.
    pub fn zoom(&mut self, delta_distance: f32) {
        if !delta_distance.is_finite() {
            return;
        }
        self.distance += delta_distance;
        self.bound();
    }

    /// Multiplicative zoom: `distance += distance * factor`.
    pub fn zoom_by(&mut self, factor: f32) {
        if !factor.is_finite() {
            return;
        }
        self.distance += self.distance * factor;
        self.bound();
    }

    /// Move the free-orbit focal point in view space, scaled by distance.
    /// `delta.x` moves right, `delta.y` moves away from the eye.
    pub fn pan(&mut self, delta: Vec2) {
        if !delta.is_finite() {
            return;
        }
        let world = self.orientation().transpose() * Vec3::new(delta.x, 0.0, -delta.y);
        self.focal_point += world * self.distance;
    }

    pub fn resize_viewport(&mut self, width: f32, height: f32) {
        self.viewport = Vec2::new(width.max(1.0), height.max(1.0));
        self.projection = Mat4::perspective_rh_gl(
            self.settings.fov,
            self.viewport.x / self.viewport.y,
            self.settings.near,
            self.settings.far,
        );
    }

    pub fn center_screen(&self) -> Vec2 {
        self.viewport * 0.5
    }

    pub fn clear_follow(&mut self) {
        self.follow = FollowMode::None;
    }

    pub fn follow_plain_average(&mut self) {
        self.follow = FollowMode::PlainAverage;
    }

    pub fn follow_weighted_average(&mut self) {
        self.follow = FollowMode::WeightedAverage;
    }

    /// Follow the current selection. No-op when the selection is invalid.
    pub fn follow_selection(&mut self, sim: &dyn SimulationFacade) {
        if let Some(id) = sim.valid_selection() {
            self.follow = FollowMode::Selection(id);
        }
    }

    /// Follow the body after the current one, wrapping around.
    pub fn follow_next(&mut self, sim: &dyn SimulationFacade) {
        let ids = sim.body_ids();
        let current = self.current_index(&ids);
        let next = match current {
            Some(i) => ids.get((i + 1) % ids.len()),
            None => ids.first(),
        };
        if let Some(&id) = next {
            self.follow = FollowMode::Next(id);
        }
    }

    /// Follow the body before the current one, wrapping around.
    pub fn follow_previous(&mut self, sim: &dyn SimulationFacade) {
        let ids = sim.body_ids();
        let current = self.current_index(&ids);
        let previous = match current {
            Some(i) => ids.get((i + ids.len() - 1) % ids.len()),
            None => ids.last(),
        };
        if let Some(&id) = previous {
            self.follow = FollowMode::Previous(id);
        }
    }

    fn current_index(&self, ids: &[BodyId]) -> Option<usize> {
        let target = self.follow.target()?;
        ids.iter().position(|&id| id == target)
    }

    /// Recompute the focal point from the follow mode.
    fn update_focal_point(&mut self, sim: &dyn SimulationFacade) {
        match self.follow {
            FollowMode::None => {}
            FollowMode::Previous(id) | FollowMode::Next(id) | FollowMode::Selection(id) => {
                match sim.position(id) {
                    Some(position) => self.focal_point = position,
                    None => {
                        tracing::debug!(%id, "followed body is gone, no longer following");
                        self.follow = FollowMode::None;
                    }
                }
            }
            FollowMode::PlainAverage => {
                let ids = sim.body_ids();
                let sum: Vec3 = ids.iter().filter_map(|&id| sim.position(id)).sum();
                if !ids.is_empty() {
                    self.focal_point = sum / ids.len() as f32;
                }
            }
            FollowMode::WeightedAverage => {
                let mut sum = Vec3::ZERO;
                let mut total = 0.0;
                for id in sim.body_ids() {
                    if let (Some(position), Some(mass)) = (sim.position(id), sim.mass(id)) {
                        sum += position * mass;
                        total += mass;
                    }
                }
                if total > 0.0 {
                    self.focal_point = sum / total;
                }
            }
        }
    }

    /// Rotation from world to view space.
    fn orientation(&self) -> Mat3 {
        Mat3::from_rotation_x(self.xrotation - FRAC_PI_2) * Mat3::from_rotation_z(self.zrotation)
    }

    fn compose(&mut self) {
        self.view = Mat4::from_translation(Vec3::new(0.0, 0.0, -self.distance))
            * Mat4::from_mat3(self.orientation())
            * Mat4::from_translation(-self.focal_point);
        self.camera = self.projection * self.view;
    }

    /// Recompute the focal point and return the combined
    /// projection × view matrix for this frame.
    pub fn setup(&mut self, sim: &dyn SimulationFacade) -> Mat4 {
        self.update_focal_point(sim);
        self.compose();
        self.camera
    }

    /// Projection × view, as of the last [`setup`](Self::setup).
    pub fn camera_matrix(&self) -> Mat4 {
        self.camera
    }

    pub fn view_matrix(&self) -> Mat4 {
        self.view
    }

    pub fn projection_matrix(&self) -> Mat4 {
        self.projection
    }

    /// View-space direction of the scene light.
    pub fn light_dir(&self) -> Vec3 {
        self.view.transform_vector3(LIGHT_DIR)
    }

    pub fn eye_position(&self) -> Vec3 {
        self.focal_point + self.orientation().transpose() * Vec3::new(0.0, 0.0, self.distance)
    }

    /// Unit vector from the eye towards the focal point.
    pub fn view_direction(&self) -> Vec3 {
        self.orientation().transpose() * Vec3::NEG_Z
    }

    /// World-space unit vectors for screen right and screen up.
    pub fn screen_axes(&self) -> (Vec3, Vec3) {
        let inverse = self.orientation().transpose();
        (inverse * Vec3::X, inverse * Vec3::Y)
    }

    /// View-space point under `screen` at GL window depth `depth`.
    fn unproject(&self, screen: Vec2, depth: f32) -> Vec3 {
        let ndc = Vec4::new(
            2.0 * screen.x / self.viewport.x - 1.0,
            1.0 - 2.0 * screen.y / self.viewport.y,
            2.0 * depth - 1.0,
            1.0,
        );
        let view = self.projection.inverse() * ndc;
        view.truncate() / view.w
    }

    /// Ray from the near plane through the pixel at `screen` (origin top-left).
    pub fn ray(&self, screen: Vec2) -> Ray {
        let near = self.unproject(screen, 0.0);
        let end = self.unproject(screen, RAY_END_DEPTH);
        let to_world = self.orientation().transpose();
        Ray {
            origin: self.eye_position() + to_world * near,
            direction: (to_world * (end - near)).normalize_or(self.view_direction()),
        }
    }

    /// Screen position of a world point, None if behind the eye.
    pub fn project(&self, world: Vec3) -> Option<Vec2> {
        let clip = self.camera * world.extend(1.0);
        if clip.w <= 0.0 {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        Some(Vec2::new(
            (ndc.x + 1.0) * 0.5 * self.viewport.x,
            (1.0 - ndc.y) * 0.5 * self.viewport.y,
        ))
    }

    /// Nearest body whose sphere, grown by `pick_scale`, the ray through
    /// `screen` passes through. The caller decides what to do with the hit.
    pub fn select_under(
        &self,
        screen: Vec2,
        pick_scale: f32,
        sim: &dyn SimulationFacade,
    ) -> Option<BodyId> {
        let ray = self.ray(screen);
        let scale_sq = pick_scale * pick_scale;
        let mut nearest = f32::MAX;
        let mut hit = None;

        for id in sim.body_ids() {
            let (Some(position), Some(radius)) = (sim.position(id), sim.radius(id)) else {
                continue;
            };
            let difference = position - ray.origin;
            let along = difference.dot(ray.direction);
            let distance_sq = difference.length_squared();
            // distance² - along² is the squared closest approach of the ray.
            if along > 0.0
                && distance_sq < nearest
                && distance_sq - along * along <= radius * radius * scale_sq
            {
                nearest = distance_sq;
                hit = Some(id);
            }
        }
        hit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use planets_common::BodySpec;
    use planets_kernel::Universe;

    fn body(u: &mut Universe, position: Vec3, mass: f32) -> BodyId {
        u.add_body(BodySpec::at(position, mass)).unwrap()
    }

    #[test]
    fn default_camera() {
        let mut cam = Camera::default();
        let u = Universe::new();
        let m = cam.setup(&u);
        assert!(!m.is_nan());
        assert_eq!(cam.distance(), 100.0);
        assert_eq!(cam.follow(), FollowMode::None);
    }

    #[test]
    fn bound_holds_after_any_mutation_sequence() {
        let mut cam = Camera::default();
        let s = *cam.settings();
        let mut state: u32 = 12345;
        let mut next = move || {
            state = state.wrapping_mul(1_103_515_245).wrapping_add(12345);
            (state >> 8) as f32 / (1u32 << 24) as f32 * 2.0 - 1.0
        };
        for _ in 0..1000 {
            let (a, b) = (next(), next());
            match (a * 3.0).floor() as i32 {
                -3 | -2 => cam.rotate(a * 20.0, b * 20.0),
                -1 | 0 => cam.zoom(b * 5000.0),
                _ => cam.zoom_by(b * 3.0),
            }
            assert!((s.min_distance..=s.max_distance).contains(&cam.distance()));
            assert!((-s.max_pitch..=s.max_pitch).contains(&cam.xrotation()));
            assert!((-PI..=PI).contains(&cam.zrotation()));
        }
    }

    #[test]
    fn bound_is_idempotent() {
        let mut cam = Camera::default();
        cam.rotate(7.0, 3.0);
        let before = (cam.distance(), cam.xrotation(), cam.zrotation());
        cam.bound();
        assert_eq!(before, (cam.distance(), cam.xrotation(), cam.zrotation()));
    }

    #[test]
    fn zoom_in_is_clamped_at_min_distance() {
        let mut cam = Camera::new(CameraSettings {
            min_distance: 1.0,
            default_distance: 10.0,
            ..CameraSettings::default()
        });
        cam.zoom(-5.0);
        assert!(cam.distance() < 10.0);
        assert!(cam.distance() >= 1.0);

        cam.zoom(-500.0);
        assert_eq!(cam.distance(), 1.0);

        let mut cam = Camera::default();
        cam.zoom(-1.0e6);
        assert_eq!(cam.distance(), cam.settings().min_distance);
    }

    #[test]
    fn non_finite_deltas_are_ignored() {
        let mut cam = Camera::default();
        let u = Universe::new();
        cam.zoom(f32::NAN);
        cam.zoom_by(f32::INFINITY);
        cam.rotate(f32::NAN, 0.1);
        cam.rotate(0.1, f32::NEG_INFINITY);
        cam.pan(Vec2::new(f32::NAN, 1.0));
        assert_eq!(cam.distance(), 100.0);
        assert_eq!(cam.xrotation(), cam.settings().default_pitch);
        assert_eq!(cam.zrotation(), 0.0);
        assert_eq!(cam.focal_point(), Vec3::ZERO);

        cam.zoom(-5.0);
        assert_eq!(cam.distance(), 95.0);
        assert!(!cam.setup(&u).is_nan());
    }

    #[test]
    fn follow_selection_falls_back_when_body_removed() {
        let mut u = Universe::new();
        let keep = body(&mut u, Vec3::new(-50.0, 0.0, 0.0), 100.0);
        let target = body(&mut u, Vec3::new(50.0, 0.0, 0.0), 100.0);
        u.set_selected(Some(target));

        let mut cam = Camera::default();
        cam.follow_selection(&u);
        cam.setup(&u);
        assert_eq!(cam.focal_point(), Vec3::new(50.0, 0.0, 0.0));

        u.remove_body(target);
        // Same slot, new generation: must not alias the removed body.
        let newcomer = body(&mut u, Vec3::new(0.0, 900.0, 0.0), 100.0);
        assert_eq!(newcomer.index, target.index);

        let m = cam.setup(&u);
        assert!(!m.is_nan());
        assert_eq!(cam.follow(), FollowMode::None);
        assert_eq!(cam.focal_point(), Vec3::new(50.0, 0.0, 0.0));
        assert!(u.is_valid(keep));
    }

    #[test]
    fn follow_selection_without_selection_is_noop() {
        let u = Universe::new();
        let mut cam = Camera::default();
        cam.follow_plain_average();
        cam.follow_selection(&u);
        assert_eq!(cam.follow(), FollowMode::PlainAverage);
    }

    #[test]
    fn follow_previous_with_no_bodies_keeps_mode() {
        let u = Universe::new();
        let mut cam = Camera::default();
        cam.follow_previous(&u);
        assert_eq!(cam.follow(), FollowMode::None);

        cam.follow_weighted_average();
        cam.follow_previous(&u);
        cam.follow_next(&u);
        assert_eq!(cam.follow(), FollowMode::WeightedAverage);
    }

    #[test]
    fn follow_next_and_previous_cycle() {
        let mut u = Universe::new();
        let a = body(&mut u, Vec3::new(0.0, 0.0, 0.0), 100.0);
        let b = body(&mut u, Vec3::new(100.0, 0.0, 0.0), 100.0);
        let c = body(&mut u, Vec3::new(200.0, 0.0, 0.0), 100.0);
        let mut cam = Camera::default();

        cam.follow_next(&u);
        assert_eq!(cam.follow(), FollowMode::Next(a));
        cam.follow_next(&u);
        cam.follow_next(&u);
        assert_eq!(cam.follow(), FollowMode::Next(c));
        cam.follow_next(&u);
        assert_eq!(cam.follow(), FollowMode::Next(a));
        cam.follow_previous(&u);
        assert_eq!(cam.follow(), FollowMode::Previous(c));
        cam.follow_previous(&u);
        assert_eq!(cam.follow(), FollowMode::Previous(b));

        cam.setup(&u);
        assert_eq!(cam.focal_point(), Vec3::new(100.0, 0.0, 0.0));
    }

    #[test]
    fn follow_previous_starts_from_last() {
        let mut u = Universe::new();
        body(&mut u, Vec3::ZERO, 100.0);
        let last = body(&mut u, Vec3::new(100.0, 0.0, 0.0), 100.0);
        let mut cam = Camera::default();
        cam.follow_previous(&u);
        assert_eq!(cam.follow(), FollowMode::Previous(last));
    }

    #[test]
    fn averages_track_bodies() {
        let mut u = Universe::new();
        body(&mut u, Vec3::new(0.0, 0.0, 0.0), 300.0);
        body(&mut u, Vec3::new(100.0, 0.0, 0.0), 100.0);
        let mut cam = Camera::default();

        cam.follow_plain_average();
        cam.setup(&u);
        assert!(cam.focal_point().abs_diff_eq(Vec3::new(50.0, 0.0, 0.0), 1e-4));

        cam.follow_weighted_average();
        cam.setup(&u);
        assert!(cam.focal_point().abs_diff_eq(Vec3::new(25.0, 0.0, 0.0), 1e-4));

        cam.clear_follow();
        u.delete_all();
        cam.setup(&u);
        assert!(cam.focal_point().abs_diff_eq(Vec3::new(25.0, 0.0, 0.0), 1e-4));
    }

    #[test]
    fn center_ray_passes_through_focal_point() {
        let mut u = Universe::new();
        let id = body(&mut u, Vec3::new(10.0, -20.0, 5.0), 100.0);
        u.set_selected(Some(id));
        let mut cam = Camera::default();
        cam.rotate(0.7, -0.3);
        cam.follow_selection(&u);
        cam.setup(&u);

        let ray = cam.ray(cam.center_screen());
        let to_focal = cam.focal_point() - ray.origin;
        let closest = to_focal - ray.direction * to_focal.dot(ray.direction);
        assert!(closest.length() < 1e-2);
        assert!(ray.direction.dot(cam.view_direction()) > 0.99);
    }

    #[test]
    fn eye_is_distance_away_from_focal_point() {
        let mut cam = Camera::default();
        cam.rotate(1.0, 0.2);
        let u = Universe::new();
        cam.setup(&u);
        let eye = cam.eye_position();
        assert!((eye.distance(cam.focal_point()) - cam.distance()).abs() < 1e-3);
        let view_space = cam.view_matrix().transform_point3(eye);
        assert!(view_space.length() < 1e-3);
    }

    #[test]
    fn project_inverts_ray() {
        let u = Universe::new();
        let mut cam = Camera::default();
        cam.setup(&u);
        let screen = Vec2::new(400.0, 300.0);
        let ray = cam.ray(screen);
        let projected = cam.project(ray.at(50.0)).unwrap();
        assert!(projected.abs_diff_eq(screen, 0.5));
    }

    #[test]
    fn select_under_picks_nearest_hit() {
        let mut u = Universe::new();
        let near = body(&mut u, Vec3::ZERO, 100.0);
        let mut cam = Camera::default();
        cam.setup(&u);
        let behind = body(&mut u, cam.focal_point() + cam.view_direction() * 50.0, 100.0);

        assert_eq!(cam.select_under(cam.center_screen(), 1.0, &u), Some(near));
        u.remove_body(near);
        assert_eq!(cam.select_under(cam.center_screen(), 1.0, &u), Some(behind));
        assert_eq!(cam.select_under(Vec2::ZERO, 1.0, &u), None);
    }

    #[test]
    fn light_dir_is_unit_length() {
        let mut cam = Camera::default();
        cam.rotate(0.3, 0.1);
        cam.setup(&Universe::new());
        assert!((cam.light_dir().length() - 1.0).abs() < 1e-3);
    }

    #[test]
    fn pan_and_recenter() {
        let mut cam = Camera::default();
        cam.pan(Vec2::new(0.1, 0.0));
        assert!(cam.focal_point().length() > 0.0);
        cam.recenter();
        assert_eq!(cam.focal_point(), Vec3::ZERO);
    }

    #[test]
    fn reset_restores_defaults() {
        let mut cam = Camera::default();
        cam.rotate(1.0, 1.0);
        cam.zoom(500.0);
        cam.follow_plain_average();
        cam.reset();
        assert_eq!(cam.distance(), 100.0);
        assert_eq!(cam.zrotation(), 0.0);
        assert_eq!(cam.follow(), FollowMode::None);
    }

    #[test]
    fn ray_misses_parallel_plane() {
        let ray = Ray {
            origin: Vec3::new(0.0, 0.0, 1.0),
            direction: Vec3::X,
        };
        assert_eq!(ray.intersect_plane(Vec3::ZERO, Vec3::Z), None);
        let down = Ray {
            origin: Vec3::new(0.0, 0.0, 1.0),
            direction: Vec3::NEG_Z,
        };
        assert_eq!(down.intersect_plane(Vec3::ZERO, Vec3::Z), Some(Vec3::ZERO));
    }
}
