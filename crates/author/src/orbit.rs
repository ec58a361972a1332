//! Two-body orbit helpers used by the placing preview and commit.

use glam::{Mat3, Mat4, Quat, Vec3};

/// Speed of a circular orbit of radius `radius` around a body of mass
/// `central_mass`. Zero for a degenerate radius.
pub fn circular_speed(gravity: f32, central_mass: f32, radius: f32) -> f32 {
    if radius <= f32::EPSILON || central_mass <= 0.0 {
        return 0.0;
    }
    (gravity * central_mass / radius).sqrt()
}

/// Velocity of a circular orbit at `relative` (orbiting minus orbited
/// position) in the plane with unit normal `normal`.
///
/// Points along `normal × relative`, so the orbit runs counter-clockwise when
/// seen from the side the normal points to.
pub fn circular_velocity(gravity: f32, central_mass: f32, relative: Vec3, normal: Vec3) -> Vec3 {
    let tangent = normal.cross(relative).normalize_or_zero();
    tangent * circular_speed(gravity, central_mass, relative.length())
}

/// Radius of the circle the orbited body traces around the common
/// barycentre.
pub fn barycentric_radius(radius: f32, orbiting_mass: f32, orbited_mass: f32) -> f32 {
    let total = orbiting_mass + orbited_mass;
    if total <= 0.0 {
        return 0.0;
    }
    radius * orbiting_mass / total
}

/// Orbit frame with local X along `radial` and local Z along `normal`.
/// Falls back to `fallback` when the two are parallel or degenerate.
pub fn frame_from_radial(radial: Vec3, normal: Vec3, fallback: Quat) -> Quat {
    let x = radial.normalize_or_zero();
    let z = normal.normalize_or_zero();
    let y = z.cross(x);
    if y.length_squared() < 1e-6 {
        return fallback;
    }
    let y = y.normalize();
    // Re-derive X so the basis stays orthonormal when `radial` leaves the plane.
    let x = y.cross(z);
    Quat::from_mat3(&Mat3::from_cols(x, y, z)).normalize()
}

/// Transform taking the unit circle in the XY plane to a circle of `radius`
/// around `center` in the plane of `frame`.
pub fn circle_mat(center: Vec3, frame: Quat, radius: f32) -> Mat4 {
    Mat4::from_scale_rotation_translation(Vec3::splat(radius), frame, center)
}
