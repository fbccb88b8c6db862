use crate::arena::Instance;
use crate::constants::{ARENA_CENTER, ARENA_SIZE, EPS};
use nalgebra::Vector3;
use rand::Rng;

/// Wraps any degree value into `[0, 360)`.
pub fn normalize_angle(angle: f32) -> f32 {
    angle.rem_euclid(360.0)
}

/// Bearing from `(x, z)` toward the center of the field, in degrees.
pub fn angle_looking_at_center(x: f32, z: f32) -> f32 {
    let angle = (x - ARENA_CENTER).atan2(z - ARENA_CENTER).to_degrees() + 180.0;
    normalize_angle(angle)
}

/// Projects `(x, z)` forward `distance` units along `angle` (screen
/// convention, `theta = 90 - angle`).
pub fn position_ahead_of(x: f32, z: f32, angle: f32, distance: f32) -> (f32, f32) {
    let theta = (90.0 - angle).to_radians();
    (theta.cos() * distance + x, theta.sin() * distance + z)
}

pub fn random_position<R: Rng>(rng: &mut R) -> (f32, f32) {
    (rng.gen_range(1..40) as f32, rng.gen_range(1..40) as f32)
}

pub fn random_position_near_center<R: Rng>(rng: &mut R, max_distance: f32) -> (f32, f32) {
    (
        ARENA_CENTER + rng.gen_range(-max_distance..max_distance),
        ARENA_CENTER + rng.gen_range(-max_distance..max_distance),
    )
}

/// Ground-plane corners of an instance's footprint, expressed at
/// `reference_angle`.
///
/// Footprint-less instances (no size or no position) yield no corners. An
/// instance without a rotation yields corners for the three candidate
/// orientations 0, 45 and 90 degrees, a conservative stand-in while the true
/// orientation is unknown.
pub fn rectangle_vertices(instance: &Instance, reference_angle: f32) -> Vec<Vector3<f32>> {
    let (Some(position), Some(size)) = (instance.position, instance.size) else {
        return Vec::new();
    };
    let radius = (size.x * size.x + size.z * size.z).sqrt() / 2.0;
    let corner = size.x.atan2(size.z).to_degrees();
    let rotations = rotation_hypotheses(instance.rotation);
    let mut vertices = Vec::with_capacity(rotations.len() * 4);
    for rotation in rotations {
        let offset = rotation - reference_angle;
        for bearing in [corner, 180.0 - corner, 180.0 + corner, 360.0 - corner] {
            let theta = (bearing + offset).to_radians();
            vertices.push(Vector3::new(
                position.x + radius * theta.sin(),
                position.y,
                position.z + radius * theta.cos(),
            ));
        }
    }
    vertices
}

fn rotation_hypotheses(rotation: Option<f32>) -> Vec<f32> {
    match rotation {
        Some(angle) => vec![angle],
        None => vec![0.0, 45.0, 90.0],
    }
}

/// Strict-interior test against the axis-aligned rectangle at `center` with
/// half-extents `size / 2`; points on the boundary are outside.
pub fn point_in_rectangle(vertex: &Vector3<f32>, center: &Vector3<f32>, size: &Vector3<f32>) -> bool {
    vertex.x > center.x - size.x / 2.0 + EPS
        && vertex.x < center.x + size.x / 2.0 - EPS
        && vertex.z > center.z - size.z / 2.0 + EPS
        && vertex.z < center.z + size.z / 2.0 - EPS
}

/// Probes `other`'s footprint corners and center against `reference`'s
/// axis-aligned footprint, once per reference-rotation hypothesis.
///
/// This is a vertex probe, not a separating-axis test: overlaps where no
/// probe point of either rectangle lands inside the other (thin
/// cross-throughs) go undetected. Level difficulty is calibrated against
/// that lenient rate, so the approximation is load-bearing.
pub fn overlaps(reference: &Instance, other: &Instance) -> bool {
    let (Some(center), Some(size)) = (reference.position, reference.size) else {
        return false;
    };
    let (Some(other_center), Some(_)) = (other.position, other.size) else {
        return false;
    };
    for reference_angle in rotation_hypotheses(reference.rotation) {
        let mut probes = rectangle_vertices(other, reference_angle);
        probes.push(other_center);
        if probes
            .iter()
            .any(|probe| point_in_rectangle(probe, &center, &size))
        {
            return true;
        }
    }
    false
}

/// Runs the overlap probe in both directions; either direction hitting
/// counts as a collision.
pub fn detect_collision(reference: &Instance, other: &Instance) -> bool {
    overlaps(reference, other) || overlaps(other, reference)
}

/// True when any footprint corner (at reference angle 0) leaves the field.
pub fn out_of_bounds(instance: &Instance) -> bool {
    rectangle_vertices(instance, 0.0).iter().any(|vertex| {
        vertex.x < -EPS
            || vertex.x > ARENA_SIZE + EPS
            || vertex.z < -EPS
            || vertex.z > ARENA_SIZE + EPS
    })
}
