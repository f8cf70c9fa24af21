//! Collision detection and response against the boundary
//!
//! Circle walls push the body back out along the radius before reflecting.
//! Polygon walls only reflect: the first edge whose infinite line comes
//! within the body radius wins, in vertex order starting at angle 0.

use glam::Vec2;
use rand::Rng;

use super::boundary::Boundary;

/// Result of a collision check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Unit surface normal at the contact (pointing away from boundary center)
    pub normal: Vec2,
    /// Penetration depth (only used for position correction on the circle)
    pub penetration: f32,
    /// Index of the polygon edge that was hit
    pub edge: Option<u32>,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            normal: Vec2::ZERO,
            penetration: 0.0,
            edge: None,
        }
    }
}

/// Check collision with whatever shape the boundary currently has
pub fn boundary_collision(pos: Vec2, radius: f32, boundary: &Boundary) -> CollisionResult {
    if boundary.is_circle() {
        circle_wall_collision(pos, radius, boundary)
    } else {
        polygon_wall_collision(pos, radius, boundary)
    }
}

/// Check collision with a circular wall
pub fn circle_wall_collision(pos: Vec2, radius: f32, boundary: &Boundary) -> CollisionResult {
    let offset = pos - boundary.center;
    let distance = offset.length();

    if distance + radius > boundary.radius {
        return CollisionResult {
            hit: true,
            normal: offset.normalize_or_zero(),
            penetration: distance + radius - boundary.radius,
            edge: None,
        };
    }

    CollisionResult::miss()
}

/// Check collision with a regular polygon wall
///
/// Distances are measured to the infinite line through each edge, so near a
/// vertex two edges can qualify; the lower edge index is reported.
pub fn polygon_wall_collision(pos: Vec2, radius: f32, boundary: &Boundary) -> CollisionResult {
    for i in 0..boundary.sides {
        let (a, b) = boundary.edge(i);
        let edge = b - a;
        let len = edge.length();
        if len < 0.0001 {
            continue; // Degenerate edge
        }

        let distance = edge.perp_dot(a - pos).abs() / len;
        if distance < radius {
            // Edge direction rotated -90° on screen; points outward for the
            // vertex winding used by `Boundary`
            let normal = Vec2::new(edge.y, -edge.x) / len;
            return CollisionResult {
                hit: true,
                normal,
                penetration: radius - distance,
                edge: Some(i),
            };
        }
    }

    CollisionResult::miss()
}

/// Reflect velocity off a surface
///
/// Standard reflection: v' = v - 2(v·n)n. The sign of `normal` does not
/// matter; for a unit normal the speed is unchanged.
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Rotate a velocity by `angle` radians (speed unchanged)
#[inline]
pub fn rotate_velocity(velocity: Vec2, angle: f32) -> Vec2 {
    Vec2::from_angle(angle).rotate(velocity)
}

/// Random deflection angle in `[-chaos/2, chaos/2)`
pub fn chaos_angle<R: Rng>(rng: &mut R, chaos: f32) -> f32 {
    (rng.random::<f32>() - 0.5) * chaos
}

/// Full bounce response: reflect, renormalize to `speed`, then deflect by a
/// random chaos angle
pub fn bounce_velocity<R: Rng>(
    velocity: Vec2,
    normal: Vec2,
    speed: f32,
    chaos: f32,
    rng: &mut R,
) -> Vec2 {
    let reflected = reflect_velocity(velocity, normal).normalize_or_zero() * speed;
    rotate_velocity(reflected, chaos_angle(rng, chaos))
}
