//! Field body push
//!
//! The push is added straight into velocity and never renormalized, so a
//! body lingering near the field keeps speeding up until its next bounce
//! snaps it back to the configured speed.

use glam::Vec2;

use super::body::{FieldBody, MovingBody};
use crate::consts::FIELD_STRENGTH;

/// Velocity change for a body at `pos`
///
/// Full strength at the field center, fading linearly to zero at the effect
/// radius. At the exact center the push points along +x.
pub fn field_impulse(field: &FieldBody, pos: Vec2) -> Vec2 {
    let d = pos - field.pos;
    let dist = d.length();
    if dist >= field.effect_radius {
        return Vec2::ZERO;
    }
    let effect = FIELD_STRENGTH * (1.0 - dist / field.effect_radius);
    Vec2::from_angle(d.y.atan2(d.x)) * effect * field.polarity.sign()
}

/// Apply the field to every free-moving body in reach
///
/// Dragged and dormant bodies are left alone so the field never wakes a
/// stationary body.
pub fn apply_field(field: &FieldBody, bodies: &mut [MovingBody]) {
    for body in bodies.iter_mut() {
        if body.dragging || body.is_dormant() {
            continue;
        }
        body.vel += field_impulse(field, body.pos);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::Color;
    use crate::sim::body::FieldPolarity;
    use crate::sim::tone::ToneRange;
    use proptest::prelude::*;

    fn field(polarity: FieldPolarity) -> FieldBody {
        FieldBody::new(Vec2::new(400.0, 400.0), 80.0, polarity)
    }

    fn moving_at(pos: Vec2) -> MovingBody {
        let mut b = MovingBody::new(pos, 20.0, 5.0, Color::EGGSHELL, ToneRange::default());
        b.launch();
        b
    }

    #[test]
    fn test_full_strength_at_center() {
        let f = field(FieldPolarity::Repel);
        let impulse = field_impulse(&f, f.pos);
        assert_eq!(impulse, Vec2::new(0.4, 0.0));
    }

    #[test]
    fn test_zero_at_and_beyond_effect_radius() {
        let f = field(FieldPolarity::Repel);
        assert_eq!(field_impulse(&f, f.pos + Vec2::new(80.0, 0.0)), Vec2::ZERO);
        assert_eq!(field_impulse(&f, f.pos + Vec2::new(0.0, 200.0)), Vec2::ZERO);
    }

    #[test]
    fn test_halfway_is_half_strength() {
        let f = field(FieldPolarity::Repel);
        let impulse = field_impulse(&f, f.pos + Vec2::new(0.0, 40.0));
        assert!(impulse.x.abs() < 1e-6);
        assert!((impulse.y - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_attract_points_inward() {
        let f = field(FieldPolarity::Attract);
        let impulse = field_impulse(&f, f.pos + Vec2::new(-20.0, 0.0));
        assert!(impulse.x > 0.0);
        assert!((impulse.length() - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_apply_field_compounds_without_renormalizing() {
        let f = field(FieldPolarity::Repel);
        let mut bodies = vec![moving_at(f.pos + Vec2::new(0.0, 40.0))];
        for _ in 0..3 {
            apply_field(&f, &mut bodies);
        }
        // Launch (0, 5) plus three pushes of 0.2 straight down
        assert!((bodies[0].vel.y - 5.6).abs() < 1e-5);
    }

    #[test]
    fn test_apply_field_skips_dormant_and_dragged() {
        let f = field(FieldPolarity::Repel);
        let dormant = MovingBody::new(f.pos, 20.0, 5.0, Color::EGGSHELL, ToneRange::default());
        let mut dragged = moving_at(f.pos);
        dragged.dragging = true;
        let mut bodies = vec![dormant, dragged];

        apply_field(&f, &mut bodies);
        assert!(bodies[0].is_dormant());
        assert_eq!(bodies[1].vel, Vec2::new(0.0, 5.0));
    }

    #[test]
    fn test_apply_field_leaves_bodies_out_of_reach() {
        let f = field(FieldPolarity::Repel);
        let mut bodies = vec![
            moving_at(f.pos + Vec2::new(0.0, 40.0)),
            moving_at(f.pos + Vec2::new(200.0, 0.0)),
        ];
        apply_field(&f, &mut bodies);
        assert!((bodies[0].vel.y - 5.2).abs() < 1e-5);
        assert_eq!(bodies[1].vel, Vec2::new(0.0, 5.0));
    }

    proptest! {
        #[test]
        fn impulse_never_exceeds_strength(
            dx in -200.0f32..200.0,
            dy in -200.0f32..200.0,
        ) {
            let f = field(FieldPolarity::Repel);
            let impulse = field_impulse(&f, f.pos + Vec2::new(dx, dy));
            prop_assert!(impulse.length() <= FIELD_STRENGTH + 1e-6);
        }
    }
}
