//! Drawing abstraction
//!
//! The simulation draws through the `Surface` trait once per frame. The
//! browser build implements it on a 2D canvas context.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod color;

#[cfg(target_arch = "wasm32")]
pub use canvas::Canvas2dSurface;
pub use color::{Color, ColorError};

use std::collections::VecDeque;

use glam::Vec2;

use crate::consts::{TRAIL_MAX_ALPHA, TRAIL_RETENTION_SECS, WALL_STROKE_WIDTH};
use crate::sim::{SimState, TrailPoint};

/// Stroke style for outlines
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f32,
    pub dashed: bool,
}

impl Stroke {
    pub fn solid(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            dashed: false,
        }
    }

    pub fn dashed(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            dashed: true,
        }
    }
}

/// Primitive 2D drawing operations over a fixed-size canvas
pub trait Surface {
    fn clear(&mut self);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);
    fn stroke_circle(&mut self, center: Vec2, radius: f32, stroke: Stroke);
    /// Regular polygon with vertex 0 at angle 0
    fn fill_polygon(&mut self, center: Vec2, radius: f32, sides: u32, color: Color);
    fn stroke_polygon(&mut self, center: Vec2, radius: f32, sides: u32, stroke: Stroke);
    /// Line segment; alpha comes from `color`
    fn line(&mut self, from: Vec2, to: Vec2, color: Color, width: f32);
}

/// Field ring opacity
const FIELD_RING_ALPHA: f32 = 0.2;
const FIELD_RING_WIDTH: f32 = 2.0;
const TRAIL_WIDTH: f32 = 1.0;

/// Trail opacity for a point of the given age; fades out well before the
/// point is pruned
pub fn trail_alpha(age: f64) -> f32 {
    (TRAIL_MAX_ALPHA - (age / TRAIL_RETENTION_SECS) as f32).max(0.0)
}

/// Trail segments (from, to, alpha), skipping anything past the retention window
pub fn trail_segments(
    trail: &VecDeque<TrailPoint>,
    now: f64,
) -> impl Iterator<Item = (Vec2, Vec2, f32)> + '_ {
    trail
        .iter()
        .zip(trail.iter().skip(1))
        .filter(move |(a, b)| !a.expired(now) && !b.expired(now))
        .map(move |(a, b)| (a.pos, b.pos, trail_alpha(a.age(now))))
        .filter(|&(_, _, alpha)| alpha > 0.0)
}

/// Draw boundary, trails, bodies and the field ring
pub fn draw_frame<S: Surface + ?Sized>(state: &SimState, surface: &mut S, now: f64) {
    surface.clear();

    let wall = Stroke::solid(Color::EGGSHELL, WALL_STROKE_WIDTH);
    let b = &state.boundary;
    if b.is_circle() {
        surface.stroke_circle(b.center, b.radius, wall);
    } else {
        surface.stroke_polygon(b.center, b.radius, b.sides, wall);
    }

    for body in &state.bodies {
        for (from, to, alpha) in trail_segments(&body.trail, now) {
            surface.line(from, to, Color::EGGSHELL.with_alpha(alpha), TRAIL_WIDTH);
        }
    }

    for body in &state.bodies {
        surface.fill_circle(body.pos, body.radius, body.color);
    }

    if let Some(field) = &state.field {
        surface.stroke_circle(
            field.pos,
            field.effect_radius,
            Stroke::dashed(
                Color::EGGSHELL.with_alpha(FIELD_RING_ALPHA),
                FIELD_RING_WIDTH,
            ),
        );
    }
}
