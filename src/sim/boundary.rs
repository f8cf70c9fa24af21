//! Boundary geometry: the circle or regular polygon the bodies bounce inside
//!
//! Polygon vertices sit on the boundary radius at angles `2πi/N`, starting at
//! angle 0 (to the right of center). Canvas coordinates grow downward, so
//! increasing angle walks clockwise on screen.

use std::f32::consts::TAU;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::polar_to_cartesian;

/// Selectable boundary shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    #[default]
    Circle,
    Triangle,
    Square,
    Pentagon,
    Hexagon,
    Dodecagon,
}

impl Shape {
    pub const ALL: [Shape; 6] = [
        Shape::Circle,
        Shape::Triangle,
        Shape::Square,
        Shape::Pentagon,
        Shape::Hexagon,
        Shape::Dodecagon,
    ];

    /// Number of polygon sides (0 for the circle)
    pub fn sides(&self) -> u32 {
        match self {
            Shape::Circle => 0,
            Shape::Triangle => 3,
            Shape::Square => 4,
            Shape::Pentagon => 5,
            Shape::Hexagon => 6,
            Shape::Dodecagon => 12,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Shape::Circle => "circle",
            Shape::Triangle => "triangle",
            Shape::Square => "square",
            Shape::Pentagon => "pentagon",
            Shape::Hexagon => "hexagon",
            Shape::Dodecagon => "dodecagon",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "circle" => Some(Shape::Circle),
            "triangle" => Some(Shape::Triangle),
            "square" => Some(Shape::Square),
            "pentagon" => Some(Shape::Pentagon),
            "hexagon" => Some(Shape::Hexagon),
            "dodecagon" => Some(Shape::Dodecagon),
            _ => None,
        }
    }
}

/// The enclosing wall
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Boundary {
    pub center: Vec2,
    /// Circle radius, or circumradius of the polygon
    pub radius: f32,
    /// 0 = circle, N >= 3 = regular N-gon
    pub sides: u32,
}

impl Boundary {
    pub fn new(center: Vec2, radius: f32, shape: Shape) -> Self {
        Self {
            center,
            radius,
            sides: shape.sides(),
        }
    }

    #[inline]
    pub fn is_circle(&self) -> bool {
        self.sides == 0
    }

    /// Switch to another shape, keeping center and radius
    pub fn set_shape(&mut self, shape: Shape) {
        self.sides = shape.sides();
    }

    /// Polygon vertex `i` (wraps around, so `vertex(sides) == vertex(0)`)
    pub fn vertex(&self, i: u32) -> Vec2 {
        let theta = TAU * (i % self.sides.max(1)) as f32 / self.sides.max(1) as f32;
        polar_to_cartesian(self.center, self.radius, theta)
    }

    /// All polygon vertices in order; empty for the circle
    pub fn vertices(&self) -> Vec<Vec2> {
        (0..self.sides).map(|i| self.vertex(i)).collect()
    }

    /// Edge `i` as (start, end) vertex pair
    pub fn edge(&self, i: u32) -> (Vec2, Vec2) {
        (self.vertex(i), self.vertex(i + 1))
    }

    /// Whether a point lies within the boundary radius.
    ///
    /// Uses the circumscribed circle for every shape, so a drop just outside
    /// a polygon edge but inside its circumcircle still counts.
    pub fn contains(&self, point: Vec2) -> bool {
        point.distance(self.center) <= self.radius
    }
}
