//! Moving bodies, the field body, and trail history

use std::collections::VecDeque;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::tone::ToneRange;
use crate::consts::TRAIL_RETENTION_SECS;
use crate::renderer::Color;

/// Direction a released body sets off in (straight down the canvas)
pub const LAUNCH_DIRECTION: Vec2 = Vec2::Y;

/// Trail point for rendering
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailPoint {
    pub pos: Vec2,
    /// Simulation clock (seconds) when recorded
    pub time: f64,
}

impl TrailPoint {
    #[inline]
    pub fn age(&self, now: f64) -> f64 {
        now - self.time
    }

    #[inline]
    pub fn expired(&self, now: f64) -> bool {
        self.age(now) >= TRAIL_RETENTION_SECS
    }
}

/// A bouncing, note-playing body
#[derive(Debug, Clone)]
pub struct MovingBody {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Speed every bounce renormalizes to
    pub speed: f32,
    pub color: Color,
    pub tone: ToneRange,
    pub dragging: bool,
    /// Where reset puts the body back
    pub home: Vec2,
    /// Recent positions, oldest first
    pub trail: VecDeque<TrailPoint>,
}

impl MovingBody {
    pub fn new(home: Vec2, radius: f32, speed: f32, color: Color, tone: ToneRange) -> Self {
        Self {
            pos: home,
            vel: Vec2::ZERO,
            radius,
            speed,
            color,
            tone,
            dragging: false,
            home,
            trail: VecDeque::new(),
        }
    }

    /// Zero velocity: waiting to be released
    #[inline]
    pub fn is_dormant(&self) -> bool {
        self.vel == Vec2::ZERO
    }

    /// Whether a pointer at `point` grabs this body
    #[inline]
    pub fn hit_test(&self, point: Vec2) -> bool {
        point.distance(self.pos) < self.radius
    }

    /// Set off along the launch direction at the configured speed
    pub fn launch(&mut self) {
        self.vel = LAUNCH_DIRECTION * self.speed;
    }

    /// Change the configured speed; a moving body keeps its heading
    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
        if !self.is_dormant() {
            self.vel = self.vel.normalize_or_zero() * speed;
        }
    }

    /// Record current position to trail, dropping expired points
    pub fn record_trail(&mut self, now: f64) {
        self.trail.push_back(TrailPoint {
            pos: self.pos,
            time: now,
        });
        self.prune_trail(now);
    }

    /// Drop trail points at or past the retention window
    pub fn prune_trail(&mut self, now: f64) {
        while self.trail.front().is_some_and(|p| p.expired(now)) {
            self.trail.pop_front();
        }
    }

    /// Back to the starting spot, stationary, no trail
    pub fn reset(&mut self) {
        self.pos = self.home;
        self.vel = Vec2::ZERO;
        self.dragging = false;
        self.trail.clear();
    }
}

/// Push or pull direction of the field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldPolarity {
    /// Push bodies away from the field center
    #[default]
    Repel,
    /// Pull bodies toward the field center
    Attract,
}

impl FieldPolarity {
    #[inline]
    pub fn sign(&self) -> f32 {
        match self {
            FieldPolarity::Repel => 1.0,
            FieldPolarity::Attract => -1.0,
        }
    }
}

/// Stationary body that nudges nearby moving bodies
#[derive(Debug, Clone)]
pub struct FieldBody {
    pub pos: Vec2,
    /// Reach of the push; also the grab radius for dragging
    pub effect_radius: f32,
    pub polarity: FieldPolarity,
    pub dragging: bool,
    pub home: Vec2,
}

impl FieldBody {
    pub fn new(home: Vec2, effect_radius: f32, polarity: FieldPolarity) -> Self {
        Self {
            pos: home,
            effect_radius,
            polarity,
            dragging: false,
            home,
        }
    }

    #[inline]
    pub fn hit_test(&self, point: Vec2) -> bool {
        point.distance(self.pos) < self.effect_radius
    }

    pub fn reset(&mut self) {
        self.pos = self.home;
        self.dragging = false;
    }
}
