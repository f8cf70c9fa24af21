//! Simulation context and core types
//!
//! All state the loop reads and writes lives here; nothing is global.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::body::{FieldBody, MovingBody};
use super::boundary::{Boundary, Shape};
use crate::settings::{KnobError, Knobs, Settings};

/// Loop phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SimPhase {
    /// Nothing released yet (or just reset)
    #[default]
    Idle,
    /// Loop advancing bodies
    Running,
    /// Stopped from outside, state retained
    Paused,
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct SimState {
    pub phase: SimPhase,
    pub boundary: Boundary,
    /// Moving bodies, in pointer hit-test priority order
    pub bodies: Vec<MovingBody>,
    pub field: Option<FieldBody>,
    pub knobs: Knobs,
    /// Canvas size (pixels)
    pub width: f32,
    pub height: f32,
    /// Chaos deflections, seeded from `Settings::seed`
    pub(crate) rng: Pcg32,
}

impl SimState {
    /// Build a fresh, idle simulation from settings
    pub fn new(settings: &Settings) -> Self {
        let scene = &settings.scene;
        let knobs = settings.knobs;
        let speed = knobs.speed as f32;

        let bodies = scene
            .bodies
            .iter()
            .map(|spec| {
                MovingBody::new(
                    Vec2::new(spec.x, spec.y),
                    spec.radius,
                    speed,
                    spec.color,
                    spec.tone,
                )
            })
            .collect();

        let field = scene.field.as_ref().map(|spec| {
            FieldBody::new(
                Vec2::new(spec.x, spec.y),
                spec.effect_radius,
                spec.polarity,
            )
        });

        Self {
            phase: SimPhase::Idle,
            boundary: Boundary::new(scene.center(), scene.wall_radius, knobs.shape),
            bodies,
            field,
            knobs,
            width: scene.width,
            height: scene.height,
            rng: Pcg32::seed_from_u64(settings.seed),
        }
    }

    /// Put every body back where it started, stationary, trails cleared
    pub fn reset(&mut self) {
        for body in &mut self.bodies {
            body.reset();
        }
        if let Some(field) = &mut self.field {
            field.reset();
        }
        self.phase = SimPhase::Idle;
        log::info!("Simulation reset");
    }

    /// Idle or Paused -> Running
    pub fn start(&mut self) {
        if self.phase != SimPhase::Running {
            log::info!("Simulation running");
            self.phase = SimPhase::Running;
        }
    }

    /// Running -> Paused
    pub fn pause(&mut self) {
        if self.phase == SimPhase::Running {
            log::info!("Simulation paused");
            self.phase = SimPhase::Paused;
        }
    }

    pub fn set_speed(&mut self, speed: u32) {
        self.knobs.speed = speed;
        for body in &mut self.bodies {
            body.set_speed(speed as f32);
        }
    }

    pub fn set_chaos(&mut self, chaos: f32) {
        self.knobs.chaos = chaos;
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.knobs.volume = volume;
    }

    pub fn set_shape(&mut self, shape: Shape) {
        self.knobs.shape = shape;
        self.boundary.set_shape(shape);
    }

    /// Knob setters taking raw UI strings
    pub fn set_speed_str(&mut self, s: &str) -> Result<(), KnobError> {
        self.set_speed(Knobs::parse_speed(s)?);
        Ok(())
    }

    pub fn set_chaos_str(&mut self, s: &str) -> Result<(), KnobError> {
        self.set_chaos(Knobs::parse_chaos(s)?);
        Ok(())
    }

    pub fn set_volume_str(&mut self, s: &str) -> Result<(), KnobError> {
        self.set_volume(Knobs::parse_volume(s)?);
        Ok(())
    }

    pub fn set_shape_str(&mut self, s: &str) -> Result<(), KnobError> {
        self.set_shape(Knobs::parse_shape(s)?);
        Ok(())
    }

    /// Drop expired trail points on every body
    pub fn prune_trails(&mut self, now: f64) {
        for body in &mut self.bodies {
            body.prune_trail(now);
        }
    }

    /// True when no moving body has any velocity
    pub fn all_dormant(&self) -> bool {
        self.bodies.iter().all(|b| b.is_dormant())
    }
}
