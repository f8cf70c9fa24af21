//! Knobs and scene layout
//!
//! Knobs are the live controls (speed, chaos, volume, shape). The scene is
//! the starting layout: canvas, boundary, bodies and field body. Both are
//! JSON-serializable. Nothing is persisted: the native build reads an
//! optional file and the browser build takes an optional JSON string.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::renderer::Color;
use crate::sim::{FieldPolarity, Shape, ToneRange};

#[derive(Debug, Error)]
pub enum KnobError {
    #[error("invalid speed {0:?}: expected a positive integer")]
    Speed(String),
    #[error("invalid chaos {0:?}: expected a number")]
    Chaos(String),
    #[error("invalid volume {0:?}: expected a number")]
    Volume(String),
    #[error("unknown shape {0:?}")]
    Shape(String),
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse settings: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid settings: {0}")]
    Invalid(String),
}

/// Live controls, each read on the next tick after a change
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Knobs {
    /// Body speed in pixels per frame
    pub speed: u32,
    /// Maximum random deflection after a bounce (radians)
    pub chaos: f32,
    /// Tone gain (0.0 - 1.0)
    pub volume: f32,
    pub shape: Shape,
}

impl Default for Knobs {
    fn default() -> Self {
        Self {
            speed: DEFAULT_SPEED,
            chaos: DEFAULT_CHAOS,
            volume: DEFAULT_VOLUME,
            shape: Shape::Circle,
        }
    }
}

impl Knobs {
    /// Integer-prefix parse, like a range input's `parseInt`
    pub fn parse_speed(s: &str) -> Result<u32, KnobError> {
        let s = s.trim();
        let digits: String = s.chars().take_while(|c| c.is_ascii_digit()).collect();
        match digits.parse::<u32>() {
            Ok(v) if v > 0 => Ok(v),
            _ => Err(KnobError::Speed(s.to_string())),
        }
    }

    /// Float-prefix parse, like `parseFloat`
    pub fn parse_chaos(s: &str) -> Result<f32, KnobError> {
        float_prefix(s).ok_or_else(|| KnobError::Chaos(s.to_string()))
    }

    pub fn parse_volume(s: &str) -> Result<f32, KnobError> {
        float_prefix(s).ok_or_else(|| KnobError::Volume(s.to_string()))
    }

    pub fn parse_shape(s: &str) -> Result<Shape, KnobError> {
        Shape::from_str(s).ok_or_else(|| KnobError::Shape(s.to_string()))
    }
}

/// Longest leading decimal number in `s` (sign, digits, fraction, exponent).
/// Trailing text is ignored; non-finite results are rejected.
fn float_prefix(s: &str) -> Option<f32> {
    let s = s.trim_start();
    let b = s.as_bytes();
    let digits_from = |mut i: usize| {
        while i < b.len() && b[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut end = usize::from(matches!(b.first(), Some(b'+' | b'-')));
    let int_end = digits_from(end);
    let mut digits = int_end - end;
    end = int_end;
    if b.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        digits += frac_end - (end + 1);
        end = frac_end;
    }
    if digits == 0 {
        return None;
    }
    if matches!(b.get(end), Some(b'e' | b'E')) {
        let sign = usize::from(matches!(b.get(end + 1), Some(b'+' | b'-')));
        let exp_end = digits_from(end + 1 + sign);
        if exp_end > end + 1 + sign {
            end = exp_end;
        }
    }
    s[..end].parse::<f32>().ok().filter(|v| v.is_finite())
}

/// Starting layout of one moving body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodySpec {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub color: Color,
    #[serde(default)]
    pub tone: ToneRange,
}

/// Starting layout of the field body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub x: f32,
    pub y: f32,
    pub effect_radius: f32,
    #[serde(default)]
    pub polarity: FieldPolarity,
}

/// Canvas, boundary and starting bodies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scene {
    pub width: f32,
    pub height: f32,
    pub wall_radius: f32,
    pub bodies: Vec<BodySpec>,
    pub field: Option<FieldSpec>,
}

impl Default for Scene {
    fn default() -> Self {
        let (hx, hy) = BALL_HOME;
        let body = |scale: f32, color: Color| BodySpec {
            x: hx,
            y: hy,
            radius: BALL_SIZE * scale,
            color,
            tone: ToneRange::default(),
        };
        Self {
            width: CANVAS_WIDTH,
            height: CANVAS_HEIGHT,
            wall_radius: WALL_RADIUS,
            bodies: vec![
                body(1.4, Color::BLUE),
                body(1.2, Color::EGGSHELL),
                body(1.0, Color::RED),
            ],
            field: Some(FieldSpec {
                x: CANVAS_WIDTH - FIELD_CORNER_INSET,
                y: CANVAS_HEIGHT - FIELD_CORNER_INSET,
                effect_radius: FIELD_EFFECT_RADIUS,
                polarity: FieldPolarity::Repel,
            }),
        }
    }
}

impl Scene {
    /// Boundary center (middle of the canvas)
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Everything needed to build a simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// RNG seed for chaos deflections
    pub seed: u64,
    pub knobs: Knobs,
    pub scene: Scene,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: 0x5eed,
            knobs: Knobs::default(),
            scene: Scene::default(),
        }
    }
}

impl Settings {
    /// Parse and validate settings
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject layouts the simulation can't run: every size must be positive
    pub fn validate(&self) -> Result<(), SettingsError> {
        fn positive(what: &str, v: f32) -> Result<(), SettingsError> {
            if v > 0.0 {
                Ok(())
            } else {
                Err(SettingsError::Invalid(format!("{what} must be positive, got {v}")))
            }
        }

        let scene = &self.scene;
        positive("scene width", scene.width)?;
        positive("scene height", scene.height)?;
        positive("wall radius", scene.wall_radius)?;
        for (i, body) in scene.bodies.iter().enumerate() {
            positive(&format!("body {i} radius"), body.radius)?;
        }
        if let Some(field) = &scene.field {
            positive("field effect radius", field.effect_radius)?;
        }
        Ok(())
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read settings from a JSON file
    pub fn load_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.as_ref().display());
        Ok(settings)
    }
}
