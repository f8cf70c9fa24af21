//! Circular Notes - a bouncing-ball sound toy
//!
//! Core modules:
//! - `sim`: Bounce simulation (boundary, bodies, collisions, field, tones)
//! - `audio`: Tone sinks (Web Audio in the browser, logging on native)
//! - `renderer`: Drawing surface abstraction and frame drawing
//! - `settings`: Knobs and scene layout

pub mod audio;
pub mod renderer;
pub mod settings;
pub mod sim;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use audio::ToneSink;
pub use renderer::{Color, Surface, draw_frame};
pub use settings::Settings;

/// Toy configuration constants
pub mod consts {
    /// Canvas dimensions
    pub const CANVAS_WIDTH: f32 = 800.0;
    pub const CANVAS_HEIGHT: f32 = 800.0;

    /// Boundary defaults (centered on the canvas)
    pub const WALL_RADIUS: f32 = 300.0;
    pub const WALL_STROKE_WIDTH: f32 = 10.0;

    /// Base body size; the default bodies are 1.4x, 1.2x and 1x this
    pub const BALL_SIZE: f32 = 20.0;
    /// Where the moving bodies wait before being dragged in
    pub const BALL_HOME: (f32, f32) = (100.0, 100.0);

    /// Field body defaults
    pub const FIELD_EFFECT_RADIUS: f32 = BALL_SIZE * 4.0;
    /// Field body sits this far in from the bottom-right corner
    pub const FIELD_CORNER_INSET: f32 = 80.0;
    /// Velocity added at the field center, fading linearly to zero at the effect radius
    pub const FIELD_STRENGTH: f32 = 0.4;

    /// Trail retention window (seconds)
    pub const TRAIL_RETENTION_SECS: f64 = 60.0;
    /// Alpha of a brand-new trail segment
    pub const TRAIL_MAX_ALPHA: f32 = 0.3;

    /// Knob defaults
    pub const DEFAULT_SPEED: u32 = 5;
    pub const DEFAULT_CHAOS: f32 = 0.2;
    pub const DEFAULT_VOLUME: f32 = 0.5;

    /// Length of each collision tone (seconds)
    pub const TONE_DURATION_SECS: f32 = 0.1;
    /// Circle-wall tone range (bottom of canvas -> top of canvas)
    pub const TONE_LOW_HZ: f32 = 100.0;
    pub const TONE_HIGH_HZ: f32 = 900.0;

    /// Polygon edges ring the chromatic octave from middle C
    pub const EQUAL_TEMPERAMENT_HZ: [f32; 12] = [
        261.63, // C
        277.18, // C#
        293.66, // D
        311.13, // D#
        329.63, // E
        349.23, // F
        369.99, // F#
        392.00, // G
        415.30, // G#
        440.00, // A
        466.16, // A#
        493.88, // B
    ];
}

use glam::Vec2;

/// Convert polar (r, theta) to cartesian (x, y) around `center`
#[inline]
pub fn polar_to_cartesian(center: Vec2, r: f32, theta: f32) -> Vec2 {
    center + Vec2::new(r * theta.cos(), r * theta.sin())
}
