//! Mapping collisions to pitches
//!
//! Polygon edges pick from the equal-temperament table by edge index; the
//! circle wall sweeps a per-body frequency range by height on the canvas.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{EQUAL_TEMPERAMENT_HZ, TONE_HIGH_HZ, TONE_LOW_HZ};

#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum ToneError {
    #[error("non-finite frequency value: {0}")]
    NonFinite(f32),
}

/// Frequency range swept from the bottom of the canvas (`min_hz`) to the top (`max_hz`)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ToneRange {
    pub min_hz: f32,
    pub max_hz: f32,
}

impl Default for ToneRange {
    fn default() -> Self {
        Self {
            min_hz: TONE_LOW_HZ,
            max_hz: TONE_HIGH_HZ,
        }
    }
}

impl ToneRange {
    pub fn new(min_hz: f32, max_hz: f32) -> Self {
        Self { min_hz, max_hz }
    }

    /// Pitch for a vertical position; higher on screen plays higher
    pub fn frequency_at(&self, y: f32, canvas_height: f32) -> f32 {
        let t = (canvas_height - y) / canvas_height;
        self.min_hz + t * (self.max_hz - self.min_hz)
    }
}

/// Where a body struck the boundary
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Contact {
    /// Circular wall, at the body's position
    Wall { pos: Vec2 },
    /// Polygon edge by index
    Edge(u32),
}

/// Equal-temperament pitch for a polygon edge
#[inline]
pub fn edge_frequency(edge: u32) -> f32 {
    EQUAL_TEMPERAMENT_HZ[(edge % 12) as usize]
}

/// Pitch for a contact, rejecting non-finite results
pub fn contact_frequency(
    contact: Contact,
    range: &ToneRange,
    canvas_height: f32,
) -> Result<f32, ToneError> {
    let freq = match contact {
        Contact::Wall { pos } => range.frequency_at(pos.y, canvas_height),
        Contact::Edge(i) => edge_frequency(i),
    };
    if freq.is_finite() {
        Ok(freq)
    } else {
        Err(ToneError::NonFinite(freq))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_frequency_wraps_octave() {
        assert_eq!(edge_frequency(0), 261.63);
        assert_eq!(edge_frequency(9), 440.0);
        assert_eq!(edge_frequency(12), 261.63);
        assert_eq!(edge_frequency(13), 277.18);
    }

    #[test]
    fn test_default_range_matches_vertical_sweep() {
        let range = ToneRange::default();
        // 100 + ((800 - y) / 800) * 800
        assert!((range.frequency_at(800.0, 800.0) - 100.0).abs() < 1e-3);
        assert!((range.frequency_at(0.0, 800.0) - 900.0).abs() < 1e-3);
        assert!((range.frequency_at(700.0, 800.0) - 200.0).abs() < 1e-3);
    }

    #[test]
    fn test_custom_range() {
        let range = ToneRange::new(220.0, 440.0);
        assert!((range.frequency_at(400.0, 800.0) - 330.0).abs() < 1e-3);
    }

    #[test]
    fn test_zero_height_canvas_is_rejected() {
        let contact = Contact::Wall {
            pos: Vec2::new(10.0, 5.0),
        };
        let err = contact_frequency(contact, &ToneRange::default(), 0.0).unwrap_err();
        assert!(matches!(err, ToneError::NonFinite(f) if !f.is_finite()));
    }

    #[test]
    fn test_edge_contact_ignores_canvas() {
        let freq = contact_frequency(Contact::Edge(4), &ToneRange::default(), 0.0).unwrap();
        assert_eq!(freq, 329.63);
    }
}
