//! RGBA colors with `#rrggbb` parsing

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid color {0:?}: expected #rrggbb")]
pub struct ColorError(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    /// Opacity (0.0 - 1.0)
    pub a: f32,
}

impl Color {
    /// Desaturated blue
    pub const BLUE: Color = Color::rgb(0x4d, 0x80, 0xa6);
    /// Eggshell white, used for the wall, trails and field ring
    pub const EGGSHELL: Color = Color::rgb(0xf0, 0xea, 0xd6);
    /// Desaturated red
    pub const RED: Color = Color::rgb(0xa6, 0x4d, 0x4d);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }

    pub fn from_hex(s: &str) -> Result<Self, ColorError> {
        let err = || ColorError(s.to_string());
        let hex = s.trim().strip_prefix('#').ok_or_else(err)?;
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(err());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| err());
        Ok(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// CSS `rgba()` string for canvas styles
    pub fn css(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

impl TryFrom<String> for Color {
    type Error = ColorError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::from_hex(&s)
    }
}

impl From<Color> for String {
    fn from(c: Color) -> Self {
        c.to_hex()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.css())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex() {
        assert_eq!(Color::from_hex("#4d80a6").unwrap(), Color::BLUE);
        assert_eq!(Color::from_hex("#F0EAD6").unwrap(), Color::EGGSHELL);
        assert!(Color::from_hex("4d80a6").is_err());
        assert!(Color::from_hex("#4d80").is_err());
        assert!(Color::from_hex("#zz0000").is_err());
    }

    #[test]
    fn test_css() {
        assert_eq!(
            Color::EGGSHELL.with_alpha(0.2).css(),
            "rgba(240, 234, 214, 0.2)"
        );
        assert_eq!(Color::RED.to_string(), "rgba(166, 77, 77, 1)");
    }

    #[test]
    fn test_alpha_is_clamped() {
        assert_eq!(Color::BLUE.with_alpha(-0.5).a, 0.0);
        assert_eq!(Color::BLUE.with_alpha(3.0).a, 1.0);
    }
}
