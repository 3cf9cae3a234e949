// src/color/mod.rs
//! HEX, RGB and HSL color values and the conversions between them.
//!
//! RGB is the canonical device-space value. HSL is kept unrounded so that
//! RGB -> HSL -> RGB stays within one unit per channel; it is only rounded
//! when rendered.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

mod parse;

pub use parse::{parse_hex, parse_hsl_string, parse_rgb_string};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ColorError {
    #[error("Invalid color format: {0}")]
    InvalidFormat(String),
}

pub type Result<T> = std::result::Result<T, ColorError>;

/// An sRGB color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build a color from arbitrary integers, clamping each channel to 0..=255.
    pub fn from_channels(r: i64, g: i64, b: i64) -> Self {
        let clamp = |v: i64| v.clamp(0, 255) as u8;
        Self::new(clamp(r), clamp(g), clamp(b))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

/// A color in HSL notation: hue in degrees, saturation and lightness in
/// percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

impl Hsl {
    pub const fn new(h: f64, s: f64, l: f64) -> Self {
        Self { h, s, l }
    }

    /// Integer hue, saturation and lightness as shown to a user.
    pub fn rounded(&self) -> (u16, u8, u8) {
        let hue = self.h.round().rem_euclid(360.0) as u16;
        let sat = self.s.round().clamp(0.0, 100.0) as u8;
        let light = self.l.round().clamp(0.0, 100.0) as u8;
        (hue, sat, light)
    }
}

impl fmt::Display for Hsl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (h, s, l) = self.rounded();
        write!(f, "hsl({}, {}%, {}%)", h, s, l)
    }
}

/// Format a color as `#rrggbb`.
pub fn rgb_to_hex(rgb: &Rgb) -> String {
    format!("#{:02x}{:02x}{:02x}", rgb.r, rgb.g, rgb.b)
}

pub fn rgb_to_hsl(rgb: &Rgb) -> Hsl {
    let r = f64::from(rgb.r) / 255.0;
    let g = f64::from(rgb.g) / 255.0;
    let b = f64::from(rgb.b) / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    // Achromatic: hue and saturation are exactly zero.
    if rgb.r == rgb.g && rgb.g == rgb.b {
        return Hsl::new(0.0, 0.0, l * 100.0);
    }

    let d = max - min;
    let s = if l > 0.5 {
        d / (2.0 - max - min)
    } else {
        d / (max + min)
    };

    let sextant = if max == r {
        (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };

    let h = (sextant * 60.0).rem_euclid(360.0);

    Hsl::new(h, s * 100.0, l * 100.0)
}

pub fn hsl_to_rgb(hsl: &Hsl) -> Rgb {
    let h = hsl.h.rem_euclid(360.0);
    let s = hsl.s.clamp(0.0, 100.0) / 100.0;
    let l = hsl.l.clamp(0.0, 100.0) / 100.0;

    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = l - c / 2.0;

    let (r1, g1, b1) = match h {
        h if h < 60.0 => (c, x, 0.0),
        h if h < 120.0 => (x, c, 0.0),
        h if h < 180.0 => (0.0, c, x),
        h if h < 240.0 => (0.0, x, c),
        h if h < 300.0 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    let channel = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    Rgb::new(channel(r1), channel(g1), channel(b1))
}

/// A color rendered in every notation the converter shows.
#[derive(Debug, Clone, Serialize)]
pub struct ColorReport {
    pub hex: String,
    pub rgb: String,
    pub hsl: String,
    pub channels: Rgb,
}

impl From<Rgb> for ColorReport {
    fn from(rgb: Rgb) -> Self {
        Self {
            hex: rgb_to_hex(&rgb),
            rgb: rgb.to_string(),
            hsl: rgb_to_hsl(&rgb).to_string(),
            channels: rgb,
        }
    }
}

/// Parse any of the three notations, trying `rgb(...)` and `hsl(...)` before
/// falling back to hex.
pub fn parse_any(input: &str) -> Result<Rgb> {
    let trimmed = input.trim();
    let lower = trimmed.to_ascii_lowercase();

    if lower.starts_with("rgb") {
        parse_rgb_string(trimmed)
    } else if lower.starts_with("hsl") {
        parse_hsl_string(trimmed).map(|hsl| hsl_to_rgb(&hsl))
    } else {
        parse_hex(trimmed)
    }
}
