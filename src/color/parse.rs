// src/color/parse.rs
use lazy_static::lazy_static;
use regex::Regex;

use super::{ColorError, Hsl, Result, Rgb};

lazy_static! {
    static ref RGB_PATTERN: Regex =
        Regex::new(r"(?i)rgb\(\s*(\d{1,3})\s*,\s*(\d{1,3})\s*,\s*(\d{1,3})\s*\)")
            .expect("rgb pattern is valid");
    static ref HSL_PATTERN: Regex =
        Regex::new(r"(?i)hsl\(\s*(\d{1,3})\s*,\s*(\d{1,3})%\s*,\s*(\d{1,3})%\s*\)")
            .expect("hsl pattern is valid");
}

/// Parse `#RGB`, `#RRGGBB` or the same without the leading `#`.
pub fn parse_hex(input: &str) -> Result<Rgb> {
    let trimmed = input.trim();
    let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);

    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ColorError::InvalidFormat(input.to_string()));
    }

    let expanded: String = match digits.len() {
        3 => digits.chars().flat_map(|c| [c, c]).collect(),
        6 => digits.to_string(),
        _ => return Err(ColorError::InvalidFormat(input.to_string())),
    };

    // Only ASCII hex digits remain, so byte slicing is safe.
    let channel = |i: usize| {
        u8::from_str_radix(&expanded[i..i + 2], 16)
            .map_err(|_| ColorError::InvalidFormat(input.to_string()))
    };

    Ok(Rgb::new(channel(0)?, channel(2)?, channel(4)?))
}

/// Parse `rgb(r, g, b)`. Channels above 255 are clamped.
pub fn parse_rgb_string(input: &str) -> Result<Rgb> {
    let caps = RGB_PATTERN
        .captures(input)
        .ok_or_else(|| ColorError::InvalidFormat(input.to_string()))?;

    let [r, g, b] = captured_numbers(&caps, input)?;
    Ok(Rgb::from_channels(r, g, b))
}

/// Parse `hsl(h, s%, l%)`. Hue is clamped to 360 (which wraps to 0),
/// saturation and lightness to 100.
pub fn parse_hsl_string(input: &str) -> Result<Hsl> {
    let caps = HSL_PATTERN
        .captures(input)
        .ok_or_else(|| ColorError::InvalidFormat(input.to_string()))?;

    let [h, s, l] = captured_numbers(&caps, input)?;
    let hue = (h.clamp(0, 360) % 360) as f64;
    Ok(Hsl::new(hue, s.clamp(0, 100) as f64, l.clamp(0, 100) as f64))
}

fn captured_numbers(caps: &regex::Captures<'_>, input: &str) -> Result<[i64; 3]> {
    let mut out = [0i64; 3];
    for (slot, i) in out.iter_mut().zip(1..=3) {
        *slot = caps
            .get(i)
            .and_then(|m| m.as_str().parse().ok())
            .ok_or_else(|| ColorError::InvalidFormat(input.to_string()))?;
    }
    Ok(out)
}
