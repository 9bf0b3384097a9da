use std::fmt;

use serde::{Serialize, Serializer};

use crate::error::ColorError;
use crate::models::Party;

/// Share difference under which both light colors are blended
pub const COLOR_MIXED_THRESHOLD: f64 = 0.1;

/// An RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a `#rrggbb` color
    pub fn from_hex(hex: &str) -> Result<Self, ColorError> {
        let invalid = || ColorError::InvalidHex(hex.to_string());

        let digits = hex.trim().strip_prefix('#').ok_or_else(invalid)?;
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| invalid());

        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Linear interpolation towards `target`; `weight` is clamped to [0, 1]
    pub fn lerp(&self, target: Rgb, weight: f64) -> Rgb {
        let w = if weight.is_nan() { 0.0 } else { weight.clamp(0.0, 1.0) };
        let mix = |a: u8, b: u8| {
            let (a, b) = (f64::from(a), f64::from(b));
            (a + w * (b - a)).round() as u8
        };

        Rgb::new(
            mix(self.r, target.r),
            mix(self.g, target.g),
            mix(self.b, target.b),
        )
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

/// Endpoints for single-probability coloring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Color at exactly 50%
    pub neutral: Rgb,
    /// Endpoint when the favored probability is above 50%
    pub warm: Rgb,
    /// Endpoint when it is at or below 50%
    pub cool: Rgb,
}

impl Palette {
    pub fn from_hex(neutral: &str, warm: &str, cool: &str) -> Result<Self, ColorError> {
        Ok(Self {
            neutral: Rgb::from_hex(neutral)?,
            warm: Rgb::from_hex(warm)?,
            cool: Rgb::from_hex(cool)?,
        })
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            neutral: Rgb::new(0xf0, 0xf0, 0xf5),
            warm: Rgb::new(0xc0, 0x3b, 0x2b),
            cool: Rgb::new(0x2a, 0x5d, 0xa8),
        }
    }
}

/// Map a probability to a color between the neutral and an endpoint color.
///
/// A missing or NaN probability is treated as 0.5 and values outside [0, 1]
/// are clamped, so the function is total. With `favored_side` false the
/// probability is flipped before choosing the endpoint.
pub fn color_for(probability: Option<f64>, favored_side: bool, palette: &Palette) -> Rgb {
    let prob = match probability {
        Some(p) if !p.is_nan() => p.clamp(0.0, 1.0),
        _ => 0.5,
    };

    let p = if favored_side { prob } else { 1.0 - prob };
    let endpoint = if p > 0.5 { palette.warm } else { palette.cool };
    let weight = (p - 0.5).abs() * 2.0;

    palette.neutral.lerp(endpoint, weight)
}

/// Light/dark pairs for the two-sided map blend
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MixedPalette {
    pub dem_light: Rgb,
    pub dem_dark: Rgb,
    pub rep_light: Rgb,
    pub rep_dark: Rgb,
    /// Share difference under which both light colors are blended
    pub threshold: f64,
}

impl Default for MixedPalette {
    fn default() -> Self {
        Self {
            dem_light: Rgb::new(0xad, 0xc4, 0xe3),
            dem_dark: Rgb::new(0x2a, 0x5d, 0xa8),
            rep_light: Rgb::new(0xec, 0xba, 0xb5),
            rep_dark: Rgb::new(0xc0, 0x3b, 0x2b),
            threshold: COLOR_MIXED_THRESHOLD,
        }
    }
}

/// Two-sided map color from the Republican probability of a binary race.
///
/// Close races blend the two light colors; otherwise the leading side's light
/// color darkens with the margin.
pub fn mixed_color(rep_prob: f64, palette: &MixedPalette) -> Rgb {
    let rep = if rep_prob.is_nan() { 0.5 } else { rep_prob.clamp(0.0, 1.0) };
    let dem = 1.0 - rep;
    let t = palette.threshold;

    let rep_over_dem = rep - dem;
    let abs_diff = rep_over_dem.abs();

    if abs_diff < t / 2.0 {
        return palette
            .dem_light
            .lerp(palette.rep_light, (rep_over_dem + t / 2.0) / t);
    }

    let weight = (abs_diff - t) / (1.0 - t);
    if rep_over_dem < 0.0 {
        palette.dem_light.lerp(palette.dem_dark, weight)
    } else {
        palette.rep_light.lerp(palette.rep_dark, weight)
    }
}

/// Fixed card color for a party
pub fn party_color(party: Party) -> Rgb {
    match party {
        Party::Democratic => Rgb::new(0xad, 0xc4, 0xe3),
        Party::Republican => Rgb::new(0xec, 0xba, 0xb5),
        Party::Other => Rgb::new(0x9e, 0x9f, 0xbd),
    }
}
