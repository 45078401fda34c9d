//! Color scales for radar fields.
//!
//! Velocity uses a diverging cool-warm ramp, reflectivity a 20-step banded
//! qualitative palette. Both map a fixed display range and clamp values
//! outside it to the end colors.

use radar_common::{RadarVariable, VariableFamily};

/// Color value in RGBA format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub const fn transparent() -> Self {
        Self::new(0, 0, 0, 0)
    }

    /// Parse `#rrggbb` (leading `#` optional).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some(Self::rgb(r, g, b))
    }

    pub fn to_rgba(self) -> image::Rgba<u8> {
        image::Rgba([self.r, self.g, self.b, self.a])
    }
}

/// Fixed drawing colors.
pub mod palette {
    use super::Color;

    pub const WATER: Color = Color::rgb(152, 183, 226);
    pub const LAND: Color = Color::rgb(240, 240, 220);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BORDER_GREEN: Color = Color::rgb(0, 128, 0);
    pub const PURPLE: Color = Color::rgb(128, 0, 128);
}

/// Linear color interpolation
pub fn interpolate_color(color1: Color, color2: Color, t: f32) -> Color {
    let t = t.clamp(0.0, 1.0);
    let t_inv = 1.0 - t;
    let mix = |a: u8, b: u8| (a as f32 * t_inv + b as f32 * t).round() as u8;

    Color::new(
        mix(color1.r, color2.r),
        mix(color1.g, color2.g),
        mix(color1.b, color2.b),
        mix(color1.a, color2.a),
    )
}

/// Anchors of the cool-warm diverging ramp at evenly spaced positions.
const COOLWARM: [Color; 9] = [
    Color::rgb(59, 76, 192),
    Color::rgb(98, 130, 234),
    Color::rgb(141, 176, 254),
    Color::rgb(184, 208, 249),
    Color::rgb(221, 221, 221),
    Color::rgb(245, 196, 173),
    Color::rgb(244, 154, 123),
    Color::rgb(222, 96, 77),
    Color::rgb(180, 4, 38),
];

/// The 20 colors of the tab20c palette, in order.
const TAB20C: [&str; 20] = [
    "#3182bd", "#6baed6", "#9ecae1", "#c6dbef", "#e6550d", "#fd8d3c", "#fdae6b", "#fdd0a2",
    "#31a354", "#74c476", "#a1d99b", "#c7e9c0", "#756bb1", "#9e9ac8", "#bcbddc", "#dadaeb",
    "#636363", "#969696", "#bdbdbd", "#d9d9d9",
];

#[derive(Debug, Clone, PartialEq)]
enum Ramp {
    /// Piecewise-linear between evenly spaced anchors.
    Continuous(Vec<Color>),
    /// Equal-width bands, one color each.
    Banded(Vec<Color>),
}

/// A normalization range plus a color ramp.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorScale {
    pub min: f32,
    pub max: f32,
    ramp: Ramp,
}

impl ColorScale {
    /// Diverging blue-to-red scale.
    pub fn coolwarm(min: f32, max: f32) -> Self {
        Self {
            min,
            max,
            ramp: Ramp::Continuous(COOLWARM.to_vec()),
        }
    }

    /// 20-band qualitative scale.
    pub fn tab20c(min: f32, max: f32) -> Self {
        let colors = TAB20C.iter().filter_map(|hex| Color::from_hex(hex)).collect();
        Self {
            min,
            max,
            ramp: Ramp::Banded(colors),
        }
    }

    /// Scale used for a variable family over its display range.
    pub fn for_family(family: VariableFamily) -> Self {
        let (min, max) = family.display_range();
        match family {
            VariableFamily::Velocity => Self::coolwarm(min, max),
            VariableFamily::Reflectivity => Self::tab20c(min, max),
        }
    }

    pub fn for_variable(variable: RadarVariable) -> Self {
        Self::for_family(variable.family())
    }

    /// Value mapped to [0, 1], clamped.
    pub fn normalize(&self, value: f32) -> f32 {
        let range = self.max - self.min;
        if range.abs() < f32::EPSILON {
            return 0.0;
        }
        ((value - self.min) / range).clamp(0.0, 1.0)
    }

    /// Number of discrete bands, or `None` for a continuous ramp.
    pub fn bands(&self) -> Option<usize> {
        match &self.ramp {
            Ramp::Banded(colors) => Some(colors.len()),
            Ramp::Continuous(_) => None,
        }
    }

    /// Color for a data value; NaN is transparent.
    pub fn color_for(&self, value: f32) -> Color {
        if value.is_nan() {
            return Color::transparent();
        }
        self.color_at(self.normalize(value))
    }

    /// Color at a normalized position in [0, 1].
    pub fn color_at(&self, t: f32) -> Color {
        let t = t.clamp(0.0, 1.0);
        match &self.ramp {
            Ramp::Banded(colors) => {
                let n = colors.len();
                let idx = ((t * n as f32) as usize).min(n - 1);
                colors[idx]
            }
            Ramp::Continuous(anchors) => {
                let segments = (anchors.len() - 1) as f32;
                let pos = t * segments;
                let idx = (pos.floor() as usize).min(anchors.len() - 2);
                interpolate_color(anchors[idx], anchors[idx + 1], pos - idx as f32)
            }
        }
    }
}
