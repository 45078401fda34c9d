//! Text drawing with a TrueType font loaded at runtime.
//!
//! A missing or unreadable font is not fatal: the painter is created
//! without a face and every draw call becomes a no-op.

use std::path::Path;

use image::RgbaImage;
use imageproc::drawing::{draw_text_mut, text_size};
use rusttype::{Font, Scale};
use tracing::warn;

use crate::colormap::Color;

/// Horizontal anchor of a text run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Left,
    Center,
    Right,
}

/// Size, color and anchor of a text run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub size_px: f32,
    pub color: Color,
    pub anchor: Anchor,
}

impl TextStyle {
    pub fn new(size_px: f32, color: Color, anchor: Anchor) -> Self {
        Self {
            size_px,
            color,
            anchor,
        }
    }
}

pub struct TextPainter {
    font: Option<Font<'static>>,
}

impl TextPainter {
    /// Load a font file; on failure log a warning and draw no text.
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            warn!("No font configured, text will be skipped");
            return Self::disabled();
        };
        match std::fs::read(path) {
            Ok(bytes) => Self::from_bytes(bytes).unwrap_or_else(|| {
                warn!(font = %path.display(), "Failed to parse font, text will be skipped");
                Self::disabled()
            }),
            Err(e) => {
                warn!(font = %path.display(), error = %e, "Failed to read font, text will be skipped");
                Self::disabled()
            }
        }
    }

    pub fn from_bytes(bytes: Vec<u8>) -> Option<Self> {
        Font::try_from_vec(bytes).map(|font| Self { font: Some(font) })
    }

    pub fn disabled() -> Self {
        Self { font: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.font.is_some()
    }

    /// Rendered size in pixels; `(0, 0)` without a font.
    pub fn measure(&self, text: &str, size_px: f32) -> (i32, i32) {
        match &self.font {
            Some(font) => text_size(Scale::uniform(size_px), font, text),
            None => (0, 0),
        }
    }

    /// Draw `text` with its top edge at `y` and horizontal anchor at `x`.
    pub fn draw(&self, img: &mut RgbaImage, text: &str, x: f32, y: f32, style: &TextStyle) {
        let Some(font) = &self.font else {
            return;
        };
        let (w, _) = self.measure(text, style.size_px);
        let left = match style.anchor {
            Anchor::Left => x,
            Anchor::Center => x - w as f32 / 2.0,
            Anchor::Right => x - w as f32,
        };
        draw_text_mut(
            img,
            style.color.to_rgba(),
            left.round() as i32,
            y.round() as i32,
            Scale::uniform(style.size_px),
            font,
            text,
        );
    }

    /// Draw `text` so its vertical center sits at `y`.
    pub fn draw_centered_v(&self, img: &mut RgbaImage, text: &str, x: f32, y: f32, style: &TextStyle) {
        let (_, h) = self.measure(text, style.size_px);
        self.draw(img, text, x, y - h as f32 / 2.0, style);
    }
}
