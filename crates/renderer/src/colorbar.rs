//! Vertical colorbar beside the map.

use image::RgbaImage;
use radar_common::RadarVariable;

use crate::canvas::{Canvas, LineStyle};
use crate::colormap::{palette, ColorScale};
use crate::layout::PixelRect;
use crate::text::{Anchor, TextPainter, TextStyle};

#[derive(Debug, Clone, PartialEq)]
pub struct Colorbar {
    pub scale: ColorScale,
    pub tick_step: f32,
    pub units: &'static str,
}

impl Colorbar {
    pub fn for_variable(variable: RadarVariable) -> Self {
        let family = variable.family();
        Self {
            scale: ColorScale::for_family(family),
            tick_step: family.tick_step(),
            units: family.units(),
        }
    }

    /// Tick values from the scale minimum to its maximum.
    pub fn ticks(&self) -> Vec<f32> {
        if self.tick_step <= 0.0 {
            return vec![self.scale.min, self.scale.max];
        }
        let n = ((self.scale.max - self.scale.min) / self.tick_step).round() as i32;
        (0..=n)
            .map(|i| self.scale.min + i as f32 * self.tick_step)
            .collect()
    }

    /// Vertical pixel position of a value; the minimum sits at the bottom.
    pub fn value_y(&self, rect: &PixelRect, value: f32) -> f32 {
        rect.bottom() - self.scale.normalize(value) * rect.height
    }

    /// Color strip, outline and tick marks.
    pub fn draw_bar(&self, canvas: &mut Canvas, rect: &PixelRect, pixel_scale: f32) {
        match self.scale.bands() {
            Some(n) => {
                let band_h = rect.height / n as f32;
                for i in 0..n {
                    let t = (i as f32 + 0.5) / n as f32;
                    let band = PixelRect {
                        x: rect.x,
                        y: rect.bottom() - (i + 1) as f32 * band_h,
                        width: rect.width,
                        height: band_h,
                    };
                    canvas.fill_rect(&band, self.scale.color_at(t));
                }
            }
            None => {
                let rows = rect.height.ceil().max(1.0) as usize;
                for row in 0..rows {
                    let t = 1.0 - (row as f32 + 0.5) / rows as f32;
                    let strip = PixelRect {
                        x: rect.x,
                        y: rect.y + row as f32,
                        width: rect.width,
                        height: 1.0,
                    };
                    canvas.fill_rect(&strip, self.scale.color_at(t));
                }
            }
        }

        let outline = LineStyle::solid(palette::BLACK, (1.0 * pixel_scale).max(1.0));
        canvas.stroke_rect(rect, &outline);

        let tick_len = 6.0 * pixel_scale;
        for value in self.ticks() {
            let y = self.value_y(rect, value);
            canvas.line((rect.right(), y), (rect.right() + tick_len, y), &outline);
        }
    }

    /// Tick labels to the right and the units label above.
    pub fn draw_labels(&self, img: &mut RgbaImage, text: &TextPainter, rect: &PixelRect, size_px: f32) {
        let style = TextStyle::new(size_px, palette::BLACK, Anchor::Left);
        let x = rect.right() + size_px * 0.8;
        for value in self.ticks() {
            let y = self.value_y(rect, value);
            text.draw_centered_v(img, &format_tick(value), x, y, &style);
        }

        let units = TextStyle::new(size_px, palette::BLACK, Anchor::Center);
        text.draw(img, self.units, rect.x + rect.width / 2.0, rect.y - size_px * 1.6, &units);
    }
}

/// Integer ticks print without decimals.
pub fn format_tick(value: f32) -> String {
    if (value - value.round()).abs() < 1e-4 {
        format!("{}", value.round() as i32)
    } else {
        format!("{:.1}", value)
    }
}
