//! Vector drawing surface backed by a tiny-skia pixmap.
//!
//! Map layers are drawn through a clip mask so nothing spills outside the
//! map rectangle; colorbar and frame drawing use no mask.

use image::RgbaImage;
use radar_common::{RadarError, RadarResult};
use tiny_skia::{
    FillRule, Mask, Paint, Path, PathBuilder, Pixmap, Rect, Stroke, StrokeDash, Transform,
};

use crate::colormap::Color;
use crate::layout::{MapTransform, PixelRect};

/// Line appearance.
#[derive(Debug, Clone, PartialEq)]
pub struct LineStyle {
    pub color: Color,
    pub width: f32,
    /// On/off dash lengths in pixels.
    pub dash: Option<[f32; 2]>,
}

impl LineStyle {
    pub fn solid(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            dash: None,
        }
    }

    pub fn dashed(color: Color, width: f32, on: f32, off: f32) -> Self {
        Self {
            color,
            width,
            dash: Some([on, off]),
        }
    }

    fn stroke(&self) -> Stroke {
        let mut stroke = Stroke {
            width: self.width,
            ..Stroke::default()
        };
        if let Some([on, off]) = self.dash {
            stroke.dash = StrokeDash::new(vec![on, off], 0.0);
        }
        stroke
    }
}

fn paint(color: Color) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(color.r, color.g, color.b, color.a);
    paint.anti_alias = true;
    paint
}

fn rect(r: &PixelRect) -> Option<Rect> {
    Rect::from_xywh(r.x, r.y, r.width, r.height)
}

/// Path through pixel points; `None` for fewer than two points.
pub fn polyline_path<I>(points: I, close: bool) -> Option<Path>
where
    I: IntoIterator<Item = (f32, f32)>,
{
    let mut pb = PathBuilder::new();
    let mut count = 0;
    for (x, y) in points {
        if !x.is_finite() || !y.is_finite() {
            continue;
        }
        if count == 0 {
            pb.move_to(x, y);
        } else {
            pb.line_to(x, y);
        }
        count += 1;
    }
    if count < 2 {
        return None;
    }
    if close {
        pb.close();
    }
    pb.finish()
}

/// Five-pointed star centered at `(cx, cy)`.
pub fn star_path(cx: f32, cy: f32, outer: f32) -> Option<Path> {
    let inner = outer * 0.382;
    let points = (0..10).map(|i| {
        let r = if i % 2 == 0 { outer } else { inner };
        let angle = std::f32::consts::PI * i as f32 / 5.0;
        (cx + r * angle.sin(), cy - r * angle.cos())
    });
    polyline_path(points, true)
}

/// Figure being composed.
pub struct Canvas {
    pixmap: Pixmap,
    map_clip: Mask,
}

impl Canvas {
    /// Canvas filled with `background`; map drawing is clipped to `map_rect`.
    pub fn new(width: u32, height: u32, background: Color, map_rect: &PixelRect) -> RadarResult<Self> {
        let mut pixmap = Pixmap::new(width, height).ok_or_else(|| {
            RadarError::Render(format!("cannot allocate {}x{} canvas", width, height))
        })?;
        pixmap.fill(tiny_skia::Color::from_rgba8(
            background.r,
            background.g,
            background.b,
            background.a,
        ));

        let mut map_clip = Mask::new(width, height)
            .ok_or_else(|| RadarError::Render("cannot allocate clip mask".to_string()))?;
        let clip_rect = rect(map_rect)
            .ok_or_else(|| RadarError::Render(format!("invalid map rectangle {:?}", map_rect)))?;
        map_clip.fill_path(
            &PathBuilder::from_rect(clip_rect),
            FillRule::Winding,
            false,
            Transform::identity(),
        );

        Ok(Self { pixmap, map_clip })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Fill a pixel rectangle, unclipped.
    pub fn fill_rect(&mut self, area: &PixelRect, color: Color) {
        if let Some(r) = rect(area) {
            self.pixmap
                .fill_rect(r, &paint(color), Transform::identity(), None);
        }
    }

    /// Outline a pixel rectangle, unclipped.
    pub fn stroke_rect(&mut self, area: &PixelRect, style: &LineStyle) {
        if let Some(r) = rect(area) {
            let path = PathBuilder::from_rect(r);
            self.pixmap
                .stroke_path(&path, &paint(style.color), &style.stroke(), Transform::identity(), None);
        }
    }

    /// Fill the whole map rectangle.
    pub fn fill_map(&mut self, map: &MapTransform, color: Color) {
        self.fill_rect(&map.rect, color);
    }

    /// Fill a path inside the map. Even-odd so polygon holes stay open.
    pub fn fill_map_path(&mut self, path: &Path, color: Color) {
        self.pixmap.fill_path(
            path,
            &paint(color),
            FillRule::EvenOdd,
            Transform::identity(),
            Some(&self.map_clip),
        );
    }

    /// Fill without anti-aliasing; adjacent mesh cells then meet without
    /// seams.
    pub fn fill_map_path_crisp(&mut self, path: &Path, color: Color) {
        let mut p = paint(color);
        p.anti_alias = false;
        self.pixmap.fill_path(
            path,
            &p,
            FillRule::Winding,
            Transform::identity(),
            Some(&self.map_clip),
        );
    }

    pub fn stroke_map_path(&mut self, path: &Path, style: &LineStyle) {
        self.pixmap.stroke_path(
            path,
            &paint(style.color),
            &style.stroke(),
            Transform::identity(),
            Some(&self.map_clip),
        );
    }

    /// Unfilled circle inside the map.
    pub fn stroke_map_circle(&mut self, cx: f32, cy: f32, radius: f32, style: &LineStyle) {
        if let Some(path) = PathBuilder::from_circle(cx, cy, radius) {
            self.stroke_map_path(&path, style);
        }
    }

    /// Straight segment, unclipped.
    pub fn line(&mut self, from: (f32, f32), to: (f32, f32), style: &LineStyle) {
        if let Some(path) = polyline_path([from, to], false) {
            self.pixmap
                .stroke_path(&path, &paint(style.color), &style.stroke(), Transform::identity(), None);
        }
    }

    /// Straight-alpha RGBA copy of the pixmap.
    pub fn into_image(self) -> RadarResult<RgbaImage> {
        let (width, height) = (self.pixmap.width(), self.pixmap.height());
        let mut data = Vec::with_capacity((width * height * 4) as usize);
        for pixel in self.pixmap.pixels() {
            let c = pixel.demultiply();
            data.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
        }
        RgbaImage::from_raw(width, height, data)
            .ok_or_else(|| RadarError::Render("canvas buffer size mismatch".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colormap::palette;

    fn map_rect() -> PixelRect {
        PixelRect {
            x: 10.0,
            y: 10.0,
            width: 40.0,
            height: 40.0,
        }
    }

    #[test]
    fn test_background_fill() {
        let canvas = Canvas::new(60, 60, palette::WHITE, &map_rect()).unwrap();
        let img = canvas.into_image().unwrap();
        assert_eq!(img.get_pixel(0, 0).0, [255, 255, 255, 255]);
        assert_eq!(img.dimensions(), (60, 60));
    }

    #[test]
    fn test_map_fill_is_clipped() {
        let mut canvas = Canvas::new(60, 60, palette::WHITE, &map_rect()).unwrap();
        let everywhere = polyline_path([(0.0, 0.0), (60.0, 0.0), (60.0, 60.0), (0.0, 60.0)], true).unwrap();
        canvas.fill_map_path(&everywhere, palette::BLACK);
        let img = canvas.into_image().unwrap();
        assert_eq!(img.get_pixel(30, 30).0, [0, 0, 0, 255]);
        assert_eq!(img.get_pixel(2, 2).0, [255, 255, 255, 255]);
        assert_eq!(img.get_pixel(57, 57).0, [255, 255, 255, 255]);
    }

    #[test]
    fn test_polyline_needs_two_points() {
        assert!(polyline_path([(1.0, 1.0)], false).is_none());
        assert!(polyline_path([(1.0, 1.0), (f32::NAN, 2.0)], false).is_none());
        assert!(polyline_path([(1.0, 1.0), (2.0, 2.0)], false).is_some());
    }

    #[test]
    fn test_star_path() {
        let star = star_path(20.0, 20.0, 5.0).unwrap();
        let bounds = star.bounds();
        assert!((bounds.top() - 15.0).abs() < 1e-3);
        assert!(bounds.bottom() < 25.0);
    }
}
