//! Figure geometry: where the map, colorbar and title go, and how projected
//! meters map onto map pixels.

use radar_common::{BoundingBox, RadarError, RadarResult};

/// Pixel sizes at the reference width of 2000 px (20 in at 100 dpi).
pub const REFERENCE_WIDTH: f32 = 2000.0;
/// One typographic point at 100 dpi.
const PX_PER_POINT: f32 = 100.0 / 72.0;

const TITLE_POINTS: f32 = 22.0;
const RING_LABEL_POINTS: f32 = 15.0;
const PLACE_LABEL_POINTS: f32 = 10.0;
const TICK_LABEL_POINTS: f32 = 14.0;

/// Axis-aligned pixel rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl PixelRect {
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && px <= self.right() && py >= self.y && py <= self.bottom()
    }
}

/// Projected meters to pixels inside the map rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapTransform {
    pub extent: BoundingBox,
    pub rect: PixelRect,
}

impl MapTransform {
    pub fn new(extent: BoundingBox, rect: PixelRect) -> Self {
        Self { extent, rect }
    }

    /// Pixels per projected meter (same on both axes).
    pub fn scale(&self) -> f64 {
        self.rect.width as f64 / self.extent.width()
    }

    pub fn to_pixel(&self, x: f64, y: f64) -> (f32, f32) {
        let scale = self.scale();
        let px = self.rect.x as f64 + (x - self.extent.min_x) * scale;
        let py = self.rect.y as f64 + (self.extent.max_y - y) * scale;
        (px as f32, py as f32)
    }

    /// Whether a projected point falls inside the map.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        self.extent.contains_point(x, y)
    }
}

/// Placement of every figure element.
#[derive(Debug, Clone, PartialEq)]
pub struct FigureLayout {
    pub width: u32,
    pub height: u32,
    pub map: MapTransform,
    pub colorbar: PixelRect,
    /// Band above the map holding the title.
    pub title_band: PixelRect,
    /// Font sizes in pixels.
    pub title_px: f32,
    pub ring_label_px: f32,
    pub place_label_px: f32,
    pub tick_label_px: f32,
    /// Multiplier from reference-sized elements to this figure.
    pub pixel_scale: f32,
}

impl FigureLayout {
    /// Lay out a figure `width` pixels wide around a projected extent.
    ///
    /// The map keeps the extent's aspect ratio; the colorbar spans the map
    /// height and is `colorbar_fraction` of the map width.
    pub fn compute(width: u32, extent: &BoundingBox, colorbar_fraction: f64) -> RadarResult<Self> {
        if extent.width() <= 0.0 || extent.height() <= 0.0 {
            return Err(RadarError::Render(format!(
                "projected extent {:?} has no area",
                extent.extent()
            )));
        }

        let w = width as f32;
        let pixel_scale = w / REFERENCE_WIDTH;
        let pt = pixel_scale * PX_PER_POINT;
        let title_px = TITLE_POINTS * pt;
        let tick_label_px = TICK_LABEL_POINTS * pt;

        let pad = 0.02 * w;
        let tick_area = tick_label_px * 4.0;
        let title_band_height = title_px * 2.2;

        // map + gap + colorbar share what's left after padding and tick labels
        let gap_fraction = 0.05;
        let available = w - 2.0 * pad - tick_area;
        let map_width = available / (1.0 + gap_fraction + colorbar_fraction as f32);
        if map_width < 64.0 {
            return Err(RadarError::Render(format!(
                "figure width {} px leaves no room for the map",
                width
            )));
        }
        let map_height = (map_width as f64 * extent.height() / extent.width()) as f32;

        let map_rect = PixelRect {
            x: pad,
            y: pad + title_band_height,
            width: map_width,
            height: map_height,
        };
        let colorbar = PixelRect {
            x: map_rect.right() + gap_fraction * map_width,
            y: map_rect.y,
            width: (colorbar_fraction as f32 * map_width).max(1.0),
            height: map_height,
        };
        let title_band = PixelRect {
            x: pad,
            y: pad,
            width: map_width,
            height: title_band_height,
        };
        let height = (map_rect.bottom() + pad).ceil() as u32;

        Ok(Self {
            width,
            height,
            map: MapTransform::new(*extent, map_rect),
            colorbar,
            title_band,
            title_px,
            ring_label_px: RING_LABEL_POINTS * pt,
            place_label_px: PLACE_LABEL_POINTS * pt,
            tick_label_px,
            pixel_scale,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aspect_ratio_kept() {
        let extent = BoundingBox::new(-200_000.0, -100_000.0, 200_000.0, 100_000.0);
        let layout = FigureLayout::compute(2000, &extent, 0.04).unwrap();
        let rect = layout.map.rect;
        assert!((rect.width / rect.height - 2.0).abs() < 1e-3);
        assert!(layout.colorbar.x > rect.right());
        assert!((layout.colorbar.width - 0.04 * rect.width).abs() < 1e-3);
        assert!(layout.colorbar.right() <= 2000.0);
        assert!(layout.height as f32 >= rect.bottom());
    }

    #[test]
    fn test_map_transform_corners() {
        let extent = BoundingBox::new(-100.0, -50.0, 100.0, 50.0);
        let rect = PixelRect {
            x: 10.0,
            y: 20.0,
            width: 200.0,
            height: 100.0,
        };
        let t = MapTransform::new(extent, rect);
        assert_eq!(t.to_pixel(-100.0, 50.0), (10.0, 20.0));
        assert_eq!(t.to_pixel(100.0, -50.0), (210.0, 120.0));
        assert_eq!(t.to_pixel(0.0, 0.0), (110.0, 70.0));
    }

    #[test]
    fn test_degenerate_extent_rejected() {
        let extent = BoundingBox::new(0.0, 0.0, 0.0, 10.0);
        let err = FigureLayout::compute(2000, &extent, 0.04).unwrap_err();
        assert_eq!(err.kind(), "RenderError");
    }

    #[test]
    fn test_tiny_figure_rejected() {
        let extent = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        assert!(FigureLayout::compute(40, &extent, 0.04).is_err());
    }
}
