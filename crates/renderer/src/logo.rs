//! Institutional logo compositing.

use std::path::Path;

use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use radar_common::{RadarError, RadarResult};

/// Logo drawn at `zoom` × its native size on a 2000 px figure whose
/// images are placed at 72 dpi.
const NATIVE_SCALE_AT_REFERENCE: f32 = 100.0 / 72.0;

#[derive(Debug, Clone)]
pub struct Logo {
    image: RgbaImage,
}

impl Logo {
    /// Read a raster logo (any format `image` decodes).
    pub fn open(path: &Path) -> RadarResult<Self> {
        let image = image::open(path)
            .map_err(|e| RadarError::Render(format!("cannot read logo {}: {}", path.display(), e)))?
            .to_rgba8();
        if image.width() == 0 || image.height() == 0 {
            return Err(RadarError::Render(format!("logo {} is empty", path.display())));
        }
        Ok(Self { image })
    }

    pub fn from_image(image: RgbaImage) -> Self {
        Self { image }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// Scaled logo inside a white box with a thin black border.
    pub fn framed(&self, zoom: f64, pixel_scale: f32) -> RgbaImage {
        let factor = zoom as f32 * pixel_scale * NATIVE_SCALE_AT_REFERENCE;
        let w = ((self.image.width() as f32 * factor).round() as u32).max(1);
        let h = ((self.image.height() as f32 * factor).round() as u32).max(1);
        let scaled = imageops::resize(&self.image, w, h, FilterType::Triangle);

        let pad = ((4.0 * pixel_scale).round() as u32).max(1);
        let border = 1;
        let outer_w = w + 2 * (pad + border);
        let outer_h = h + 2 * (pad + border);

        let mut framed = RgbaImage::from_pixel(outer_w, outer_h, Rgba([0, 0, 0, 255]));
        for y in border..outer_h - border {
            for x in border..outer_w - border {
                framed.put_pixel(x, y, Rgba([255, 255, 255, 255]));
            }
        }
        imageops::overlay(&mut framed, &scaled, (pad + border) as i64, (pad + border) as i64);
        framed
    }

    /// Composite onto `target` centered at pixel `(cx, cy)`.
    pub fn draw(&self, target: &mut RgbaImage, cx: f32, cy: f32, zoom: f64, pixel_scale: f32) {
        let framed = self.framed(zoom, pixel_scale);
        let x = (cx - framed.width() as f32 / 2.0).round() as i64;
        let y = (cy - framed.height() as f32 / 2.0).round() as i64;
        imageops::overlay(target, &framed, x, y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn red_logo() -> Logo {
        Logo::from_image(RgbaImage::from_pixel(10, 6, Rgba([255, 0, 0, 255])))
    }

    #[test]
    fn test_frame_has_border_and_padding() {
        let framed = red_logo().framed(1.0 / NATIVE_SCALE_AT_REFERENCE as f64, 1.0);
        // 10x6 logo + 4 px padding + 1 px border on each side
        assert_eq!(framed.dimensions(), (20, 16));
        assert_eq!(framed.get_pixel(0, 0).0, [0, 0, 0, 255]);
        assert_eq!(framed.get_pixel(2, 2).0, [255, 255, 255, 255]);
        assert_eq!(framed.get_pixel(10, 8).0, [255, 0, 0, 255]);
    }

    #[test]
    fn test_draw_centers_logo() {
        let mut target = RgbaImage::from_pixel(100, 100, Rgba([0, 0, 255, 255]));
        red_logo().draw(&mut target, 50.0, 50.0, 1.0 / NATIVE_SCALE_AT_REFERENCE as f64, 1.0);
        assert_eq!(target.get_pixel(50, 50).0, [255, 0, 0, 255]);
        assert_eq!(target.get_pixel(5, 5).0, [0, 0, 255, 255]);
    }

    #[test]
    fn test_unreadable_logo_is_render_error() {
        let err = Logo::open(Path::new("/nonexistent/imn.jpg")).unwrap_err();
        assert_eq!(err.kind(), "RenderError");
    }
}
