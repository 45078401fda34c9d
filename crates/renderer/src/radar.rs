//! Composition of one radar figure.
//!
//! Layers are drawn bottom to top: water, land, the radar mesh, coastline,
//! borders, administrative boundaries, range rings, place markers, labels,
//! logo and finally the title.

use std::path::{Path, PathBuf};
use std::time::Instant;

use geo_types::{LineString, Polygon};
use image::RgbaImage;
use projection::LambertConformal;
use radar_common::{
    BoundingBox, PlaceMarker, RadarError, RadarResult, RadarVariable, RadarVolume, RingMarker,
    SceneFraming,
};
use tiny_skia::{Path as SkPath, PathBuilder};
use tracing::{debug, info};

use crate::canvas::{polyline_path, star_path, Canvas, LineStyle};
use crate::colorbar::Colorbar;
use crate::colormap::palette;
use crate::geography::{BaseGeography, GeoLayer, GeographyPaths};
use crate::layout::{FigureLayout, MapTransform};
use crate::logo::Logo;
use crate::mesh::{build_mesh, MaskedField};
use crate::png::write_png;
use crate::text::{Anchor, TextPainter, TextStyle};

/// Default figure width in pixels.
pub const DEFAULT_FIGURE_WIDTH: u32 = 2000;

/// Offset of label anchors from their point, degrees.
const LABEL_OFFSET_DEG: f64 = 0.01;

/// Everything loaded once and shared by every render.
pub struct RenderAssets {
    pub logo: Logo,
    pub text: TextPainter,
    pub geography: BaseGeography,
    pub rings: Vec<RingMarker>,
    pub figure_width: u32,
}

impl RenderAssets {
    /// Load the logo, font and geography layers.
    ///
    /// Only the logo is mandatory; a missing font or shapefile degrades the
    /// figure with a warning.
    pub fn load(
        logo: &Path,
        font: Option<&Path>,
        geography: &GeographyPaths,
        rings: Vec<RingMarker>,
        figure_width: u32,
    ) -> RadarResult<Self> {
        Ok(Self {
            logo: Logo::open(logo)?,
            text: TextPainter::load(font),
            geography: BaseGeography::load(geography),
            rings,
            figure_width,
        })
    }
}

/// One figure to produce.
#[derive(Debug, Clone, Copy)]
pub struct RenderRequest<'a> {
    pub volume: &'a RadarVolume,
    pub variable: RadarVariable,
    pub framing: &'a SceneFraming,
    pub markers: &'a [PlaceMarker],
    pub title: &'a str,
    pub output_dir: &'a Path,
}

impl RenderRequest<'_> {
    /// `{output_dir}/{tag}_actual.png` or `{tag}_actualRed.png`.
    pub fn output_path(&self) -> PathBuf {
        self.output_dir
            .join(self.framing.output_name(self.variable.tag()))
    }
}

pub struct RadarRenderer {
    assets: RenderAssets,
}

impl RadarRenderer {
    pub fn new(assets: RenderAssets) -> Self {
        Self { assets }
    }

    pub fn assets(&self) -> &RenderAssets {
        &self.assets
    }

    /// Compose and save; returns the written path.
    pub fn render(&self, request: &RenderRequest<'_>) -> RadarResult<PathBuf> {
        let start = Instant::now();
        let img = self.compose(request)?;
        let path = request.output_path();
        write_png(&img, &path)?;
        info!(
            variable = request.variable.tag(),
            output = %path.display(),
            width = img.width(),
            height = img.height(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Saved radar image"
        );
        Ok(path)
    }

    /// Build the figure in memory.
    ///
    /// Fails with `MissingField` before any drawing when the volume lacks
    /// the requested variable.
    pub fn compose(&self, request: &RenderRequest<'_>) -> RadarResult<RgbaImage> {
        let RenderRequest {
            volume,
            variable,
            framing,
            markers,
            title,
            ..
        } = *request;

        let field = volume.field(variable)?;
        framing.validate()?;

        let proj = LambertConformal::centered(volume.site_lat, volume.site_lon);
        let extent = proj.project_extent(&framing.extent).ok_or_else(|| {
            RadarError::Render(format!(
                "extent {:?} does not project to a finite area",
                framing.extent.extent()
            ))
        })?;
        let layout = FigureLayout::compute(self.assets.figure_width, &extent, framing.colorbar_fraction)?;
        let map = layout.map;
        let px = layout.pixel_scale;

        let masked = MaskedField::for_variable(field, variable);
        let colorbar = Colorbar::for_variable(variable);
        let cells = build_mesh(&volume.range_m, &volume.azimuth_deg, &masked, &colorbar.scale, &extent);
        debug!(
            variable = variable.tag(),
            valid = masked.valid_count(),
            masked = masked.masked_count(),
            cells = cells.len(),
            "Built radar mesh"
        );

        let mut canvas = Canvas::new(layout.width, layout.height, palette::WHITE, &map.rect)?;
        canvas.fill_map(&map, palette::WATER);

        let geography = self.assets.geography.culled(&geographic_bounds(&proj, &extent));
        if let Some(land) = &geography.land {
            for polygon in &land.polygons {
                if let Some(path) = polygon_path(polygon, &proj, &map) {
                    canvas.fill_map_path(&path, palette::LAND);
                }
            }
        }

        for cell in &cells {
            let corners = cell.corners.iter().map(|&(x, y)| map.to_pixel(x, y));
            if let Some(path) = polyline_path(corners, true) {
                canvas.fill_map_path_crisp(&path, cell.color);
            }
        }

        let thin = (1.0 * px).max(1.0);
        if let Some(layer) = &geography.coastline {
            stroke_layer(&mut canvas, layer, &proj, &map, &LineStyle::solid(palette::BLACK, thin));
        }
        if let Some(layer) = &geography.borders {
            let dashed = LineStyle::dashed(palette::BORDER_GREEN, thin, 6.0 * px, 4.0 * px);
            stroke_layer(&mut canvas, layer, &proj, &map, &dashed);
        }
        if let Some(layer) = &geography.states {
            stroke_layer(&mut canvas, layer, &proj, &map, &LineStyle::solid(palette::BLACK, 0.3 * px.max(1.0)));
        }

        // Rings are centered on the radar, the projection origin
        let (cx, cy) = map.to_pixel(0.0, 0.0);
        let ring_style = LineStyle::solid(palette::BLACK, thin);
        for ring in &self.assets.rings {
            canvas.stroke_map_circle(cx, cy, (ring.radius_m * map.scale()) as f32, &ring_style);
        }

        for marker in markers {
            let (x, y) = proj.forward(marker.lat, marker.lon);
            if !map.contains(x, y) {
                continue;
            }
            let (sx, sy) = map.to_pixel(x, y);
            if let Some(star) = star_path(sx, sy, 4.0 * px) {
                canvas.fill_map_path(&star, palette::BLACK);
            }
        }

        canvas.stroke_rect(&map.rect, &LineStyle::solid(palette::BLACK, thin));
        colorbar.draw_bar(&mut canvas, &layout.colorbar, px);

        let mut img = canvas.into_image()?;
        let text = &self.assets.text;

        let ring_style = TextStyle::new(layout.ring_label_px, palette::BLACK, Anchor::Left);
        for ring in &self.assets.rings {
            draw_label(&mut img, text, &proj, &map, &ring.label, ring.lat, ring.lon, &ring_style);
        }
        let place_style = TextStyle::new(layout.place_label_px, palette::PURPLE, Anchor::Left);
        for marker in markers {
            draw_label(&mut img, text, &proj, &map, &marker.name, marker.lat, marker.lon, &place_style);
        }

        let (lx, ly) = map.to_pixel(framing.logo_offset[0], framing.logo_offset[1]);
        self.assets.logo.draw(&mut img, lx, ly, framing.logo_zoom, px);

        colorbar.draw_labels(&mut img, text, &layout.colorbar, layout.tick_label_px);

        let band = layout.title_band;
        let title_style = TextStyle::new(layout.title_px, palette::PURPLE, Anchor::Center);
        text.draw_centered_v(
            &mut img,
            title,
            band.x + band.width / 2.0,
            band.y + band.height / 2.0,
            &title_style,
        );

        Ok(img)
    }
}

/// Geographic box covering a projected extent.
fn geographic_bounds(proj: &LambertConformal, extent: &BoundingBox) -> BoundingBox {
    BoundingBox::enclosing(extent.boundary_points(16).into_iter().map(|(x, y)| {
        let (lat, lon) = proj.inverse(x, y);
        (lon, lat)
    }))
    .unwrap_or(*extent)
}

fn line_pixels<'a>(
    line: &'a LineString<f64>,
    proj: &'a LambertConformal,
    map: &'a MapTransform,
) -> impl Iterator<Item = (f32, f32)> + 'a {
    line.0.iter().map(move |c| {
        let (x, y) = proj.forward(c.y, c.x);
        map.to_pixel(x, y)
    })
}

/// One path with the exterior and every hole as sub-paths.
fn polygon_path(polygon: &Polygon<f64>, proj: &LambertConformal, map: &MapTransform) -> Option<SkPath> {
    let mut pb = PathBuilder::new();
    for ring in std::iter::once(polygon.exterior()).chain(polygon.interiors()) {
        let mut first = true;
        for (x, y) in line_pixels(ring, proj, map) {
            if first {
                pb.move_to(x, y);
                first = false;
            } else {
                pb.line_to(x, y);
            }
        }
        if !first {
            pb.close();
        }
    }
    pb.finish()
}

fn stroke_layer(
    canvas: &mut Canvas,
    layer: &GeoLayer,
    proj: &LambertConformal,
    map: &MapTransform,
    style: &LineStyle,
) {
    for line in &layer.lines {
        if let Some(path) = polyline_path(line_pixels(line, proj, map), false) {
            canvas.stroke_map_path(&path, style);
        }
    }
    for polygon in &layer.polygons {
        for ring in std::iter::once(polygon.exterior()).chain(polygon.interiors()) {
            if let Some(path) = polyline_path(line_pixels(ring, proj, map), true) {
                canvas.stroke_map_path(&path, style);
            }
        }
    }
}

/// Label placed up and to the right of its point; skipped outside the map.
#[allow(clippy::too_many_arguments)]
fn draw_label(
    img: &mut RgbaImage,
    text: &TextPainter,
    proj: &LambertConformal,
    map: &MapTransform,
    label: &str,
    lat: f64,
    lon: f64,
    style: &TextStyle,
) {
    let (x, y) = proj.forward(lat + LABEL_OFFSET_DEG, lon + LABEL_OFFSET_DEG);
    if !map.contains(x, y) {
        return;
    }
    let (px, py) = map.to_pixel(x, y);
    // anchor is the text baseline
    text.draw(img, label, px, py - style.size_px, style);
}
