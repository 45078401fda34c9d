//! Base geography read from shapefiles.
//!
//! Four layers make up the map background: land polygons, coastline,
//! country borders and first-level administrative boundaries. Each comes
//! from its own Natural Earth style shapefile in lon/lat degrees.

use std::path::{Path, PathBuf};

use geo_types::{Coord, LineString, Polygon};
use radar_common::{BoundingBox, RadarError, RadarResult};
use serde::{Deserialize, Serialize};
use shapefile::{PolygonRing, Shape};
use tracing::{debug, warn};

/// Kind of geography layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeoLayerKind {
    Land,
    Coastline,
    Borders,
    States,
}

impl GeoLayerKind {
    pub fn name(&self) -> &'static str {
        match self {
            GeoLayerKind::Land => "land",
            GeoLayerKind::Coastline => "coastline",
            GeoLayerKind::Borders => "borders",
            GeoLayerKind::States => "states",
        }
    }
}

/// Shapefile locations for each layer. Unset layers are not drawn.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeographyPaths {
    pub land: Option<PathBuf>,
    pub coastline: Option<PathBuf>,
    pub borders: Option<PathBuf>,
    pub states: Option<PathBuf>,
}

/// Features of one layer, lon/lat degrees.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoLayer {
    pub kind: GeoLayerKind,
    pub lines: Vec<LineString<f64>>,
    pub polygons: Vec<Polygon<f64>>,
}

fn to_coords(points: &[shapefile::Point]) -> Vec<Coord<f64>> {
    points.iter().map(|p| Coord { x: p.x, y: p.y }).collect()
}

fn coords_bounds<'a, I>(coords: I) -> Option<BoundingBox>
where
    I: IntoIterator<Item = &'a Coord<f64>>,
{
    BoundingBox::enclosing(coords.into_iter().map(|c| (c.x, c.y)))
}

impl GeoLayer {
    pub fn empty(kind: GeoLayerKind) -> Self {
        Self {
            kind,
            lines: Vec::new(),
            polygons: Vec::new(),
        }
    }

    /// Build from already-read shapes. Points and null shapes are ignored.
    pub fn from_shapes<I>(kind: GeoLayerKind, shapes: I) -> Self
    where
        I: IntoIterator<Item = Shape>,
    {
        let mut layer = Self::empty(kind);
        for shape in shapes {
            match shape {
                Shape::Polyline(pl) => {
                    for part in pl.parts() {
                        layer.lines.push(LineString::new(to_coords(part)));
                    }
                }
                Shape::Polygon(poly) => {
                    let mut exterior: Option<LineString<f64>> = None;
                    let mut holes = Vec::new();
                    for ring in poly.rings() {
                        let line = LineString::new(to_coords(ring.points()));
                        match ring {
                            PolygonRing::Outer(_) => {
                                // A new outer ring starts a new polygon
                                if let Some(ext) = exterior.take() {
                                    layer.polygons.push(Polygon::new(ext, std::mem::take(&mut holes)));
                                }
                                exterior = Some(line);
                            }
                            PolygonRing::Inner(_) => holes.push(line),
                        }
                    }
                    if let Some(ext) = exterior {
                        layer.polygons.push(Polygon::new(ext, holes));
                    }
                }
                _ => {}
            }
        }
        layer
    }

    /// Read a shapefile from disk.
    pub fn read(kind: GeoLayerKind, path: &Path) -> RadarResult<Self> {
        let mut reader = shapefile::ShapeReader::from_path(path).map_err(|e| {
            RadarError::Render(format!("failed to open {} layer {}: {}", kind.name(), path.display(), e))
        })?;
        let mut shapes = Vec::new();
        for result in reader.iter_shapes() {
            let shape = result.map_err(|e| {
                RadarError::Render(format!("failed to read shape from {}: {}", path.display(), e))
            })?;
            shapes.push(shape);
        }
        let layer = Self::from_shapes(kind, shapes);
        debug!(
            layer = kind.name(),
            lines = layer.lines.len(),
            polygons = layer.polygons.len(),
            "Loaded geography layer"
        );
        Ok(layer)
    }

    /// Copy keeping only features whose bounds touch `extent` (degrees).
    pub fn culled(&self, extent: &BoundingBox) -> Self {
        let lines = self
            .lines
            .iter()
            .filter(|l| coords_bounds(l.0.iter()).is_some_and(|b| b.intersects(extent)))
            .cloned()
            .collect();
        let polygons = self
            .polygons
            .iter()
            .filter(|p| coords_bounds(p.exterior().0.iter()).is_some_and(|b| b.intersects(extent)))
            .cloned()
            .collect();
        Self {
            kind: self.kind,
            lines,
            polygons,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty() && self.polygons.is_empty()
    }
}

/// The four background layers, each optional.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BaseGeography {
    pub land: Option<GeoLayer>,
    pub coastline: Option<GeoLayer>,
    pub borders: Option<GeoLayer>,
    pub states: Option<GeoLayer>,
}

impl BaseGeography {
    /// Load every configured layer. A layer that is missing or unreadable
    /// is logged and left out.
    pub fn load(paths: &GeographyPaths) -> Self {
        let load_one = |kind: GeoLayerKind, path: &Option<PathBuf>| -> Option<GeoLayer> {
            let Some(path) = path.as_ref() else {
                debug!(layer = kind.name(), "Geography layer not configured");
                return None;
            };
            if !path.exists() {
                warn!(layer = kind.name(), path = %path.display(), "Geography layer not found, skipping");
                return None;
            }
            match GeoLayer::read(kind, path) {
                Ok(layer) => Some(layer),
                Err(e) => {
                    warn!(layer = kind.name(), error = %e, "Geography layer unreadable, skipping");
                    None
                }
            }
        };

        Self {
            land: load_one(GeoLayerKind::Land, &paths.land),
            coastline: load_one(GeoLayerKind::Coastline, &paths.coastline),
            borders: load_one(GeoLayerKind::Borders, &paths.borders),
            states: load_one(GeoLayerKind::States, &paths.states),
        }
    }

    /// Layers restricted to a geographic extent.
    pub fn culled(&self, extent: &BoundingBox) -> Self {
        Self {
            land: self.land.as_ref().map(|l| l.culled(extent)),
            coastline: self.coastline.as_ref().map(|l| l.culled(extent)),
            borders: self.borders.as_ref().map(|l| l.culled(extent)),
            states: self.states.as_ref().map(|l| l.culled(extent)),
        }
    }

    pub fn layer_count(&self) -> usize {
        [&self.land, &self.coastline, &self.borders, &self.states]
            .iter()
            .filter(|l| l.is_some())
            .count()
    }
}
