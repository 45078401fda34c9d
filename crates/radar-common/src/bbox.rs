//! Bounding box types and operations.

use serde::{Deserialize, Serialize};

/// A geographic or projected bounding box.
///
/// For geographic extents, x is longitude and y is latitude in degrees.
/// For projected extents, coordinates are meters relative to the radar.
///
/// Serialized as an extent array `[min_x, max_x, min_y, max_y]`, the order
/// used by the framing presets (`[min_lon, max_lon, min_lat, max_lat]`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 4]", into = "[f64; 4]")]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    /// Create a new bounding box from corner coordinates.
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Build from an extent `[min_x, max_x, min_y, max_y]`.
    ///
    /// Swapped bounds are normalized so that `min <= max` always holds.
    pub fn from_extent(extent: [f64; 4]) -> Self {
        let [x0, x1, y0, y1] = extent;
        Self::new(x0.min(x1), y0.min(y1), x0.max(x1), y0.max(y1))
    }

    /// The extent array `[min_x, max_x, min_y, max_y]`.
    pub fn extent(&self) -> [f64; 4] {
        [self.min_x, self.max_x, self.min_y, self.max_y]
    }

    /// Smallest box enclosing every point, or `None` when there are no
    /// finite points.
    pub fn enclosing<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        let mut bbox: Option<Self> = None;
        for (x, y) in points {
            if !x.is_finite() || !y.is_finite() {
                continue;
            }
            bbox = Some(match bbox {
                None => Self::new(x, y, x, y),
                Some(b) => Self::new(b.min_x.min(x), b.min_y.min(y), b.max_x.max(x), b.max_y.max(y)),
            });
        }
        bbox
    }

    /// Width of the bounding box in coordinate units.
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Height of the bounding box in coordinate units.
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Center point `(x, y)`.
    pub fn center(&self) -> (f64, f64) {
        (
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Check if this bbox intersects another.
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        self.min_x < other.max_x
            && self.max_x > other.min_x
            && self.min_y < other.max_y
            && self.max_y > other.min_y
    }

    /// Check if a point is contained within this bbox.
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }

    /// Sample points along the boundary, `per_edge` segments per side.
    ///
    /// Used to project an extent into a curved coordinate system.
    pub fn boundary_points(&self, per_edge: usize) -> Vec<(f64, f64)> {
        let n = per_edge.max(1);
        let mut points = Vec::with_capacity(n * 4);
        for i in 0..n {
            let t = i as f64 / n as f64;
            let x = self.min_x + t * self.width();
            let y = self.min_y + t * self.height();
            points.push((x, self.min_y));
            points.push((self.max_x, y));
            points.push((self.max_x - t * self.width(), self.max_y));
            points.push((self.min_x, self.max_y - t * self.height()));
        }
        points
    }
}

impl From<[f64; 4]> for BoundingBox {
    fn from(extent: [f64; 4]) -> Self {
        Self::from_extent(extent)
    }
}

impl From<BoundingBox> for [f64; 4] {
    fn from(bbox: BoundingBox) -> Self {
        bbox.extent()
    }
}
