//! Polar radar samples to planar coordinates.
//!
//! Azimuth is measured clockwise from north, so a sample at range `r` and
//! azimuth `a` lands at `x = r·sin(a)`, `y = r·cos(a)` meters from the
//! radar.

/// Planar position of one polar sample.
#[inline]
pub fn polar_point(range_m: f64, azimuth_deg: f64) -> (f64, f64) {
    let (sin, cos) = azimuth_deg.to_radians().sin_cos();
    (range_m * sin, range_m * cos)
}

/// Coordinates of every (ray, bin) sample, row-major by ray.
#[derive(Debug, Clone, PartialEq)]
pub struct CartesianGrid {
    pub rays: usize,
    pub bins: usize,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl CartesianGrid {
    /// `(x, y)` of sample `(ray, bin)`.
    pub fn get(&self, ray: usize, bin: usize) -> Option<(f64, f64)> {
        if ray >= self.rays || bin >= self.bins {
            return None;
        }
        let idx = ray * self.bins + bin;
        Some((self.x[idx], self.y[idx]))
    }
}

/// Broadcast ranges (one per bin) against azimuths (one per ray) into
/// grids shaped like the field.
pub fn polar_to_cartesian(range_m: &[f64], azimuth_deg: &[f64]) -> CartesianGrid {
    let rays = azimuth_deg.len();
    let bins = range_m.len();
    let mut x = Vec::with_capacity(rays * bins);
    let mut y = Vec::with_capacity(rays * bins);

    for &az in azimuth_deg {
        let (sin, cos) = az.to_radians().sin_cos();
        for &r in range_m {
            x.push(r * sin);
            y.push(r * cos);
        }
    }

    CartesianGrid { rays, bins, x, y }
}

/// Edges between consecutive centers.
///
/// Interior edges are midpoints; the two outer edges extend by half the
/// neighbouring spacing. A single center gets `default_half_width` on each
/// side.
pub fn cell_edges(centers: &[f64], default_half_width: f64) -> Vec<f64> {
    match centers.len() {
        0 => Vec::new(),
        1 => vec![centers[0] - default_half_width, centers[0] + default_half_width],
        n => {
            let mut edges = Vec::with_capacity(n + 1);
            edges.push(centers[0] - (centers[1] - centers[0]) / 2.0);
            for pair in centers.windows(2) {
                edges.push((pair[0] + pair[1]) / 2.0);
            }
            edges.push(centers[n - 1] + (centers[n - 1] - centers[n - 2]) / 2.0);
            edges
        }
    }
}

/// Range bin edges, never negative.
pub fn range_edges(range_m: &[f64]) -> Vec<f64> {
    let half = range_m.first().map(|r| r.abs() / 2.0).unwrap_or(0.0);
    cell_edges(range_m, half)
        .into_iter()
        .map(|e| e.max(0.0))
        .collect()
}

/// Signed shortest angular step from `a` to `b`, in (-180, 180].
fn angular_step(a: f64, b: f64) -> f64 {
    let mut d = (b - a) % 360.0;
    if d > 180.0 {
        d -= 360.0;
    } else if d <= -180.0 {
        d += 360.0;
    }
    d
}

/// Azimuth edges, aware of the 359° → 0° wrap.
///
/// Edges are expressed relative to the preceding ray, so they may fall
/// outside [0, 360); only their sine and cosine matter.
pub fn azimuth_edges(azimuth_deg: &[f64]) -> Vec<f64> {
    match azimuth_deg.len() {
        0 => Vec::new(),
        1 => vec![azimuth_deg[0] - 0.5, azimuth_deg[0] + 0.5],
        n => {
            let mut edges = Vec::with_capacity(n + 1);
            let first_step = angular_step(azimuth_deg[0], azimuth_deg[1]);
            edges.push(azimuth_deg[0] - first_step / 2.0);
            for pair in azimuth_deg.windows(2) {
                edges.push(pair[0] + angular_step(pair[0], pair[1]) / 2.0);
            }
            let last_step = angular_step(azimuth_deg[n - 2], azimuth_deg[n - 1]);
            edges.push(azimuth_deg[n - 1] + last_step / 2.0);
            edges
        }
    }
}

/// Quadrilateral covering one sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolarCell {
    /// Corners in drawing order: inner-left, inner-right, outer-right,
    /// outer-left.
    pub corners: [(f64, f64); 4],
}

impl PolarCell {
    pub fn centroid(&self) -> (f64, f64) {
        let (sx, sy) = self
            .corners
            .iter()
            .fold((0.0, 0.0), |(ax, ay), (x, y)| (ax + x, ay + y));
        (sx / 4.0, sy / 4.0)
    }
}

/// Cell geometry for a whole scan.
#[derive(Debug, Clone)]
pub struct PolarMesh {
    azimuth_edges: Vec<f64>,
    range_edges: Vec<f64>,
}

impl PolarMesh {
    pub fn new(range_m: &[f64], azimuth_deg: &[f64]) -> Self {
        Self {
            azimuth_edges: azimuth_edges(azimuth_deg),
            range_edges: range_edges(range_m),
        }
    }

    pub fn rays(&self) -> usize {
        self.azimuth_edges.len().saturating_sub(1)
    }

    pub fn bins(&self) -> usize {
        self.range_edges.len().saturating_sub(1)
    }

    pub fn cell(&self, ray: usize, bin: usize) -> Option<PolarCell> {
        if ray >= self.rays() || bin >= self.bins() {
            return None;
        }
        let (a0, a1) = (self.azimuth_edges[ray], self.azimuth_edges[ray + 1]);
        let (r0, r1) = (self.range_edges[bin], self.range_edges[bin + 1]);
        Some(PolarCell {
            corners: [
                polar_point(r0, a0),
                polar_point(r0, a1),
                polar_point(r1, a1),
                polar_point(r1, a0),
            ],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_north_and_east() {
        let (x, y) = polar_point(1000.0, 0.0);
        assert!(close(x, 0.0) && close(y, 1000.0));
        let (x, y) = polar_point(1000.0, 90.0);
        assert!(close(x, 1000.0) && close(y, 0.0));
        let (x, y) = polar_point(1000.0, 180.0);
        assert!(close(x, 0.0) && close(y, -1000.0));
        let (x, y) = polar_point(1000.0, 270.0);
        assert!(close(x, -1000.0) && close(y, 0.0));
    }

    #[test]
    fn test_broadcast_shape() {
        let range = [100.0, 200.0, 300.0];
        let az = [0.0, 90.0];
        let grid = polar_to_cartesian(&range, &az);
        assert_eq!(grid.rays, 2);
        assert_eq!(grid.bins, 3);
        assert_eq!(grid.x.len(), 6);
        let (x, y) = grid.get(0, 2).unwrap();
        assert!(close(x, 0.0) && close(y, 300.0));
        let (x, y) = grid.get(1, 1).unwrap();
        assert!(close(x, 200.0) && close(y, 0.0));
        assert!(grid.get(2, 0).is_none());
    }

    #[test]
    fn test_cell_edges() {
        assert_eq!(cell_edges(&[10.0, 20.0, 40.0], 1.0), vec![5.0, 15.0, 30.0, 50.0]);
        assert_eq!(cell_edges(&[10.0], 2.0), vec![8.0, 12.0]);
        assert!(cell_edges(&[], 1.0).is_empty());
    }

    #[test]
    fn test_range_edges_clamped() {
        assert_eq!(range_edges(&[0.0, 100.0, 200.0]), vec![0.0, 50.0, 150.0, 250.0]);
    }

    #[test]
    fn test_azimuth_edges_wrap() {
        let edges = azimuth_edges(&[358.0, 359.0, 0.0, 1.0]);
        let expected = [357.5, 358.5, 359.5, 0.5, 1.5];
        for (e, x) in edges.iter().zip(expected) {
            let d = angular_step(*e, x);
            assert!(d.abs() < 1e-9, "edge {} vs {}", e, x);
        }
    }

    #[test]
    fn test_mesh_cell_corners() {
        let mesh = PolarMesh::new(&[100.0, 200.0], &[0.0, 90.0, 180.0, 270.0]);
        assert_eq!(mesh.rays(), 4);
        assert_eq!(mesh.bins(), 2);
        let cell = mesh.cell(1, 1).unwrap();
        let (cx, cy) = cell.centroid();
        // Ray pointing east, outer bin
        assert!(cx > 100.0 && cy.abs() < 1e-6);
        assert!(mesh.cell(4, 0).is_none());
    }
}
