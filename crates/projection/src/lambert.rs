//! Lambert Conformal Conic projection centered on the radar site.
//!
//! The map frame uses the conic with standard parallels 33°N and 45°N and
//! its origin on the radar, so projected coordinates are meters east/north
//! of the radar with no false easting or northing.
//!
//! The conic is the spherical form, on a sphere of radius 6 371 229 m. An
//! ellipsoidal (WGS84) conic with the same parallels differs from it by a
//! few hundred meters across the national extent.
//!
//! At Costa Rican latitudes the scale factor of this cone is about 1.12:
//! one projected meter covers roughly 0.89 ground meters. Radar samples are
//! placed in the frame without correcting for it, which is why the range
//! rings use radii of 33.7/67.2/134.1 km for the 30/60/120 km labels.

use std::f64::consts::PI;

use radar_common::BoundingBox;

/// Default first standard parallel (degrees).
pub const DEFAULT_LATIN1: f64 = 33.0;
/// Default second standard parallel (degrees).
pub const DEFAULT_LATIN2: f64 = 45.0;
/// Sphere radius (meters).
pub const EARTH_RADIUS: f64 = 6371229.0;

/// Lambert Conformal Conic projection parameters.
#[derive(Debug, Clone)]
pub struct LambertConformal {
    /// Central meridian in radians
    pub lon0: f64,
    /// Latitude of origin in radians
    pub lat0: f64,
    /// First standard parallel in radians
    pub latin1: f64,
    /// Second standard parallel in radians
    pub latin2: f64,
    /// Earth radius (meters)
    pub earth_radius: f64,
    /// Cone constant (n)
    n: f64,
    /// F constant
    f: f64,
    /// Rho at the origin latitude
    rho0: f64,
}

impl LambertConformal {
    /// Projection with the default standard parallels and origin at
    /// `(lat0_deg, lon0_deg)`.
    pub fn centered(lat0_deg: f64, lon0_deg: f64) -> Self {
        Self::new(lat0_deg, lon0_deg, DEFAULT_LATIN1, DEFAULT_LATIN2)
    }

    /// Projection with explicit standard parallels.
    pub fn new(lat0_deg: f64, lon0_deg: f64, latin1_deg: f64, latin2_deg: f64) -> Self {
        let lat0 = lat0_deg.to_radians();
        let lon0 = lon0_deg.to_radians();
        let latin1 = latin1_deg.to_radians();
        let latin2 = latin2_deg.to_radians();
        let earth_radius = EARTH_RADIUS;

        // Cone constant
        let n = if (latin1 - latin2).abs() < 1e-10 {
            // Tangent cone
            latin1.sin()
        } else {
            // Secant cone
            let ln_ratio = (latin1.cos() / latin2.cos()).ln();
            let tan_ratio =
                ((PI / 4.0 + latin2 / 2.0).tan() / (PI / 4.0 + latin1 / 2.0).tan()).ln();
            ln_ratio / tan_ratio
        };

        let f = (latin1.cos() * (PI / 4.0 + latin1 / 2.0).tan().powf(n)) / n;
        let rho0 = earth_radius * f / (PI / 4.0 + lat0 / 2.0).tan().powf(n);

        Self {
            lon0,
            lat0,
            latin1,
            latin2,
            earth_radius,
            n,
            f,
            rho0,
        }
    }

    fn rho(&self, lat: f64) -> f64 {
        self.earth_radius * self.f / (PI / 4.0 + lat / 2.0).tan().powf(self.n)
    }

    /// Geographic (degrees) to projected meters `(x, y)` relative to the
    /// origin.
    pub fn forward(&self, lat_deg: f64, lon_deg: f64) -> (f64, f64) {
        let lat = lat_deg.to_radians();
        let lon = lon_deg.to_radians();

        // Normalize longitude difference to [-π, π]
        let mut dlon = lon - self.lon0;
        while dlon > PI {
            dlon -= 2.0 * PI;
        }
        while dlon < -PI {
            dlon += 2.0 * PI;
        }

        let rho = self.rho(lat);
        let theta = self.n * dlon;

        (rho * theta.sin(), self.rho0 - rho * theta.cos())
    }

    /// Projected meters to geographic `(lat, lon)` in degrees.
    pub fn inverse(&self, x: f64, y: f64) -> (f64, f64) {
        let dy = self.rho0 - y;
        let sign = if self.n < 0.0 { -1.0 } else { 1.0 };
        let rho = sign * (x * x + dy * dy).sqrt();
        let theta = (sign * x).atan2(sign * dy);

        let lat = 2.0 * ((self.earth_radius * self.f / rho).powf(1.0 / self.n)).atan() - PI / 2.0;
        let lon = self.lon0 + theta / self.n;

        (lat.to_degrees(), lon.to_degrees())
    }

    /// Ratio of projected distance to ground distance at `lat_deg`.
    pub fn scale_factor(&self, lat_deg: f64) -> f64 {
        let lat = lat_deg.to_radians();
        self.rho(lat) * self.n / (self.earth_radius * lat.cos())
    }

    /// Projected box enclosing a geographic extent.
    ///
    /// The boundary is sampled densely since parallels are curved in this
    /// projection.
    pub fn project_extent(&self, geographic: &BoundingBox) -> Option<BoundingBox> {
        BoundingBox::enclosing(
            geographic
                .boundary_points(64)
                .into_iter()
                .map(|(lon, lat)| self.forward(lat, lon)),
        )
    }

    /// Cone constant.
    pub fn cone_constant(&self) -> f64 {
        self.n
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RADAR_LAT: f64 = 9.95;
    const RADAR_LON: f64 = -84.05;

    #[test]
    fn test_origin_maps_to_zero() {
        let proj = LambertConformal::centered(RADAR_LAT, RADAR_LON);
        let (x, y) = proj.forward(RADAR_LAT, RADAR_LON);
        assert!(x.abs() < 1e-6, "x should be ~0, got {}", x);
        assert!(y.abs() < 1e-6, "y should be ~0, got {}", y);
    }

    #[test]
    fn test_roundtrip() {
        let proj = LambertConformal::centered(RADAR_LAT, RADAR_LON);
        for (lat, lon) in [(8.0, -86.0), (11.3, -82.6), (10.63, -85.44), (9.43, -84.16)] {
            let (x, y) = proj.forward(lat, lon);
            let (lat2, lon2) = proj.inverse(x, y);
            assert!((lat - lat2).abs() < 1e-9, "lat roundtrip failed: {} vs {}", lat, lat2);
            assert!((lon - lon2).abs() < 1e-9, "lon roundtrip failed: {} vs {}", lon, lon2);
        }
    }

    #[test]
    fn test_axes_orientation() {
        let proj = LambertConformal::centered(RADAR_LAT, RADAR_LON);
        let (x_east, _) = proj.forward(RADAR_LAT, RADAR_LON + 0.5);
        let (_, y_north) = proj.forward(RADAR_LAT + 0.5, RADAR_LON);
        assert!(x_east > 0.0);
        assert!(y_north > 0.0);
    }

    #[test]
    fn test_cone_constant_default_parallels() {
        let proj = LambertConformal::centered(RADAR_LAT, RADAR_LON);
        assert!((proj.cone_constant() - 0.6304).abs() < 1e-3);
    }

    #[test]
    fn test_scale_factor_is_one_on_standard_parallels() {
        let proj = LambertConformal::centered(RADAR_LAT, RADAR_LON);
        assert!((proj.scale_factor(33.0) - 1.0).abs() < 1e-9);
        assert!((proj.scale_factor(45.0) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_ring_radii_match_labels_on_the_ground() {
        let proj = LambertConformal::centered(RADAR_LAT, RADAR_LON);
        let k = proj.scale_factor(RADAR_LAT);
        assert!(k > 1.1 && k < 1.13, "unexpected scale factor {}", k);
        for (radius, label_km) in [(33700.0, 30.0), (67200.0, 60.0), (134100.0, 120.0)] {
            let ground_km = radius / k / 1000.0;
            assert!(
                (ground_km - label_km).abs() / label_km < 0.01,
                "{} m is {} km on the ground",
                radius,
                ground_km
            );
        }
    }

    #[test]
    fn test_meridian_scale_is_spherical() {
        let proj = LambertConformal::centered(RADAR_LAT, RADAR_LON);
        let step = 0.01;
        let (_, y0) = proj.forward(RADAR_LAT - step / 2.0, RADAR_LON);
        let (_, y1) = proj.forward(RADAR_LAT + step / 2.0, RADAR_LON);
        let ground = EARTH_RADIUS * step.to_radians();
        let k = (y1 - y0) / ground;
        assert!((k - proj.scale_factor(RADAR_LAT)).abs() < 1e-4, "meridian scale {}", k);
    }

    #[test]
    fn test_project_extent_contains_origin() {
        let proj = LambertConformal::centered(RADAR_LAT, RADAR_LON);
        let extent = proj
            .project_extent(&BoundingBox::from_extent([-86.0, -82.6, 8.0, 11.3]))
            .unwrap();
        assert!(extent.contains_point(0.0, 0.0));
        assert!(extent.width() > 300_000.0);
        assert!(extent.height() > 300_000.0);
    }
}
