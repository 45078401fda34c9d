//! Synthetic radar scans with predictable structure.
//!
//! Fields are laid out (ray, bin) like the files the radar writes, so the
//! same helpers serve the reader, renderer and pipeline tests.

use radar_common::{FieldGrid, RadarVariable, RadarVolume};

/// Site used by synthetic volumes, roughly the Central Valley.
pub const SYNTHETIC_SITE: (f64, f64) = (9.85, -83.95);

/// Range bin centers `spacing/2, 3·spacing/2, ...` in meters.
pub fn gate_ranges(bins: usize, spacing_m: f64) -> Vec<f64> {
    (0..bins).map(|i| (i as f64 + 0.5) * spacing_m).collect()
}

/// Evenly spaced ray azimuths starting half a step past north.
pub fn ray_azimuths(rays: usize) -> Vec<f64> {
    let step = 360.0 / rays.max(1) as f64;
    (0..rays).map(|i| (i as f64 + 0.5) * step).collect()
}

/// Reflectivity with one storm cell to the north-east.
///
/// The cell peaks at 60 dBZ around azimuth 45°, mid range; everything far
/// from it sits at -10 dBZ, below the display floor.
pub fn reflectivity_values(rays: usize, bins: usize) -> Vec<f32> {
    let azimuths = ray_azimuths(rays);
    let mut data = Vec::with_capacity(rays * bins);
    for az in &azimuths {
        let daz = (az - 45.0) / 30.0;
        for bin in 0..bins {
            let dr = (bin as f64 / bins.max(1) as f64 - 0.5) / 0.2;
            let weight = (-(daz * daz + dr * dr)).exp();
            data.push((-10.0 + 70.0 * weight) as f32);
        }
    }
    data
}

/// Radial velocity with a dipole: inbound to the west, outbound to the east.
///
/// Values span roughly [-10, 10] m/s, so the extremes exercise both the
/// floor and the clamp of the velocity scale.
pub fn velocity_values(rays: usize, bins: usize) -> Vec<f32> {
    ray_azimuths(rays)
        .iter()
        .flat_map(|az| {
            let v = 10.0 * az.to_radians().sin();
            std::iter::repeat(v as f32).take(bins)
        })
        .collect()
}

/// Values for `variable`'s family.
pub fn field_values(variable: RadarVariable, rays: usize, bins: usize) -> Vec<f32> {
    match variable.family() {
        radar_common::VariableFamily::Reflectivity => reflectivity_values(rays, bins),
        radar_common::VariableFamily::Velocity => velocity_values(rays, bins),
    }
}

/// A volume at [`SYNTHETIC_SITE`] carrying the given variables.
///
/// `rays` azimuths and `bins` gates of `spacing_m` meters each.
pub fn synthetic_volume(
    source_name: &str,
    variables: &[RadarVariable],
    rays: usize,
    bins: usize,
    spacing_m: f64,
) -> RadarVolume {
    let mut volume = RadarVolume::new(
        source_name,
        SYNTHETIC_SITE.0,
        SYNTHETIC_SITE.1,
        gate_ranges(bins, spacing_m),
        ray_azimuths(rays),
    );
    for &variable in variables {
        let grid = FieldGrid::new(rays, bins, field_values(variable, rays, bins))
            .expect("generated field has the volume's shape");
        volume
            .insert_field(variable.tag(), grid)
            .expect("generated field has the volume's shape");
    }
    volume
}

/// A small volume (72 rays, 40 gates of 1.5 km) that renders quickly.
pub fn small_volume(source_name: &str, variables: &[RadarVariable]) -> RadarVolume {
    synthetic_volume(source_name, variables, 72, 40, 1500.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_ranges() {
        assert_eq!(gate_ranges(3, 100.0), vec![50.0, 150.0, 250.0]);
    }

    #[test]
    fn test_ray_azimuths_cover_circle() {
        let az = ray_azimuths(4);
        assert_eq!(az, vec![45.0, 135.0, 225.0, 315.0]);
    }

    #[test]
    fn test_reflectivity_has_masked_and_valid_samples() {
        let values = reflectivity_values(36, 20);
        assert_eq!(values.len(), 720);
        assert!(values.iter().any(|&v| v < 0.0));
        assert!(values.iter().any(|&v| v > 40.0));
    }

    #[test]
    fn test_velocity_dipole() {
        let values = velocity_values(4, 2);
        assert!(values[0] > 0.0);
        assert!(values[5] < 0.0);
        assert_eq!(values[0], values[1]);
    }

    #[test]
    fn test_synthetic_volume_fields() {
        let volume = small_volume("syn", &[RadarVariable::Dbzh, RadarVariable::Velh]);
        assert_eq!(volume.rays(), 72);
        assert_eq!(volume.bins(), 40);
        assert!(volume.has_field(RadarVariable::Dbzh));
        assert!(volume.has_field(RadarVariable::Velh));
        assert!(!volume.has_field(RadarVariable::Dbzv));
    }
}
