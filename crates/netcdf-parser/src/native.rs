//! Radar volume reading through the native netcdf library.
//!
//! The file is opened, every needed array is copied into memory, and the
//! handle is dropped before the volume is returned to the caller.

use std::path::Path;
use std::sync::Once;

use radar_common::{FieldGrid, RadarResult, RadarVariable, RadarVolume, VolumeSource};
use tracing::{debug, warn};

use crate::error::{NetCdfError, NetCdfResult};

/// Name of the range coordinate (meters).
pub const RANGE_VAR: &str = "range";
/// Name of the azimuth coordinate (degrees).
pub const AZIMUTH_VAR: &str = "azimuth";
/// Name of the site latitude.
pub const LATITUDE_VAR: &str = "latitude";
/// Name of the site longitude.
pub const LONGITUDE_VAR: &str = "longitude";

/// Silence HDF5's automatic error printing to stderr.
///
/// The HDF5 C library prints verbose diagnostics even when a missing
/// attribute is handled on the Rust side. This disables that output with
/// `H5Eset_auto2` and null handlers. Safe to call more than once; call it
/// early in `main()` before any file is opened.
pub fn silence_hdf5_errors() {
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        // SAFETY: H5Eset_auto2 with null handlers is a documented valid use.
        unsafe {
            hdf5_metno_sys::h5e::H5Eset_auto2(
                hdf5_metno_sys::h5e::H5E_DEFAULT,
                None,
                std::ptr::null_mut(),
            );
        }
    });
}

/// Reads radar volumes from NetCDF/CF-radial style files.
#[derive(Debug, Clone, Default)]
pub struct NetCdfSource;

impl NetCdfSource {
    pub fn new() -> Self {
        Self
    }

    /// Names of every variable in the file.
    pub fn list_variables(&self, path: &Path) -> NetCdfResult<Vec<String>> {
        silence_hdf5_errors();
        let file = open(path)?;
        let names = file.variables().map(|v| v.name()).collect();
        drop(file);
        Ok(names)
    }

    /// Coordinates plus one field, fully in memory.
    pub fn read_volume(&self, path: &Path, variable: RadarVariable) -> NetCdfResult<RadarVolume> {
        silence_hdf5_errors();
        let file = open(path)?;
        let path_str = path.display().to_string();

        let site_lat = read_scalar(&file, LATITUDE_VAR)?;
        let site_lon = read_scalar(&file, LONGITUDE_VAR)?;
        let range_m = read_f64_array(&file, RANGE_VAR)?;
        let azimuth_deg = read_f64_array(&file, AZIMUTH_VAR)?;

        let field_var = file
            .variable(variable.tag())
            .ok_or_else(|| NetCdfError::FieldNotFound {
                field: variable.tag().to_string(),
                path: path_str.clone(),
            })?;

        let dims: Vec<usize> = field_var.dimensions().iter().map(|d| d.len()).collect();
        if dims != [azimuth_deg.len(), range_m.len()] {
            return Err(NetCdfError::InvalidFormat(format!(
                "{} has shape {:?}, expected [{}, {}]",
                variable.tag(),
                dims,
                azimuth_deg.len(),
                range_m.len()
            )));
        }

        let raw: Vec<f32> = field_var
            .get_values(..)
            .map_err(|e| NetCdfError::InvalidFormat(format!("Failed to read {}: {}", variable.tag(), e)))?;

        let scale_factor = get_f32_attr(&field_var, "scale_factor").unwrap_or(1.0);
        let add_offset = get_f32_attr(&field_var, "add_offset").unwrap_or(0.0);
        let fill_value = get_f32_attr(&field_var, "_FillValue");
        let missing_value = get_f32_attr(&field_var, "missing_value");

        // Fill and missing values become NaN before scaling
        let values: Vec<f32> = raw
            .into_iter()
            .map(|val| {
                if Some(val) == fill_value || Some(val) == missing_value || !val.is_finite() {
                    f32::NAN
                } else {
                    val * scale_factor + add_offset
                }
            })
            .collect();

        drop(field_var);
        drop(file);

        debug!(
            file = %path_str,
            variable = variable.tag(),
            rays = azimuth_deg.len(),
            bins = range_m.len(),
            "Read radar volume"
        );

        let grid = FieldGrid::new(azimuth_deg.len(), range_m.len(), values)
            .map_err(|e| NetCdfError::InvalidFormat(e.to_string()))?;
        let source_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path_str.clone());

        RadarVolume::new(source_name, site_lat, site_lon, range_m, azimuth_deg)
            .with_field(variable.tag(), grid)
            .map_err(|e| NetCdfError::InvalidFormat(e.to_string()))
    }
}

impl VolumeSource for NetCdfSource {
    fn variable_names(&self, path: &Path) -> RadarResult<Vec<String>> {
        Ok(self.list_variables(path)?)
    }

    fn load(&self, path: &Path, variable: RadarVariable) -> RadarResult<RadarVolume> {
        Ok(self.read_volume(path, variable)?)
    }
}

// =============================================================================
// Internal helpers
// =============================================================================

fn open(path: &Path) -> NetCdfResult<netcdf::File> {
    if !path.exists() {
        return Err(NetCdfError::IoError(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("{} does not exist", path.display()),
        )));
    }
    netcdf::open(path).map_err(|e| NetCdfError::Open {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

fn read_f64_array(file: &netcdf::File, name: &str) -> NetCdfResult<Vec<f64>> {
    let var = file
        .variable(name)
        .ok_or_else(|| NetCdfError::MissingData(format!("{} variable", name)))?;
    var.get_values(..)
        .map_err(|e| NetCdfError::InvalidFormat(format!("Failed to read {}: {}", name, e)))
}

/// Scalar or length-1 variable.
fn read_scalar(file: &netcdf::File, name: &str) -> NetCdfResult<f64> {
    let values = read_f64_array(file, name)?;
    if values.len() > 1 {
        warn!(variable = name, len = values.len(), "Expected a scalar, using first value");
    }
    values
        .first()
        .copied()
        .ok_or_else(|| NetCdfError::MissingData(format!("{} has no value", name)))
}

/// Check if a variable has an attribute with the given name.
/// This avoids HDF5 error spam when checking for optional attributes.
fn has_attr(var: &netcdf::Variable, name: &str) -> bool {
    var.attributes().any(|attr| attr.name() == name)
}

fn get_f32_attr(var: &netcdf::Variable, name: &str) -> Option<f32> {
    if !has_attr(var, name) {
        return None;
    }
    let attr_value = var.attribute_value(name)?.ok()?;
    f32::try_from(attr_value).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_io_error() {
        let err = NetCdfSource::new()
            .list_variables(Path::new("/nonexistent/20220902-233911.nc"))
            .unwrap_err();
        assert!(matches!(err, NetCdfError::IoError(_)));
    }

    #[test]
    fn test_not_a_netcdf_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("20220902-233911_viento.nc");
        std::fs::write(&path, b"definitely not netcdf").unwrap();
        let err = NetCdfSource::new().list_variables(&path).unwrap_err();
        assert!(matches!(err, NetCdfError::Open { .. }));
    }
}
