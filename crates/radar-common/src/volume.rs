//! In-memory radar volume and the reader seam that produces it.

use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{RadarError, RadarResult};
use crate::variable::RadarVariable;

/// A 2-D field indexed by (azimuth index, range index), row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldGrid {
    /// Number of rays (azimuths).
    pub rays: usize,
    /// Number of range bins per ray.
    pub bins: usize,
    pub values: Vec<f32>,
}

impl FieldGrid {
    pub fn new(rays: usize, bins: usize, values: Vec<f32>) -> RadarResult<Self> {
        if values.len() != rays * bins {
            return Err(RadarError::DataSource(format!(
                "field has {} values, expected {} x {} = {}",
                values.len(),
                rays,
                bins,
                rays * bins
            )));
        }
        Ok(Self { rays, bins, values })
    }

    /// Value at ray `ray`, bin `bin`.
    pub fn get(&self, ray: usize, bin: usize) -> Option<f32> {
        if ray >= self.rays || bin >= self.bins {
            return None;
        }
        self.values.get(ray * self.bins + bin).copied()
    }

    /// All bins of one ray, or `None` past the last ray.
    pub fn row(&self, ray: usize) -> Option<&[f32]> {
        if ray >= self.rays {
            return None;
        }
        let start = ray * self.bins;
        self.values.get(start..start + self.bins)
    }
}

/// One scan loaded from one radar file.
#[derive(Debug, Clone, PartialEq)]
pub struct RadarVolume {
    /// Where the volume came from (file name or synthetic label).
    pub source_name: String,
    /// Radar site latitude, decimal degrees.
    pub site_lat: f64,
    /// Radar site longitude, decimal degrees.
    pub site_lon: f64,
    /// Range bin centers, meters from the radar.
    pub range_m: Vec<f64>,
    /// Ray azimuths, degrees clockwise from north.
    pub azimuth_deg: Vec<f64>,
    fields: BTreeMap<String, FieldGrid>,
}

impl RadarVolume {
    pub fn new(
        source_name: impl Into<String>,
        site_lat: f64,
        site_lon: f64,
        range_m: Vec<f64>,
        azimuth_deg: Vec<f64>,
    ) -> Self {
        Self {
            source_name: source_name.into(),
            site_lat,
            site_lon,
            range_m,
            azimuth_deg,
            fields: BTreeMap::new(),
        }
    }

    /// Attach a named field; its shape must be (azimuths, range bins).
    pub fn with_field(mut self, name: impl Into<String>, field: FieldGrid) -> RadarResult<Self> {
        self.insert_field(name, field)?;
        Ok(self)
    }

    pub fn insert_field(&mut self, name: impl Into<String>, field: FieldGrid) -> RadarResult<()> {
        let name = name.into();
        if field.rays != self.azimuth_deg.len() || field.bins != self.range_m.len() {
            return Err(RadarError::DataSource(format!(
                "field '{}' in {} has shape {} x {}, expected {} x {}",
                name,
                self.source_name,
                field.rays,
                field.bins,
                self.azimuth_deg.len(),
                self.range_m.len()
            )));
        }
        self.fields.insert(name, field);
        Ok(())
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn has_field(&self, variable: RadarVariable) -> bool {
        self.fields.contains_key(variable.tag())
    }

    /// The field for `variable`, or `MissingField`.
    pub fn field(&self, variable: RadarVariable) -> RadarResult<&FieldGrid> {
        self.fields
            .get(variable.tag())
            .ok_or_else(|| RadarError::missing_field(variable.tag(), &self.source_name))
    }

    pub fn rays(&self) -> usize {
        self.azimuth_deg.len()
    }

    pub fn bins(&self) -> usize {
        self.range_m.len()
    }

    /// Farthest range bin, meters.
    pub fn max_range(&self) -> f64 {
        self.range_m.iter().copied().fold(0.0, f64::max)
    }
}

/// Reader for radar volume files.
///
/// Implementations open the file, read what they need and close it before
/// returning; the volume is fully in memory afterwards.
pub trait VolumeSource {
    /// Names of all variables in the file.
    fn variable_names(&self, path: &Path) -> RadarResult<Vec<String>>;

    /// Load coordinates plus the field for `variable`.
    ///
    /// A file without that field fails with `MissingField`.
    fn load(&self, path: &Path, variable: RadarVariable) -> RadarResult<RadarVolume>;
}
