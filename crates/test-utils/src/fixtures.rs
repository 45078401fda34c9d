//! File fixtures and an in-memory volume source.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use image::{Rgba, RgbaImage};
use radar_common::{RadarError, RadarResult, RadarVariable, RadarVolume, VolumeSource};

/// Scan file names as the radar writes them: UTC stamp then product.
pub mod scans {
    pub const REFLECTIVITY: &str = "20220902-233911_Reflectividad.nc";
    pub const WIND: &str = "20220902-233911_viento.nc";
    /// Later scan; sorts after the two above.
    pub const LATER_REFLECTIVITY: &str = "20220903-001011_Reflectividad.nc";
    /// Has the `.nc` extension but none of the product markers.
    pub const UNMARKED: &str = "20220902-233911_otros.nc";
}

/// Write a small two-tone logo PNG into `dir` and return its path.
pub fn write_logo(dir: &Path) -> PathBuf {
    let mut logo = RgbaImage::from_pixel(40, 24, Rgba([0, 70, 140, 255]));
    for x in 0..40 {
        for y in 10..14 {
            logo.put_pixel(x, y, Rgba([255, 200, 0, 255]));
        }
    }
    let path = dir.join("imn.png");
    logo.save(&path).expect("Failed to write logo fixture");
    path
}

/// Create an empty file (content is irrelevant to discovery).
pub fn touch(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, b"").expect("Failed to create fixture file");
    path
}

/// Which call a source saw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceCall {
    ListVariables(String),
    Load(String, RadarVariable),
}

/// [`VolumeSource`] backed by volumes keyed by file name.
///
/// Every call is recorded so tests can assert what was opened and in which
/// order. Files registered with [`InMemorySource::with_broken`] fail with a
/// `DataSource` error.
#[derive(Default)]
pub struct InMemorySource {
    volumes: HashMap<String, RadarVolume>,
    broken: Vec<String>,
    calls: Mutex<Vec<SourceCall>>,
}

fn file_key(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_volume(mut self, file_name: &str, volume: RadarVolume) -> Self {
        self.volumes.insert(file_name.to_string(), volume);
        self
    }

    pub fn with_broken(mut self, file_name: &str) -> Self {
        self.broken.push(file_name.to_string());
        self
    }

    pub fn calls(&self) -> Vec<SourceCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn load_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, SourceCall::Load(..)))
            .count()
    }

    fn record(&self, call: SourceCall) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }

    fn lookup(&self, key: &str) -> RadarResult<&RadarVolume> {
        if self.broken.iter().any(|b| b == key) {
            return Err(RadarError::DataSource(format!("{}: not a valid NetCDF file", key)));
        }
        self.volumes
            .get(key)
            .ok_or_else(|| RadarError::DataSource(format!("{}: no such file", key)))
    }
}

impl VolumeSource for InMemorySource {
    fn variable_names(&self, path: &Path) -> RadarResult<Vec<String>> {
        let key = file_key(path);
        self.record(SourceCall::ListVariables(key.clone()));
        let volume = self.lookup(&key)?;
        let mut names = vec!["range".to_string(), "azimuth".to_string()];
        names.extend(volume.field_names().map(str::to_string));
        Ok(names)
    }

    fn load(&self, path: &Path, variable: RadarVariable) -> RadarResult<RadarVolume> {
        let key = file_key(path);
        self.record(SourceCall::Load(key.clone(), variable));
        let volume = self.lookup(&key)?;
        volume.field(variable)?;
        Ok(volume.clone())
    }
}
