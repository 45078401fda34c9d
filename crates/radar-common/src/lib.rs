//! Common types and utilities shared across the radar plotter crates.

pub mod bbox;
pub mod error;
pub mod framing;
pub mod time;
pub mod title;
pub mod variable;
pub mod volume;

pub use bbox::BoundingBox;
pub use error::{RadarError, RadarResult};
pub use framing::{
    default_rings, national_markers, national_preset, regional_markers, regional_preset,
    FramingPreset, PlaceMarker, PresetCatalog, RingMarker, SceneFraming,
};
pub use time::{parse_scan_time, to_local, LOCAL_UTC_OFFSET_HOURS};
pub use title::{derive_title, DerivedTitle};
pub use variable::{RadarVariable, VariableFamily};
pub use volume::{FieldGrid, RadarVolume, VolumeSource};
