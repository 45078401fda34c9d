//! Radar variables (polarization + moment) and their display metadata.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RadarError;

/// Physical family of a radar variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariableFamily {
    /// Reflectivity in dBZ.
    Reflectivity,
    /// Radial (Doppler) velocity in m/s.
    Velocity,
}

impl VariableFamily {
    /// Values strictly below the floor are treated as no-data.
    pub fn valid_floor(&self) -> f32 {
        match self {
            VariableFamily::Reflectivity => 0.0,
            VariableFamily::Velocity => -8.0,
        }
    }

    /// Normalization range `(vmin, vmax)` of the color scale.
    pub fn display_range(&self) -> (f32, f32) {
        match self {
            VariableFamily::Reflectivity => (0.0, 100.0),
            VariableFamily::Velocity => (-8.0, 8.0),
        }
    }

    /// Colorbar units label.
    pub fn units(&self) -> &'static str {
        match self {
            VariableFamily::Reflectivity => "dBZ",
            VariableFamily::Velocity => "m/s",
        }
    }

    /// Spacing between colorbar ticks.
    pub fn tick_step(&self) -> f32 {
        match self {
            VariableFamily::Reflectivity => 20.0,
            VariableFamily::Velocity => 2.0,
        }
    }
}

/// One of the four fields the IMN X-band radar writes.
///
/// The tag (`DBZH`, ...) is both the NetCDF variable name and the prefix of
/// the output image names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum RadarVariable {
    /// Horizontal-polarization reflectivity.
    Dbzh,
    /// Vertical-polarization reflectivity.
    Dbzv,
    /// Horizontal-polarization radial velocity.
    Velh,
    /// Vertical-polarization radial velocity.
    Velv,
}

impl RadarVariable {
    /// Default processing order of the plotter.
    pub const ALL: [RadarVariable; 4] = [
        RadarVariable::Velh,
        RadarVariable::Dbzv,
        RadarVariable::Dbzh,
        RadarVariable::Velv,
    ];

    pub fn tag(&self) -> &'static str {
        match self {
            RadarVariable::Dbzh => "DBZH",
            RadarVariable::Dbzv => "DBZV",
            RadarVariable::Velh => "VELH",
            RadarVariable::Velv => "VELV",
        }
    }

    /// Label used in the figure title.
    pub fn label(&self) -> &'static str {
        match self {
            RadarVariable::Dbzh => "Reflectividad Horizontal",
            RadarVariable::Dbzv => "Reflectividad Vertical",
            RadarVariable::Velh => "Velocidad Radial(H)",
            RadarVariable::Velv => "Velocidad Radial(V)",
        }
    }

    pub fn family(&self) -> VariableFamily {
        match self {
            RadarVariable::Dbzh | RadarVariable::Dbzv => VariableFamily::Reflectivity,
            RadarVariable::Velh | RadarVariable::Velv => VariableFamily::Velocity,
        }
    }

    pub fn units(&self) -> &'static str {
        self.family().units()
    }

    pub fn valid_floor(&self) -> f32 {
        self.family().valid_floor()
    }

    pub fn display_range(&self) -> (f32, f32) {
        self.family().display_range()
    }

    /// Parse a list of tags, failing on the first unknown one.
    pub fn parse_list<S: AsRef<str>>(tags: &[S]) -> Result<Vec<Self>, RadarError> {
        tags.iter().map(|t| t.as_ref().parse()).collect()
    }
}

impl FromStr for RadarVariable {
    type Err = RadarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DBZH" => Ok(RadarVariable::Dbzh),
            "DBZV" => Ok(RadarVariable::Dbzv),
            "VELH" => Ok(RadarVariable::Velh),
            "VELV" => Ok(RadarVariable::Velv),
            other => Err(RadarError::UnknownVariable(other.to_string())),
        }
    }
}

impl TryFrom<String> for RadarVariable {
    type Error = RadarError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<RadarVariable> for String {
    fn from(value: RadarVariable) -> Self {
        value.tag().to_string()
    }
}

impl fmt::Display for RadarVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
