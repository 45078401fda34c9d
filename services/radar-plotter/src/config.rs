//! Plotter configuration.
//!
//! Loaded from a YAML file whose text may reference environment variables
//! as `${VAR}` or `${VAR:-default}`. Every field has a default, so an
//! absent file or an empty document yields the stock IMN setup.

use std::path::{Path, PathBuf};

use radar_common::{
    default_rings, national_preset, regional_preset, FramingPreset, PresetCatalog, RadarError,
    RadarResult, RadarVariable, RingMarker,
};
use renderer::{GeographyPaths, DEFAULT_FIGURE_WIDTH};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Default location of the configuration file, relative to the working
/// directory.
pub const DEFAULT_CONFIG_PATH: &str = "config/plotter.yaml";

/// Font used when the configuration does not name one.
pub const DEFAULT_FONT: &str = "/usr/share/fonts/truetype/dejavu/DejaVuSans-Oblique.ttf";

/// Natural Earth 10m layers under `shapes/`.
pub fn default_geography() -> GeographyPaths {
    let shape = |name: &str| Some(PathBuf::from("shapes").join(format!("ne_10m_{}.shp", name)));
    GeographyPaths {
        land: shape("land"),
        coastline: shape("coastline"),
        borders: shape("admin_0_boundary_lines_land"),
        states: shape("admin_1_states_provinces_lines"),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FigureConfig {
    /// Output width in pixels; height follows the map aspect ratio.
    pub width: u32,
}

impl Default for FigureConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_FIGURE_WIDTH,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotterConfig {
    /// Directory scanned for `.nc` scans.
    pub input_dir: PathBuf,
    /// Directory receiving `{tag}_actual[Red].png`.
    pub output_dir: PathBuf,
    pub logo: PathBuf,
    /// A scan is considered only if its path contains one of these.
    pub file_markers: Vec<String>,
    /// Variable tags to plot, in priority order.
    pub variables: Vec<String>,
    /// TrueType font for labels and title.
    pub font: Option<PathBuf>,
    pub geography: GeographyPaths,
    pub figure: FigureConfig,
    pub rings: Vec<RingMarker>,
    /// Framings rendered for every selected variable, in order.
    pub presets: Vec<FramingPreset>,
}

impl Default for PlotterConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("datos"),
            output_dir: PathBuf::from("imagenesTest"),
            logo: PathBuf::from("imn.jpg"),
            file_markers: vec!["Reflectividad".to_string(), "viento".to_string()],
            variables: RadarVariable::ALL.iter().map(|v| v.tag().to_string()).collect(),
            font: Some(PathBuf::from(DEFAULT_FONT)),
            geography: default_geography(),
            figure: FigureConfig::default(),
            rings: default_rings(),
            presets: vec![national_preset(), regional_preset()],
        }
    }
}

impl PlotterConfig {
    /// Parse YAML text after environment substitution.
    pub fn from_yaml_str(content: &str) -> RadarResult<Self> {
        let expanded = expand_env_vars(content)?;
        if expanded.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(&expanded)
            .map_err(|e| RadarError::Config(format!("invalid plotter configuration: {}", e)))
    }

    pub fn load(path: &Path) -> RadarResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| RadarError::Config(format!("cannot read {}: {}", path.display(), e)))?;
        let config = Self::from_yaml_str(&content)?;
        info!(path = %path.display(), presets = config.presets.len(), "Loaded configuration");
        Ok(config)
    }

    /// Load `path`, or fall back to the defaults when it does not exist.
    pub fn load_or_default(path: &Path) -> RadarResult<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            info!(path = %path.display(), "Configuration file not found, using built-in defaults");
            Ok(Self::default())
        }
    }

    /// Configured tags resolved to variables; fails on the first unknown tag.
    pub fn variables(&self) -> RadarResult<Vec<RadarVariable>> {
        RadarVariable::parse_list(&self.variables)
    }

    pub fn catalog(&self) -> RadarResult<PresetCatalog> {
        PresetCatalog::new(self.presets.clone())
    }

    pub fn validate(&self) -> RadarResult<()> {
        self.variables()?;
        self.catalog()?;
        if self.file_markers.is_empty() {
            return Err(RadarError::Config("file_markers must not be empty".to_string()));
        }
        if self.figure.width == 0 {
            return Err(RadarError::Config("figure width must be positive".to_string()));
        }
        Ok(())
    }
}

/// Expand `${VAR}` and `${VAR:-default}` references.
pub fn expand_env_vars(content: &str) -> RadarResult<String> {
    let mut result = String::with_capacity(content.len());
    let mut chars = content.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '$' || chars.peek() != Some(&'{') {
            result.push(ch);
            continue;
        }
        chars.next();

        let mut expr = String::new();
        loop {
            match chars.next() {
                Some('}') => break,
                Some(c) => expr.push(c),
                None => {
                    return Err(RadarError::Config(format!(
                        "unclosed variable substitution: ${{{}",
                        expr
                    )))
                }
            }
        }
        result.push_str(&resolve_var(&expr)?);
    }

    Ok(result)
}

fn resolve_var(expr: &str) -> RadarResult<String> {
    match expr.split_once(":-") {
        Some((name, default)) => match std::env::var(name.trim()) {
            Ok(value) if !value.is_empty() => Ok(value),
            _ => Ok(default.to_string()),
        },
        None => std::env::var(expr.trim()).map_err(|_| {
            RadarError::Config(format!("environment variable {} is not set", expr.trim()))
        }),
    }
}
