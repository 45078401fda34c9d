//! IMN X-band radar plotter.
//!
//! Finds the latest reflectivity and wind scans in a directory, picks one
//! file per variable and renders each through every configured framing.

pub mod config;
pub mod logging;
pub mod pipeline;

pub use config::{PlotterConfig, DEFAULT_CONFIG_PATH};
pub use pipeline::{classify, discover, Plotter, RunOptions, RunReport};
