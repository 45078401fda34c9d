//! Discover scans, pick one file per variable, render every preset.
//!
//! Each (file, variable, preset) is an independent item: a failure is
//! logged and recorded in the [`RunReport`] and the run moves on, unless
//! fail-fast is requested.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Instant;

use radar_common::title::derive_title_for;
use radar_common::{
    PresetCatalog, RadarError, RadarResult, RadarVariable, VolumeSource,
};
use renderer::{RadarRenderer, RenderAssets, RenderRequest};
use tracing::{error, info, warn};
use walkdir::WalkDir;

use crate::config::PlotterConfig;

/// Extension of radar scan files.
pub const SCAN_EXTENSION: &str = "nc";

/// Scan files directly inside `input_dir` whose path contains a marker.
///
/// Sorted by file name.
pub fn discover(input_dir: &Path, markers: &[String]) -> RadarResult<Vec<PathBuf>> {
    if !input_dir.is_dir() {
        return Err(RadarError::DataSource(format!(
            "input directory {} does not exist",
            input_dir.display()
        )));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(input_dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| {
            RadarError::DataSource(format!("cannot list {}: {}", input_dir.display(), e))
        })?;
        let path = entry.path();
        if !entry.file_type().is_file()
            || path.extension().and_then(|e| e.to_str()) != Some(SCAN_EXTENSION)
        {
            continue;
        }
        let text = path.to_string_lossy();
        if markers.iter().any(|m| text.contains(m.as_str())) {
            files.push(path.to_path_buf());
        }
    }

    info!(dir = %input_dir.display(), count = files.len(), "Discovered scan files");
    Ok(files)
}

/// The file chosen to plot one variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub variable: RadarVariable,
    pub path: PathBuf,
}

/// Why an item did not produce an image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemFailure {
    pub kind: &'static str,
    pub message: String,
}

impl From<&RadarError> for ItemFailure {
    fn from(err: &RadarError) -> Self {
        Self {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

/// Result of one unit of work.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemOutcome {
    pub file: PathBuf,
    /// `None` when the file failed before a variable was chosen.
    pub variable: Option<RadarVariable>,
    pub preset: Option<String>,
    pub result: Result<PathBuf, ItemFailure>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunReport {
    pub items: Vec<ItemOutcome>,
}

impl RunReport {
    pub fn outputs(&self) -> impl Iterator<Item = &Path> {
        self.items.iter().filter_map(|i| i.result.as_ref().ok().map(PathBuf::as_path))
    }

    pub fn failures(&self) -> impl Iterator<Item = &ItemOutcome> {
        self.items.iter().filter(|i| i.result.is_err())
    }

    pub fn succeeded(&self) -> usize {
        self.outputs().count()
    }

    pub fn failed(&self) -> usize {
        self.failures().count()
    }

    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }

    pub fn log_summary(&self) {
        if self.is_success() {
            info!(images = self.succeeded(), "Run complete");
        } else {
            warn!(images = self.succeeded(), failed = self.failed(), "Run complete with failures");
        }
    }
}

/// One file per variable plus the files that could not be inspected.
#[derive(Debug, Default)]
pub struct Classification {
    pub selections: Vec<Selection>,
    pub failures: Vec<ItemOutcome>,
}

/// Choose, for every variable, the first file that contains it.
///
/// Selections are in first-found order: files in the given order, and
/// within a file the variables in their configured order. A file that
/// cannot be inspected is recorded as a failure, or returned as an error
/// when `fail_fast` is set.
pub fn classify(
    files: &[PathBuf],
    variables: &[RadarVariable],
    source: &dyn VolumeSource,
    fail_fast: bool,
) -> RadarResult<Classification> {
    let mut classification = Classification::default();
    let mut taken = HashSet::new();

    for file in files {
        let names = match source.variable_names(file) {
            Ok(names) => names,
            Err(e) => {
                error!(file = %file.display(), kind = e.kind(), error = %e, "Cannot inspect scan");
                if fail_fast {
                    return Err(e);
                }
                classification.failures.push(ItemOutcome {
                    file: file.clone(),
                    variable: None,
                    preset: None,
                    result: Err(ItemFailure::from(&e)),
                });
                continue;
            }
        };

        for &variable in variables {
            if taken.contains(&variable) || !names.iter().any(|n| n == variable.tag()) {
                continue;
            }
            taken.insert(variable);
            info!(variable = %variable, file = %file.display(), "Selected scan");
            classification.selections.push(Selection {
                variable,
                path: file.clone(),
            });
        }
    }

    for variable in variables.iter().filter(|v| !taken.contains(v)) {
        warn!(variable = %variable, "No scan carries this variable");
    }
    Ok(classification)
}

/// Per-run switches from the command line.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub fail_fast: bool,
    /// Restrict rendering to these presets; empty means all.
    pub presets: Vec<String>,
}

/// A configured plotting run.
pub struct Plotter<'a> {
    config: PlotterConfig,
    variables: Vec<RadarVariable>,
    catalog: PresetCatalog,
    source: &'a dyn VolumeSource,
    renderer: RadarRenderer,
    options: RunOptions,
}

impl<'a> Plotter<'a> {
    /// Validate the configuration and load rendering assets.
    ///
    /// Variable tags are resolved before anything is read from disk, so an
    /// unknown tag fails without touching any file.
    pub fn new(config: PlotterConfig, source: &'a dyn VolumeSource, options: RunOptions) -> RadarResult<Self> {
        let variables = config.variables()?;
        config.validate()?;
        let mut catalog = config.catalog()?;
        if !options.presets.is_empty() {
            catalog = catalog.select(&options.presets)?;
        }

        let assets = RenderAssets::load(
            &config.logo,
            config.font.as_deref(),
            &config.geography,
            config.rings.clone(),
            config.figure.width,
        )?;

        Ok(Self {
            config,
            variables,
            catalog,
            source,
            renderer: RadarRenderer::new(assets),
            options,
        })
    }

    pub fn config(&self) -> &PlotterConfig {
        &self.config
    }

    pub fn run(&self) -> RadarResult<RunReport> {
        let start = Instant::now();
        let files = discover(&self.config.input_dir, &self.config.file_markers)?;
        let classification = classify(&files, &self.variables, self.source, self.options.fail_fast)?;

        let mut report = RunReport {
            items: classification.failures,
        };
        for selection in &classification.selections {
            self.render_selection(selection, &mut report)?;
        }

        info!(
            elapsed_ms = start.elapsed().as_millis() as u64,
            images = report.succeeded(),
            "Finished rendering"
        );
        Ok(report)
    }

    /// Render every preset for one (variable, file) pair.
    fn render_selection(&self, selection: &Selection, report: &mut RunReport) -> RadarResult<()> {
        let Selection { variable, path } = selection;
        let variable = *variable;

        let prepared = derive_title_for(variable, &path.to_string_lossy()).and_then(|derived| {
            info!(variable = %variable, title = %derived.title, image_name = %derived.image_name, "Plotting");
            let volume = self.source.load(path, variable)?;
            Ok((derived, volume))
        });
        let (derived, volume) = match prepared {
            Ok(prepared) => prepared,
            Err(e) => return self.record(report, path, variable, None, Err(e)),
        };

        for preset in self.catalog.iter() {
            let request = RenderRequest {
                volume: &volume,
                variable,
                framing: &preset.framing,
                markers: &preset.markers,
                title: &derived.title,
                output_dir: &self.config.output_dir,
            };
            let result = self.renderer.render(&request);
            self.record(report, path, variable, Some(&preset.name), result)?;
        }
        Ok(())
    }

    /// Append an outcome; under fail-fast an error is returned instead.
    fn record(
        &self,
        report: &mut RunReport,
        file: &Path,
        variable: RadarVariable,
        preset: Option<&str>,
        result: RadarResult<PathBuf>,
    ) -> RadarResult<()> {
        let result = match result {
            Ok(path) => Ok(path),
            Err(e) => {
                error!(
                    file = %file.display(),
                    variable = %variable,
                    preset = preset.unwrap_or("-"),
                    kind = e.kind(),
                    error = %e,
                    "Item failed"
                );
                if self.options.fail_fast {
                    return Err(e);
                }
                Err(ItemFailure::from(&e))
            }
        };
        report.items.push(ItemOutcome {
            file: file.to_path_buf(),
            variable: Some(variable),
            preset: preset.map(str::to_string),
            result,
        });
        Ok(())
    }
}
