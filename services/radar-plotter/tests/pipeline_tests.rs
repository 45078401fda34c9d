//! Discovery, classification and end-to-end runs over an in-memory source.

use std::path::{Path, PathBuf};

use radar_common::RadarVariable::{self, Dbzh, Dbzv, Velh, Velv};
use radar_plotter::pipeline::{classify, discover, Selection};
use radar_plotter::{Plotter, PlotterConfig, RunOptions};
use test_utils::{scans, small_volume, temp_test_dir, touch, write_logo, InMemorySource, SourceCall};

fn markers() -> Vec<String> {
    vec!["Reflectividad".to_string(), "viento".to_string()]
}

fn config_for(root: &Path) -> PlotterConfig {
    PlotterConfig {
        input_dir: root.join("datos"),
        output_dir: root.join("imagenesTest"),
        logo: write_logo(root),
        figure: radar_plotter::config::FigureConfig { width: 500 },
        ..PlotterConfig::default()
    }
}

fn names(paths: &[PathBuf]) -> Vec<String> {
    paths
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect()
}

#[test]
fn test_discover_filters_and_sorts() {
    let dir = temp_test_dir();
    touch(dir.path(), scans::WIND);
    touch(dir.path(), scans::LATER_REFLECTIVITY);
    touch(dir.path(), scans::REFLECTIVITY);
    touch(dir.path(), scans::UNMARKED);
    touch(dir.path(), "20220902-233911_Reflectividad.txt");
    std::fs::create_dir(dir.path().join("viento_old.nc")).unwrap();

    let found = discover(dir.path(), &markers()).unwrap();
    assert_eq!(
        names(&found),
        vec![scans::REFLECTIVITY, scans::WIND, scans::LATER_REFLECTIVITY]
    );
}

#[test]
fn test_discover_missing_directory() {
    let err = discover(Path::new("/nonexistent/datos"), &markers()).unwrap_err();
    assert_eq!(err.kind(), "DataSourceError");
}

#[test]
fn test_first_file_wins_per_variable() {
    let source = InMemorySource::new()
        .with_volume(scans::REFLECTIVITY, small_volume("a", &[Dbzh]))
        .with_volume(scans::WIND, small_volume("b", &[Velh, Velv]))
        .with_volume(scans::LATER_REFLECTIVITY, small_volume("c", &[Dbzh, Dbzv]));
    let files: Vec<PathBuf> = [scans::REFLECTIVITY, scans::WIND, scans::LATER_REFLECTIVITY]
        .iter()
        .map(PathBuf::from)
        .collect();

    let result = classify(&files, &RadarVariable::ALL, &source, false).unwrap();
    assert!(result.failures.is_empty());
    assert_eq!(
        result.selections,
        vec![
            Selection { variable: Dbzh, path: files[0].clone() },
            Selection { variable: Velh, path: files[1].clone() },
            Selection { variable: Velv, path: files[1].clone() },
            Selection { variable: Dbzv, path: files[2].clone() },
        ]
    );
}

#[test]
fn test_unreadable_file_is_isolated() {
    let source = InMemorySource::new()
        .with_broken(scans::REFLECTIVITY)
        .with_volume(scans::WIND, small_volume("b", &[Velh]));
    let files = vec![PathBuf::from(scans::REFLECTIVITY), PathBuf::from(scans::WIND)];

    let result = classify(&files, &[Velh, Dbzh], &source, false).unwrap();
    assert_eq!(result.selections.len(), 1);
    assert_eq!(result.failures.len(), 1);
    assert_eq!(result.failures[0].result.as_ref().unwrap_err().kind, "DataSourceError");

    let err = classify(&files, &[Velh, Dbzh], &source, true).unwrap_err();
    assert_eq!(err.kind(), "DataSourceError");
}

#[test]
fn test_unknown_variable_fails_before_io() {
    let dir = temp_test_dir();
    let source = InMemorySource::new();
    let config = PlotterConfig {
        variables: vec!["DBZH".to_string(), "ZDR".to_string()],
        ..config_for(dir.path())
    };

    let err = Plotter::new(config, &source, RunOptions::default()).err().unwrap();
    assert_eq!(err.kind(), "UnknownVariableError");
    assert!(source.calls().is_empty());
}

#[test]
fn test_run_renders_every_preset() {
    let dir = temp_test_dir();
    let config = config_for(dir.path());
    std::fs::create_dir(&config.input_dir).unwrap();
    touch(&config.input_dir, scans::REFLECTIVITY);
    touch(&config.input_dir, scans::WIND);

    let source = InMemorySource::new()
        .with_volume(scans::REFLECTIVITY, small_volume("r", &[Dbzh, Dbzv]))
        .with_volume(scans::WIND, small_volume("w", &[Velh]));

    let plotter = Plotter::new(config.clone(), &source, RunOptions::default()).unwrap();
    let report = plotter.run().unwrap();

    assert!(report.is_success());
    assert_eq!(report.succeeded(), 6);
    for name in [
        "VELH_actual.png",
        "VELH_actualRed.png",
        "DBZV_actual.png",
        "DBZV_actualRed.png",
        "DBZH_actual.png",
        "DBZH_actualRed.png",
    ] {
        assert!(config.output_dir.join(name).exists(), "{} missing", name);
    }
    // each selected volume is loaded once, however many presets render it
    assert_eq!(source.load_count(), 3);
}

#[test]
fn test_preset_filter() {
    let dir = temp_test_dir();
    let config = config_for(dir.path());
    std::fs::create_dir(&config.input_dir).unwrap();
    touch(&config.input_dir, scans::WIND);
    let source = InMemorySource::new().with_volume(scans::WIND, small_volume("w", &[Velh]));

    let options = RunOptions {
        presets: vec!["regional".to_string()],
        ..RunOptions::default()
    };
    let report = Plotter::new(config.clone(), &source, options).unwrap().run().unwrap();
    assert_eq!(report.succeeded(), 1);
    assert!(config.output_dir.join("VELH_actualRed.png").exists());
    assert!(!config.output_dir.join("VELH_actual.png").exists());
}

#[test]
fn test_unknown_preset_rejected() {
    let dir = temp_test_dir();
    let source = InMemorySource::new();
    let options = RunOptions {
        presets: vec!["caribe".to_string()],
        ..RunOptions::default()
    };
    let err = Plotter::new(config_for(dir.path()), &source, options).err().unwrap();
    assert_eq!(err.kind(), "ConfigError");
}

#[test]
fn test_bad_file_name_is_isolated_unless_fail_fast() {
    let dir = temp_test_dir();
    let config = config_for(dir.path());
    std::fs::create_dir(&config.input_dir).unwrap();
    let bad = "scan_Reflectividad.nc";
    touch(&config.input_dir, bad);
    touch(&config.input_dir, scans::WIND);

    let source = InMemorySource::new()
        .with_volume(bad, small_volume("bad", &[Dbzh]))
        .with_volume(scans::WIND, small_volume("w", &[Velh]));

    let report = Plotter::new(config.clone(), &source, RunOptions::default())
        .unwrap()
        .run()
        .unwrap();
    assert!(!report.is_success());
    assert_eq!(report.failed(), 1);
    assert_eq!(report.succeeded(), 2);
    let failure = report.failures().next().unwrap();
    assert_eq!(failure.variable, Some(Dbzh));
    assert_eq!(failure.result.as_ref().unwrap_err().kind, "ParseError");
    // the failed item never opened its file
    assert!(!source
        .calls()
        .contains(&SourceCall::Load(bad.to_string(), Dbzh)));

    let options = RunOptions {
        fail_fast: true,
        ..RunOptions::default()
    };
    let err = Plotter::new(config, &source, options).unwrap().run().unwrap_err();
    assert_eq!(err.kind(), "ParseError");
}
