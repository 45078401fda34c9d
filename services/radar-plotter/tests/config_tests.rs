//! YAML configuration parsing.

use std::path::PathBuf;

use radar_plotter::PlotterConfig;

const SAMPLE: &str = r#"
input_dir: /srv/radar/datos
output_dir: ${RADAR_CONFIG_TEST_OUT:-imagenesTest}
logo: imn.jpg
variables: [DBZH, VELH]
figure:
  width: 1200
presets:
  - name: caribe
    extent: [-84.0, -82.5, 9.5, 11.0]
    logo_offset: [-50000, -50000]
    logo_zoom: 0.5
    colorbar_fraction: 0.035
    regional: true
    markers:
      Limon: [9.9907398, -83.0359573]
      Tortuguero: [10.541779, -83.502059]
"#;

#[test]
fn test_parse_sample() {
    let config = PlotterConfig::from_yaml_str(SAMPLE).unwrap();
    assert_eq!(config.input_dir, PathBuf::from("/srv/radar/datos"));
    assert_eq!(config.output_dir, PathBuf::from("imagenesTest"));
    assert_eq!(config.figure.width, 1200);
    // unspecified fields keep their defaults
    assert_eq!(config.file_markers, vec!["Reflectividad", "viento"]);
    assert_eq!(config.rings.len(), 3);

    let catalog = config.catalog().unwrap();
    assert_eq!(catalog.names(), &["caribe".to_string()]);
    let preset = catalog.get("caribe").unwrap();
    assert!(preset.framing.regional);
    assert_eq!(preset.framing.extent.extent(), [-84.0, -82.5, 9.5, 11.0]);
    assert_eq!(preset.markers[0].name, "Limon");
    assert_eq!(preset.markers[1].name, "Tortuguero");
}

#[test]
fn test_unknown_variable_in_config() {
    let config = PlotterConfig::from_yaml_str("variables: [DBZH, KDP]").unwrap();
    assert_eq!(config.validate().unwrap_err().kind(), "UnknownVariableError");
}

#[test]
fn test_malformed_yaml() {
    let err = PlotterConfig::from_yaml_str("presets: {not: [a list").unwrap_err();
    assert_eq!(err.kind(), "ConfigError");
}

#[test]
fn test_missing_file_falls_back_to_defaults() {
    let config = PlotterConfig::load_or_default(std::path::Path::new("/nonexistent/plotter.yaml")).unwrap();
    assert_eq!(config, PlotterConfig::default());
}

#[test]
fn test_shipped_config_parses() {
    let path = test_utils::workspace_root().join("config/plotter.yaml");
    let config = PlotterConfig::load(&path).unwrap();
    config.validate().unwrap();
    assert_eq!(config.catalog().unwrap().names(), &["national".to_string(), "regional".to_string()]);
}

#[test]
fn test_defaults_match_shipped_font_and_geography() {
    std::env::remove_var("RADAR_FONT");
    let shipped = PlotterConfig::load(&test_utils::workspace_root().join("config/plotter.yaml")).unwrap();
    let defaults = PlotterConfig::default();
    assert_eq!(defaults.font, shipped.font);
    assert_eq!(defaults.geography, shipped.geography);
    assert!(defaults.geography.land.is_some());
    assert!(defaults.geography.states.is_some());
}
