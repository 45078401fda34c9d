//! Tests for framing presets, place catalogs and their YAML form.

use radar_common::{
    default_rings, national_preset, regional_preset, BoundingBox, FramingPreset, PresetCatalog,
};

#[test]
fn test_national_preset_values() {
    let preset = national_preset();
    assert_eq!(preset.framing.extent, BoundingBox::from_extent([-86.0, -82.6, 8.0, 11.3]));
    assert_eq!(preset.framing.logo_offset, [-160000.0, -190000.0]);
    assert_eq!(preset.framing.logo_zoom, 1.2);
    assert_eq!(preset.framing.colorbar_fraction, 0.04);
    assert!(!preset.framing.regional);
    assert!(preset.markers.iter().any(|m| m.name == "Liberia"));
}

#[test]
fn test_regional_preset_values() {
    let preset = regional_preset();
    assert_eq!(preset.framing.extent, BoundingBox::from_extent([-85.0, -83.2, 9.3, 10.8]));
    assert_eq!(preset.framing.logo_offset, [-100000.0, -70000.0]);
    assert_eq!(preset.framing.logo_zoom, 0.35);
    assert_eq!(preset.framing.colorbar_fraction, 0.035);
    assert!(preset.framing.regional);
    let heredia = preset.markers.iter().find(|m| m.name == "Heredia").unwrap();
    assert_eq!((heredia.lat, heredia.lon), (9.998289, -84.121291));
}

#[test]
fn test_regional_markers_inside_regional_extent() {
    let preset = regional_preset();
    let outside: Vec<&str> = preset
        .markers
        .iter()
        .filter(|m| !preset.framing.extent.contains_point(m.lon, m.lat))
        .map(|m| m.name.as_str())
        .collect();
    assert!(outside.is_empty(), "outside extent: {:?}", outside);
}

#[test]
fn test_ring_labels() {
    let labels: Vec<String> = default_rings().into_iter().map(|r| r.label).collect();
    assert_eq!(labels, vec!["30km", "60km", "120km"]);
}

#[test]
fn test_preset_from_yaml() {
    let yaml = r#"
name: coast
extent: [-85.9, -84.5, 9.5, 11.1]
logo_offset: [-120000, -90000]
logo_zoom: 0.5
colorbar_fraction: 0.03
regional: true
markers:
  Liberia: [10.6350403, -85.4377213]
  Nosara: [9.979184, -85.649843]
"#;
    let preset: FramingPreset = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(preset.name, "coast");
    assert_eq!(preset.framing.extent.min_x, -85.9);
    assert_eq!(preset.framing.logo_offset, [-120000.0, -90000.0]);
    assert!(preset.framing.regional);
    assert_eq!(preset.markers.len(), 2);
    assert_eq!(preset.markers[0].name, "Liberia");
    assert_eq!(preset.markers[1].lon, -85.649843);

    let catalog = PresetCatalog::new(vec![preset]).unwrap();
    assert_eq!(catalog.names(), &["coast".to_string()]);
}

#[test]
fn test_preset_yaml_defaults() {
    let yaml = r#"
name: plain
extent: [-86, -82.6, 8, 11.3]
logo_offset: [0, 0]
logo_zoom: 1.0
colorbar_fraction: 0.04
"#;
    let preset: FramingPreset = serde_yaml::from_str(yaml).unwrap();
    assert!(!preset.framing.regional);
    assert!(preset.markers.is_empty());
}
