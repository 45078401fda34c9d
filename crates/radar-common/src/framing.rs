//! Scene framing presets and map annotations.
//!
//! Two presets are built in: `national` (all of Costa Rica) and `regional`
//! (zoomed on the Central Valley). Each carries its own place catalog.
//! The distance rings are shared by both.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::bbox::BoundingBox;
use crate::error::{RadarError, RadarResult};

/// One rendering pass over a radar volume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneFraming {
    /// Visible geographic extent, `[min_lon, max_lon, min_lat, max_lat]`.
    pub extent: BoundingBox,
    /// Logo center in projected meters relative to the radar, `[x, y]`.
    pub logo_offset: [f64; 2],
    /// Scale factor applied to the logo raster.
    pub logo_zoom: f64,
    /// Colorbar width as a fraction of the map width.
    pub colorbar_fraction: f64,
    /// Zoomed pass: saved as `{tag}_actualRed.png` instead of `{tag}_actual.png`.
    #[serde(default)]
    pub regional: bool,
}

impl SceneFraming {
    /// Output file name for a variable tag under this framing.
    pub fn output_name(&self, tag: &str) -> String {
        if self.regional {
            format!("{}_actualRed.png", tag)
        } else {
            format!("{}_actual.png", tag)
        }
    }

    pub fn validate(&self) -> RadarResult<()> {
        if self.extent.width() <= 0.0 || self.extent.height() <= 0.0 {
            return Err(RadarError::Config(format!(
                "extent {:?} has no area",
                self.extent.extent()
            )));
        }
        if !(self.colorbar_fraction > 0.0 && self.colorbar_fraction < 1.0) {
            return Err(RadarError::Config(format!(
                "colorbar fraction {} must be in (0, 1)",
                self.colorbar_fraction
            )));
        }
        if self.logo_zoom <= 0.0 {
            return Err(RadarError::Config(format!(
                "logo zoom {} must be positive",
                self.logo_zoom
            )));
        }
        Ok(())
    }
}

/// A named point annotated on the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceMarker {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

impl PlaceMarker {
    pub fn new(name: impl Into<String>, lat: f64, lon: f64) -> Self {
        Self {
            name: name.into(),
            lat,
            lon,
        }
    }
}

/// A distance ring around the radar.
///
/// `lat`/`lon` only position the label; the ring itself is centered on the
/// radar site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RingMarker {
    pub label: String,
    pub lat: f64,
    pub lon: f64,
    pub radius_m: f64,
}

/// The three rings drawn on every map.
///
/// Radii are the surveyed values, not the rounded labels.
pub fn default_rings() -> Vec<RingMarker> {
    vec![
        RingMarker {
            label: "30km".to_string(),
            lat: 10.05456,
            lon: -83.82269,
            radius_m: 33700.0,
        },
        RingMarker {
            label: "60km".to_string(),
            lat: 10.17530,
            lon: -83.57759,
            radius_m: 67200.0,
        },
        RingMarker {
            label: "120km".to_string(),
            lat: 10.470731082600837,
            lon: -83.11855002599704,
            radius_m: 134100.0,
        },
    ]
}

/// A framing plus the place catalog drawn with it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FramingPreset {
    pub name: String,
    #[serde(flatten)]
    pub framing: SceneFraming,
    #[serde(default, with = "marker_map")]
    pub markers: Vec<PlaceMarker>,
}

fn markers(entries: &[(&str, f64, f64)]) -> Vec<PlaceMarker> {
    entries
        .iter()
        .map(|&(name, lat, lon)| PlaceMarker::new(name, lat, lon))
        .collect()
}

/// Cities labelled on the full-country map.
pub fn national_markers() -> Vec<PlaceMarker> {
    markers(&[
        ("Liberia", 10.6350403, -85.4377213),
        ("Golfito", 8.6032696, -83.1134186),
        ("San Jose", 9.9333296, -84.0833282),
        ("Alajuela", 10.0162497, -84.2116318),
        ("Cd. Quesada", 10.3238096, -84.4271393),
        ("Cartago", 9.86444, -83.9194412),
        ("Siquirres", 10.0974798, -83.5065918),
        ("San Vito", 8.8207903, -82.9709167),
        ("Upala", 10.899065, -85.017947),
        ("Los Chiles", 11.03333, -84.7166672),
        ("Sarapiquí", 10.452225, -84.018191),
        ("Palmares", 10.060881, -84.43),
        ("Limon", 9.9907398, -83.0359573),
        ("Quepos", 9.4306297, -84.1623077),
        ("Nosara", 9.979184, -85.649843),
    ])
}

/// Places labelled on the Central Valley map.
pub fn regional_markers() -> Vec<PlaceMarker> {
    markers(&[
        ("San José", 9.9333296, -84.0833282),
        ("Paquera", 9.82139, -84.9383),
        ("Puntarenas", 9.9762497, -84.8383636),
        ("Alajuela", 10.0162497, -84.2116318),
        ("Cd. Quesada", 10.3238096, -84.4271393),
        ("Cartago", 9.86444, -83.9194412),
        ("Siquirres", 10.0974798, -83.5065918),
        ("Naranjo", 10.097380, -84.379059),
        ("Sarapiquí", 10.452225, -84.018191),
        ("Palmares", 10.060881, -84.43),
        ("Heredia", 9.998289, -84.121291),
        ("Santa Bárbara", 10.037220, -84.158898),
        ("Quepos", 9.4306297, -84.1623077),
        ("Turrialba", 9.908138, -83.679943),
        ("Jacó", 9.611920, -84.627986),
        ("Desamparados", 9.896291, -84.063445),
        ("Tortuguero", 10.541779, -83.502059),
        ("Guápiles", 10.215029, -83.789012),
        ("Pérez Zeledón", 9.373451, -83.702680),
        ("Purral", 9.962138, -84.007336),
        ("Orotina", 9.909615, -84.523841),
        ("Salitrales", 9.766057, -84.400014),
        ("Tarbaca", 9.811155, -84.118058),
        ("Paraíso", 9.838339, -83.866003),
        ("Tierra Blanca", 9.915681, -83.892272),
        ("Cd. Colón", 9.913613, -84.242011),
        ("Puriscal", 9.847338, -84.314607),
        ("San Marcos", 9.659382, -84.021852),
        ("Pital", 10.452861, -84.277412),
    ])
}

/// Full-country framing.
pub fn national_preset() -> FramingPreset {
    FramingPreset {
        name: "national".to_string(),
        framing: SceneFraming {
            extent: BoundingBox::from_extent([-86.0, -82.6, 8.0, 11.3]),
            logo_offset: [-160000.0, -190000.0],
            logo_zoom: 1.2,
            colorbar_fraction: 0.04,
            regional: false,
        },
        markers: national_markers(),
    }
}

/// Central Valley framing.
pub fn regional_preset() -> FramingPreset {
    FramingPreset {
        name: "regional".to_string(),
        framing: SceneFraming {
            extent: BoundingBox::from_extent([-85.0, -83.2, 9.3, 10.8]),
            logo_offset: [-100000.0, -70000.0],
            logo_zoom: 0.35,
            colorbar_fraction: 0.035,
            regional: true,
        },
        markers: regional_markers(),
    }
}

/// Ordered, immutable set of presets keyed by name.
#[derive(Debug, Clone, PartialEq)]
pub struct PresetCatalog {
    order: Vec<String>,
    presets: BTreeMap<String, FramingPreset>,
}

impl PresetCatalog {
    /// Build a catalog; names must be unique and every framing valid.
    pub fn new(presets: Vec<FramingPreset>) -> RadarResult<Self> {
        let mut order = Vec::with_capacity(presets.len());
        let mut map = BTreeMap::new();
        for preset in presets {
            preset.framing.validate()?;
            if map.contains_key(&preset.name) {
                return Err(RadarError::Config(format!(
                    "duplicate preset '{}'",
                    preset.name
                )));
            }
            order.push(preset.name.clone());
            map.insert(preset.name.clone(), preset);
        }
        Ok(Self {
            order,
            presets: map,
        })
    }

    /// Presets in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &FramingPreset> {
        self.order.iter().filter_map(|name| self.presets.get(name))
    }

    pub fn get(&self, name: &str) -> Option<&FramingPreset> {
        self.presets.get(name)
    }

    pub fn names(&self) -> &[String] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Keep only the named presets, preserving declaration order.
    pub fn select(&self, names: &[String]) -> RadarResult<Self> {
        for name in names {
            if !self.presets.contains_key(name) {
                return Err(RadarError::Config(format!("unknown preset '{}'", name)));
            }
        }
        let kept = self
            .iter()
            .filter(|p| names.contains(&p.name))
            .cloned()
            .collect();
        Self::new(kept)
    }
}

impl Default for PresetCatalog {
    fn default() -> Self {
        Self {
            order: vec!["national".to_string(), "regional".to_string()],
            presets: BTreeMap::from([
                ("national".to_string(), national_preset()),
                ("regional".to_string(), regional_preset()),
            ]),
        }
    }
}

/// Markers serialize as an ordered `name: [lat, lon]` mapping.
mod marker_map {
    use std::fmt;

    use serde::de::{MapAccess, Visitor};
    use serde::ser::SerializeMap;
    use serde::{Deserializer, Serializer};

    use super::PlaceMarker;

    pub fn serialize<S: Serializer>(markers: &[PlaceMarker], serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(markers.len()))?;
        for m in markers {
            map.serialize_entry(&m.name, &[m.lat, m.lon])?;
        }
        map.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<PlaceMarker>, D::Error> {
        struct MarkerVisitor;

        impl<'de> Visitor<'de> for MarkerVisitor {
            type Value = Vec<PlaceMarker>;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of place name to [lat, lon]")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut out = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((name, [lat, lon])) = access.next_entry::<String, [f64; 2]>()? {
                    out.push(PlaceMarker::new(name, lat, lon));
                }
                Ok(out)
            }
        }

        deserializer.deserialize_map(MarkerVisitor)
    }
}
