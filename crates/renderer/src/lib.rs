//! Figure composition for X-band radar scans.
//!
//! A [`RadarRenderer`] turns one [`radar_common::RadarVolume`] field into a
//! PNG: the polar mesh over a Lambert conformal basemap with range rings,
//! place markers, a colorbar, the institutional logo and a title.

pub mod canvas;
pub mod colorbar;
pub mod colormap;
pub mod geography;
pub mod layout;
pub mod logo;
pub mod mesh;
pub mod png;
pub mod radar;
pub mod text;

pub use colorbar::Colorbar;
pub use colormap::{Color, ColorScale};
pub use geography::{BaseGeography, GeoLayer, GeoLayerKind, GeographyPaths};
pub use layout::{FigureLayout, MapTransform, PixelRect};
pub use logo::Logo;
pub use mesh::{build_mesh, MaskedField, MeshCell};
pub use png::{encode_png, write_png};
pub use radar::{RadarRenderer, RenderAssets, RenderRequest, DEFAULT_FIGURE_WIDTH};
pub use text::{Anchor, TextPainter, TextStyle};
