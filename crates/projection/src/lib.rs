//! Coordinate transformations for radar plots.
//!
//! Implements the map projection and the polar-to-Cartesian sample layout
//! from scratch without external dependencies.

pub mod lambert;
pub mod polar;

pub use lambert::LambertConformal;
pub use polar::{
    azimuth_edges, cell_edges, polar_point, polar_to_cartesian, range_edges, CartesianGrid,
    PolarCell, PolarMesh,
};
