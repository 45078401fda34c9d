//! Masking and tessellation of a polar field into colored cells.

use projection::{polar_to_cartesian, PolarCell, PolarMesh};
use radar_common::{BoundingBox, FieldGrid, RadarVariable};
use rayon::prelude::*;

use crate::colormap::{Color, ColorScale};

/// Field values with invalid samples removed.
///
/// Masked samples hold `None`; everything else is drawable.
#[derive(Debug, Clone, PartialEq)]
pub struct MaskedField {
    pub rays: usize,
    pub bins: usize,
    values: Vec<Option<f32>>,
}

impl MaskedField {
    /// Mask values strictly below `floor`, plus NaN.
    ///
    /// A value exactly at the floor stays visible.
    pub fn with_floor(field: &FieldGrid, floor: f32) -> Self {
        let values = field
            .values
            .iter()
            .map(|&v| if v.is_nan() || v < floor { None } else { Some(v) })
            .collect();
        Self {
            rays: field.rays,
            bins: field.bins,
            values,
        }
    }

    /// Mask with the floor of `variable`'s family.
    pub fn for_variable(field: &FieldGrid, variable: RadarVariable) -> Self {
        Self::with_floor(field, variable.valid_floor())
    }

    pub fn get(&self, ray: usize, bin: usize) -> Option<f32> {
        if ray >= self.rays || bin >= self.bins {
            return None;
        }
        self.values[ray * self.bins + bin]
    }

    pub fn valid_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }

    pub fn masked_count(&self) -> usize {
        self.values.len() - self.valid_count()
    }

    /// Every unmasked value, in (ray, bin) order.
    pub fn valid_values(&self) -> impl Iterator<Item = f32> + '_ {
        self.values.iter().filter_map(|v| *v)
    }
}

/// One colored quadrilateral in projected meters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshCell {
    pub corners: [(f64, f64); 4],
    pub color: Color,
}

fn cell_bounds(cell: &PolarCell) -> BoundingBox {
    let mut min_x = f64::INFINITY;
    let mut min_y = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    for &(x, y) in &cell.corners {
        min_x = min_x.min(x);
        min_y = min_y.min(y);
        max_x = max_x.max(x);
        max_y = max_y.max(y);
    }
    BoundingBox::new(min_x, min_y, max_x, max_y)
}

/// Colored cells for every unmasked sample that touches `visible`.
///
/// A cell whose sample point lies inside `visible` is always kept; the
/// others are tested against the bounds of their corners.
///
/// Rays are processed in parallel; the output keeps (ray, bin) order so
/// drawing is deterministic.
pub fn build_mesh(
    range_m: &[f64],
    azimuth_deg: &[f64],
    field: &MaskedField,
    scale: &ColorScale,
    visible: &BoundingBox,
) -> Vec<MeshCell> {
    let geometry = PolarMesh::new(range_m, azimuth_deg);
    let samples = polar_to_cartesian(range_m, azimuth_deg);
    let rays = field.rays.min(geometry.rays());
    let bins = field.bins.min(geometry.bins());

    (0..rays)
        .into_par_iter()
        .flat_map_iter(|ray| {
            let geometry = &geometry;
            let samples = &samples;
            (0..bins).filter_map(move |bin| {
                let value = field.get(ray, bin)?;
                let cell = geometry.cell(ray, bin)?;
                let inside = samples
                    .get(ray, bin)
                    .is_some_and(|(x, y)| visible.contains_point(x, y));
                if !inside && !cell_bounds(&cell).intersects(visible) {
                    return None;
                }
                Some(MeshCell {
                    corners: cell.corners,
                    color: scale.color_for(value),
                })
            })
        })
        .collect()
}
