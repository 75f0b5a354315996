//! Containment of point geometries in a single region.

use geo::{Contains, MultiPolygon};

use crate::error::{RegionError, Result};
use crate::models::Table;

/// One flag per point: is it inside `region`?
///
/// Uses `geo::Contains`, so points on the region boundary (exterior or
/// hole rings) are not contained.
pub fn contains(region: &MultiPolygon<f64>, points: &Table, geometry_field: &str) -> Result<Vec<bool>> {
    let idx = points.require_field(geometry_field)?;

    points
        .rows()
        .iter()
        .enumerate()
        .map(|(row, values)| {
            values[idx]
                .as_point()
                .map(|p| region.contains(p))
                .ok_or_else(|| RegionError::InvalidGeometry {
                    field: geometry_field.to_string(),
                    row,
                })
        })
        .collect()
}
