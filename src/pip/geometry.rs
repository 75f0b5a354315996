//! Point geometry construction from coordinate columns.

use geo::Point;

use crate::error::{RegionError, Result};
use crate::models::{Table, Value};

/// Default name of the point geometry field
pub const GEOMETRY_FIELD: &str = "geometry";

/// Replace the longitude and latitude fields with a `geometry` point field.
///
/// Rows keep their order; the geometry field is appended after the
/// remaining payload fields.
pub fn build_points(table: &Table, longitude_field: &str, latitude_field: &str) -> Result<Table> {
    build_points_into(table, longitude_field, latitude_field, GEOMETRY_FIELD)
}

/// Like [`build_points`], writing the points to `geometry_field`.
pub fn build_points_into(
    table: &Table,
    longitude_field: &str,
    latitude_field: &str,
    geometry_field: &str,
) -> Result<Table> {
    let lon_idx = table.require_field(longitude_field)?;
    let lat_idx = table.require_field(latitude_field)?;

    let points = table
        .rows()
        .iter()
        .enumerate()
        .map(|(row, values)| {
            let lon = coordinate(&values[lon_idx], longitude_field, row)?;
            let lat = coordinate(&values[lat_idx], latitude_field, row)?;
            Ok(Value::Point(Point::new(lon, lat)))
        })
        .collect::<Result<Vec<Value>>>()?;

    let payload = table.without_fields(&[longitude_field, latitude_field])?;
    if payload.has_field(geometry_field) {
        return Err(RegionError::DuplicateField {
            field: geometry_field.to_string(),
        });
    }

    payload.with_column(geometry_field, points)
}

/// Coordinates must be finite numbers; NaN and infinities are rejected
fn coordinate(value: &Value, field: &str, row: usize) -> Result<f64> {
    value
        .as_f64()
        .filter(|c| c.is_finite())
        .ok_or_else(|| RegionError::InvalidCoordinate {
            field: field.to_string(),
            row,
        })
}
