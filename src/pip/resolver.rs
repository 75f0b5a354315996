//! Region code resolution for point tables.
//!
//! Every region is tested against every point, producing a boolean matrix
//! with one column per region. Columns are then folded left to right in
//! region order: a point keeps the code of the first region that contains
//! it, even if later regions contain it too.

use geo::MultiPolygon;
use rayon::prelude::*;
use serde::Deserialize;
use tracing::debug;

use super::contains::contains;
use super::geometry::GEOMETRY_FIELD;
use super::matrix::BooleanMatrix;
use crate::error::{RegionError, Result};
use crate::models::{RegionCode, RegionTable, Table, Value};

/// Settings for a [`RegionCodeResolver`]
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ResolverOptions {
    /// Region property holding the code; also the output field name
    pub code_field: String,
    /// Point table field holding point geometries
    pub geometry_field: String,
    /// Drop points that fall in no region
    pub remove_empty: bool,
    /// Evaluate regions on the rayon thread pool
    pub parallel: bool,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            code_field: "code".to_string(),
            geometry_field: GEOMETRY_FIELD.to_string(),
            remove_empty: true,
            parallel: true,
        }
    }
}

/// Assigns a region code to each point of a table
#[derive(Debug, Clone, Default)]
pub struct RegionCodeResolver {
    options: ResolverOptions,
}

impl RegionCodeResolver {
    pub fn new(options: ResolverOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ResolverOptions {
        &self.options
    }

    /// Containment matrix of `points` against every region, in region order.
    pub fn evaluate(&self, points: &Table, regions: &RegionTable) -> Result<BooleanMatrix> {
        let field = self.options.geometry_field.as_str();
        let test = |region: &MultiPolygon<f64>| contains(region, points, field);

        // Indexed collect keeps region order regardless of completion order
        let columns = if self.options.parallel {
            regions
                .geometries()
                .par_iter()
                .map(test)
                .collect::<Result<Vec<_>>>()?
        } else {
            regions
                .geometries()
                .iter()
                .map(test)
                .collect::<Result<Vec<_>>>()?
        };

        BooleanMatrix::from_columns(points.len(), columns)
    }

    /// Return a copy of `points` with the resolved code column appended.
    pub fn assign(&self, points: &Table, regions: &RegionTable) -> Result<Table> {
        let code_field = self.options.code_field.as_str();
        let codes = regions.codes(code_field)?;
        let matrix = self.evaluate(points, regions)?;

        let (points, matrix) = if self.options.remove_empty {
            let matched = matrix.any_per_row();
            (points.select_rows(&matched)?, matrix.select_rows(&matched)?)
        } else {
            (points.clone(), matrix)
        };

        if matrix.rows() != points.len() {
            return Err(RegionError::ShapeMismatch {
                points: points.len(),
                matrix_rows: matrix.rows(),
            });
        }

        let resolved = codes
            .iter()
            .zip(matrix.columns())
            .map(|(code, column)| code_or_unset(code, column))
            .fold(vec![None; points.len()], first_wins);

        let matched = resolved.iter().filter(|c| c.is_some()).count();
        debug!(
            "Resolved {} points against {} regions: {} matched, {} unset",
            points.len(),
            codes.len(),
            matched,
            points.len() - matched
        );

        let values = resolved
            .into_iter()
            .map(|code| code.map(Value::from).unwrap_or(Value::Null))
            .collect();
        points.with_column(code_field, values)
    }
}

/// Map `true` to `code` and `false` to unset
pub fn code_or_unset(code: &RegionCode, column: &[bool]) -> Vec<Option<RegionCode>> {
    column
        .iter()
        .map(|&hit| hit.then(|| code.clone()))
        .collect()
}

/// Fill unset entries of `acc` from `next`; assigned entries never change.
fn first_wins(
    acc: Vec<Option<RegionCode>>,
    next: Vec<Option<RegionCode>>,
) -> Vec<Option<RegionCode>> {
    acc.into_iter()
        .zip(next)
        .map(|(current, candidate)| current.or(candidate))
        .collect()
}

/// Assign region codes with default geometry field and parallel evaluation.
pub fn assign_region_code(
    points: &Table,
    regions: &RegionTable,
    code_field: &str,
    remove_empty: bool,
) -> Result<Table> {
    RegionCodeResolver::new(ResolverOptions {
        code_field: code_field.to_string(),
        remove_empty,
        ..ResolverOptions::default()
    })
    .assign(points, regions)
}
