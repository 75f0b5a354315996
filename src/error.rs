//! Error types for the region assignment engine.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum RegionError {
    // Schema errors
    #[error("Field not found: {field}")]
    MissingField { field: String },

    #[error("Field already exists: {field}")]
    DuplicateField { field: String },

    #[error("Row {row} has {found} values, schema has {expected} fields")]
    RowArity {
        row: usize,
        expected: usize,
        found: usize,
    },

    // Geometry errors
    #[error("Non-numeric coordinate in field '{field}' at row {row}")]
    InvalidCoordinate { field: String, row: usize },

    #[error("Field '{field}' does not hold a point at row {row}")]
    InvalidGeometry { field: String, row: usize },

    // Region errors
    #[error("Code field '{field}' not found in region table")]
    InvalidCodeColumn { field: String },

    #[error("Region {row} has no usable code in field '{field}'")]
    InvalidCodeValue { field: String, row: usize },

    #[error("Region code '{code}' appears more than once")]
    DuplicateRegionCode { code: String },

    /// Point table and containment matrix fell out of alignment.
    #[error("Shape mismatch: {points} points but {matrix_rows} matrix rows")]
    ShapeMismatch { points: usize, matrix_rows: usize },
}

pub type Result<T> = std::result::Result<T, RegionError>;
