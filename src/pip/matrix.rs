//! Points × regions containment matrix.

use crate::error::{RegionError, Result};

/// Containment results, one column per region in region order.
#[derive(Debug, Clone, PartialEq)]
pub struct BooleanMatrix {
    rows: usize,
    columns: Vec<Vec<bool>>,
}

impl BooleanMatrix {
    /// Build from region columns; every column must have `rows` entries
    pub fn from_columns(rows: usize, columns: Vec<Vec<bool>>) -> Result<Self> {
        if let Some(bad) = columns.iter().find(|c| c.len() != rows) {
            return Err(RegionError::ShapeMismatch {
                points: rows,
                matrix_rows: bad.len(),
            });
        }
        Ok(Self { rows, columns })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> &[Vec<bool>] {
        &self.columns
    }

    pub fn into_columns(self) -> Vec<Vec<bool>> {
        self.columns
    }

    pub fn get(&self, row: usize, column: usize) -> Option<bool> {
        self.columns.get(column)?.get(row).copied()
    }

    /// Per row: does any region contain the point?
    pub fn any_per_row(&self) -> Vec<bool> {
        let mut any = vec![false; self.rows];
        for column in &self.columns {
            for (acc, &hit) in any.iter_mut().zip(column) {
                *acc |= hit;
            }
        }
        any
    }

    /// Keep only the rows where `mask` is true
    pub fn select_rows(&self, mask: &[bool]) -> Result<Self> {
        if mask.len() != self.rows {
            return Err(RegionError::ShapeMismatch {
                points: mask.len(),
                matrix_rows: self.rows,
            });
        }
        let columns: Vec<Vec<bool>> = self
            .columns
            .iter()
            .map(|column| {
                column
                    .iter()
                    .zip(mask)
                    .filter(|(_, keep)| **keep)
                    .map(|(hit, _)| *hit)
                    .collect()
            })
            .collect();
        let rows = mask.iter().filter(|keep| **keep).count();
        Ok(Self { rows, columns })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_any_per_row() {
        let m = BooleanMatrix::from_columns(3, vec![vec![true, false, false], vec![true, false, true]])
            .unwrap();
        assert_eq!(m.any_per_row(), vec![true, false, true]);
    }

    #[test]
    fn test_no_regions() {
        let m = BooleanMatrix::from_columns(2, vec![]).unwrap();
        assert_eq!(m.any_per_row(), vec![false, false]);
        assert_eq!(m.select_rows(&[false, false]).unwrap().rows(), 0);
    }

    #[test]
    fn test_select_rows_in_lockstep() {
        let m = BooleanMatrix::from_columns(3, vec![vec![true, false, false], vec![false, false, true]])
            .unwrap();
        let kept = m.select_rows(&m.any_per_row()).unwrap();
        assert_eq!(kept.rows(), 2);
        assert_eq!(kept.columns(), &[vec![true, false], vec![false, true]]);
        assert_eq!(kept.get(1, 1), Some(true));
    }

    #[test]
    fn test_ragged_columns_rejected() {
        let err = BooleanMatrix::from_columns(2, vec![vec![true]]).unwrap_err();
        assert_eq!(
            err,
            RegionError::ShapeMismatch {
                points: 2,
                matrix_rows: 1
            }
        );
    }
}
