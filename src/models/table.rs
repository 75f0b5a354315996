//! Row-oriented table with an explicit schema.
//!
//! Tables are immutable once built: every transformation returns a new
//! table and leaves its input untouched. Row position is the identity of
//! a record and is preserved by all operations except [`Table::select_rows`].

use hashbrown::HashMap;

use super::Value;
use crate::error::{RegionError, Result};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    fields: Vec<String>,
    index: HashMap<String, usize>,
    rows: Vec<Vec<Value>>,
}

impl Table {
    /// Create an empty table with the given field names
    pub fn new<I, S>(fields: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let fields: Vec<String> = fields.into_iter().map(Into::into).collect();
        let mut index = HashMap::with_capacity(fields.len());
        for (i, name) in fields.iter().enumerate() {
            if index.insert(name.clone(), i).is_some() {
                return Err(RegionError::DuplicateField {
                    field: name.clone(),
                });
            }
        }
        Ok(Self {
            fields,
            index,
            rows: Vec::new(),
        })
    }

    /// Create a table and fill it with rows
    pub fn from_rows<I, S>(fields: I, rows: Vec<Vec<Value>>) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut table = Self::new(fields)?;
        table.rows.reserve(rows.len());
        for row in rows {
            table.push_row(row)?;
        }
        Ok(table)
    }

    /// Append a row; its length must match the schema
    pub fn push_row(&mut self, row: Vec<Value>) -> Result<()> {
        if row.len() != self.fields.len() {
            return Err(RegionError::RowArity {
                row: self.rows.len(),
                expected: self.fields.len(),
                found: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn row(&self, i: usize) -> Option<&[Value]> {
        self.rows.get(i).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Position of a field, or `MissingField`
    pub fn require_field(&self, name: &str) -> Result<usize> {
        self.field_index(name)
            .ok_or_else(|| RegionError::MissingField {
                field: name.to_string(),
            })
    }

    /// Iterate over one column
    pub fn column(&self, name: &str) -> Result<impl Iterator<Item = &Value> + '_> {
        let idx = self.require_field(name)?;
        Ok(self.rows.iter().map(move |row| &row[idx]))
    }

    /// Look up a single cell
    pub fn get(&self, row: usize, name: &str) -> Option<&Value> {
        let idx = self.field_index(name)?;
        self.rows.get(row).map(|r| &r[idx])
    }

    /// New table without the named fields. All names must exist.
    pub fn without_fields(&self, names: &[&str]) -> Result<Table> {
        let mut drop = Vec::with_capacity(names.len());
        for name in names {
            drop.push(self.require_field(name)?);
        }

        let keep: Vec<usize> = (0..self.fields.len())
            .filter(|i| !drop.contains(i))
            .collect();
        let fields: Vec<String> = keep.iter().map(|&i| self.fields[i].clone()).collect();
        let rows = self
            .rows
            .iter()
            .map(|row| keep.iter().map(|&i| row[i].clone()).collect())
            .collect();

        Table::from_rows(fields, rows)
    }

    /// New table holding only the rows where `mask` is true, in order
    pub fn select_rows(&self, mask: &[bool]) -> Result<Table> {
        if mask.len() != self.rows.len() {
            return Err(RegionError::ShapeMismatch {
                points: self.rows.len(),
                matrix_rows: mask.len(),
            });
        }
        let rows = self
            .rows
            .iter()
            .zip(mask)
            .filter(|(_, keep)| **keep)
            .map(|(row, _)| row.clone())
            .collect();

        Ok(Table {
            fields: self.fields.clone(),
            index: self.index.clone(),
            rows,
        })
    }

    /// New table with `values` as the column `name`.
    ///
    /// An existing field of that name is replaced in place; otherwise the
    /// column is appended as the last field.
    pub fn with_column(&self, name: &str, values: Vec<Value>) -> Result<Table> {
        if values.len() != self.rows.len() {
            return Err(RegionError::ShapeMismatch {
                points: self.rows.len(),
                matrix_rows: values.len(),
            });
        }

        let mut table = self.clone();
        match table.field_index(name) {
            Some(idx) => {
                for (row, value) in table.rows.iter_mut().zip(values) {
                    row[idx] = value;
                }
            }
            None => {
                table.index.insert(name.to_string(), table.fields.len());
                table.fields.push(name.to_string());
                for (row, value) in table.rows.iter_mut().zip(values) {
                    row.push(value);
                }
            }
        }
        Ok(table)
    }
}
