//! Region polygons and their codes.

use geo::{MultiPolygon, Polygon};
use hashbrown::HashSet;
use std::fmt;

use super::{Table, Value};
use crate::error::{RegionError, Result};

/// Identifier of a region. Codes are either text ("75", "2A") or integers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RegionCode {
    Text(String),
    Int(i64),
}

impl RegionCode {
    /// Read a code from a cell. Only text and integer cells qualify.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Text(s) => Some(RegionCode::Text(s.clone())),
            Value::Int(i) => Some(RegionCode::Int(*i)),
            _ => None,
        }
    }
}

impl fmt::Display for RegionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegionCode::Text(s) => write!(f, "{}", s),
            RegionCode::Int(i) => write!(f, "{}", i),
        }
    }
}

impl From<RegionCode> for Value {
    fn from(code: RegionCode) -> Self {
        match code {
            RegionCode::Text(s) => Value::Text(s),
            RegionCode::Int(i) => Value::Int(i),
        }
    }
}

impl From<&str> for RegionCode {
    fn from(s: &str) -> Self {
        RegionCode::Text(s.to_string())
    }
}

impl From<String> for RegionCode {
    fn from(s: String) -> Self {
        RegionCode::Text(s)
    }
}

impl From<i64> for RegionCode {
    fn from(i: i64) -> Self {
        RegionCode::Int(i)
    }
}

/// Ordered sequence of region polygons with their properties.
///
/// Row `i` of `properties` describes `geometries[i]`. The order of the
/// sequence is the precedence order used when regions overlap.
#[derive(Debug, Clone, Default)]
pub struct RegionTable {
    properties: Table,
    geometries: Vec<MultiPolygon<f64>>,
}

impl RegionTable {
    pub fn new(properties: Table, geometries: Vec<MultiPolygon<f64>>) -> Result<Self> {
        if properties.len() != geometries.len() {
            return Err(RegionError::ShapeMismatch {
                points: properties.len(),
                matrix_rows: geometries.len(),
            });
        }
        Ok(Self {
            properties,
            geometries,
        })
    }

    /// Build a table from `(code, polygon)` pairs, stored under `code_field`
    pub fn from_polygons<C, I>(code_field: &str, regions: I) -> Result<Self>
    where
        C: Into<RegionCode>,
        I: IntoIterator<Item = (C, Polygon<f64>)>,
    {
        let mut properties = Table::new([code_field])?;
        let mut geometries = Vec::new();
        for (code, polygon) in regions {
            let code: RegionCode = code.into();
            properties.push_row(vec![code.into()])?;
            geometries.push(MultiPolygon::new(vec![polygon]));
        }
        Self::new(properties, geometries)
    }

    pub fn properties(&self) -> &Table {
        &self.properties
    }

    pub fn geometries(&self) -> &[MultiPolygon<f64>] {
        &self.geometries
    }

    pub fn len(&self) -> usize {
        self.geometries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.geometries.is_empty()
    }

    /// Codes of all regions in sequence order.
    ///
    /// An empty sequence has no codes whatever its schema. Otherwise fails if
    /// the field is absent, a cell is not a usable code, or a code repeats.
    pub fn codes(&self, code_field: &str) -> Result<Vec<RegionCode>> {
        if self.is_empty() {
            return Ok(Vec::new());
        }
        if !self.properties.has_field(code_field) {
            return Err(RegionError::InvalidCodeColumn {
                field: code_field.to_string(),
            });
        }

        let mut seen = HashSet::with_capacity(self.len());
        let mut codes = Vec::with_capacity(self.len());
        for (row, value) in self.properties.column(code_field)?.enumerate() {
            let code = RegionCode::from_value(value).ok_or_else(|| {
                RegionError::InvalidCodeValue {
                    field: code_field.to_string(),
                    row,
                }
            })?;
            if !seen.insert(code.clone()) {
                return Err(RegionError::DuplicateRegionCode {
                    code: code.to_string(),
                });
            }
            codes.push(code);
        }
        Ok(codes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::polygon;

    fn square(x0: f64, y0: f64, size: f64) -> Polygon<f64> {
        polygon![
            (x: x0, y: y0),
            (x: x0 + size, y: y0),
            (x: x0 + size, y: y0 + size),
            (x: x0, y: y0 + size),
            (x: x0, y: y0),
        ]
    }

    #[test]
    fn test_codes_in_order() {
        let regions =
            RegionTable::from_polygons("code", [("B", square(0.0, 0.0, 1.0)), ("A", square(1.0, 0.0, 1.0))])
                .unwrap();
        assert_eq!(
            regions.codes("code").unwrap(),
            vec![RegionCode::from("B"), RegionCode::from("A")]
        );
    }

    #[test]
    fn test_missing_code_column() {
        let regions = RegionTable::from_polygons("code", [(1_i64, square(0.0, 0.0, 1.0))]).unwrap();
        assert_eq!(
            regions.codes("insee").unwrap_err(),
            RegionError::InvalidCodeColumn {
                field: "insee".to_string()
            }
        );
    }

    #[test]
    fn test_duplicate_codes_rejected() {
        let regions = RegionTable::from_polygons(
            "code",
            [(7_i64, square(0.0, 0.0, 1.0)), (7_i64, square(2.0, 0.0, 1.0))],
        )
        .unwrap();
        assert!(matches!(
            regions.codes("code"),
            Err(RegionError::DuplicateRegionCode { .. })
        ));
    }

    #[test]
    fn test_float_code_rejected() {
        let properties = Table::from_rows(["code"], vec![vec![Value::Float(1.5)]]).unwrap();
        let regions =
            RegionTable::new(properties, vec![MultiPolygon::new(vec![square(0.0, 0.0, 1.0)])])
                .unwrap();
        assert_eq!(
            regions.codes("code").unwrap_err(),
            RegionError::InvalidCodeValue {
                field: "code".to_string(),
                row: 0
            }
        );
    }

    #[test]
    fn test_misaligned_geometries() {
        let properties = Table::from_rows(["code"], vec![vec![Value::Int(1)]]).unwrap();
        assert!(RegionTable::new(properties, vec![]).is_err());
    }

    #[test]
    fn test_empty_sequence_has_no_codes() {
        assert_eq!(RegionTable::default().codes("code").unwrap(), vec![]);

        let schemaless = RegionTable::new(Table::new(Vec::<String>::new()).unwrap(), vec![]).unwrap();
        assert_eq!(schemaless.codes("insee").unwrap(), vec![]);
    }
}
