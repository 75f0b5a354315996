//! File loaders feeding the assignment engine.
//!
//! Points come from delimited text files, regions from GeoJSON.

pub mod csv;
pub mod geojson;

pub use self::csv::{load_points, read_points, write_table, CsvOptions};
pub use self::geojson::{load_regions, parse_regions};
