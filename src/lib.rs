//! Ecowater - region code assignment for point observations
//!
//! This library turns latitude/longitude tables into point geometries and
//! tags each point with the code of the region polygon containing it.

pub mod error;
pub mod loaders;
pub mod models;
pub mod pip;

pub use error::{RegionError, Result};
pub use models::{RegionCode, RegionTable, Table, Value};
pub use pip::{assign_region_code, build_points, RegionCodeResolver, ResolverOptions};
