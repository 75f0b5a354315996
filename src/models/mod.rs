//! Core data models for region assignment.

pub mod region;
pub mod table;
pub mod value;

pub use region::{RegionCode, RegionTable};
pub use table::Table;
pub use value::Value;
