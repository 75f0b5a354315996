//! Point-in-Polygon (PIP) region code assignment.
//!
//! Turns coordinate columns into point geometries, tests them against an
//! ordered sequence of region polygons, and resolves each point to the code
//! of the first region containing it.

mod contains;
mod geometry;
mod matrix;
mod resolver;

pub use contains::contains;
pub use geometry::{build_points, build_points_into, GEOMETRY_FIELD};
pub use matrix::BooleanMatrix;
pub use resolver::{assign_region_code, code_or_unset, RegionCodeResolver, ResolverOptions};
