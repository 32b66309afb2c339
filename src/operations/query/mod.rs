mod bounding_box;
mod watertight;

pub use bounding_box::{Aabb, BoundingBox};
pub use watertight::{IsWatertight, WatertightReport};
