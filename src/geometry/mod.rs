pub mod cuboid;
pub mod face;

pub use cuboid::{split_quad, Cuboid};
pub use face::{series_caps, FaceDirection, FaceSet};
