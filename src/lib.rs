pub mod config;
pub mod error;
pub mod geometry;
pub mod io;
pub mod math;
pub mod mesh;
pub mod operations;

pub use config::ShelfConfig;
pub use error::{ConfigError, Result, ShelfError, StlError};
pub use mesh::{Mesh, Triangle};
