use thiserror::Error;

/// Top-level error type for shelf generation.
#[derive(Debug, Error)]
pub enum ShelfError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Stl(#[from] StlError),
}

/// Errors raised while validating a shelf configuration or builder inputs.
///
/// Validation always runs before any triangle is emitted.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{parameter} must be at least 1 unit")]
    ZeroUnits { parameter: &'static str },

    #[error("{parameter} = {value} must be finite and greater than zero")]
    NonPositive { parameter: &'static str, value: f64 },

    #[error("material thickness {thickness} must be less than half the {dimension} ({limit})")]
    ThicknessTooLarge {
        dimension: &'static str,
        thickness: f64,
        limit: f64,
    },

    #[error("top tooth count must be at least 1")]
    NoTeeth,

    #[error("two feet of depth {foot_depth} do not fit in unit depth {unit_depth}")]
    FeetTooLong { foot_depth: f64, unit_depth: f64 },
}

/// Errors related to STL serialization.
#[derive(Debug, Error)]
pub enum StlError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("{0} triangles exceed the binary STL limit")]
    TooManyTriangles(usize),

    #[error("scale {0} must be finite and greater than zero")]
    InvalidScale(f64),
}

/// Convenience type alias for results using [`ShelfError`].
pub type Result<T> = std::result::Result<T, ShelfError>;

/// Result type for STL reading and writing.
pub type StlResult<T> = std::result::Result<T, StlError>;
