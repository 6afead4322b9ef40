use thiserror::Error;

/// Top-level error type for tree generation.
#[derive(Debug, Error)]
pub enum ArborError {
    #[error(transparent)]
    Grammar(#[from] GrammarError),

    #[error(transparent)]
    Turtle(#[from] TurtleError),

    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Tessellation(#[from] TessellationError),

    #[error(transparent)]
    Scene(#[from] SceneError),
}

/// Errors raised while building rewriting rules.
#[derive(Debug, Error)]
pub enum GrammarError {
    #[error("rule for symbol '{symbol}' has no alternatives")]
    EmptyRule { symbol: char },
}

/// Errors raised while interpreting a derived sentence.
#[derive(Debug, Error)]
pub enum TurtleError {
    #[error("unknown symbol '{symbol}' at position {position}")]
    UnknownSymbol { symbol: char, position: usize },
}

/// Errors related to geometric computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("parameter {parameter} = {value} is out of range [{min}, {max}]")]
    ParameterOutOfRange {
        parameter: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("zero-length vector")]
    ZeroVector,
}

/// Errors related to tessellation.
#[derive(Debug, Error)]
pub enum TessellationError {
    #[error("invalid tessellation parameters: {0}")]
    InvalidParameters(String),
}

/// Errors related to scene composition.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("mesh not found in store")]
    MeshNotFound,

    #[error("invalid generator configuration: {0}")]
    InvalidConfig(String),
}

/// Convenience type alias for results using [`ArborError`].
pub type Result<T> = std::result::Result<T, ArborError>;
