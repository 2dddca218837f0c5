use thiserror::Error;

/// Errors originating from the core fractal engine.
///
/// Every variant is a configuration error, detected before any point is
/// evaluated.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid max iterations: {0} (must be >= 1)")]
    InvalidMaxIterations(u32),

    #[error("invalid exponent: {0} (must be >= 1)")]
    InvalidExponent(u32),

    #[error("invalid resolution: {0} (must be >= 1)")]
    InvalidResolution(u32),

    #[error("invalid escape radius: {0} (must be > 0.0)")]
    InvalidEscapeRadius(f64),

    #[error("invalid region: {reason}")]
    InvalidRegion { reason: String },

    #[error("unknown {catalog} map id: {id}")]
    UnknownMap { catalog: &'static str, id: u32 },

    #[error("unknown {catalog} map name: {name:?}")]
    UnknownMapName { catalog: &'static str, name: String },
}
