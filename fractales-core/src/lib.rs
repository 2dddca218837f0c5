//! Escape-time evaluation for Mandelbrot- and Julia-type sets under a closed
//! catalog of complex iteration maps.
//!
//! This crate is single-threaded and allocation-free on the evaluation path;
//! parallel scheduling over a whole [`Grid`] lives in `fractales-render`.

pub mod complex;
pub mod error;
pub mod evaluator;
pub mod fractal;
pub mod julia;
pub mod mandelbrot;
pub mod maps;
pub mod region;

// Re-export primary types for convenience.
pub use complex::Complex;
pub use error::CoreError;
pub use evaluator::escape_time;
pub use fractal::{EscapeParams, Fractal};
pub use julia::Julia;
pub use mandelbrot::Mandelbrot;
pub use maps::{IterationMap, JuliaMap, MandelbrotMap};
pub use region::{Grid, Region};

/// Convenience result type for the core crate.
pub type Result<T> = std::result::Result<T, CoreError>;
