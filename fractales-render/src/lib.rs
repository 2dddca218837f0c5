pub mod buffer;
pub mod engine;
pub mod error;
pub mod export;
pub mod field;
pub mod palette;
pub mod scheduler;

pub use buffer::RenderBuffer;
pub use engine::{
    compute_julia, compute_julia_with, compute_mandelbrot, compute_mandelbrot_with, EngineOutput,
    FieldRequest,
};
pub use error::RenderError;
pub use export::{export_png, is_complete_png, ExportMetadata};
pub use field::EscapeField;
pub use palette::{builtin_palettes, Palette};
pub use scheduler::{schedule, Progress, ScheduleOptions, Workers};

/// Convenience result type for the render crate.
pub type Result<T> = std::result::Result<T, RenderError>;
