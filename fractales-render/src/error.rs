use thiserror::Error;

/// Errors originating from the scheduling and export pipeline.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("cannot allocate an escape field of {width}×{height} cells")]
    Allocation { width: u32, height: u32 },

    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("image size mismatch: {width}×{height} needs {expected} bytes, got {actual}")]
    ImageSize {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("PNG encoding failed: {0}")]
    Encoding(#[from] png::EncodingError),

    #[error(transparent)]
    Core(#[from] fractales_core::CoreError),
}
