use thiserror::Error;

use fractales_core::CoreError;
use fractales_render::RenderError;

/// Everything that can stop a command.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("unknown palette '{name}' (available: {available})")]
    UnknownPalette { name: String, available: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}
