//! Directory where the executable lives. Used for the configuration file and
//! the default image output folder, so a standalone binary keeps its data
//! next to itself.

use std::path::PathBuf;

/// Directory containing the running executable. Falls back to current directory if unavailable.
pub fn exe_directory() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(PathBuf::from))
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

/// Default directory for rendered images.
pub fn images_directory() -> PathBuf {
    exe_directory().join("images")
}

/// Default location of the JSON configuration file.
pub fn config_path() -> PathBuf {
    exe_directory().join("fractales.json")
}
