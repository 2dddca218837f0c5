use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Defaults for every render, persisted as JSON. Command-line flags win.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_resolution")]
    pub default_resolution: u32,
    #[serde(default = "default_iterations")]
    pub default_iterations: u32,
    #[serde(default = "default_exponent")]
    pub default_exponent: u32,
    #[serde(default = "default_palette")]
    pub palette: String,
    /// Where images are written. When unset, an `images/` folder next to the executable.
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
    /// Worker threads; 0 uses every available core.
    #[serde(default)]
    pub threads: usize,
}

fn default_resolution() -> u32 {
    600
}
fn default_iterations() -> u32 {
    100
}
fn default_exponent() -> u32 {
    2
}
fn default_palette() -> String {
    "hot".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_resolution: default_resolution(),
            default_iterations: default_iterations(),
            default_exponent: default_exponent(),
            palette: default_palette(),
            output_dir: None,
            threads: 0,
        }
    }
}

impl Config {
    /// Load the configuration at `path`, falling back to defaults.
    ///
    /// A missing file is normal; an unreadable or malformed one is reported
    /// and ignored.
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            debug!("No configuration file at {}", path.display());
            return Self::default();
        }
        match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str::<Config>(&json) {
                Ok(config) => {
                    info!("Loaded configuration from {}", path.display());
                    config
                }
                Err(e) => {
                    warn!("Ignoring malformed configuration {}: {e}", path.display());
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read configuration {}: {e}", path.display());
                Self::default()
            }
        }
    }

    /// Persist the configuration as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> crate::Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        info!("Saved configuration to {}", path.display());
        Ok(())
    }

    /// Resolved output directory.
    pub fn output_dir(&self) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(crate::app_dir::images_directory)
    }
}
