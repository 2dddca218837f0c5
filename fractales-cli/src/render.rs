use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use fractales_render::{
    builtin_palettes, export_png, is_complete_png, ExportMetadata, FieldRequest, Palette, Workers,
};

use crate::config::Config;
use crate::error::CliError;
use crate::naming::image_file_name;
use crate::progress::compute_with_progress;

/// Where an image came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Rendered(PathBuf),
    /// A file for the same request already existed and was kept.
    Cached(PathBuf),
}

impl Outcome {
    pub fn path(&self) -> &Path {
        match self {
            Self::Rendered(p) | Self::Cached(p) => p,
        }
    }
}

/// Resolve a palette by name, listing the builtin ones on failure.
pub fn resolve_palette(name: &str) -> crate::Result<Palette> {
    Palette::by_name(name).ok_or_else(|| CliError::UnknownPalette {
        name: name.to_string(),
        available: builtin_palettes()
            .iter()
            .map(|p| p.name)
            .collect::<Vec<_>>()
            .join(", "),
    })
}

/// Render `request` to a PNG in the configured output directory.
///
/// The file name encodes every input of the image, so an existing file is
/// reused unless `force` is set.
pub fn render_to_file(request: &FieldRequest, config: &Config, force: bool) -> crate::Result<Outcome> {
    let palette = resolve_palette(&config.palette)?;
    let dir = config.output_dir();
    fs::create_dir_all(&dir)?;
    let path = dir.join(image_file_name(request, palette.name));

    if path.exists() && !force {
        if is_complete_png(&path) {
            info!(path = %path.display(), "Reusing cached image");
            return Ok(Outcome::Cached(path));
        }
        warn!(path = %path.display(), "Cached image is damaged; rendering again");
    }

    info!(title = %request.title(), "Rendering");
    let output = compute_with_progress(request, Workers::from_count(config.threads))?;
    let buffer = palette.colorize(&output.field);
    let metadata = ExportMetadata::from_request(request, palette.name, output.elapsed);
    export_png(&buffer, &path, &metadata)?;

    info!(
        path = %path.display(),
        elapsed_ms = output.elapsed.as_millis() as u64,
        "Saved image"
    );
    Ok(Outcome::Rendered(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use fractales_core::{Complex, JuliaMap, MandelbrotMap, Region};

    fn config_in(name: &str) -> Config {
        let dir = std::env::temp_dir().join(name);
        let _ = fs::remove_dir_all(&dir);
        Config {
            output_dir: Some(dir),
            threads: 2,
            ..Config::default()
        }
    }

    fn small_mandelbrot() -> FieldRequest {
        FieldRequest::Mandelbrot {
            region: Region::default_mandelbrot(),
            resolution: 24,
            iterations: 20,
            map: MandelbrotMap::Classic,
            exponent: 2,
        }
    }

    #[test]
    fn second_render_is_served_from_cache() {
        let config = config_in("fractales_test_cache");
        let request = small_mandelbrot();

        let first = render_to_file(&request, &config, false).unwrap();
        assert!(matches!(first, Outcome::Rendered(_)));
        assert!(first.path().exists());

        let second = render_to_file(&request, &config, false).unwrap();
        assert_eq!(second, Outcome::Cached(first.path().to_path_buf()));

        let forced = render_to_file(&request, &config, true).unwrap();
        assert_eq!(forced, Outcome::Rendered(first.path().to_path_buf()));

        let _ = fs::remove_dir_all(config.output_dir());
    }

    #[test]
    fn damaged_cached_file_is_rendered_again() {
        let config = config_in("fractales_test_damaged_cache");
        let request = small_mandelbrot();
        let dir = config.output_dir();
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(image_file_name(&request, "hot"));
        fs::write(&path, b"\x89PNG\r\n").unwrap();

        let outcome = render_to_file(&request, &config, false).unwrap();
        assert_eq!(outcome, Outcome::Rendered(path.clone()));
        assert!(is_complete_png(&path));

        let again = render_to_file(&request, &config, false).unwrap();
        assert_eq!(again, Outcome::Cached(path));

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn julia_render_writes_png() {
        let config = config_in("fractales_test_julia_render");
        let request = FieldRequest::Julia {
            region: Region::default_julia(),
            resolution: 16,
            iterations: 20,
            map: JuliaMap::Classic,
            exponent: 2,
            c: Complex::new(-0.4, 0.6),
        };
        let outcome = render_to_file(&request, &config, false).unwrap();
        let decoder = png::Decoder::new(fs::File::open(outcome.path()).unwrap());
        let reader = decoder.read_info().unwrap();
        assert_eq!(reader.info().width, 16);
        assert_eq!(reader.info().height, 16);

        let _ = fs::remove_dir_all(config.output_dir());
    }

    #[test]
    fn unknown_palette_fails_before_computing() {
        let config = Config {
            palette: "rainbow".into(),
            ..config_in("fractales_test_bad_palette")
        };
        let err = render_to_file(&small_mandelbrot(), &config, false).unwrap_err();
        match err {
            CliError::UnknownPalette { name, available } => {
                assert_eq!(name, "rainbow");
                assert!(available.contains("viridis"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
