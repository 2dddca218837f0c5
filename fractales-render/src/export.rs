//! PNG export with embedded metadata (tEXt chunks).

use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::debug;

use fractales_core::{Complex, Region};

use crate::buffer::RenderBuffer;
use crate::engine::FieldRequest;
use crate::error::RenderError;

/// Metadata to embed in an exported PNG as tEXt chunks.
#[derive(Debug, Clone)]
pub struct ExportMetadata {
    pub title: String,
    pub mode: &'static str,
    pub formula: &'static str,
    pub map_id: u32,
    pub exponent: u32,
    pub resolution: u32,
    pub max_iterations: u32,
    pub region: Region,
    pub julia_c: Option<Complex>,
    pub palette_name: String,
    pub elapsed: Duration,
}

impl ExportMetadata {
    pub fn from_request(request: &FieldRequest, palette_name: &str, elapsed: Duration) -> Self {
        Self {
            title: request.title(),
            mode: request.mode(),
            formula: request.formula(),
            map_id: request.map_id(),
            exponent: request.exponent(),
            resolution: request.resolution(),
            max_iterations: request.iterations(),
            region: request.region(),
            julia_c: request.julia_c(),
            palette_name: palette_name.to_string(),
            elapsed,
        }
    }
}

/// Write an RGBA pixel buffer as a PNG file with embedded fractal metadata.
///
/// Uses the `png` crate directly to inject custom tEXt chunks readable by
/// exiftool, IrfanView, XnView, etc. The image is written to a sibling
/// `.part` file and renamed into place once complete, so `path` either
/// holds a whole PNG or is left untouched.
pub fn export_png(buffer: &RenderBuffer, path: &Path, metadata: &ExportMetadata) -> crate::Result<()> {
    let expected = buffer.width as usize * buffer.height as usize * 4;
    if buffer.pixels.len() != expected {
        return Err(RenderError::ImageSize {
            width: buffer.width,
            height: buffer.height,
            expected,
            actual: buffer.pixels.len(),
        });
    }

    let partial = partial_path(path);
    if let Err(e) = write_png(buffer, &partial, metadata) {
        let _ = fs::remove_file(&partial);
        return Err(e);
    }
    fs::rename(&partial, path)?;

    debug!(
        "Exported PNG {}x{} to {}",
        buffer.width,
        buffer.height,
        path.display()
    );
    Ok(())
}

/// Whether `path` holds a PNG that decodes all the way through.
pub fn is_complete_png(path: &Path) -> bool {
    let Ok(file) = File::open(path) else {
        return false;
    };
    let Ok(mut reader) = png::Decoder::new(BufReader::new(file)).read_info() else {
        return false;
    };
    let mut data = vec![0; reader.output_buffer_size()];
    reader.next_frame(&mut data).is_ok()
}

fn partial_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".part");
    path.with_file_name(name)
}

fn write_png(buffer: &RenderBuffer, path: &Path, metadata: &ExportMetadata) -> crate::Result<()> {
    let writer = BufWriter::new(File::create(path)?);

    let mut encoder = png::Encoder::new(writer, buffer.width, buffer.height);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_compression(png::Compression::Default);

    encoder.add_text_chunk("Software".to_string(), "Fractales".to_string())?;
    encoder.add_text_chunk("Title".to_string(), metadata.title.clone())?;
    for (key, value) in build_metadata_pairs(metadata) {
        encoder.add_text_chunk(key, value)?;
    }

    let mut png_writer = encoder.write_header()?;
    png_writer.write_image_data(&buffer.pixels)?;
    png_writer.finish()?;
    Ok(())
}

fn build_metadata_pairs(meta: &ExportMetadata) -> Vec<(String, String)> {
    let r = &meta.region;
    let mut pairs = vec![
        ("Fractales.Mode".into(), meta.mode.to_string()),
        ("Fractales.Formula".into(), meta.formula.to_string()),
        ("Fractales.MapId".into(), meta.map_id.to_string()),
        ("Fractales.Exponent".into(), meta.exponent.to_string()),
        ("Fractales.Resolution".into(), meta.resolution.to_string()),
        ("Fractales.MaxIterations".into(), meta.max_iterations.to_string()),
        (
            "Fractales.Region".into(),
            format!("{},{},{},{}", r.x_min, r.x_max, r.y_min, r.y_max),
        ),
        ("Fractales.Palette".into(), meta.palette_name.clone()),
        (
            "Fractales.ElapsedMs".into(),
            meta.elapsed.as_millis().to_string(),
        ),
    ];
    if let Some(c) = meta.julia_c {
        pairs.push(("Fractales.JuliaC_Re".into(), c.re.to_string()));
        pairs.push(("Fractales.JuliaC_Im".into(), c.im.to_string()));
    }
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;
    use fractales_core::{JuliaMap, MandelbrotMap};
    use std::io::Read;

    fn mandelbrot_meta() -> ExportMetadata {
        let request = FieldRequest::Mandelbrot {
            region: Region::default_mandelbrot(),
            resolution: 4,
            iterations: 256,
            map: MandelbrotMap::Classic,
            exponent: 2,
        };
        ExportMetadata::from_request(&request, "hot", Duration::from_millis(12))
    }

    #[test]
    fn export_creates_valid_png() {
        let buffer = RenderBuffer::filled(4, 4, [0, 0, 0, 255]);
        let dir = std::env::temp_dir().join("fractales_test_export");
        let _ = std::fs::create_dir_all(&dir);
        let path = dir.join("test_export.png");
        export_png(&buffer, &path, &mandelbrot_meta()).expect("export should succeed");

        let mut file = std::fs::File::open(&path).expect("file should exist");
        let mut header = [0u8; 8];
        file.read_exact(&mut header).expect("should read header");
        assert_eq!(&header, b"\x89PNG\r\n\x1a\n", "valid PNG signature");

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn export_embeds_text_chunks() {
        let request = FieldRequest::Julia {
            region: Region::default_julia(),
            resolution: 2,
            iterations: 100,
            map: JuliaMap::ExpRatio,
            exponent: 3,
            c: Complex::new(-0.7, 0.27015),
        };
        let meta = ExportMetadata::from_request(&request, "viridis", Duration::ZERO);
        let buffer = RenderBuffer::filled(2, 2, [0, 0, 0, 255]);
        let dir = std::env::temp_dir().join("fractales_test_export_meta");
        let _ = std::fs::create_dir_all(&dir);
        let path = dir.join("test_meta.png");
        export_png(&buffer, &path, &meta).expect("export should succeed");

        let decoder = png::Decoder::new(std::fs::File::open(&path).expect("file should exist"));
        let reader = decoder.read_info().expect("should read info");
        let info = reader.info();
        let texts: Vec<_> = info.uncompressed_latin1_text.iter().collect();
        assert!(
            texts.iter().any(|t| t.keyword == "Software" && t.text == "Fractales"),
            "Should contain Software text chunk"
        );
        assert!(
            texts.iter().any(|t| t.keyword == "Fractales.Mode" && t.text == "julia"),
            "Should contain mode chunk"
        );
        assert!(
            texts.iter().any(|t| t.keyword == "Fractales.MapId" && t.text == "2"),
            "Should contain map id chunk"
        );
        assert!(
            texts.iter().any(|t| t.keyword == "Fractales.JuliaC_Re" && t.text == "-0.7"),
            "Should contain Julia C Re chunk"
        );

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn export_leaves_no_partial_file() {
        let dir = std::env::temp_dir().join("fractales_test_export_partial");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("whole.png");
        export_png(&RenderBuffer::filled(5, 3, [9, 9, 9, 255]), &path, &mandelbrot_meta()).unwrap();

        let names: Vec<_> = std::fs::read_dir(&dir)
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("whole.png")]);
        assert!(is_complete_png(&path));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn truncated_png_is_incomplete() {
        let dir = std::env::temp_dir().join("fractales_test_export_truncated");
        let _ = std::fs::create_dir_all(&dir);
        let path = dir.join("cut.png");
        export_png(&RenderBuffer::filled(16, 16, [1, 2, 3, 255]), &path, &mandelbrot_meta()).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        std::fs::write(&path, &bytes[..40]).unwrap();
        assert!(!is_complete_png(&path));

        std::fs::write(&path, b"\x89PNG\r\n").unwrap();
        assert!(!is_complete_png(&path));
        assert!(!is_complete_png(&dir.join("missing.png")));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn mismatched_buffer_rejected() {
        let mut buffer = RenderBuffer::filled(3, 3, [0, 0, 0, 255]);
        buffer.pixels.pop();
        let path = std::env::temp_dir().join("fractales_never_written.png");
        let _ = std::fs::remove_file(&path);
        let err = export_png(&buffer, &path, &mandelbrot_meta()).unwrap_err();
        assert!(matches!(err, RenderError::ImageSize { .. }));
        assert!(!path.exists());
    }
}
