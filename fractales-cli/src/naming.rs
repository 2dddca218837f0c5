//! Output file names derived from the full render request.
//!
//! Two requests share a file name exactly when they would produce the same
//! image, which is what lets an existing file stand in for a recomputation.

use fractales_render::FieldRequest;

/// File name for `request` colored with `palette`.
///
/// `mandelbrot_{map}_m{m}_n{n}_k{k}_x{x_min}_{x_max}_y{y_min}_{y_max}_{palette}.png`,
/// with `_c{re}_{im}` before the palette for Julia renders.
pub fn image_file_name(request: &FieldRequest, palette: &str) -> String {
    let r = request.region();
    let mut name = format!(
        "{}_{}_m{}_n{}_k{}_x{}_{}_y{}_{}",
        request.mode(),
        request.map_slug(),
        request.exponent(),
        request.resolution(),
        request.iterations(),
        r.x_min,
        r.x_max,
        r.y_min,
        r.y_max,
    );
    if let Some(c) = request.julia_c() {
        name.push_str(&format!("_c{}_{}", c.re, c.im));
    }
    name.push('_');
    name.push_str(&sanitize(palette));
    name.push_str(".png");
    name
}

fn sanitize(s: &str) -> String {
    s.chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || ch == '-' {
                ch.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect()
}
