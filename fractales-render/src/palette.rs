use rayon::prelude::*;

use crate::buffer::RenderBuffer;
use crate::field::EscapeField;

const LUT_SIZE: usize = 256;

// ---------------------------------------------------------------------------
// Palette
// ---------------------------------------------------------------------------

/// A sequential colormap backed by a gradient lookup table.
///
/// Escape counts are normalized linearly over the field's own `min..max` and
/// looked up in a LUT of `LUT_SIZE` RGBA colors, interpolating between
/// adjacent entries.
#[derive(Clone)]
pub struct Palette {
    pub name: &'static str,
    colors: Vec<[u8; 4]>,
}

impl Palette {
    fn new(name: &'static str, colors: Vec<[u8; 4]>) -> Self {
        debug_assert_eq!(colors.len(), LUT_SIZE);
        Self { name, colors }
    }

    /// Look up a builtin palette by name (case-insensitive).
    pub fn by_name(name: &str) -> Option<Self> {
        builtin_palettes()
            .into_iter()
            .find(|p| p.name.eq_ignore_ascii_case(name.trim()))
    }

    /// Color at position `t ∈ [0, 1]`; values outside are clamped.
    pub fn color(&self, t: f64) -> [u8; 4] {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let idx = t * (self.colors.len() - 1) as f64;
        let lo = idx.floor() as usize;
        let hi = (lo + 1).min(self.colors.len() - 1);
        lerp_color(self.colors[lo], self.colors[hi], idx - lo as f64)
    }

    /// Colorize a field into an RGBA image.
    ///
    /// The image's top row is the field's last row (`y_max`), so the picture
    /// has the usual orientation of the complex plane. A constant field maps
    /// to the low end of the palette.
    pub fn colorize(&self, field: &EscapeField) -> RenderBuffer {
        let (lo, hi) = field.min_max();
        let span = hi.saturating_sub(lo);
        let mut buffer = RenderBuffer::filled(field.width(), field.height(), self.color(0.0));
        let source: Vec<&[u32]> = field.rows().rev().collect();

        buffer
            .par_rows_mut()
            .zip(source.into_par_iter())
            .for_each(|(dst, src)| {
                for (pixel, &n) in dst.chunks_exact_mut(4).zip(src) {
                    let t = if span == 0 {
                        0.0
                    } else {
                        (n - lo) as f64 / span as f64
                    };
                    pixel.copy_from_slice(&self.color(t));
                }
            });

        buffer
    }
}

impl Default for Palette {
    fn default() -> Self {
        hot()
    }
}

impl std::fmt::Debug for Palette {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Palette").field("name", &self.name).finish()
    }
}

fn lerp_color(a: [u8; 4], b: [u8; 4], t: f64) -> [u8; 4] {
    let inv = 1.0 - t;
    [
        (a[0] as f64 * inv + b[0] as f64 * t).round() as u8,
        (a[1] as f64 * inv + b[1] as f64 * t).round() as u8,
        (a[2] as f64 * inv + b[2] as f64 * t).round() as u8,
        255,
    ]
}

// ---------------------------------------------------------------------------
// Builtin palettes
// ---------------------------------------------------------------------------

pub fn builtin_palettes() -> Vec<Palette> {
    vec![
        hot(),
        cool(),
        spring(),
        summer(),
        autumn(),
        winter(),
        viridis(),
        plasma(),
        inferno(),
        magma(),
        rd_bu(),
        rd_gy(),
        rd_yl_bu(),
        rd_yl_gn(),
        spectral(),
        gray(),
    ]
}

/// Build a gradient LUT by interpolating between color stops. Both ends of
/// the LUT land exactly on the first and last stop.
fn gradient_lut(stops: &[(f64, [u8; 3])]) -> Vec<[u8; 4]> {
    (0..LUT_SIZE)
        .map(|i| {
            let t = i as f64 / (LUT_SIZE - 1) as f64;
            let mut lo = 0;
            for (j, &(pos, _)) in stops.iter().enumerate() {
                if pos <= t {
                    lo = j;
                }
            }
            let hi = (lo + 1).min(stops.len() - 1);
            let (lo_t, lo_c) = stops[lo];
            let (hi_t, hi_c) = stops[hi];
            let frac = if (hi_t - lo_t).abs() < 1e-10 {
                0.0
            } else {
                ((t - lo_t) / (hi_t - lo_t)).clamp(0.0, 1.0)
            };
            lerp_color(
                [lo_c[0], lo_c[1], lo_c[2], 255],
                [hi_c[0], hi_c[1], hi_c[2], 255],
                frac,
            )
        })
        .collect()
}

fn hot() -> Palette {
    let stops = &[
        (0.0, [10, 0, 0]),
        (0.365, [255, 0, 0]),
        (0.746, [255, 255, 0]),
        (1.0, [255, 255, 255]),
    ];
    Palette::new("hot", gradient_lut(stops))
}

fn cool() -> Palette {
    Palette::new("cool", gradient_lut(&[(0.0, [0, 255, 255]), (1.0, [255, 0, 255])]))
}

fn spring() -> Palette {
    Palette::new("spring", gradient_lut(&[(0.0, [255, 0, 255]), (1.0, [255, 255, 0])]))
}

fn summer() -> Palette {
    Palette::new("summer", gradient_lut(&[(0.0, [0, 128, 102]), (1.0, [255, 255, 102])]))
}

fn autumn() -> Palette {
    Palette::new("autumn", gradient_lut(&[(0.0, [255, 0, 0]), (1.0, [255, 255, 0])]))
}

fn winter() -> Palette {
    Palette::new("winter", gradient_lut(&[(0.0, [0, 0, 255]), (1.0, [0, 255, 128])]))
}

fn viridis() -> Palette {
    let stops = &[
        (0.0, [68, 1, 84]),
        (0.25, [59, 82, 139]),
        (0.5, [33, 145, 140]),
        (0.75, [94, 201, 98]),
        (1.0, [253, 231, 37]),
    ];
    Palette::new("viridis", gradient_lut(stops))
}

fn plasma() -> Palette {
    let stops = &[
        (0.0, [13, 8, 135]),
        (0.25, [126, 3, 168]),
        (0.5, [204, 71, 120]),
        (0.75, [248, 149, 64]),
        (1.0, [240, 249, 33]),
    ];
    Palette::new("plasma", gradient_lut(stops))
}

fn inferno() -> Palette {
    let stops = &[
        (0.0, [0, 0, 4]),
        (0.25, [87, 16, 110]),
        (0.5, [188, 55, 84]),
        (0.75, [249, 142, 9]),
        (1.0, [252, 255, 164]),
    ];
    Palette::new("inferno", gradient_lut(stops))
}

fn magma() -> Palette {
    let stops = &[
        (0.0, [0, 0, 4]),
        (0.25, [81, 18, 124]),
        (0.5, [183, 55, 121]),
        (0.75, [252, 137, 97]),
        (1.0, [252, 253, 191]),
    ];
    Palette::new("magma", gradient_lut(stops))
}

// Diverging ColorBrewer maps: dark red at the low end through a light
// midpoint to the opposite hue.

fn rd_bu() -> Palette {
    let stops = &[
        (0.0, [103, 0, 31]),
        (0.25, [214, 96, 77]),
        (0.5, [247, 247, 247]),
        (0.75, [67, 147, 195]),
        (1.0, [5, 48, 97]),
    ];
    Palette::new("RdBu", gradient_lut(stops))
}

fn rd_gy() -> Palette {
    let stops = &[
        (0.0, [103, 0, 31]),
        (0.25, [214, 96, 77]),
        (0.5, [255, 255, 255]),
        (0.75, [135, 135, 135]),
        (1.0, [26, 26, 26]),
    ];
    Palette::new("RdGy", gradient_lut(stops))
}

fn rd_yl_bu() -> Palette {
    let stops = &[
        (0.0, [165, 0, 38]),
        (0.25, [244, 109, 67]),
        (0.5, [255, 255, 191]),
        (0.75, [116, 173, 209]),
        (1.0, [49, 54, 149]),
    ];
    Palette::new("RdYlBu", gradient_lut(stops))
}

fn rd_yl_gn() -> Palette {
    let stops = &[
        (0.0, [165, 0, 38]),
        (0.25, [244, 109, 67]),
        (0.5, [255, 255, 191]),
        (0.75, [102, 189, 99]),
        (1.0, [0, 104, 55]),
    ];
    Palette::new("RdYlGn", gradient_lut(stops))
}

fn spectral() -> Palette {
    let stops = &[
        (0.0, [158, 1, 66]),
        (0.25, [244, 109, 67]),
        (0.5, [255, 255, 191]),
        (0.75, [102, 194, 165]),
        (1.0, [94, 79, 162]),
    ];
    Palette::new("Spectral", gradient_lut(stops))
}

fn gray() -> Palette {
    Palette::new("gray", gradient_lut(&[(0.0, [0, 0, 0]), (1.0, [255, 255, 255])]))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
