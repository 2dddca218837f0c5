use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::complex::Complex;
use crate::error::CoreError;

/// A closed rectangle `[x_min, x_max] × [y_min, y_max]` of the complex plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Region {
    /// Create a region, rejecting empty, inverted, or non-finite bounds.
    pub fn new(x: (f64, f64), y: (f64, f64)) -> crate::Result<Self> {
        let region = Self {
            x_min: x.0,
            x_max: x.1,
            y_min: y.0,
            y_max: y.1,
        };
        region.validate()?;
        Ok(region)
    }

    /// The usual Mandelbrot window, `[-2, 1] × [-1, 1]`.
    pub fn default_mandelbrot() -> Self {
        Self {
            x_min: -2.0,
            x_max: 1.0,
            y_min: -1.0,
            y_max: 1.0,
        }
    }

    /// The usual Julia window, `[-2, 2] × [-2, 2]`.
    pub fn default_julia() -> Self {
        Self {
            x_min: -2.0,
            x_max: 2.0,
            y_min: -2.0,
            y_max: 2.0,
        }
    }

    /// Check the `x_max > x_min`, `y_max > y_min` invariant.
    ///
    /// Regions built through [`Region::new`] are already valid; deserialized or
    /// hand-built regions are checked again at the engine boundary.
    pub fn validate(&self) -> crate::Result<()> {
        let all_finite = [self.x_min, self.x_max, self.y_min, self.y_max]
            .iter()
            .all(|v| v.is_finite());
        if !all_finite {
            return Err(CoreError::InvalidRegion {
                reason: format!("bounds must be finite, got {self}"),
            });
        }
        if self.x_max <= self.x_min {
            return Err(CoreError::InvalidRegion {
                reason: format!("x_max ({}) must exceed x_min ({})", self.x_max, self.x_min),
            });
        }
        if self.y_max <= self.y_min {
            return Err(CoreError::InvalidRegion {
                reason: format!("y_max ({}) must exceed y_min ({})", self.y_max, self.y_min),
            });
        }
        Ok(())
    }

    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    /// Height over width.
    pub fn aspect_ratio(&self) -> f64 {
        self.height() / self.width()
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}, {}] × [{}, {}]",
            self.x_min, self.x_max, self.y_min, self.y_max
        )
    }
}

/// A `height × width` lattice of sample points covering a [`Region`].
///
/// Coordinates are linearly interpolated, endpoints included:
///
/// ```text
/// x(col) = x_min + col · (x_max − x_min) / (width − 1)
/// y(row) = y_min + row · (y_max − y_min) / (height − 1)
/// ```
///
/// Row 0 is `y_min`: rows run bottom-to-top in the mathematical sense.
/// Whoever turns the field into an image flips it so `y_max` is on top.
/// A single-sample axis collapses onto its minimum bound.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grid {
    region: Region,
    width: u32,
    height: u32,
    dx: f64,
    dy: f64,
}

impl Grid {
    /// Create a grid with explicit dimensions.
    pub fn new(region: Region, width: u32, height: u32) -> crate::Result<Self> {
        region.validate()?;
        if width == 0 {
            return Err(CoreError::InvalidResolution(width));
        }
        if height == 0 {
            return Err(CoreError::InvalidResolution(height));
        }
        Ok(Self {
            region,
            width,
            height,
            dx: step(region.width(), width),
            dy: step(region.height(), height),
        })
    }

    pub fn region(&self) -> Region {
        self.region
    }

    /// Number of columns.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Square `n × n` grid used in Mandelbrot mode.
    pub fn square(region: Region, n: u32) -> crate::Result<Self> {
        Self::new(region, n, n)
    }

    /// Grid with `n` columns and as many rows as keep the pixels square:
    /// `round(n · (y_max − y_min) / (x_max − x_min))`, at least one.
    pub fn aspect_preserving(region: Region, n: u32) -> crate::Result<Self> {
        region.validate()?;
        let rows = (n as f64 * region.aspect_ratio()).round();
        let height = if rows < 1.0 {
            warn!(width = n, region = %region, "Region too flat for its width; using a single row");
            1
        } else if rows >= u32::MAX as f64 {
            u32::MAX
        } else {
            rows as u32
        };
        Self::new(region, n, height)
    }

    /// Real coordinate of column `col`.
    #[inline]
    pub fn x(&self, col: u32) -> f64 {
        self.region.x_min + col as f64 * self.dx
    }

    /// Imaginary coordinate of row `row`.
    #[inline]
    pub fn y(&self, row: u32) -> f64 {
        self.region.y_min + row as f64 * self.dy
    }

    /// The sample point at `(row, col)`.
    #[inline]
    pub fn point(&self, row: u32, col: u32) -> Complex {
        Complex::new(self.x(col), self.y(row))
    }

    /// Total number of samples.
    pub fn len(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Index pair `(row, col)` of the sample closest to `p`, clamped to the grid.
    pub fn nearest(&self, p: Complex) -> (u32, u32) {
        (
            nearest_index(p.im - self.region.y_min, self.dy, self.height),
            nearest_index(p.re - self.region.x_min, self.dx, self.width),
        )
    }
}

fn step(span: f64, samples: u32) -> f64 {
    if samples > 1 {
        span / (samples - 1) as f64
    } else {
        0.0
    }
}

fn nearest_index(offset: f64, step: f64, samples: u32) -> u32 {
    if step <= 0.0 {
        return 0;
    }
    let i = (offset / step).round();
    if i <= 0.0 {
        0
    } else {
        (i as u32).min(samples - 1)
    }
}
