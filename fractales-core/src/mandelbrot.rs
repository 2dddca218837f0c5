use crate::complex::Complex;
use crate::evaluator::escape_time;
use crate::fractal::{EscapeParams, Fractal};
use crate::maps::{IterationMap, MandelbrotMap};

/// Mandelbrot mode: `z₀ = 0`, `c` is the grid point, escape radius `2`.
#[derive(Debug, Clone)]
pub struct Mandelbrot {
    map: MandelbrotMap,
    params: EscapeParams,
}

impl Mandelbrot {
    pub const ESCAPE_RADIUS: f64 = 2.0;

    pub fn new(map: MandelbrotMap, max_iterations: u32, exponent: u32) -> crate::Result<Self> {
        let params = EscapeParams::new(max_iterations, exponent, Self::ESCAPE_RADIUS)?;
        Ok(Self { map, params })
    }

    pub fn map(&self) -> MandelbrotMap {
        self.map
    }

    /// The closed-form interior tests only hold for `z² + c`.
    #[inline]
    fn is_classic_quadratic(&self) -> bool {
        self.map == MandelbrotMap::Classic && self.params.exponent == 2
    }
}

impl Default for Mandelbrot {
    fn default() -> Self {
        Self {
            map: MandelbrotMap::Classic,
            params: EscapeParams::default(),
        }
    }
}

/// Returns `true` if `c` lies inside the main cardioid.
#[inline]
fn in_cardioid(re: f64, im: f64) -> bool {
    let im2 = im * im;
    let q = (re - 0.25) * (re - 0.25) + im2;
    q * (q + (re - 0.25)) <= 0.25 * im2
}

/// Returns `true` if `c` lies inside the period-2 bulb.
#[inline]
fn in_period2_bulb(re: f64, im: f64) -> bool {
    (re + 1.0) * (re + 1.0) + im * im <= 0.0625
}

impl Fractal for Mandelbrot {
    #[inline]
    fn escape_time(&self, c: Complex) -> u32 {
        // Points in the cardioid or the period-2 bulb never escape.
        if self.is_classic_quadratic() && (in_cardioid(c.re, c.im) || in_period2_bulb(c.re, c.im))
        {
            return self.params.max_iterations;
        }
        escape_time(self.map, Complex::ZERO, c, &self.params)
    }

    fn params(&self) -> &EscapeParams {
        &self.params
    }
}

impl std::fmt::Display for Mandelbrot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Mandelbrot [{}] ({})", self.map.id(), self.map.formula())
    }
}
