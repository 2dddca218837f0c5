use crate::complex::Complex;
use crate::evaluator::escape_time;
use crate::fractal::{EscapeParams, Fractal};
use crate::maps::{IterationMap, JuliaMap};

/// Julia mode: `z₀` is the grid point, `c` is fixed for the whole field.
///
/// The escape radius grows with the parameter, `R = max(|c|, 2)`.
#[derive(Debug, Clone)]
pub struct Julia {
    map: JuliaMap,
    params: EscapeParams,

    /// The fixed constant `c` that defines this Julia set.
    c: Complex,
}

impl Julia {
    pub const MIN_ESCAPE_RADIUS: f64 = 2.0;

    pub fn new(map: JuliaMap, c: Complex, max_iterations: u32, exponent: u32) -> crate::Result<Self> {
        let params = EscapeParams::new(max_iterations, exponent, Self::escape_radius_for(c))?;
        Ok(Self { map, params, c })
    }

    /// `max(|c|, 2)`. A non-finite `c` is rejected later as an invalid radius.
    pub fn escape_radius_for(c: Complex) -> f64 {
        c.norm().max(Self::MIN_ESCAPE_RADIUS)
    }

    /// The default parameter, `c = 0 − 1i`.
    pub fn default_c() -> Complex {
        Complex::new(0.0, -1.0)
    }

    /// The constant `c` defining this Julia set.
    pub fn c(&self) -> Complex {
        self.c
    }

    pub fn map(&self) -> JuliaMap {
        self.map
    }
}

impl Default for Julia {
    fn default() -> Self {
        let c = Self::default_c();
        Self {
            map: JuliaMap::Classic,
            params: EscapeParams::default(),
            c,
        }
    }
}

impl Fractal for Julia {
    #[inline]
    fn escape_time(&self, point: Complex) -> u32 {
        escape_time(self.map, point, self.c, &self.params)
    }

    fn params(&self) -> &EscapeParams {
        &self.params
    }
}

impl std::fmt::Display for Julia {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Julia [{}] ({}), c = {}",
            self.map.id(),
            self.map.formula(),
            self.c
        )
    }
}
