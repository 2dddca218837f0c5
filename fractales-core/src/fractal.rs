use crate::complex::Complex;
use crate::error::CoreError;

/// Parameters controlling escape-time iteration.
///
/// The cached `escape_radius_sq` field is automatically recomputed on
/// deserialization so stored configurations always stay consistent.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct EscapeParams {
    /// Iteration budget `k`; a point that survives it counts as inside.
    pub max_iterations: u32,

    /// Exponent `m` handed to the iteration map.
    pub exponent: u32,

    /// Bailout radius `R`. The loop compares `|z|²` against `R²`.
    pub escape_radius: f64,

    #[serde(skip)]
    escape_radius_sq: f64,
}

/// Deserialization helper; recomputes the cached square on load.
impl<'de> serde::Deserialize<'de> for EscapeParams {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(serde::Deserialize)]
        struct Raw {
            max_iterations: u32,
            exponent: u32,
            escape_radius: f64,
        }
        let raw = Raw::deserialize(deserializer)?;
        Self::new(raw.max_iterations, raw.exponent, raw.escape_radius)
            .map_err(serde::de::Error::custom)
    }
}

impl EscapeParams {
    pub const DEFAULT_MAX_ITERATIONS: u32 = 100;
    pub const DEFAULT_EXPONENT: u32 = 2;
    pub const DEFAULT_ESCAPE_RADIUS: f64 = 2.0;

    pub fn new(max_iterations: u32, exponent: u32, escape_radius: f64) -> crate::Result<Self> {
        if max_iterations < 1 {
            return Err(CoreError::InvalidMaxIterations(max_iterations));
        }
        if exponent < 1 {
            return Err(CoreError::InvalidExponent(exponent));
        }
        if escape_radius <= 0.0 || !escape_radius.is_finite() {
            return Err(CoreError::InvalidEscapeRadius(escape_radius));
        }
        Ok(Self {
            max_iterations,
            exponent,
            escape_radius,
            escape_radius_sq: escape_radius * escape_radius,
        })
    }

    /// Pre-computed squared escape radius for the inner loop.
    #[inline]
    pub fn escape_radius_sq(&self) -> f64 {
        self.escape_radius_sq
    }
}

impl Default for EscapeParams {
    fn default() -> Self {
        Self {
            max_iterations: Self::DEFAULT_MAX_ITERATIONS,
            exponent: Self::DEFAULT_EXPONENT,
            escape_radius: Self::DEFAULT_ESCAPE_RADIUS,
            escape_radius_sq: Self::DEFAULT_ESCAPE_RADIUS * Self::DEFAULT_ESCAPE_RADIUS,
        }
    }
}

/// A per-point escape-time rule: one of the two modes bound to a map and
/// its parameters.
///
/// Used through **static dispatch**: schedulers are generic over
/// `F: Fractal` rather than using `dyn Fractal`, so the compiler can
/// inline the evaluator into the parallel loop.
pub trait Fractal {
    /// Escape time of the grid sample `point`, in `[0, max_iterations]`.
    fn escape_time(&self, point: Complex) -> u32;

    /// Access the iteration parameters.
    fn params(&self) -> &EscapeParams;
}
