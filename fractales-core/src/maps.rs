//! The closed catalogs of iteration maps `f(z, c, m) -> z'`.
//!
//! Mandelbrot and Julia maps live in separate enums with separate id spaces
//! because they are offered as separate choices. Both share the formula
//! helpers at the bottom of this module.
//!
//! Every formula that divides checks its divisor first: when the divisor's
//! magnitude is exactly zero the step is a no-op and `z` is returned
//! unchanged, so no `NaN`/`Inf` is introduced by a division.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::complex::Complex;
use crate::error::CoreError;

/// One step of a complex iteration.
///
/// Implemented by the closed catalog enums. The evaluator is generic over this
/// trait so the selected variant is resolved once per request and the step is
/// a plain `match` inside the hot loop.
pub trait IterationMap: Copy + Send + Sync {
    /// Apply one step of the map.
    fn apply(self, z: Complex, c: Complex, m: u32) -> Complex;

    /// Stable numeric identifier inside this map's catalog.
    fn id(self) -> u32;

    /// Human-readable formula, used for titles.
    fn formula(self) -> &'static str;

    /// Short ASCII name, used in file names and on the command line.
    fn slug(self) -> &'static str;
}

// ---------------------------------------------------------------------------
// Mandelbrot catalog
// ---------------------------------------------------------------------------

/// Iteration maps offered in Mandelbrot mode (`z₀ = 0`, `c` = grid point).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum MandelbrotMap {
    /// `z^m + c`
    Classic,
    /// `z^m + 1/c`
    InverseC,
    /// `cos(z^m) + 1/c`
    CosInverseC,
    /// `sin(z^m) + 1/c`
    SinInverseC,
    /// `exp((z^m − 1.00001·z) / sqrt(c³))`
    ExpSqrtCubeC,
    /// `exp((z^m − 1.00001·z) / c³)`
    ExpCubeC,
    /// `cos(z^m / c^m)`
    CosRatio,
    /// `exp(z^m / c^m)`
    ExpRatio,
    /// `exp(c^m / z^m)`
    ExpInverseRatio,
    /// `exp(z / c^m) + 1/c`
    ExpLinearInverseC,
    /// `cosh(z^m / c^m)`
    CoshRatio,
}

impl MandelbrotMap {
    pub const ALL: [Self; 11] = [
        Self::Classic,
        Self::InverseC,
        Self::CosInverseC,
        Self::SinInverseC,
        Self::ExpSqrtCubeC,
        Self::ExpCubeC,
        Self::CosRatio,
        Self::ExpRatio,
        Self::ExpInverseRatio,
        Self::ExpLinearInverseC,
        Self::CoshRatio,
    ];

    const CATALOG: &'static str = "mandelbrot";

    /// Look up a map by its stable id.
    pub fn from_id(id: u32) -> crate::Result<Self> {
        Self::ALL
            .get(id as usize)
            .copied()
            .ok_or(CoreError::UnknownMap {
                catalog: Self::CATALOG,
                id,
            })
    }
}

impl IterationMap for MandelbrotMap {
    #[inline]
    fn apply(self, z: Complex, c: Complex, m: u32) -> Complex {
        match self {
            Self::Classic => power_plus(z, c, m),
            Self::InverseC => power_plus_inverse(z, c, m),
            Self::CosInverseC => plus_inverse(z, z.powi(m).cos(), c),
            Self::SinInverseC => plus_inverse(z, z.powi(m).sin(), c),
            Self::ExpSqrtCubeC => {
                let d = c.powi(3).sqrt();
                if d.is_zero() {
                    return z;
                }
                ((z.powi(m) - z * DAMPING) / d).exp()
            }
            Self::ExpCubeC => {
                let d = c.powi(3);
                if d.is_zero() {
                    return z;
                }
                ((z.powi(m) - z * DAMPING) / d).exp()
            }
            Self::CosRatio => ratio(z.powi(m), c.powi(m)).map_or(z, Complex::cos),
            Self::ExpRatio => exp_ratio(z, c, m),
            Self::ExpInverseRatio => ratio(c.powi(m), z.powi(m)).map_or(z, Complex::exp),
            Self::ExpLinearInverseC => match ratio(z, c.powi(m)) {
                Some(q) => plus_inverse(z, q.exp(), c),
                None => z,
            },
            Self::CoshRatio => ratio(z.powi(m), c.powi(m)).map_or(z, Complex::cosh),
        }
    }

    fn id(self) -> u32 {
        self as u32
    }

    fn formula(self) -> &'static str {
        match self {
            Self::Classic => "z = z^m + c",
            Self::InverseC => "z = z^m + 1/c",
            Self::CosInverseC => "z = cos(z^m) + 1/c",
            Self::SinInverseC => "z = sin(z^m) + 1/c",
            Self::ExpSqrtCubeC => "z = exp[(z^m - 1.00001 * z) / sqrt(c^3)]",
            Self::ExpCubeC => "z = exp[(z^m - 1.00001 * z) / c^3]",
            Self::CosRatio => "z = cos(z^m/c^m)",
            Self::ExpRatio => "z = exp(z^m/c^m)",
            Self::ExpInverseRatio => "z = exp(c^m/z^m)",
            Self::ExpLinearInverseC => "z = exp(z/c^m) + 1/c",
            Self::CoshRatio => "z = cosh(z^m/c^m)",
        }
    }

    fn slug(self) -> &'static str {
        match self {
            Self::Classic => "power",
            Self::InverseC => "power-inv",
            Self::CosInverseC => "cos-inv",
            Self::SinInverseC => "sin-inv",
            Self::ExpSqrtCubeC => "exp-sqrt-cube",
            Self::ExpCubeC => "exp-cube",
            Self::CosRatio => "cos-ratio",
            Self::ExpRatio => "exp-ratio",
            Self::ExpInverseRatio => "exp-inv-ratio",
            Self::ExpLinearInverseC => "exp-linear-inv",
            Self::CoshRatio => "cosh-ratio",
        }
    }
}

// ---------------------------------------------------------------------------
// Julia catalog
// ---------------------------------------------------------------------------

/// Iteration maps offered in Julia mode (`z₀` = grid point, `c` fixed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum JuliaMap {
    /// `z^m + c`
    Classic,
    /// `z^m + 1/c`
    InverseC,
    /// `exp(z^m / c^m)`
    ExpRatio,
}

impl JuliaMap {
    pub const ALL: [Self; 3] = [Self::Classic, Self::InverseC, Self::ExpRatio];

    const CATALOG: &'static str = "julia";

    /// Look up a map by its stable id.
    pub fn from_id(id: u32) -> crate::Result<Self> {
        Self::ALL
            .get(id as usize)
            .copied()
            .ok_or(CoreError::UnknownMap {
                catalog: Self::CATALOG,
                id,
            })
    }
}

impl IterationMap for JuliaMap {
    #[inline]
    fn apply(self, z: Complex, c: Complex, m: u32) -> Complex {
        match self {
            Self::Classic => power_plus(z, c, m),
            Self::InverseC => power_plus_inverse(z, c, m),
            Self::ExpRatio => exp_ratio(z, c, m),
        }
    }

    fn id(self) -> u32 {
        self as u32
    }

    fn formula(self) -> &'static str {
        match self {
            Self::Classic => "z = z^m + c",
            Self::InverseC => "z = z^m + 1/c",
            Self::ExpRatio => "z = exp(z^m/c^m)",
        }
    }

    fn slug(self) -> &'static str {
        match self {
            Self::Classic => "power",
            Self::InverseC => "power-inv",
            Self::ExpRatio => "exp-ratio",
        }
    }
}

// ---------------------------------------------------------------------------
// Conversions shared by both catalogs
// ---------------------------------------------------------------------------

macro_rules! catalog_conversions {
    ($ty:ty) => {
        impl TryFrom<u32> for $ty {
            type Error = CoreError;

            fn try_from(id: u32) -> crate::Result<Self> {
                Self::from_id(id)
            }
        }

        impl From<$ty> for u32 {
            fn from(map: $ty) -> u32 {
                map.id()
            }
        }

        /// Accepts either the numeric id or the slug.
        impl FromStr for $ty {
            type Err = CoreError;

            fn from_str(s: &str) -> crate::Result<Self> {
                let s = s.trim();
                if let Ok(id) = s.parse::<u32>() {
                    return Self::from_id(id);
                }
                Self::ALL
                    .iter()
                    .copied()
                    .find(|m| m.slug().eq_ignore_ascii_case(s))
                    .ok_or_else(|| CoreError::UnknownMapName {
                        catalog: Self::CATALOG,
                        name: s.to_string(),
                    })
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.formula())
            }
        }
    };
}

catalog_conversions!(MandelbrotMap);
catalog_conversions!(JuliaMap);

// ---------------------------------------------------------------------------
// Formula helpers
// ---------------------------------------------------------------------------

/// Coefficient on the linear term of the `exp((z^m − 1.00001·z) / …)` maps.
const DAMPING: f64 = 1.00001;

/// `z^m + c`
#[inline]
fn power_plus(z: Complex, c: Complex, m: u32) -> Complex {
    z.powi(m) + c
}

/// `z^m + 1/c`, no-op when `c = 0`.
#[inline]
fn power_plus_inverse(z: Complex, c: Complex, m: u32) -> Complex {
    plus_inverse(z, z.powi(m), c)
}

/// `exp(z^m / c^m)`, no-op when `c^m = 0`.
#[inline]
fn exp_ratio(z: Complex, c: Complex, m: u32) -> Complex {
    ratio(z.powi(m), c.powi(m)).map_or(z, Complex::exp)
}

/// `term + 1/c`, or the unchanged `z` when `c = 0`.
#[inline]
fn plus_inverse(z: Complex, term: Complex, c: Complex) -> Complex {
    if c.is_zero() {
        return z;
    }
    term + c.recip()
}

/// `num / den`, or `None` when `den = 0`.
#[inline]
fn ratio(num: Complex, den: Complex) -> Option<Complex> {
    if den.is_zero() {
        None
    } else {
        Some(num / den)
    }
}
