use crate::complex::Complex;
use crate::fractal::EscapeParams;
use crate::maps::IterationMap;

/// Escape time of a single orbit.
///
/// Starting from `z = seed`, up to `max_iterations` times: stop if
/// `|z|² > R²`, otherwise step `z = map(z, param, m)`. Returns the number of
/// completed steps at the moment of escape, or `max_iterations` when the
/// budget runs out.
///
/// A non-finite orbit value counts as escaped. `Inf` already compares greater
/// than `R²`; `NaN` compares false against everything and is tested for
/// explicitly, so a `NaN` orbit never masquerades as an interior point.
#[inline]
pub fn escape_time<M: IterationMap>(
    map: M,
    seed: Complex,
    param: Complex,
    params: &EscapeParams,
) -> u32 {
    let radius_sq = params.escape_radius_sq();
    let m = params.exponent;
    let mut z = seed;

    for n in 0..params.max_iterations {
        let norm_sq = z.norm_sq();
        if norm_sq > radius_sq || norm_sq.is_nan() {
            return n;
        }
        z = map.apply(z, param, m);
    }

    params.max_iterations
}
