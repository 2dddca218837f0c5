use std::time::{Duration, Instant};

use tracing::{debug, info};

use fractales_core::{
    Complex, Fractal, Grid, IterationMap, Julia, JuliaMap, Mandelbrot, MandelbrotMap, Region,
};

use crate::field::EscapeField;
use crate::scheduler::{schedule, ScheduleOptions};

/// A finished computation.
#[derive(Debug, Clone)]
pub struct EngineOutput {
    pub field: EscapeField,
    /// Wall-clock time spent building and filling the field. Diagnostic only.
    pub elapsed: Duration,
}

/// Compute a Mandelbrot-mode field on an `n × n` grid.
///
/// Every argument is validated before any work is dispatched.
pub fn compute_mandelbrot(
    region: Region,
    resolution: u32,
    iterations: u32,
    map_id: u32,
    exponent: u32,
) -> crate::Result<EngineOutput> {
    compute_mandelbrot_with(
        region,
        resolution,
        iterations,
        map_id,
        exponent,
        &ScheduleOptions::default(),
    )
}

/// [`compute_mandelbrot`] with explicit scheduling options.
pub fn compute_mandelbrot_with(
    region: Region,
    resolution: u32,
    iterations: u32,
    map_id: u32,
    exponent: u32,
    options: &ScheduleOptions,
) -> crate::Result<EngineOutput> {
    let map = MandelbrotMap::from_id(map_id)?;
    let grid = Grid::square(region, resolution)?;
    let fractal = Mandelbrot::new(map, iterations, exponent)?;
    run(&fractal, &grid, options, map.formula())
}

/// Compute a Julia-mode field for parameter `c`.
///
/// The grid has `resolution` columns and an aspect-preserving row count.
pub fn compute_julia(
    region: Region,
    resolution: u32,
    iterations: u32,
    map_id: u32,
    exponent: u32,
    c: Complex,
) -> crate::Result<EngineOutput> {
    compute_julia_with(
        region,
        resolution,
        iterations,
        map_id,
        exponent,
        c,
        &ScheduleOptions::default(),
    )
}

/// [`compute_julia`] with explicit scheduling options.
pub fn compute_julia_with(
    region: Region,
    resolution: u32,
    iterations: u32,
    map_id: u32,
    exponent: u32,
    c: Complex,
    options: &ScheduleOptions,
) -> crate::Result<EngineOutput> {
    let map = JuliaMap::from_id(map_id)?;
    let grid = Grid::aspect_preserving(region, resolution)?;
    let fractal = Julia::new(map, c, iterations, exponent)?;
    run(&fractal, &grid, options, map.formula())
}

fn run<F: Fractal + Sync>(
    fractal: &F,
    grid: &Grid,
    options: &ScheduleOptions,
    formula: &str,
) -> crate::Result<EngineOutput> {
    let params = fractal.params();
    debug!(
        formula,
        region = %grid.region(),
        width = grid.width(),
        height = grid.height(),
        max_iterations = params.max_iterations,
        exponent = params.exponent,
        escape_radius = params.escape_radius,
        "Starting escape-field computation"
    );

    let start = Instant::now();
    let field = schedule(fractal, grid, options)?;
    let elapsed = start.elapsed();

    info!(
        formula,
        elapsed_ms = elapsed.as_millis() as u64,
        interior = field.interior_count(),
        "Escape field complete"
    );
    Ok(EngineOutput { field, elapsed })
}

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

/// A full description of one field, usable as a cache key.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldRequest {
    Mandelbrot {
        region: Region,
        resolution: u32,
        iterations: u32,
        map: MandelbrotMap,
        exponent: u32,
    },
    Julia {
        region: Region,
        resolution: u32,
        iterations: u32,
        map: JuliaMap,
        exponent: u32,
        c: Complex,
    },
}

impl FieldRequest {
    pub fn compute(&self, options: &ScheduleOptions) -> crate::Result<EngineOutput> {
        match *self {
            Self::Mandelbrot {
                region,
                resolution,
                iterations,
                map,
                exponent,
            } => compute_mandelbrot_with(region, resolution, iterations, map.id(), exponent, options),
            Self::Julia {
                region,
                resolution,
                iterations,
                map,
                exponent,
                c,
            } => compute_julia_with(region, resolution, iterations, map.id(), exponent, c, options),
        }
    }

    /// `"mandelbrot"` or `"julia"`.
    pub fn mode(&self) -> &'static str {
        match self {
            Self::Mandelbrot { .. } => "mandelbrot",
            Self::Julia { .. } => "julia",
        }
    }

    pub fn region(&self) -> Region {
        match *self {
            Self::Mandelbrot { region, .. } | Self::Julia { region, .. } => region,
        }
    }

    pub fn resolution(&self) -> u32 {
        match *self {
            Self::Mandelbrot { resolution, .. } | Self::Julia { resolution, .. } => resolution,
        }
    }

    pub fn iterations(&self) -> u32 {
        match *self {
            Self::Mandelbrot { iterations, .. } | Self::Julia { iterations, .. } => iterations,
        }
    }

    pub fn exponent(&self) -> u32 {
        match *self {
            Self::Mandelbrot { exponent, .. } | Self::Julia { exponent, .. } => exponent,
        }
    }

    pub fn map_id(&self) -> u32 {
        match *self {
            Self::Mandelbrot { map, .. } => map.id(),
            Self::Julia { map, .. } => map.id(),
        }
    }

    pub fn formula(&self) -> &'static str {
        match *self {
            Self::Mandelbrot { map, .. } => map.formula(),
            Self::Julia { map, .. } => map.formula(),
        }
    }

    pub fn map_slug(&self) -> &'static str {
        match *self {
            Self::Mandelbrot { map, .. } => map.slug(),
            Self::Julia { map, .. } => map.slug(),
        }
    }

    /// The Julia parameter, if any.
    pub fn julia_c(&self) -> Option<Complex> {
        match *self {
            Self::Mandelbrot { .. } => None,
            Self::Julia { c, .. } => Some(c),
        }
    }

    /// Plot title.
    pub fn title(&self) -> String {
        let (m, n, k) = (self.exponent(), self.resolution(), self.iterations());
        match *self {
            Self::Mandelbrot { map, .. } => {
                format!("{}, m={m}, n={n}, k={k}", map.formula())
            }
            Self::Julia { map, c, .. } => {
                format!("Julia set ({}, m={m}, c={c}, n={n}, k={k})", map.formula())
            }
        }
    }
}
