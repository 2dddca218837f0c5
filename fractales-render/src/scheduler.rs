use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use rayon::prelude::*;
use tracing::debug;

use fractales_core::{Fractal, Grid};

use crate::field::EscapeField;

// ---------------------------------------------------------------------------
// Progress
// ---------------------------------------------------------------------------

/// Row-completion counter shared between the scheduler and an observer.
///
/// The only mutable state the workers share. It never influences the
/// computed field.
#[derive(Debug, Default)]
pub struct Progress {
    done: AtomicUsize,
    total: AtomicUsize,
}

impl Progress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset progress for a new run with `total` work units.
    pub fn reset(&self, total: usize) {
        self.total.store(total, Ordering::Relaxed);
        self.done.store(0, Ordering::Relaxed);
    }

    /// Increment completed work units by one.
    pub fn inc(&self) {
        self.done.fetch_add(1, Ordering::Relaxed);
    }

    /// Read the current progress as `(done, total)`.
    pub fn get(&self) -> (usize, usize) {
        (
            self.done.load(Ordering::Relaxed),
            self.total.load(Ordering::Relaxed),
        )
    }

    /// Completed fraction in `[0, 1]`; `0` before a run starts.
    pub fn fraction(&self) -> f64 {
        let (done, total) = self.get();
        if total == 0 {
            0.0
        } else {
            (done as f64 / total as f64).min(1.0)
        }
    }
}

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// How many threads evaluate the grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Workers {
    /// Rayon's global pool, sized to the available hardware concurrency.
    #[default]
    Available,
    /// A dedicated pool of exactly this many threads (at least one).
    Fixed(usize),
}

impl Workers {
    /// `0` means "all available".
    pub fn from_count(n: usize) -> Self {
        if n == 0 {
            Self::Available
        } else {
            Self::Fixed(n)
        }
    }
}

/// Per-request scheduling knobs. None of them affect the field's contents.
#[derive(Debug, Clone, Default)]
pub struct ScheduleOptions {
    pub workers: Workers,
    pub progress: Option<Arc<Progress>>,
}

// ---------------------------------------------------------------------------
// Scheduling
// ---------------------------------------------------------------------------

/// Evaluate every sample of `grid` in parallel and assemble the field.
///
/// The output buffer is split into one disjoint slice per row; each row is a
/// task that owns its slice, so there is no lock and no cell is written
/// twice. Cell placement is purely positional, which makes the result
/// bit-identical for any worker count and any completion order.
pub fn schedule<F: Fractal + Sync>(
    fractal: &F,
    grid: &Grid,
    options: &ScheduleOptions,
) -> crate::Result<EscapeField> {
    let mut field = EscapeField::try_zeroed(
        grid.width(),
        grid.height(),
        fractal.params().max_iterations,
    )?;
    let progress = options.progress.as_deref();
    if let Some(p) = progress {
        p.reset(grid.height() as usize);
    }

    match options.workers {
        Workers::Available => {
            debug!(
                workers = rayon::current_num_threads(),
                width = grid.width(),
                height = grid.height(),
                "Scheduling rows on the global pool"
            );
            fill_rows(fractal, grid, field.data_mut(), progress);
        }
        Workers::Fixed(n) => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(n.max(1))
                .thread_name(|i| format!("escape-worker-{i}"))
                .build()?;
            debug!(
                workers = pool.current_num_threads(),
                width = grid.width(),
                height = grid.height(),
                "Scheduling rows on a dedicated pool"
            );
            pool.install(|| fill_rows(fractal, grid, field.data_mut(), progress));
        }
    }

    Ok(field)
}

fn fill_rows<F: Fractal + Sync>(
    fractal: &F,
    grid: &Grid,
    cells: &mut [u32],
    progress: Option<&Progress>,
) {
    cells
        .par_chunks_mut(grid.width() as usize)
        .enumerate()
        .for_each(|(row, row_cells)| {
            let row = row as u32;
            for (col, cell) in row_cells.iter_mut().enumerate() {
                *cell = fractal.escape_time(grid.point(row, col as u32));
            }
            if let Some(p) = progress {
                p.inc();
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use fractales_core::{Complex, Julia, JuliaMap, Mandelbrot, MandelbrotMap, Region};

    fn serial<F: Fractal>(fractal: &F, grid: &Grid) -> Vec<u32> {
        (0..grid.height())
            .flat_map(|row| (0..grid.width()).map(move |col| (row, col)))
            .map(|(row, col)| fractal.escape_time(grid.point(row, col)))
            .collect()
    }

    #[test]
    fn matches_serial_evaluation() {
        let mandelbrot = Mandelbrot::new(MandelbrotMap::Classic, 60, 2).unwrap();
        let grid = Grid::new(Region::default_mandelbrot(), 37, 23).unwrap();

        let field = schedule(&mandelbrot, &grid, &ScheduleOptions::default()).unwrap();

        assert_eq!(field.width(), 37);
        assert_eq!(field.height(), 23);
        assert_eq!(field.data(), serial(&mandelbrot, &grid).as_slice());
    }

    #[test]
    fn worker_count_does_not_change_result() {
        let julia = Julia::new(JuliaMap::Classic, Complex::new(-0.8, 0.156), 80, 2).unwrap();
        let grid = Grid::aspect_preserving(Region::default_julia(), 64).unwrap();

        let one = ScheduleOptions {
            workers: Workers::Fixed(1),
            progress: None,
        };
        let many = ScheduleOptions {
            workers: Workers::Fixed(7),
            progress: None,
        };
        let a = schedule(&julia, &grid, &one).unwrap();
        let b = schedule(&julia, &grid, &many).unwrap();
        let c = schedule(&julia, &grid, &ScheduleOptions::default()).unwrap();
        assert_eq!(a, b);
        assert_eq!(a, c);
    }

    #[test]
    fn progress_counts_rows() {
        let mandelbrot = Mandelbrot::default();
        let grid = Grid::new(Region::default_mandelbrot(), 10, 13).unwrap();
        let progress = Arc::new(Progress::new());
        let options = ScheduleOptions {
            workers: Workers::Fixed(3),
            progress: Some(Arc::clone(&progress)),
        };

        schedule(&mandelbrot, &grid, &options).unwrap();

        assert_eq!(progress.get(), (13, 13));
        assert_eq!(progress.fraction(), 1.0);
    }

    #[test]
    fn fresh_progress_is_zero() {
        let p = Progress::new();
        assert_eq!(p.get(), (0, 0));
        assert_eq!(p.fraction(), 0.0);
    }

    #[test]
    fn workers_from_count() {
        assert_eq!(Workers::from_count(0), Workers::Available);
        assert_eq!(Workers::from_count(4), Workers::Fixed(4));
    }
}
