use crate::error::RenderError;

/// The per-sample escape times of a full grid.
///
/// `height × width` counts in row-major order, every value in
/// `[0, max_iterations]`. Row 0 corresponds to the grid's `y_min`.
/// Immutable once produced: the scheduler is the only writer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EscapeField {
    width: u32,
    height: u32,
    max_iterations: u32,
    data: Vec<u32>,
}

impl EscapeField {
    /// Allocate a zeroed field, reporting allocation failure instead of aborting.
    pub(crate) fn try_zeroed(width: u32, height: u32, max_iterations: u32) -> crate::Result<Self> {
        let size = (width as usize)
            .checked_mul(height as usize)
            .ok_or(RenderError::Allocation { width, height })?;
        let mut data = Vec::new();
        data.try_reserve_exact(size)
            .map_err(|_| RenderError::Allocation { width, height })?;
        data.resize(size, 0);
        Ok(Self {
            width,
            height,
            max_iterations,
            data,
        })
    }

    /// Build a field from existing counts.
    ///
    /// Returns `None` for an empty shape, if `data` does not hold exactly
    /// `width × height` values, or if a value exceeds `max_iterations`.
    pub fn from_vec(width: u32, height: u32, max_iterations: u32, data: Vec<u32>) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }
        let size = (width as usize).checked_mul(height as usize)?;
        if data.len() != size || data.iter().any(|&n| n > max_iterations) {
            return None;
        }
        Some(Self {
            width,
            height,
            max_iterations,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// The iteration budget `k`; cells equal to it are presumed inside the set.
    pub fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    /// All counts, row-major.
    pub fn data(&self) -> &[u32] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<u32> {
        self.data
    }

    /// Count at `(row, col)`, or `None` when out of bounds.
    pub fn get(&self, row: u32, col: u32) -> Option<u32> {
        if row >= self.height || col >= self.width {
            return None;
        }
        self.data
            .get(row as usize * self.width as usize + col as usize)
            .copied()
    }

    /// One row of counts.
    pub fn row(&self, row: u32) -> Option<&[u32]> {
        if row >= self.height {
            return None;
        }
        let w = self.width as usize;
        let start = row as usize * w;
        self.data.get(start..start + w)
    }

    /// Rows in order, starting at row 0.
    pub fn rows(&self) -> impl DoubleEndedIterator<Item = &[u32]> + '_ {
        self.data.chunks_exact(self.width as usize)
    }

    /// Smallest and largest count.
    pub fn min_max(&self) -> (u32, u32) {
        self.data
            .iter()
            .fold((u32::MAX, 0), |(lo, hi), &n| (lo.min(n), hi.max(n)))
    }

    /// Number of cells that exhausted the budget.
    pub fn interior_count(&self) -> usize {
        self.data
            .iter()
            .filter(|&&n| n == self.max_iterations)
            .count()
    }

    pub(crate) fn data_mut(&mut self) -> &mut [u32] {
        &mut self.data
    }
}
