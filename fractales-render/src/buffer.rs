use rayon::prelude::*;
use rayon::slice::ChunksExactMut;

/// An RGBA image, 4 bytes per pixel, row-major with the top row first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl RenderBuffer {
    /// A `width × height` image of a single color.
    pub fn filled(width: u32, height: u32, color: [u8; 4]) -> Self {
        Self {
            width,
            height,
            pixels: color.repeat(width as usize * height as usize),
        }
    }

    /// Bytes per image row.
    pub fn stride(&self) -> usize {
        self.width as usize * 4
    }

    /// RGBA value at `(x, y)`, `y = 0` being the top row.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = y as usize * self.stride() + x as usize * 4;
        let px = self.pixels.get(idx..idx + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Image rows, top first, for parallel filling.
    pub(crate) fn par_rows_mut(&mut self) -> ChunksExactMut<'_, u8> {
        let stride = self.stride().max(1);
        self.pixels.par_chunks_exact_mut(stride)
    }
}
