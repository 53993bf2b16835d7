//! Per-column painter's occlusion for near-to-far terrain marching.

use std::ops::Range;

/// Tracks, for each screen column, the topmost row already claimed by a
/// nearer depth slice.
///
/// Every column starts at the surface height (nothing claimed). A claim can
/// only move a column's boundary up, so values are non-increasing over a
/// frame and a farther slice can never paint below a nearer one.
#[derive(Clone, Debug, Default)]
pub struct ColumnOcclusion {
    y_buffer: Vec<u32>,
    height: u32,
}

impl ColumnOcclusion {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            y_buffer: vec![height; width as usize],
            height,
        }
    }

    /// Reset every column to unclaimed, reallocating if the size changed.
    pub fn reset(&mut self, width: u32, height: u32) {
        self.height = height;
        self.y_buffer.clear();
        self.y_buffer.resize(width as usize, height);
    }

    /// Try to claim column `x` from `screen_y` down to its current boundary.
    ///
    /// Returns the row range to paint, or `None` when the fragment is hidden
    /// (`screen_y` at or below the boundary), non-finite, or the span
    /// collapses after clipping. A `None` leaves the column untouched.
    #[inline]
    pub fn claim(&mut self, x: usize, screen_y: f64) -> Option<Range<u32>> {
        let boundary = *self.y_buffer.get(x)?;
        if !screen_y.is_finite() || screen_y >= boundary as f64 {
            return None;
        }
        let y_start = (screen_y.trunc().max(0.0)) as u32;
        let y_end = boundary.min(self.height);
        if y_start >= y_end {
            return None;
        }
        self.y_buffer[x] = y_start;
        Some(y_start..y_end)
    }

    /// Current boundary of every column.
    pub fn y_buffer(&self) -> &[u32] {
        &self.y_buffer
    }

    /// Surface height the buffer was reset with; the unclaimed value.
    pub fn height(&self) -> u32 {
        self.height
    }
}
