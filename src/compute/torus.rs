//! Wraparound geometry on a rectangular grid.

/// Minimal distance between two coordinates on a cycle of length `size`.
///
/// Always in `[0, size / 2]`.
#[inline]
pub fn torus_difference(a: usize, b: usize, size: usize) -> usize {
    let remainder = a.abs_diff(b) % size;
    remainder.min(size - remainder)
}

/// Toroidal grid of `width` x `height` cells.
///
/// Cells are stored with `x` as the outer index: `index(x, y) = x * height + y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Torus {
    pub width: usize,
    pub height: usize,
}

impl Torus {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Total number of cells.
    #[inline]
    pub fn cells(&self) -> usize {
        self.width * self.height
    }

    /// Flat index of cell (x, y).
    #[inline]
    pub fn index(&self, x: usize, y: usize) -> usize {
        x * self.height + y
    }

    /// Wrap an arbitrary position onto the grid.
    #[inline]
    pub fn wrap(&self, x: usize, y: usize) -> (usize, usize) {
        (x % self.width, y % self.height)
    }

    /// Euclidean distance between two cells using per-axis torus differences.
    #[inline]
    pub fn radius(&self, x1: usize, y1: usize, x2: usize, y2: usize) -> f64 {
        let dx = torus_difference(x1, x2, self.width) as f64;
        let dy = torus_difference(y1, y2, self.height) as f64;
        (dx * dx + dy * dy).sqrt()
    }

    /// Cells along one axis of length `size` whose torus difference to
    /// `center` does not exceed `reach`, paired with that difference.
    ///
    /// Only the `2 * reach + 1` cells around `center` are visited; when that
    /// window covers the whole axis every cell is visited exactly once.
    pub fn window(center: usize, size: usize, reach: f64) -> impl Iterator<Item = (usize, usize)> {
        let half = if reach >= 0.0 { reach.floor() as usize } else { 0 };
        let span = half.saturating_mul(2).saturating_add(1);
        let (start, span) = if span >= size {
            (0, size)
        } else {
            ((center % size + size - half) % size, span)
        };

        (0..span)
            .map(move |i| (start + i) % size)
            .map(move |c| (c, torus_difference(center, c, size)))
            .filter(move |&(_, delta)| delta as f64 <= reach)
    }
}
