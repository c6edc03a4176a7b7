//! Disk and ring fillings via direct toroidal convolution.
//!
//! # Complexity
//!
//! The kernels vanish beyond `outer + smoothing / 2`, so each filling only
//! visits the bounding window of side `2R + 1` around the cell. A whole-grid
//! sweep is O(N * R^2) where N is the cell count and R the kernel support.

use super::{KernelShape, Normalization, Torus};

/// Normalized disk- and ring-weighted local averages around one cell.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Fillings {
    /// Average over the disk.
    pub disk: f64,
    /// Average over the ring.
    pub ring: f64,
}

impl From<Fillings> for (f64, f64) {
    fn from(f: Fillings) -> Self {
        (f.disk, f.ring)
    }
}

/// Compute the fillings of `field` centered at (x, y).
///
/// `field` must hold `torus.cells()` values laid out by [`Torus::index`].
/// Rows and columns outside the kernel support are skipped before any
/// two-dimensional distance is computed.
pub fn integrals(
    field: &[f64],
    torus: &Torus,
    shape: &KernelShape,
    norm: &Normalization,
    x: usize,
    y: usize,
) -> Fillings {
    debug_assert_eq!(field.len(), torus.cells());

    let reach = shape.support();
    let mut disk_total = 0.0;
    let mut ring_total = 0.0;

    for (x1, dx) in Torus::window(x, torus.width, reach) {
        let row = &field[x1 * torus.height..(x1 + 1) * torus.height];
        let dx_sq = (dx * dx) as f64;

        for (y1, dy) in Torus::window(y, torus.height, reach) {
            let value = row[y1];
            if value == 0.0 {
                continue;
            }
            let radius = (dx_sq + (dy * dy) as f64).sqrt();
            disk_total += value * shape.disk(radius);
            ring_total += value * shape.ring(radius);
        }
    }

    Fillings {
        disk: disk_total / norm.disk,
        ring: ring_total / norm.ring,
    }
}
