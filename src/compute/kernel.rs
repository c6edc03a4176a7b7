//! Disk and ring kernel shapes for SmoothLife.
//!
//! Both shapes are piecewise-linear in the distance from the kernel center,
//! with a linear ramp of width `smoothing` across each boundary.

use super::Torus;

/// Width of the linear ramp at every kernel boundary.
pub const EDGE_SMOOTHING: f64 = 1.0;

/// Membership functions for the inner disk and the surrounding ring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KernelShape {
    /// Disk radius and inner ring boundary.
    pub inner: f64,
    /// Outer ring boundary.
    pub outer: f64,
    /// Boundary ramp width.
    pub smoothing: f64,
}

impl KernelShape {
    /// Shape with `outer = 3 * inner` and unit edge smoothing.
    pub fn new(inner: f64) -> Self {
        Self {
            inner,
            outer: inner * 3.0,
            smoothing: EDGE_SMOOTHING,
        }
    }

    /// Distance beyond which both shapes vanish.
    #[inline]
    pub fn support(&self) -> f64 {
        self.outer + self.smoothing / 2.0
    }

    /// How much a point at `radius` belongs to the disk.
    ///
    /// - 1 inside the disk
    /// - 0 outside the disk
    /// - linear in the smoothing region
    #[inline]
    pub fn disk(&self, radius: f64) -> f64 {
        let half = self.smoothing / 2.0;
        if radius > self.inner + half {
            return 0.0;
        }
        if radius < self.inner - half {
            return 1.0;
        }
        (self.inner + half - radius) / self.smoothing
    }

    /// How much a point at `radius` belongs to the ring.
    ///
    /// - 1 between the smoothed inner and outer boundaries
    /// - 0 inside the disk and beyond the outer boundary
    /// - linear in both smoothing regions
    #[inline]
    pub fn ring(&self, radius: f64) -> f64 {
        let half = self.smoothing / 2.0;
        if radius < self.inner - half {
            return 0.0;
        }
        if radius < self.inner + half {
            return (radius + half - self.inner) / self.smoothing;
        }
        if radius < self.outer - half {
            return 1.0;
        }
        if radius < self.outer + half {
            return (self.outer + half - radius) / self.smoothing;
        }
        0.0
    }
}

/// Integrals of the disk and ring shapes over the whole grid.
///
/// Computed once per field and used to turn weighted sums into averages.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normalization {
    pub disk: f64,
    pub ring: f64,
}

impl Normalization {
    /// Sum both shapes at the torus distance from the origin cell to every cell.
    pub fn compute(shape: &KernelShape, torus: &Torus) -> Self {
        let mut disk = 0.0;
        let mut ring = 0.0;
        for x in 0..torus.width {
            for y in 0..torus.height {
                let radius = torus.radius(0, 0, x, y);
                disk += shape.disk(radius);
                ring += shape.ring(radius);
            }
        }
        Self { disk, ring }
    }
}
