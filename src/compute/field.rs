//! Field - Grid storage and update loop for SmoothLife.
//!
//! Holds the live density buffer plus a write buffer of the same size. Each
//! update fills the write buffer from the live one and then swaps them.

use rand::prelude::*;
use rayon::prelude::*;

use crate::schema::{ConfigError, FieldConfig};

use super::{
    Fillings, KernelShape, Normalization, Torus, TransitionRule, integrals, torus_difference,
};

/// Density grid on a torus with its immutable kernel and rule parameters.
pub struct Field {
    torus: Torus,
    shape: KernelShape,
    rule: TransitionRule,
    /// Cached at construction, never recomputed.
    norm: Normalization,
    /// Live buffer, read during updates and written by seeding.
    current: Vec<f64>,
    /// Write target of the next update.
    next: Vec<f64>,
    frame: u64,
    rng: StdRng,
}

impl Field {
    /// Create an empty (all zero) field.
    pub fn new(config: &FieldConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let torus = Torus::new(config.width, config.height);
        let shape = KernelShape::new(config.inner);
        let norm = Normalization::compute(&shape, &torus);
        log::debug!(
            "Field {}x{}: inner={}, outer={}, norm_disk={:.4}, norm_ring={:.4}",
            torus.width,
            torus.height,
            shape.inner,
            shape.outer,
            norm.disk,
            norm.ring
        );
        if norm.disk == 0.0 || norm.ring == 0.0 {
            log::warn!("Degenerate kernel (inner={}): fillings will not be finite", shape.inner);
        }

        let rng = match config.random_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self {
            torus,
            shape,
            rule: TransitionRule::from_config(config),
            norm,
            current: vec![0.0; torus.cells()],
            next: vec![0.0; torus.cells()],
            frame: 0,
            rng,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.torus.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.torus.height
    }

    /// Total number of cells.
    #[inline]
    pub fn size(&self) -> usize {
        self.torus.cells()
    }

    /// Number of completed updates.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Integer reach of the kernels in cells.
    pub fn range(&self) -> usize {
        self.shape.support().max(0.0).floor() as usize
    }

    pub fn torus(&self) -> &Torus {
        &self.torus
    }

    pub fn shape(&self) -> &KernelShape {
        &self.shape
    }

    pub fn rule(&self) -> &TransitionRule {
        &self.rule
    }

    /// Read-only view of the live buffer, in [`Field::index`] order.
    pub fn field(&self) -> &[f64] {
        &self.current
    }

    /// Flat index of cell (x, y).
    #[inline]
    pub fn index(&self, x: usize, y: usize) -> usize {
        self.torus.index(x, y)
    }

    /// Density at (x, y).
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f64 {
        self.current[self.index(x, y)]
    }

    pub fn normalization_disk(&self) -> f64 {
        self.norm.disk
    }

    pub fn normalization_ring(&self) -> f64 {
        self.norm.ring
    }

    pub fn disk(&self, radius: f64) -> f64 {
        self.shape.disk(radius)
    }

    pub fn ring(&self, radius: f64) -> f64 {
        self.shape.ring(radius)
    }

    pub fn transition(&self, disk: f64, ring: f64) -> f64 {
        self.rule.apply(disk, ring)
    }

    pub fn radius(&self, x1: usize, y1: usize, x2: usize, y2: usize) -> f64 {
        self.torus.radius(x1, y1, x2, y2)
    }

    /// Wraparound distance between two coordinates on an axis of length `size`.
    pub fn torus_difference(&self, a: usize, b: usize, size: usize) -> usize {
        torus_difference(a, b, size)
    }

    /// Disk and ring fillings of the live buffer centered at (x, y).
    pub fn integrals(&self, x: usize, y: usize) -> Fillings {
        integrals(&self.current, &self.torus, &self.shape, &self.norm, x, y)
    }

    pub fn filling_disk(&self, x: usize, y: usize) -> f64 {
        self.integrals(x, y).disk
    }

    pub fn filling_ring(&self, x: usize, y: usize) -> f64 {
        self.integrals(x, y).ring
    }

    /// Replace the random source used by [`Field::seed_random`].
    pub fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    /// Overwrite every cell with `value`.
    pub fn seed_constant(&mut self, value: f64) {
        self.current.fill(value);
    }

    /// Add independent uniform noise in [0, 1) to every cell.
    pub fn seed_random(&mut self) {
        for v in &mut self.current {
            let noise: f64 = self.rng.gen_range(0.0..1.0);
            *v += noise;
        }
    }

    /// Add a smoothed disk centered at (x0, y0).
    pub fn add_disk(&mut self, x0: usize, y0: usize) {
        let shape = self.shape;
        self.stamp(x0, y0, |r| shape.disk(r));
    }

    /// Add a smoothed ring centered at (x0, y0).
    pub fn add_ring(&mut self, x0: usize, y0: usize) {
        let shape = self.shape;
        self.stamp(x0, y0, |r| shape.ring(r));
    }

    /// Overwrite the cell at (x0, y0). Coordinates wrap around the torus.
    pub fn add_pixel(&mut self, x0: usize, y0: usize, value: f64) {
        let (x, y) = self.torus.wrap(x0, y0);
        let idx = self.index(x, y);
        self.current[idx] = value;
    }

    fn stamp(&mut self, x0: usize, y0: usize, weight: impl Fn(f64) -> f64) {
        let (x0, y0) = self.torus.wrap(x0, y0);
        let torus = self.torus;
        for (x, row) in self.current.chunks_exact_mut(torus.height).enumerate() {
            for (y, cell) in row.iter_mut().enumerate() {
                *cell += weight(torus.radius(x0, y0, x, y));
            }
        }
    }

    /// Advance one generation.
    ///
    /// Every new value is computed from the live buffer as it was at the
    /// start of the call; the buffers are swapped only after the full sweep.
    pub fn update(&mut self) {
        let current = &self.current;
        let torus = &self.torus;
        let shape = &self.shape;
        let norm = &self.norm;
        let rule = &self.rule;

        self.next
            .par_chunks_mut(torus.height)
            .enumerate()
            .for_each(|(x, row)| {
                for (y, out) in row.iter_mut().enumerate() {
                    let f = integrals(current, torus, shape, norm, x, y);
                    *out = rule.apply(f.disk, f.ring);
                }
            });

        std::mem::swap(&mut self.current, &mut self.next);
        self.frame += 1;
        log::trace!("Completed frame {}", self.frame);
    }

    /// Advance `steps` generations.
    pub fn run(&mut self, steps: u64) {
        for _ in 0..steps {
            self.update();
        }
    }
}

/// Summary statistics over the live buffer.
#[derive(Debug, Clone)]
pub struct FieldStats {
    pub total: f64,
    pub max_value: f64,
    pub min_value: f64,
    pub mean_value: f64,
    pub active_cells: usize,
}

impl FieldStats {
    /// Compute statistics from a field.
    pub fn from_field(field: &Field) -> Self {
        let mut total = 0.0;
        let mut max_value = f64::NEG_INFINITY;
        let mut min_value = f64::INFINITY;
        let mut active_cells = 0usize;

        for &v in field.field() {
            total += v;
            max_value = max_value.max(v);
            min_value = min_value.min(v);
            if v > 1e-6 {
                active_cells += 1;
            }
        }

        Self {
            total,
            max_value,
            min_value,
            mean_value: total / field.size() as f64,
            active_cells,
        }
    }
}
