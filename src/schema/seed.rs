//! Seed recipes for initializing SmoothLife fields.

use serde::{Deserialize, Serialize};

use crate::compute::Field;

/// Ordered list of seeding operations applied to a fresh field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Seed {
    /// Operations, replayed in order.
    pub ops: Vec<SeedOp>,
}

impl Default for Seed {
    fn default() -> Self {
        Self {
            ops: vec![SeedOp::Ring { x: 0, y: 0 }],
        }
    }
}

/// A single seeding operation.
///
/// Coordinates are cell positions and wrap around the torus.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SeedOp {
    /// Overwrite every cell with `value`.
    Constant { value: f64 },
    /// Add uniform noise in [0, 1) to every cell.
    Random,
    /// Add a smoothed disk centered at (x, y).
    Disk { x: usize, y: usize },
    /// Add a smoothed ring centered at (x, y).
    Ring { x: usize, y: usize },
    /// Overwrite the cell at (x, y).
    Pixel { x: usize, y: usize, value: f64 },
}

impl Seed {
    /// Apply every operation to the live buffer of `field`.
    pub fn apply(&self, field: &mut Field) {
        for op in &self.ops {
            match *op {
                SeedOp::Constant { value } => field.seed_constant(value),
                SeedOp::Random => field.seed_random(),
                SeedOp::Disk { x, y } => field.add_disk(x, y),
                SeedOp::Ring { x, y } => field.add_ring(x, y),
                SeedOp::Pixel { x, y, value } => field.add_pixel(x, y, value),
            }
        }
    }
}
