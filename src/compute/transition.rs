//! Transition rule for SmoothLife.
//!
//! The disk filling selects a blend between the birth and death regimes; the
//! ring filling is then tested against that blended band.

use crate::schema::FieldConfig;

/// Smooth step: 0 at -inf, 1 at +inf, 0.5 at `x == 0`.
///
/// Smaller `width` gives a sharper step.
#[inline]
pub fn sigmoid(x: f64, width: f64) -> f64 {
    1.0 / (1.0 + (-4.0 * x / width).exp())
}

/// [`sigmoid`] recentered on `center`.
#[inline]
pub fn sigmoid_centered(value: f64, center: f64, width: f64) -> f64 {
    sigmoid(value - center, width)
}

/// Birth/death thresholds and smoothing widths.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionRule {
    pub birth_1: f64,
    pub birth_2: f64,
    pub death_1: f64,
    pub death_2: f64,
    pub smoothing_disk: f64,
    pub smoothing_ring: f64,
}

impl TransitionRule {
    pub fn from_config(config: &FieldConfig) -> Self {
        Self {
            birth_1: config.birth_1,
            birth_2: config.birth_2,
            death_1: config.death_1,
            death_2: config.death_2,
            smoothing_disk: config.smoothing_disk,
            smoothing_ring: config.smoothing_ring,
        }
    }

    /// New density for a cell with the given disk and ring fillings.
    #[inline]
    pub fn apply(&self, disk: f64, ring: f64) -> f64 {
        let s = sigmoid(disk - 0.5, self.smoothing_disk);
        let low = self.birth_1 * (1.0 - s) + self.death_1 * s;
        let high = self.birth_2 * (1.0 - s) + self.death_2 * s;
        sigmoid(ring - low, self.smoothing_ring) * sigmoid(high - ring, self.smoothing_ring)
    }
}

impl Default for TransitionRule {
    fn default() -> Self {
        Self::from_config(&FieldConfig::default())
    }
}
