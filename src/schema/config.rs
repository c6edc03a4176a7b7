//! Configuration types for SmoothLife field parameters.

use serde::{Deserialize, Serialize};

/// Field geometry, kernel and transition parameters.
///
/// All values are fixed for the lifetime of a [`Field`](crate::compute::Field).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldConfig {
    /// Grid size along the X axis (outer index).
    pub width: usize,
    /// Grid size along the Y axis (inner index).
    pub height: usize,
    /// Disk radius, also the inner boundary of the ring.
    pub inner: f64,
    /// Lower ring filling threshold for birth.
    pub birth_1: f64,
    /// Upper ring filling threshold for birth.
    pub birth_2: f64,
    /// Lower ring filling threshold for survival.
    pub death_1: f64,
    /// Upper ring filling threshold for survival.
    pub death_2: f64,
    /// Steepness of the birth/death regime switch on the disk filling.
    pub smoothing_disk: f64,
    /// Steepness of the ring filling band edges.
    pub smoothing_ring: f64,
    /// Seed for [`Field::seed_random`](crate::compute::Field::seed_random).
    /// Drawn from entropy when absent.
    #[serde(default)]
    pub random_seed: Option<u64>,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            width: 100,
            height: 100,
            inner: 21.0,
            birth_1: 0.278,
            birth_2: 0.365,
            death_1: 0.267,
            death_2: 0.445,
            smoothing_disk: 0.147,
            smoothing_ring: 0.028,
            random_seed: None,
        }
    }
}

impl FieldConfig {
    /// Default thresholds on a `width` x `height` grid with the given disk radius.
    pub fn new(width: usize, height: usize, inner: f64) -> Self {
        Self {
            width,
            height,
            inner,
            ..Self::default()
        }
    }

    /// Outer ring boundary, always three times the inner radius.
    #[inline]
    pub fn outer(&self) -> f64 {
        self.inner * 3.0
    }

    /// Total number of cells.
    #[inline]
    pub fn cells(&self) -> usize {
        self.width * self.height
    }

    /// Validate configuration parameters.
    ///
    /// Only zero dimensions and non-finite reals are rejected; degenerate
    /// but finite choices such as `inner <= 0` are accepted.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        let reals = [
            ("inner", self.inner),
            ("birth_1", self.birth_1),
            ("birth_2", self.birth_2),
            ("death_1", self.death_1),
            ("death_2", self.death_2),
            ("smoothing_disk", self.smoothing_disk),
            ("smoothing_ring", self.smoothing_ring),
        ];
        for (name, value) in reals {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { name, value });
            }
        }
        Ok(())
    }
}

/// Configuration validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Grid dimensions must be non-zero (got {width}x{height})")]
    InvalidDimensions { width: usize, height: usize },
    #[error("Parameter `{name}` must be finite (got {value})")]
    NonFinite { name: &'static str, value: f64 },
}
