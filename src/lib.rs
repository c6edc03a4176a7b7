//! SmoothLife - Continuous-state cellular automaton on a toroidal grid.
//!
//! Each cell holds a real-valued density. A generation replaces every cell
//! with a sigmoid transition of two local averages: one over a disk around
//! the cell and one over the ring surrounding that disk.
//!
//! # Architecture
//!
//! - `schema`: Field configuration and seeding recipes
//! - `compute`: Numerical core (torus geometry, kernels, transition, fillings, field)
//! - `frames`: Binary and text frame output
//!
//! # Example
//!
//! ```rust,no_run
//! use smooth_life::{
//!     compute::{Field, FieldStats},
//!     schema::{FieldConfig, Seed},
//! };
//!
//! let config = FieldConfig::new(200, 500, 21.0);
//! let mut field = Field::new(&config).expect("valid configuration");
//! Seed::default().apply(&mut field);
//!
//! field.run(10);
//!
//! println!("Total density after 10 frames: {}", FieldStats::from_field(&field).total);
//! ```

pub mod compute;
pub mod frames;
pub mod schema;

// Re-export commonly used types
pub use compute::{Field, FieldStats, Fillings};
pub use schema::{ConfigError, FieldConfig, Seed, SeedOp};
