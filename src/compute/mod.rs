//! Compute module - Numerical core of SmoothLife.

mod field;
mod filling;
mod kernel;
mod torus;
mod transition;

pub use field::*;
pub use filling::*;
pub use kernel::*;
pub use torus::*;
pub use transition::*;
