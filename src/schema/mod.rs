//! Schema module - Configuration and seeding types for SmoothLife fields.

mod config;
mod seed;

pub use config::*;
pub use seed::*;
