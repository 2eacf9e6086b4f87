//! Synthetic dataset generators.
//!
//! Generators never own randomness: the caller seeds an RNG and passes it in.

pub mod linear;
pub mod support;

pub use linear::{generate_linear, linspace};
pub use support::{generate_support, satisfaction_center};
