//! Rendering sinks: terminal ASCII plots and the PNG channel chart.

pub mod ascii;
pub mod chart;

pub use ascii::*;
pub use chart::*;
