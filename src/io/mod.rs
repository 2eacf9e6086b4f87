//! Input/output helpers.
//!
//! - dataset exports to CSV (`export`)
//! - linear summary JSON read/write (`summary`)

pub mod export;
pub mod summary;

pub use export::*;
pub use summary::*;
