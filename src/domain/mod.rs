//! Domain types used throughout the pipelines.
//!
//! This module defines:
//!
//! - generation configurations (`LinearConfig`, `SupportConfig`, `ChannelParams`)
//! - fixed record types (`LinearRecord`, `SupportRecord`) and their datasets
//! - summary outputs (`LinearSummary`, `SupportSummary`, `ColumnSummary`)

pub mod types;

pub use types::*;
