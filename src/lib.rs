//! `synth-dash` library crate.
//!
//! The binary (`synth`) is a thin wrapper around this library so that:
//!
//! - generators and statistics are testable without spawning processes
//! - every front-end (batch CLI, TUI) shares one pipeline
//!
//! Data flows one way: parameters -> dataset -> summary -> rendering.

pub mod app;
pub mod cli;
pub mod config;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod math;
pub mod params;
pub mod plot;
pub mod report;
pub mod tui;
