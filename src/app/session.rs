//! Interactive session state: the current (parameters, dataset, summary).
//!
//! A parameter change recomputes the whole pipeline. The new run replaces the
//! old one only when every stage succeeds, so the session never exposes a
//! dataset or summary that disagrees with its parameters.

use tracing::debug;

use crate::app::pipeline::{LinearRun, run_linear};
use crate::error::AppError;
use crate::params::LinearParams;

/// One edit coming from a parameter source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamChange {
    SetSampleSize(usize),
    SetNoiseLevel(f64),
    StepSampleSize(i64),
    StepNoiseLevel(i64),
    Reseed(u64),
}

#[derive(Debug, Clone)]
pub struct LinearSession {
    params: LinearParams,
    seed: u64,
    run: LinearRun,
}

impl LinearSession {
    pub fn new(params: LinearParams, seed: u64) -> Result<Self, AppError> {
        let run = run_linear(&params.config(), seed)?;
        Ok(Self { params, seed, run })
    }

    pub fn params(&self) -> &LinearParams {
        &self.params
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn run(&self) -> &LinearRun {
        &self.run
    }

    /// Apply a change and recompute everything downstream of it.
    pub fn apply(&mut self, change: ParamChange) -> Result<&LinearRun, AppError> {
        let mut params = self.params.clone();
        let mut seed = self.seed;
        match change {
            ParamChange::SetSampleSize(n) => params.sample_size.set(n as f64)?,
            ParamChange::SetNoiseLevel(v) => params.noise_level.set(v)?,
            ParamChange::StepSampleSize(d) => params.sample_size.step_by(d),
            ParamChange::StepNoiseLevel(d) => params.noise_level.step_by(d),
            ParamChange::Reseed(s) => seed = s,
        }

        let run = run_linear(&params.config(), seed)?;
        debug!(?change, "session recomputed");

        self.params = params;
        self.seed = seed;
        self.run = run;
        Ok(&self.run)
    }
}
