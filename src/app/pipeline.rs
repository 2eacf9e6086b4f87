//! Shared pipeline logic used by both CLI and TUI front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! seed RNG -> generate dataset -> summarize
//!
//! Every run starts from a freshly seeded RNG, so a run is a pure function of
//! (configuration, seed). The front-ends then focus on presentation.

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;

use crate::data::{generate_linear, generate_support};
use crate::domain::{
    LinearConfig, LinearDataset, LinearSummary, SupportConfig, SupportDataset, SupportSummary,
};
use crate::error::AppError;
use crate::report::{summarize_linear, summarize_support};

/// All computed outputs of a single linear run.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearRun {
    pub seed: u64,
    pub dataset: LinearDataset,
    pub summary: LinearSummary,
}

/// All computed outputs of a single support run.
#[derive(Debug, Clone, PartialEq)]
pub struct SupportRun {
    pub seed: u64,
    pub dataset: SupportDataset,
    pub summary: SupportSummary,
}

/// Generate and summarize a linear dataset.
pub fn run_linear(config: &LinearConfig, seed: u64) -> Result<LinearRun, AppError> {
    let mut rng = StdRng::seed_from_u64(seed);
    let dataset = generate_linear(config, &mut rng)?;
    let summary = summarize_linear(&dataset)?;

    info!(
        sample_size = config.sample_size,
        noise_level = config.noise_level,
        seed,
        correlation = summary.correlation,
        "linear run complete"
    );

    Ok(LinearRun {
        seed,
        dataset,
        summary,
    })
}

/// Generate and summarize the support-ticket dataset.
pub fn run_support(config: &SupportConfig, seed: u64) -> Result<SupportRun, AppError> {
    let mut rng = StdRng::seed_from_u64(seed);
    let dataset = generate_support(config, &mut rng)?;
    let summary = summarize_support(&dataset)?;

    info!(
        n_samples = config.n_samples,
        rows = summary.rows,
        seed,
        "support run complete"
    );

    Ok(SupportRun {
        seed,
        dataset,
        summary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Channel, CorrelationStrength};

    #[test]
    fn reference_linear_run() {
        let config = LinearConfig {
            sample_size: 100,
            noise_level: 0.5,
        };
        let run = run_linear(&config, 42).unwrap();
        assert_eq!(run.dataset.len(), 100);
        assert!(run.summary.correlation > 0.9, "r = {}", run.summary.correlation);
        assert_eq!(run.summary.strength, CorrelationStrength::Strong);
        assert!((run.summary.fit.slope - 2.0).abs() < 0.1);

        assert_eq!(run, run_linear(&config, 42).unwrap());
    }

    #[test]
    fn noiseless_run_is_perfectly_correlated() {
        let config = LinearConfig {
            sample_size: 30,
            noise_level: 0.0,
        };
        let run = run_linear(&config, 1).unwrap();
        assert!((run.summary.correlation - 1.0).abs() < 1e-12);
        assert!(run.dataset.records.iter().all(|r| r.residual == 0.0));
    }

    #[test]
    fn single_point_run_fails_in_summary() {
        let config = LinearConfig {
            sample_size: 1,
            noise_level: 0.5,
        };
        assert!(matches!(
            run_linear(&config, 42),
            Err(AppError::InsufficientData { .. })
        ));
    }

    #[test]
    fn reference_support_run() {
        let run = run_support(&SupportConfig::default(), 42).unwrap();
        assert_eq!(run.summary.rows, 1200);
        assert_eq!(run.summary.channels.len(), 4);

        let live = run.summary.channel(Channel::LiveChat).unwrap();
        let email = run.summary.channel(Channel::Email).unwrap();
        assert!(live.mean < email.mean);
        assert!(run.summary.response_min >= 0.3);
        assert!(run.summary.response_max <= 72.0);
    }
}
