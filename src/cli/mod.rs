//! Command-line parsing for the synthetic data dashboard.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! generators and statistics. Numeric parameters are validated against the
//! same slider ranges the TUI exposes, so a value that the TUI could not
//! produce is rejected here too.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::{DEFAULT_SUPPORT_SAMPLES, LinearConfig, SupportConfig};
use crate::error::AppError;
use crate::params::LinearParams;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "synth",
    version,
    about = "Synthetic dataset generator and summary dashboard"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate the linear dataset, print findings and plots, and optionally export.
    Linear(LinearArgs),
    /// Generate support tickets, print channel statistics, and draw the chart.
    Support(SupportArgs),
    /// Launch the interactive TUI for the linear dataset.
    Tui(TuiArgs),
    /// Print findings from a summary JSON written by `synth linear --export-summary`.
    Show(ShowArgs),
}

#[derive(Debug, Parser, Clone)]
pub struct LinearArgs {
    /// Number of observations (10..=1000).
    #[arg(short = 'n', long, default_value_t = 100)]
    pub sample_size: usize,

    /// Standard deviation multiplier of the Gaussian noise (0.1..=2.0, step 0.1).
    #[arg(long, default_value_t = 0.5)]
    pub noise_level: f64,

    /// Random seed (falls back to SYNTH_SEED, then 42).
    #[arg(long)]
    pub seed: Option<u64>,

    /// Render ASCII plots in the terminal (enabled by default).
    #[arg(long, default_value_t = true)]
    pub plot: bool,

    /// Disable the terminal plots.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 80)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,

    /// Export the dataset to CSV.
    #[arg(long, value_name = "CSV")]
    pub export: Option<PathBuf>,

    /// Export the summary statistics to JSON.
    #[arg(long = "export-summary", value_name = "JSON")]
    pub export_summary: Option<PathBuf>,
}

impl LinearArgs {
    pub fn params(&self) -> Result<LinearParams, AppError> {
        LinearParams::new(self.sample_size, self.noise_level)
    }

    pub fn config(&self) -> Result<LinearConfig, AppError> {
        Ok(self.params()?.config())
    }

    pub fn show_plot(&self) -> bool {
        self.plot && !self.no_plot
    }
}

#[derive(Debug, Parser, Clone)]
pub struct SupportArgs {
    /// Total tickets, split evenly across the four channels.
    #[arg(short = 'n', long, default_value_t = DEFAULT_SUPPORT_SAMPLES)]
    pub samples: usize,

    /// Random seed (falls back to SYNTH_SEED, then 42).
    #[arg(long)]
    pub seed: Option<u64>,

    /// Output path of the PNG chart.
    #[arg(long, value_name = "PNG", default_value = "chart.png")]
    pub chart: PathBuf,

    /// Skip writing the chart.
    #[arg(long)]
    pub no_chart: bool,

    /// Export the tickets to CSV.
    #[arg(long, value_name = "CSV")]
    pub export: Option<PathBuf>,
}

impl SupportArgs {
    pub fn config(&self) -> Result<SupportConfig, AppError> {
        let config = SupportConfig::new(self.samples);
        config.validate()?;
        Ok(config)
    }

    pub fn chart_path(&self) -> Option<&PathBuf> {
        (!self.no_chart).then_some(&self.chart)
    }
}

#[derive(Debug, Parser, Clone)]
pub struct TuiArgs {
    /// Initial sample size slider value.
    #[arg(short = 'n', long, default_value_t = 100)]
    pub sample_size: usize,

    /// Initial noise level slider value.
    #[arg(long, default_value_t = 0.5)]
    pub noise_level: f64,

    /// Initial seed (falls back to SYNTH_SEED, then 42).
    #[arg(long)]
    pub seed: Option<u64>,
}

impl TuiArgs {
    pub fn params(&self) -> Result<LinearParams, AppError> {
        LinearParams::new(self.sample_size, self.noise_level)
    }
}

/// Options for printing a saved summary.
#[derive(Debug, Parser)]
pub struct ShowArgs {
    /// Summary JSON file.
    #[arg(long, value_name = "JSON")]
    pub summary: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn linear_defaults() {
        let Command::Linear(args) = parse(&["synth", "linear"]).command else {
            panic!("expected linear");
        };
        assert_eq!(args.seed, None);
        assert!(args.show_plot());
        let config = args.config().unwrap();
        assert_eq!(config.sample_size, 100);
        assert_eq!(config.noise_level, 0.5);
    }

    #[test]
    fn no_plot_wins_over_plot() {
        let Command::Linear(args) = parse(&["synth", "linear", "--no-plot"]).command else {
            panic!("expected linear");
        };
        assert!(!args.show_plot());
    }

    #[test]
    fn out_of_range_values_are_invalid_configuration() {
        let Command::Linear(args) = parse(&["synth", "linear", "--sample-size", "5"]).command
        else {
            panic!("expected linear");
        };
        assert!(matches!(
            args.config(),
            Err(AppError::InvalidConfiguration { parameter: "sample_size", .. })
        ));

        let Command::Linear(args) = parse(&["synth", "linear", "--noise-level", "0.25"]).command
        else {
            panic!("expected linear");
        };
        assert!(matches!(
            args.config(),
            Err(AppError::InvalidConfiguration { parameter: "noise_level", .. })
        ));
    }

    #[test]
    fn support_chart_toggle() {
        let Command::Support(args) = parse(&["synth", "support"]).command else {
            panic!("expected support");
        };
        assert_eq!(args.chart_path(), Some(&PathBuf::from("chart.png")));
        assert_eq!(args.config().unwrap().n_samples, 1200);

        let Command::Support(args) = parse(&["synth", "support", "--no-chart"]).command else {
            panic!("expected support");
        };
        assert_eq!(args.chart_path(), None);
    }

    #[test]
    fn zero_support_samples_rejected() {
        let Command::Support(args) = parse(&["synth", "support", "--samples", "0"]).command else {
            panic!("expected support");
        };
        assert!(args.config().is_err());
    }
}
