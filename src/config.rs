//! Environment-backed settings.
//!
//! Values come from the process environment, optionally seeded from a `.env`
//! file. CLI flags take precedence over anything resolved here.

use std::path::PathBuf;

use crate::domain::DEFAULT_SEED;
use crate::error::AppError;

pub const ENV_SEED: &str = "SYNTH_SEED";
pub const ENV_REPORT_DIR: &str = "SYNTH_REPORT_DIR";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Seed used when the CLI does not pass `--seed`.
    pub seed: u64,
    /// Directory for markdown report bundles.
    pub report_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            report_dir: PathBuf::from("reports"),
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve settings through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Self::default();

        if let Some(raw) = lookup(ENV_SEED) {
            settings.seed = raw
                .trim()
                .parse()
                .map_err(|_| AppError::invalid(ENV_SEED, &raw, "an unsigned 64-bit integer"))?;
        }
        if let Some(raw) = lookup(ENV_REPORT_DIR) {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                return Err(AppError::invalid(ENV_REPORT_DIR, "\"\"", "a directory path"));
            }
            settings.report_dir = PathBuf::from(trimmed);
        }

        Ok(settings)
    }

    /// CLI seed if given, else the resolved setting.
    pub fn seed_or(&self, cli_seed: Option<u64>) -> u64 {
        cli_seed.unwrap_or(self.seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |key: &str| {
            pairs
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn defaults_without_environment() {
        let settings = Settings::from_lookup(lookup(&[])).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.seed, 42);
    }

    #[test]
    fn environment_overrides_defaults_and_cli_overrides_environment() {
        let settings =
            Settings::from_lookup(lookup(&[(ENV_SEED, " 7 "), (ENV_REPORT_DIR, "out")])).unwrap();
        assert_eq!(settings.seed, 7);
        assert_eq!(settings.report_dir, PathBuf::from("out"));
        assert_eq!(settings.seed_or(None), 7);
        assert_eq!(settings.seed_or(Some(99)), 99);
    }

    #[test]
    fn malformed_seed_is_invalid_configuration() {
        let err = Settings::from_lookup(lookup(&[(ENV_SEED, "abc")])).unwrap_err();
        assert!(matches!(err, AppError::InvalidConfiguration { parameter: ENV_SEED, .. }));
    }
}
