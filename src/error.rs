//! Crate-wide error type.
//!
//! Every variant maps to a process exit code so `main` can stay tiny:
//! - `2`: the caller supplied an invalid parameter
//! - `3`: a statistic is undefined for the data it was given
//! - `4`: IO, rendering, terminal, or distribution failures

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// A configuration value is outside its valid range.
    #[error("invalid configuration: {parameter} = {value} (expected {expected})")]
    InvalidConfiguration {
        parameter: &'static str,
        value: String,
        expected: String,
    },

    /// A statistic is mathematically undefined for the given dataset.
    #[error("insufficient data for {statistic}: {detail}")]
    InsufficientData { statistic: &'static str, detail: String },

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("render error: {0}")]
    Render(String),

    #[error("distribution error: {0}")]
    Distribution(String),

    #[error("terminal error: {0}")]
    Terminal(String),
}

impl AppError {
    pub fn invalid(parameter: &'static str, value: impl ToString, expected: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            parameter,
            value: value.to_string(),
            expected: expected.into(),
        }
    }

    pub fn insufficient(statistic: &'static str, detail: impl Into<String>) -> Self {
        Self::InsufficientData {
            statistic,
            detail: detail.into(),
        }
    }

    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::InvalidConfiguration { .. } => 2,
            AppError::InsufficientData { .. } => 3,
            AppError::Io { .. }
            | AppError::Render(_)
            | AppError::Distribution(_)
            | AppError::Terminal(_) => 4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_configuration_names_parameter_and_range() {
        let err = AppError::invalid("sample_size", 0, "an integer in [10, 1000]");
        assert_eq!(
            err.to_string(),
            "invalid configuration: sample_size = 0 (expected an integer in [10, 1000])"
        );
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn exit_codes_by_kind() {
        assert_eq!(AppError::insufficient("correlation", "empty dataset").exit_code(), 3);
        assert_eq!(AppError::Render("boom".into()).exit_code(), 4);
    }
}
