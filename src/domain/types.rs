//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - produced by the generators and consumed by the statistics layer
//! - exported to CSV/JSON
//! - rendered by the terminal front-ends

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Left end of the linear x domain.
pub const X_MIN: f64 = 0.0;
/// Right end of the linear x domain (inclusive).
pub const X_MAX: f64 = 10.0;
/// Slope of the true relationship `y = 2x + 1`.
pub const TRUE_SLOPE: f64 = 2.0;
/// Intercept of the true relationship `y = 2x + 1`.
pub const TRUE_INTERCEPT: f64 = 1.0;

/// Seed used when neither the CLI nor the environment provides one.
pub const DEFAULT_SEED: u64 = 42;
/// Ticket count of the support pipeline.
pub const DEFAULT_SUPPORT_SAMPLES: usize = 1200;

/// Spread of the satisfaction draw around its response-time-dependent center.
pub const SATISFACTION_SPREAD: f64 = 0.5;

/// Noiseless value of the linear relationship at `x`.
pub fn true_line(x: f64) -> f64 {
    TRUE_SLOPE * x + TRUE_INTERCEPT
}

/// Configuration of one linear generation run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearConfig {
    pub sample_size: usize,
    /// Multiplier applied to standard-normal noise. Zero yields an exact line.
    pub noise_level: f64,
}

impl LinearConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.sample_size == 0 {
            return Err(AppError::invalid(
                "sample_size",
                self.sample_size,
                "a positive integer",
            ));
        }
        if !(self.noise_level.is_finite() && self.noise_level >= 0.0) {
            return Err(AppError::invalid(
                "noise_level",
                self.noise_level,
                "a finite value >= 0",
            ));
        }
        Ok(())
    }
}

/// One row of the linear dataset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearRecord {
    pub x: f64,
    pub y: f64,
    /// `y - (2x + 1)`, i.e. exactly the injected noise.
    pub residual: f64,
}

/// Linear dataset together with the configuration that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearDataset {
    pub config: LinearConfig,
    pub records: Vec<LinearRecord>,
}

impl LinearDataset {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn xs(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.x).collect()
    }

    pub fn ys(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.y).collect()
    }

    pub fn residuals(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.residual).collect()
    }
}

/// Support channel, in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    LiveChat,
    Email,
    Phone,
    SocialMedia,
}

impl Channel {
    pub const ALL: [Channel; 4] = [
        Channel::LiveChat,
        Channel::Email,
        Channel::Phone,
        Channel::SocialMedia,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            Channel::LiveChat => "Live Chat",
            Channel::Email => "Email",
            Channel::Phone => "Phone",
            Channel::SocialMedia => "Social Media",
        }
    }
}

/// Right-skewed distribution used for a channel's raw response times.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResponseShape {
    /// `exp(N(ln(mean), sigma))`.
    LogNormal { sigma: f64 },
    /// Gamma with a fixed `scale`, or `mean / shape` when `scale` is `None`.
    Gamma { shape: f64, scale: Option<f64> },
}

/// Declared response-time characteristics of one channel (hours).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChannelParams {
    pub channel: Channel,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub max: f64,
    pub shape: ResponseShape,
}

impl ChannelParams {
    /// The fixed channel table, in declaration order.
    pub fn defaults() -> [ChannelParams; 4] {
        [
            ChannelParams {
                channel: Channel::LiveChat,
                mean: 2.5,
                std: 1.2,
                min: 0.5,
                max: 8.0,
                shape: ResponseShape::Gamma {
                    shape: 2.0,
                    scale: Some(1.2),
                },
            },
            ChannelParams {
                channel: Channel::Email,
                mean: 24.0,
                std: 12.0,
                min: 2.0,
                max: 72.0,
                shape: ResponseShape::LogNormal { sigma: 0.8 },
            },
            ChannelParams {
                channel: Channel::Phone,
                mean: 8.0,
                std: 4.0,
                min: 1.0,
                max: 30.0,
                shape: ResponseShape::Gamma {
                    shape: 3.0,
                    scale: None,
                },
            },
            ChannelParams {
                channel: Channel::SocialMedia,
                mean: 6.0,
                std: 3.5,
                min: 0.3,
                max: 24.0,
                shape: ResponseShape::Gamma {
                    shape: 3.0,
                    scale: None,
                },
            },
        ]
    }

    pub fn validate(&self) -> Result<(), AppError> {
        let name = self.channel.display_name();
        if !(self.min.is_finite() && self.max.is_finite() && self.min < self.max) {
            return Err(AppError::invalid(
                "channel bounds",
                format!("{name} [{}, {}]", self.min, self.max),
                "finite bounds with min < max",
            ));
        }
        if !(self.mean.is_finite() && self.mean > 0.0) {
            return Err(AppError::invalid(
                "channel mean",
                format!("{name} {}", self.mean),
                "a finite value > 0",
            ));
        }

        let positive = |v: f64| v.is_finite() && v > 0.0;
        match self.shape {
            ResponseShape::LogNormal { sigma } if !positive(sigma) => Err(AppError::invalid(
                "channel sigma",
                format!("{name} {sigma}"),
                "a finite value > 0",
            )),
            ResponseShape::Gamma { shape, .. } if !positive(shape) => Err(AppError::invalid(
                "channel shape",
                format!("{name} {shape}"),
                "a finite value > 0",
            )),
            ResponseShape::Gamma { scale: Some(scale), .. } if !positive(scale) => {
                Err(AppError::invalid(
                    "channel scale",
                    format!("{name} {scale}"),
                    "a finite value > 0",
                ))
            }
            _ => Ok(()),
        }
    }

    /// Gamma `(shape, scale)` with the scale resolved against `mean`.
    pub fn gamma_params(&self) -> Option<(f64, f64)> {
        match self.shape {
            ResponseShape::Gamma { shape, scale } => {
                Some((shape, scale.unwrap_or(self.mean / shape)))
            }
            ResponseShape::LogNormal { .. } => None,
        }
    }
}

/// Configuration of one support generation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupportConfig {
    pub n_samples: usize,
    pub channels: [ChannelParams; 4],
}

impl SupportConfig {
    pub fn new(n_samples: usize) -> Self {
        Self {
            n_samples,
            channels: ChannelParams::defaults(),
        }
    }

    /// Tickets drawn per channel. Remainder tickets are dropped.
    pub fn per_channel(&self) -> usize {
        self.n_samples / Channel::ALL.len()
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.n_samples == 0 {
            return Err(AppError::invalid(
                "n_samples",
                self.n_samples,
                "a positive integer",
            ));
        }
        for params in &self.channels {
            params.validate()?;
        }
        Ok(())
    }
}

impl Default for SupportConfig {
    fn default() -> Self {
        Self::new(DEFAULT_SUPPORT_SAMPLES)
    }
}

/// One synthetic support ticket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SupportRecord {
    pub channel: Channel,
    pub response_time_hours: f64,
    pub satisfaction: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SupportDataset {
    pub config: SupportConfig,
    pub records: Vec<SupportRecord>,
}

impl SupportDataset {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Response times of one channel, in generation order.
    pub fn response_times(&self, channel: Channel) -> Vec<f64> {
        self.records
            .iter()
            .filter(|r| r.channel == channel)
            .map(|r| r.response_time_hours)
            .collect()
    }

    /// Channels in order of first appearance.
    pub fn channels(&self) -> Vec<Channel> {
        let mut out = Vec::new();
        for r in &self.records {
            if !out.contains(&r.channel) {
                out.push(r.channel);
            }
        }
        out
    }
}

/// Strength of a correlation coefficient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CorrelationStrength {
    Weak,
    Moderate,
    Strong,
}

impl CorrelationStrength {
    pub fn classify(r: f64) -> Self {
        let abs = r.abs();
        if abs > 0.8 {
            CorrelationStrength::Strong
        } else if abs > 0.5 {
            CorrelationStrength::Moderate
        } else {
            CorrelationStrength::Weak
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CorrelationStrength::Weak => "weak",
            CorrelationStrength::Moderate => "moderate",
            CorrelationStrength::Strong => "strong",
        }
    }
}

/// Qualitative noise description of a linear configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoiseBand {
    Low,
    Moderate,
    High,
}

impl NoiseBand {
    pub fn classify(noise_level: f64) -> Self {
        if noise_level > 1.0 {
            NoiseBand::High
        } else if noise_level > 0.5 {
            NoiseBand::Moderate
        } else {
            NoiseBand::Low
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            NoiseBand::Low => "low",
            NoiseBand::Moderate => "moderate",
            NoiseBand::High => "high",
        }
    }
}

/// Least-squares line `y = intercept + slope * x`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineFit {
    pub slope: f64,
    pub intercept: f64,
}

/// `describe()`-style summary of one numeric column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColumnSummary {
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation; `None` for a single value.
    pub std: Option<f64>,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

/// Summary metrics of a linear dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearSummary {
    pub config: LinearConfig,
    pub correlation: f64,
    pub strength: CorrelationStrength,
    pub mean_y: f64,
    /// Population standard deviation of y.
    pub std_y: f64,
    pub noise_band: NoiseBand,
    pub fit: LineFit,
    /// Column name and summary, in dataset column order.
    pub describe: Vec<(String, ColumnSummary)>,
}

/// Response-time statistics of one channel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChannelStats {
    pub channel: Channel,
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    /// Sample standard deviation.
    pub std: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupportSummary {
    pub rows: usize,
    pub columns: usize,
    pub response_min: f64,
    pub response_max: f64,
    pub channels: Vec<ChannelStats>,
}

impl SupportSummary {
    pub fn channel(&self, channel: Channel) -> Option<&ChannelStats> {
        self.channels.iter().find(|s| s.channel == channel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn correlation_strength_thresholds() {
        assert_eq!(CorrelationStrength::classify(0.9), CorrelationStrength::Strong);
        assert_eq!(CorrelationStrength::classify(-0.9), CorrelationStrength::Strong);
        assert_eq!(CorrelationStrength::classify(0.6), CorrelationStrength::Moderate);
        assert_eq!(CorrelationStrength::classify(0.3), CorrelationStrength::Weak);
        assert_eq!(CorrelationStrength::classify(0.8), CorrelationStrength::Moderate);
        assert_eq!(CorrelationStrength::classify(0.5), CorrelationStrength::Weak);
    }

    #[test]
    fn noise_band_thresholds() {
        assert_eq!(NoiseBand::classify(1.5), NoiseBand::High);
        assert_eq!(NoiseBand::classify(1.0), NoiseBand::Moderate);
        assert_eq!(NoiseBand::classify(0.6), NoiseBand::Moderate);
        assert_eq!(NoiseBand::classify(0.5), NoiseBand::Low);
        assert_eq!(NoiseBand::classify(0.1), NoiseBand::Low);
    }

    #[test]
    fn channel_table_is_valid_and_ordered() {
        let config = SupportConfig::default();
        config.validate().unwrap();
        let order: Vec<Channel> = config.channels.iter().map(|c| c.channel).collect();
        assert_eq!(order, Channel::ALL.to_vec());
        assert_eq!(config.per_channel(), 300);
    }

    #[test]
    fn inverted_channel_bounds_are_rejected() {
        let mut config = SupportConfig::default();
        config.channels[2].min = 30.0;
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            AppError::InvalidConfiguration { parameter: "channel bounds", .. }
        ));
        assert!(err.to_string().contains("Phone"));
    }

    #[test]
    fn derived_gamma_scale_follows_the_mean() {
        let mut phone = ChannelParams::defaults()[2];
        assert_eq!(phone.gamma_params(), Some((3.0, 8.0 / 3.0)));
        phone.mean = 12.0;
        assert_eq!(phone.gamma_params(), Some((3.0, 4.0)));

        let live = ChannelParams::defaults()[0];
        assert_eq!(live.gamma_params(), Some((2.0, 1.2)));
        assert_eq!(ChannelParams::defaults()[1].gamma_params(), None);
    }

    #[test]
    fn bad_distribution_parameters_are_invalid_configuration() {
        let mut email = ChannelParams::defaults()[1];
        email.shape = ResponseShape::LogNormal { sigma: 0.0 };
        let err = email.validate().unwrap_err();
        assert!(matches!(err, AppError::InvalidConfiguration { parameter: "channel sigma", .. }));
        assert_eq!(err.exit_code(), 2);

        let mut social = ChannelParams::defaults()[3];
        social.shape = ResponseShape::Gamma { shape: -1.0, scale: None };
        assert!(matches!(
            social.validate(),
            Err(AppError::InvalidConfiguration { parameter: "channel shape", .. })
        ));

        social.shape = ResponseShape::Gamma { shape: 2.0, scale: Some(f64::NAN) };
        assert!(matches!(
            social.validate(),
            Err(AppError::InvalidConfiguration { parameter: "channel scale", .. })
        ));
    }

    #[test]
    fn zero_sample_size_is_rejected() {
        let err = LinearConfig { sample_size: 0, noise_level: 0.5 }
            .validate()
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidConfiguration { parameter: "sample_size", .. }));
    }

    #[test]
    fn zero_noise_is_allowed_negative_is_not() {
        LinearConfig { sample_size: 10, noise_level: 0.0 }.validate().unwrap();
        assert!(LinearConfig { sample_size: 10, noise_level: -0.1 }.validate().is_err());
        assert!(LinearConfig { sample_size: 10, noise_level: f64::NAN }.validate().is_err());
    }
}
