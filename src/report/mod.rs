//! Summary statistics and formatted terminal output.
//!
//! `summarize_*` turn a dataset into read-only metrics; `format` renders them.

use crate::domain::{
    Channel, ChannelStats, CorrelationStrength, LinearDataset, LinearSummary, NoiseBand,
    SupportDataset, SupportSummary,
};
use crate::error::AppError;
use crate::math::{describe, fit_line, mean, median, pearson, std_dev};

pub mod bundle;
pub mod format;

pub use format::*;

/// Column names of the linear dataset, in table order.
pub const LINEAR_COLUMNS: [&str; 3] = ["x_variable", "y_variable", "residuals"];

/// Compute every linear metric from scratch.
///
/// Fails with `InsufficientData` for fewer than two rows, where correlation
/// and the line fit are undefined.
pub fn summarize_linear(dataset: &LinearDataset) -> Result<LinearSummary, AppError> {
    if dataset.is_empty() {
        return Err(AppError::insufficient("linear summary", "empty dataset"));
    }

    let xs = dataset.xs();
    let ys = dataset.ys();
    let residuals = dataset.residuals();

    let correlation = pearson(&xs, &ys)?;
    let mean_y = mean(&ys)?;
    let std_y = std_dev(&ys, 0)?;
    let fit = fit_line(&xs, &ys)?;

    let columns = LINEAR_COLUMNS
        .iter()
        .zip([&xs, &ys, &residuals])
        .map(|(name, col)| Ok((name.to_string(), describe(col)?)))
        .collect::<Result<Vec<_>, AppError>>()?;

    Ok(LinearSummary {
        config: dataset.config,
        correlation,
        strength: CorrelationStrength::classify(correlation),
        mean_y,
        std_y,
        noise_band: NoiseBand::classify(dataset.config.noise_level),
        fit,
        describe: columns,
    })
}

/// Per-channel mean/median/sample-std of response times.
///
/// Channels are reported in declaration order; a channel with fewer than two
/// tickets makes the sample std undefined and fails the whole summary.
pub fn summarize_support(dataset: &SupportDataset) -> Result<SupportSummary, AppError> {
    if dataset.is_empty() {
        return Err(AppError::insufficient("support summary", "empty dataset"));
    }

    let mut channels = Vec::with_capacity(Channel::ALL.len());
    for channel in Channel::ALL {
        let times = dataset.response_times(channel);
        if times.is_empty() {
            continue;
        }
        channels.push(ChannelStats {
            channel,
            count: times.len(),
            mean: mean(&times)?,
            median: median(&times)?,
            std: std_dev(&times, 1)?,
        });
    }

    let (mut response_min, mut response_max) = (f64::INFINITY, f64::NEG_INFINITY);
    for r in &dataset.records {
        response_min = response_min.min(r.response_time_hours);
        response_max = response_max.max(r.response_time_hours);
    }

    Ok(SupportSummary {
        rows: dataset.len(),
        columns: 3,
        response_min,
        response_max,
        channels,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{LinearConfig, LinearRecord, SupportConfig, SupportRecord};

    fn linear_from(points: &[(f64, f64)], noise_level: f64) -> LinearDataset {
        LinearDataset {
            config: LinearConfig {
                sample_size: points.len(),
                noise_level,
            },
            records: points
                .iter()
                .map(|&(x, y)| LinearRecord {
                    x,
                    y,
                    residual: y - (2.0 * x + 1.0),
                })
                .collect(),
        }
    }

    #[test]
    fn empty_dataset_is_insufficient() {
        let empty = linear_from(&[], 0.5);
        assert!(matches!(
            summarize_linear(&empty),
            Err(AppError::InsufficientData { .. })
        ));

        let support = SupportDataset {
            config: SupportConfig::new(3),
            records: Vec::new(),
        };
        assert!(matches!(
            summarize_support(&support),
            Err(AppError::InsufficientData { .. })
        ));
    }

    #[test]
    fn single_row_is_insufficient() {
        let one = linear_from(&[(0.0, 1.0)], 0.5);
        assert!(matches!(
            summarize_linear(&one),
            Err(AppError::InsufficientData { statistic: "correlation", .. })
        ));
    }

    #[test]
    fn engineered_correlation_is_classified() {
        // dx = [-1, 0, 1], dy = [-1, 1, 0] -> r = 0.5 exactly, on the weak side.
        let data = linear_from(&[(1.0, 1.0), (2.0, 3.0), (3.0, 2.0)], 0.7);
        let summary = summarize_linear(&data).unwrap();
        assert_eq!(summary.correlation, 0.5);
        assert_eq!(summary.strength, CorrelationStrength::Weak);
        assert_eq!(summary.noise_band, NoiseBand::Moderate);
        assert_eq!(summary.mean_y, 2.0);
        assert!((summary.std_y - (2.0_f64 / 3.0).sqrt()).abs() < 1e-12);
    }

    /// Four points whose x/y correlation is exactly `r`: `y = 10 + dx + beta * v`
    /// with `v` orthogonal to `dx`.
    fn linear_with_correlation(r: f64) -> LinearDataset {
        let dx = [-1.5, -0.5, 0.5, 1.5];
        let v = [1.0, -1.0, -1.0, 1.0];
        let beta = (5.0 * (1.0 - r * r) / (4.0 * r * r)).sqrt();
        let points: Vec<(f64, f64)> = (0..4)
            .map(|i| (i as f64, 10.0 + dx[i] + beta * v[i]))
            .collect();
        linear_from(&points, 0.5)
    }

    #[test]
    fn strength_bands_follow_engineered_correlations() {
        for (r, expected) in [
            (0.9, CorrelationStrength::Strong),
            (0.6, CorrelationStrength::Moderate),
            (0.3, CorrelationStrength::Weak),
        ] {
            let summary = summarize_linear(&linear_with_correlation(r)).unwrap();
            assert!((summary.correlation - r).abs() < 1e-9, "r = {}", summary.correlation);
            assert_eq!(summary.strength, expected, "r = {r}");
        }
    }

    #[test]
    fn describe_covers_all_columns() {
        let data = linear_from(&[(0.0, 1.0), (5.0, 11.0), (10.0, 21.0)], 0.0);
        let summary = summarize_linear(&data).unwrap();
        let names: Vec<&str> = summary.describe.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, LINEAR_COLUMNS.to_vec());
        assert_eq!(summary.describe[0].1.max, 10.0);
        assert_eq!(summary.describe[2].1.mean, 0.0);
        assert!((summary.fit.slope - 2.0).abs() < 1e-9);
        assert_eq!(summary.correlation, 1.0);
    }

    #[test]
    fn support_stats_group_by_channel() {
        let rec = |channel, t| SupportRecord {
            channel,
            response_time_hours: t,
            satisfaction: 4.0,
        };
        let data = SupportDataset {
            config: SupportConfig::new(8),
            records: vec![
                rec(Channel::LiveChat, 1.0),
                rec(Channel::LiveChat, 3.0),
                rec(Channel::Email, 10.0),
                rec(Channel::Email, 20.0),
                rec(Channel::Phone, 4.0),
                rec(Channel::Phone, 6.0),
                rec(Channel::SocialMedia, 2.0),
                rec(Channel::SocialMedia, 2.0),
            ],
        };
        let summary = summarize_support(&data).unwrap();
        assert_eq!(summary.rows, 8);
        assert_eq!(summary.response_min, 1.0);
        assert_eq!(summary.response_max, 20.0);

        let email = summary.channel(Channel::Email).unwrap();
        assert_eq!(email.mean, 15.0);
        assert_eq!(email.median, 15.0);
        assert!((email.std - 50.0_f64.sqrt()).abs() < 1e-12);
        assert_eq!(summary.channel(Channel::SocialMedia).unwrap().std, 0.0);

        let order: Vec<Channel> = summary.channels.iter().map(|s| s.channel).collect();
        assert_eq!(order, Channel::ALL.to_vec());
    }
}
