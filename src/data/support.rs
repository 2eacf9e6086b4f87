//! Synthetic customer-support tickets, one contiguous block per channel.

use rand::Rng;
use rand_distr::{Distribution, Gamma, LogNormal, Normal};
use tracing::{debug, warn};

use crate::domain::{
    Channel, ChannelParams, ResponseShape, SATISFACTION_SPREAD, SupportConfig, SupportDataset,
    SupportRecord,
};
use crate::error::AppError;

/// Generate `per_channel()` tickets for each channel, in declaration order.
///
/// Raw response times are hard-clamped into the channel bounds (values outside
/// the range land exactly on the bound). Satisfaction is drawn afterwards, one
/// ticket at a time, and is not clamped.
pub fn generate_support<R: Rng + ?Sized>(
    config: &SupportConfig,
    rng: &mut R,
) -> Result<SupportDataset, AppError> {
    config.validate()?;

    let per_channel = config.per_channel();
    let dropped = config.n_samples % Channel::ALL.len();
    if dropped > 0 {
        warn!(
            n_samples = config.n_samples,
            dropped, "n_samples is not a multiple of the channel count; remainder tickets dropped"
        );
    }

    let mut records = Vec::with_capacity(per_channel * config.channels.len());
    for params in &config.channels {
        let raw = draw_raw_times(params, per_channel, rng)?;

        let mut clamped = 0usize;
        for t in raw {
            let response_time_hours = t.clamp(params.min, params.max);
            if response_time_hours != t {
                clamped += 1;
            }

            let center = satisfaction_center(response_time_hours);
            let satisfaction = Normal::new(center, SATISFACTION_SPREAD)
                .map_err(|e| {
                    AppError::Distribution(format!("Satisfaction distribution error: {e}"))
                })?
                .sample(rng);

            records.push(SupportRecord {
                channel: params.channel,
                response_time_hours,
                satisfaction,
            });
        }

        debug!(
            channel = params.channel.display_name(),
            tickets = per_channel,
            clamped,
            "generated channel block"
        );
    }

    Ok(SupportDataset {
        config: config.clone(),
        records,
    })
}

/// Center of the satisfaction draw: `max(1, 5 - t / 10)`.
pub fn satisfaction_center(response_time_hours: f64) -> f64 {
    (5.0 - response_time_hours / 10.0).max(1.0)
}

fn draw_raw_times<R: Rng + ?Sized>(
    params: &ChannelParams,
    n: usize,
    rng: &mut R,
) -> Result<Vec<f64>, AppError> {
    let name = params.channel.display_name();
    match params.shape {
        ResponseShape::LogNormal { sigma } => {
            let dist = LogNormal::new(params.mean.ln(), sigma).map_err(|e| {
                AppError::Distribution(format!("{name} log-normal distribution error: {e}"))
            })?;
            Ok((0..n).map(|_| dist.sample(rng)).collect())
        }
        ResponseShape::Gamma { .. } => {
            let (shape, scale) = params
                .gamma_params()
                .ok_or_else(|| AppError::Distribution(format!("{name} has no gamma shape")))?;
            let dist = Gamma::new(shape, scale).map_err(|e| {
                AppError::Distribution(format!("{name} gamma distribution error: {e}"))
            })?;
            Ok((0..n).map(|_| dist.sample(rng)).collect())
        }
    }
}
