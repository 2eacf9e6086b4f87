//! Synthetic linear-relationship data: `y = 2x + 1 + noise_level * z`.

use rand::Rng;
use rand_distr::{Distribution, Normal};
use tracing::debug;

use crate::domain::{LinearConfig, LinearDataset, LinearRecord, X_MAX, X_MIN, true_line};
use crate::error::AppError;

/// Generate a linear dataset of exactly `config.sample_size` records.
///
/// Noise is drawn in record order from `rng`, so two calls with identically
/// seeded generators yield bit-identical datasets.
pub fn generate_linear<R: Rng + ?Sized>(
    config: &LinearConfig,
    rng: &mut R,
) -> Result<LinearDataset, AppError> {
    config.validate()?;

    let normal = Normal::new(0.0, 1.0)
        .map_err(|e| AppError::Distribution(format!("Noise distribution error: {e}")))?;

    let xs = linspace(X_MIN, X_MAX, config.sample_size);
    let mut records = Vec::with_capacity(xs.len());
    for x in xs {
        let z = normal.sample(rng);
        let y = true_line(x) + config.noise_level * z;
        records.push(LinearRecord {
            x,
            y,
            residual: y - true_line(x),
        });
    }

    debug!(
        sample_size = config.sample_size,
        noise_level = config.noise_level,
        "generated linear dataset"
    );

    Ok(LinearDataset {
        config: *config,
        records,
    })
}

/// `n` evenly spaced points over `[start, stop]`.
///
/// The last point is exactly `stop` when `n > 1`; a single point sits at `start`.
pub fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n - 1) as f64;
            let mut out: Vec<f64> = (0..n).map(|i| start + i as f64 * step).collect();
            out[n - 1] = stop;
            out
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn generate(sample_size: usize, noise_level: f64, seed: u64) -> LinearDataset {
        let mut rng = StdRng::seed_from_u64(seed);
        generate_linear(&LinearConfig { sample_size, noise_level }, &mut rng).unwrap()
    }

    #[test]
    fn linspace_endpoints() {
        assert_eq!(linspace(0.0, 10.0, 1), vec![0.0]);
        assert_eq!(linspace(0.0, 10.0, 2), vec![0.0, 10.0]);
        assert_eq!(linspace(0.0, 10.0, 5), vec![0.0, 2.5, 5.0, 7.5, 10.0]);
    }

    #[test]
    fn single_point_sits_at_zero() {
        let data = generate(1, 0.5, 42);
        assert_eq!(data.len(), 1);
        assert_eq!(data.records[0].x, 0.0);
    }

    #[test]
    fn zero_sample_size_is_invalid() {
        let mut rng = StdRng::seed_from_u64(42);
        let err = generate_linear(&LinearConfig { sample_size: 0, noise_level: 0.5 }, &mut rng)
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidConfiguration { parameter: "sample_size", .. }));
    }

    #[test]
    fn zero_noise_gives_exact_line() {
        let data = generate(50, 0.0, 7);
        for r in &data.records {
            assert_eq!(r.residual, 0.0);
            assert_eq!(r.y, true_line(r.x));
        }
    }

    #[test]
    fn same_seed_is_bit_identical() {
        let a = generate(200, 1.3, 42);
        let b = generate(200, 1.3, 42);
        let bits = |d: &LinearDataset| -> Vec<(u64, u64, u64)> {
            d.records
                .iter()
                .map(|r| (r.x.to_bits(), r.y.to_bits(), r.residual.to_bits()))
                .collect()
        };
        assert_eq!(bits(&a), bits(&b));

        let c = generate(200, 1.3, 43);
        assert_ne!(bits(&a), bits(&c));
    }

    #[test]
    fn dataset_carries_its_config() {
        let data = generate(25, 0.4, 1);
        assert_eq!(data.config, LinearConfig { sample_size: 25, noise_level: 0.4 });
    }

    proptest! {
        #[test]
        fn records_cover_domain_with_exact_residuals(
            sample_size in 2usize..1000,
            noise_level in 0.0f64..2.0,
            seed in any::<u64>(),
        ) {
            let data = generate(sample_size, noise_level, seed);
            prop_assert_eq!(data.len(), sample_size);
            prop_assert_eq!(data.records[0].x, X_MIN);
            prop_assert_eq!(data.records[sample_size - 1].x, X_MAX);
            for w in data.records.windows(2) {
                prop_assert!(w[0].x < w[1].x);
            }
            for r in &data.records {
                prop_assert_eq!(r.residual, r.y - (2.0 * r.x + 1.0));
            }
        }
    }
}
