//! Descriptive statistics over plain `f64` columns.
//!
//! All functions return `AppError::InsufficientData` instead of NaN when a
//! statistic is undefined for the input (empty column, too few values for the
//! requested degrees of freedom, zero variance for correlation).

use crate::domain::ColumnSummary;
use crate::error::AppError;

/// Arithmetic mean.
pub fn mean(values: &[f64]) -> Result<f64, AppError> {
    if values.is_empty() {
        return Err(AppError::insufficient("mean", "empty column"));
    }
    Ok(values.iter().sum::<f64>() / values.len() as f64)
}

/// Standard deviation with `ddof` delta degrees of freedom.
///
/// `ddof = 0` is the population estimator, `ddof = 1` the sample estimator.
pub fn std_dev(values: &[f64], ddof: usize) -> Result<f64, AppError> {
    if values.len() <= ddof {
        return Err(AppError::insufficient(
            "standard deviation",
            format!("{} value(s) with ddof={ddof}", values.len()),
        ));
    }
    let m = mean(values)?;
    let ss: f64 = values.iter().map(|v| (v - m) * (v - m)).sum();
    Ok((ss / (values.len() - ddof) as f64).sqrt())
}

/// Median (50th percentile).
pub fn median(values: &[f64]) -> Result<f64, AppError> {
    if values.is_empty() {
        return Err(AppError::insufficient("median", "empty column"));
    }
    Ok(percentile(&sorted(values), 0.5))
}

/// Pearson correlation coefficient between two equally long columns.
pub fn pearson(xs: &[f64], ys: &[f64]) -> Result<f64, AppError> {
    if xs.len() != ys.len() {
        return Err(AppError::insufficient(
            "correlation",
            format!("column lengths differ ({} vs {})", xs.len(), ys.len()),
        ));
    }
    if xs.len() < 2 {
        return Err(AppError::insufficient(
            "correlation",
            format!("{} row(s), need at least 2", xs.len()),
        ));
    }

    let mx = mean(xs)?;
    let my = mean(ys)?;
    let mut sxy = 0.0;
    let mut sxx = 0.0;
    let mut syy = 0.0;
    for (x, y) in xs.iter().zip(ys) {
        let dx = x - mx;
        let dy = y - my;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }

    let denom = (sxx * syy).sqrt();
    if !(denom.is_finite() && denom > 0.0) {
        return Err(AppError::insufficient("correlation", "zero variance column"));
    }
    // Rounding can push |r| a hair past 1 for exact lines.
    Ok((sxy / denom).clamp(-1.0, 1.0))
}

/// Sorted copy of a column (total order, NaN last).
pub fn sorted(values: &[f64]) -> Vec<f64> {
    let mut out = values.to_vec();
    out.sort_by(|a, b| a.total_cmp(b));
    out
}

/// Percentile `q ∈ [0, 1]` of an already sorted, non-empty column.
///
/// Linear interpolation between the two closest order statistics.
pub fn percentile(sorted: &[f64], q: f64) -> f64 {
    let pos = q.clamp(0.0, 1.0) * (sorted.len() as f64 - 1.0);
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    sorted[lo] + frac * (sorted[hi] - sorted[lo])
}

/// Count, mean, sample std, min, quartiles and max of a column.
pub fn describe(values: &[f64]) -> Result<ColumnSummary, AppError> {
    if values.is_empty() {
        return Err(AppError::insufficient("describe", "empty column"));
    }
    let s = sorted(values);
    Ok(ColumnSummary {
        count: values.len(),
        mean: mean(values)?,
        std: std_dev(values, 1).ok(),
        min: s[0],
        q25: percentile(&s, 0.25),
        median: percentile(&s, 0.5),
        q75: percentile(&s, 0.75),
        max: s[s.len() - 1],
    })
}

/// One histogram bin `[lo, hi)`; the last bin also includes `hi`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramBin {
    pub lo: f64,
    pub hi: f64,
    pub count: usize,
}

/// Equal-width histogram over the column's range.
///
/// A constant column gets a unit-wide range centered on its value.
pub fn histogram(values: &[f64], bins: usize) -> Result<Vec<HistogramBin>, AppError> {
    if values.is_empty() {
        return Err(AppError::insufficient("histogram", "empty column"));
    }
    let bins = bins.max(1);
    let s = sorted(values);
    let (mut lo, mut hi) = (s[0], s[s.len() - 1]);
    if hi <= lo {
        lo -= 0.5;
        hi += 0.5;
    }
    let width = (hi - lo) / bins as f64;

    let mut out: Vec<HistogramBin> = (0..bins)
        .map(|i| HistogramBin {
            lo: lo + i as f64 * width,
            hi: if i + 1 == bins { hi } else { lo + (i + 1) as f64 * width },
            count: 0,
        })
        .collect();

    for &v in values {
        let idx = (((v - lo) / width).floor() as usize).min(bins - 1);
        out[idx].count += 1;
    }
    Ok(out)
}

/// Box-plot geometry of a column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxStats {
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    /// Smallest observation within `q1 - 1.5 * IQR`.
    pub lower_whisker: f64,
    /// Largest observation within `q3 + 1.5 * IQR`.
    pub upper_whisker: f64,
}

pub fn box_stats(values: &[f64]) -> Result<BoxStats, AppError> {
    if values.is_empty() {
        return Err(AppError::insufficient("box plot", "empty column"));
    }
    let s = sorted(values);
    let q1 = percentile(&s, 0.25);
    let q3 = percentile(&s, 0.75);
    let iqr = q3 - q1;
    let lo_fence = q1 - 1.5 * iqr;
    let hi_fence = q3 + 1.5 * iqr;

    let lower_whisker = s.iter().copied().find(|&v| v >= lo_fence).unwrap_or(q1);
    let upper_whisker = s.iter().rev().copied().find(|&v| v <= hi_fence).unwrap_or(q3);

    Ok(BoxStats {
        q1,
        median: percentile(&s, 0.5),
        q3,
        lower_whisker,
        upper_whisker,
    })
}
