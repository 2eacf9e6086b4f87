//! Parameter source: bounded, stepped sliders for the linear dashboard.
//!
//! A slider stores its position as a step index, so repeated stepping never
//! accumulates floating-point drift (`0.1 + 0.1 + 0.1` stays `0.3`).
//! Setting an out-of-range value is an error, not a silent clamp; stepping
//! past either end simply stops there.

use crate::domain::LinearConfig;
use crate::error::AppError;

#[derive(Debug, Clone, PartialEq)]
pub struct Slider {
    /// Parameter name used in error messages.
    pub name: &'static str,
    /// Human-readable label for front-ends.
    pub label: &'static str,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    index: u64,
}

impl Slider {
    pub fn new(
        name: &'static str,
        label: &'static str,
        min: f64,
        max: f64,
        step: f64,
        value: f64,
    ) -> Result<Self, AppError> {
        if !(min.is_finite() && max.is_finite() && step > 0.0 && min < max) {
            return Err(AppError::invalid(
                name,
                format!("[{min}, {max}] step {step}"),
                "finite bounds with min < max and step > 0",
            ));
        }
        let mut slider = Self {
            name,
            label,
            min,
            max,
            step,
            index: 0,
        };
        slider.set(value)?;
        Ok(slider)
    }

    pub fn value(&self) -> f64 {
        snap(self.min + self.index as f64 * self.step)
    }

    /// Move to `value`, which must lie on the step grid within `[min, max]`.
    pub fn set(&mut self, value: f64) -> Result<(), AppError> {
        let pos = (value - self.min) / self.step;
        let index = pos.round();
        let on_grid = (pos - index).abs() < 1e-6;
        if !(value.is_finite() && on_grid && index >= 0.0 && index <= self.max_index() as f64) {
            return Err(AppError::invalid(self.name, value, self.expected()));
        }
        self.index = index as u64;
        Ok(())
    }

    /// Move by `delta` steps, stopping at either end.
    pub fn step_by(&mut self, delta: i64) {
        let next = self.index as i64 + delta;
        self.index = next.clamp(0, self.max_index() as i64) as u64;
    }

    /// Description of the valid range, as shown in errors.
    pub fn expected(&self) -> String {
        format!("a value in [{}, {}] with step {}", self.min, self.max, self.step)
    }

    fn max_index(&self) -> u64 {
        ((self.max - self.min) / self.step).round() as u64
    }
}

// Drop representation noise from `min + k * step`.
fn snap(v: f64) -> f64 {
    (v * 1e9).round() / 1e9
}

/// The two sliders of the linear dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearParams {
    pub sample_size: Slider,
    pub noise_level: Slider,
}

impl LinearParams {
    pub const SAMPLE_SIZE_RANGE: (f64, f64) = (10.0, 1000.0);
    pub const NOISE_LEVEL_RANGE: (f64, f64) = (0.1, 2.0);

    pub fn new(sample_size: usize, noise_level: f64) -> Result<Self, AppError> {
        let (s_min, s_max) = Self::SAMPLE_SIZE_RANGE;
        let (n_min, n_max) = Self::NOISE_LEVEL_RANGE;
        Ok(Self {
            sample_size: Slider::new(
                "sample_size",
                "Sample Size",
                s_min,
                s_max,
                1.0,
                sample_size as f64,
            )?,
            noise_level: Slider::new("noise_level", "Noise Level", n_min, n_max, 0.1, noise_level)?,
        })
    }

    pub fn config(&self) -> LinearConfig {
        LinearConfig {
            sample_size: self.sample_size.value() as usize,
            noise_level: self.noise_level.value(),
        }
    }
}

impl Default for LinearParams {
    fn default() -> Self {
        let (s_min, s_max) = Self::SAMPLE_SIZE_RANGE;
        let (n_min, n_max) = Self::NOISE_LEVEL_RANGE;
        Self {
            sample_size: Slider {
                name: "sample_size",
                label: "Sample Size",
                min: s_min,
                max: s_max,
                step: 1.0,
                index: 90,
            },
            noise_level: Slider {
                name: "noise_level",
                label: "Noise Level",
                min: n_min,
                max: n_max,
                step: 0.1,
                index: 4,
            },
        }
    }
}
