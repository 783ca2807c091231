use std::f32::consts::PI;
use std::sync::Arc;

use num_complex::Complex32;
use rustfft::{Fft, FftPlanner};
use serde::{Deserialize, Serialize};

use crate::{SweepError, SweepResult};

/// Sentinel written over masked DC bins; low enough that no peak search
/// can mistake the receiver's zero-frequency artifact for a signal.
pub const DC_MASK_SENTINEL_DB: f32 = -100.0;

/// Added before the logarithm so an all-zero block stays finite.
const LOG_EPSILON: f32 = 1e-12;

/// Tapering window applied before the transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowKind {
    /// Raised cosine; trades resolution for reduced spectral leakage.
    Hann,
}

/// Independent toggles of the estimator. Each exists because the legacy
/// script variants disagreed on whether to apply it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpectrumConfig {
    pub fft_size: usize,
    /// Subtract the block mean before transforming; the frontend hardware
    /// injects a spurious component at zero frequency.
    pub remove_dc: bool,
    pub window: Option<WindowKind>,
    /// Overwrite the `2k+1` bins centered on zero frequency with
    /// [`DC_MASK_SENTINEL_DB`].
    pub dc_mask_halfwidth: Option<usize>,
}

impl Default for SpectrumConfig {
    fn default() -> Self {
        Self {
            fft_size: 2048,
            remove_dc: true,
            window: None,
            dc_mask_halfwidth: None,
        }
    }
}

/// Maps zero-frequency-centered spectrum bins to absolute frequency.
///
/// Bin `i` covers `center + (i - fft_size/2) * sample_rate / fft_size`, so
/// the center bin `fft_size/2` is the tuned frequency itself.
#[derive(Debug, Clone, Copy)]
pub struct FrequencyScale {
    pub center_frequency_hz: f64,
    pub sample_rate_hz: f64,
    pub fft_size: usize,
}

impl FrequencyScale {
    pub fn new(center_frequency_hz: f64, sample_rate_hz: f64, fft_size: usize) -> Self {
        Self {
            center_frequency_hz,
            sample_rate_hz,
            fft_size,
        }
    }

    pub fn bin_frequency_hz(&self, bin: usize) -> f64 {
        let half = (self.fft_size / 2) as f64;
        self.center_frequency_hz + (bin as f64 - half) * self.sample_rate_hz / self.fft_size as f64
    }

    pub fn bin_width_hz(&self) -> f64 {
        self.sample_rate_hz / self.fft_size as f64
    }
}

/// Turns raw complex sample blocks into zero-frequency-centered power
/// spectra in dB, convention `10 * log10(|X[k]|^2 / fft_size + eps)`.
///
/// The rustfft plan is built once and reused for every block.
pub struct SpectrumEstimator {
    config: SpectrumConfig,
    fft: Arc<dyn Fft<f32>>,
    taper: Option<Vec<f32>>,
}

impl SpectrumEstimator {
    pub fn new(config: SpectrumConfig) -> Self {
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(config.fft_size);
        let taper = config.window.map(|kind| build_taper(kind, config.fft_size));
        Self { config, fft, taper }
    }

    pub fn fft_size(&self) -> usize {
        self.config.fft_size
    }

    /// Fails with `InsufficientSamples` when the block is shorter than the
    /// transform; extra samples beyond `fft_size` are ignored.
    pub fn estimate(&self, samples: &[Complex32]) -> SweepResult<Vec<f32>> {
        let size = self.config.fft_size;
        if samples.len() < size {
            return Err(SweepError::InsufficientSamples {
                needed: size,
                got: samples.len(),
            });
        }

        let mut buffer: Vec<Complex32> = samples[..size].to_vec();

        if self.config.remove_dc {
            let mean = buffer.iter().sum::<Complex32>() / size as f32;
            for value in buffer.iter_mut() {
                *value -= mean;
            }
        }
        if let Some(taper) = &self.taper {
            for (value, &weight) in buffer.iter_mut().zip(taper) {
                *value *= weight;
            }
        }

        self.fft.process(&mut buffer);

        // fftshift while converting, so bin size/2 is zero frequency.
        let mut spectrum = vec![0.0f32; size];
        for (index, value) in buffer.iter().enumerate() {
            let power = value.norm_sqr() / size as f32;
            spectrum[(index + size / 2) % size] = 10.0 * (power + LOG_EPSILON).log10();
        }

        if let Some(halfwidth) = self.config.dc_mask_halfwidth {
            let center = size / 2;
            let low = center.saturating_sub(halfwidth);
            let high = (center + halfwidth).min(size - 1);
            for bin in spectrum.iter_mut().take(high + 1).skip(low) {
                *bin = DC_MASK_SENTINEL_DB;
            }
        }

        Ok(spectrum)
    }
}

fn build_taper(kind: WindowKind, size: usize) -> Vec<f32> {
    match kind {
        WindowKind::Hann => {
            let denominator = size.saturating_sub(1).max(1) as f32;
            (0..size)
                .map(|index| 0.5 - 0.5 * (2.0 * PI * index as f32 / denominator).cos())
                .collect()
        }
    }
}
