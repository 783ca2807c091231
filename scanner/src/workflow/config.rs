use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use sweepcore::prelude::*;

use crate::frontend::SynthConfig;

/// Full scan configuration; the defaults mirror the constants of the
/// legacy 380-385 MHz monitor.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    pub start_hz: f64,
    pub end_hz: f64,
    /// Explicit tuning points; when set they override the derived band plan.
    pub centers_hz: Option<Vec<f64>>,
    pub sample_rate_hz: f64,
    /// `None` selects automatic gain control.
    pub gain_db: Option<f32>,
    pub fft_size: usize,
    pub block_size: usize,
    pub dwell_secs: f64,
    pub settle_secs: f64,
    pub status_interval_secs: f64,
    pub remove_dc: bool,
    pub window: Option<WindowKind>,
    pub dc_mask_halfwidth: Option<usize>,
    pub floor_method: FloorMethod,
    pub floor_smoothing_alpha: Option<f32>,
    pub policy: DetectionPolicy,
    pub synth: SynthConfig,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            start_hz: 380e6,
            end_hz: 385e6,
            centers_hz: None,
            sample_rate_hz: 2.4e6,
            gain_db: Some(40.0),
            fft_size: 2048,
            block_size: 128 * 1024,
            dwell_secs: 3.0,
            settle_secs: 0.1,
            status_interval_secs: 0.5,
            remove_dc: true,
            window: None,
            dc_mask_halfwidth: Some(2),
            floor_method: FloorMethod::Median,
            floor_smoothing_alpha: None,
            policy: DetectionPolicy::AdaptiveFloor { margin_db: 5.0 },
            synth: SynthConfig::default(),
        }
    }
}

impl ScanConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading scan config {}", path_ref.display()))?;
        let config: ScanConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing scan config {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn from_args(fft_size: usize, dwell_secs: f64) -> Self {
        Self {
            fft_size,
            dwell_secs,
            ..Default::default()
        }
    }

    pub fn gain(&self) -> Gain {
        match self.gain_db {
            Some(db) => Gain::Db(db),
            None => Gain::Auto,
        }
    }

    pub fn plan(&self) -> SweepPlan {
        let dwell = Duration::from_secs_f64(self.dwell_secs);
        let settle = Duration::from_secs_f64(self.settle_secs);
        match &self.centers_hz {
            Some(centers) => SweepPlan::from_centers(centers, dwell, settle),
            None => SweepPlan::from_band(
                self.start_hz,
                self.end_hz,
                self.sample_rate_hz,
                dwell,
                settle,
            ),
        }
    }

    pub fn spectrum_config(&self) -> SpectrumConfig {
        SpectrumConfig {
            fft_size: self.fft_size,
            remove_dc: self.remove_dc,
            window: self.window,
            dc_mask_halfwidth: self.dc_mask_halfwidth,
        }
    }

    pub fn tracker(&self) -> BaselineTracker {
        match self.floor_smoothing_alpha {
            Some(alpha) => BaselineTracker::with_smoothing(self.floor_method, alpha),
            None => BaselineTracker::new(self.floor_method),
        }
    }

    pub fn sweeper_config(&self) -> SweeperConfig {
        SweeperConfig {
            sample_rate_hz: self.sample_rate_hz,
            gain: self.gain(),
            block_size: self.block_size,
        }
    }

    pub fn status_interval(&self) -> Duration {
        Duration::from_secs_f64(self.status_interval_secs)
    }
}
