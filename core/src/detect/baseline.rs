use serde::{Deserialize, Serialize};

use crate::dsp::stats::StatsHelper;

/// How the per-spectrum noise floor is estimated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FloorMethod {
    /// Robust against an occasional strong bin.
    Median,
    Mean,
}

/// Noise floor and one block of peak history, carried across pipeline
/// iterations within a run. Mutated only by the acquisition thread.
///
/// `previous_peak_db` is the peak of the block before the current one,
/// which is what the burst-delta policy compares against, while
/// `noise_floor_db` always reflects the current block.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BaselineState {
    pub noise_floor_db: f32,
    pub previous_peak_db: Option<f32>,
    pub current_peak_db: Option<f32>,
}

/// Derives the reference level consumed by the adaptive policies.
pub struct BaselineTracker {
    method: FloorMethod,
    smoothing_alpha: Option<f32>,
}

impl BaselineTracker {
    pub fn new(method: FloorMethod) -> Self {
        Self {
            method,
            smoothing_alpha: None,
        }
    }

    /// Documented extension: exponentially smooth the floor across blocks.
    /// `alpha` is the weight of the current block's estimate.
    pub fn with_smoothing(method: FloorMethod, alpha: f32) -> Self {
        Self {
            method,
            smoothing_alpha: Some(alpha.clamp(0.0, 1.0)),
        }
    }

    pub fn update(&self, spectrum: &[f32], state: BaselineState) -> BaselineState {
        let raw_floor = match self.method {
            FloorMethod::Median => StatsHelper::median(spectrum),
            FloorMethod::Mean => StatsHelper::mean(spectrum),
        };
        let noise_floor_db = match self.smoothing_alpha {
            // No smoothing on the very first block; there is nothing to blend with.
            Some(alpha) if state.current_peak_db.is_some() => {
                alpha * raw_floor + (1.0 - alpha) * state.noise_floor_db
            }
            _ => raw_floor,
        };

        BaselineState {
            noise_floor_db,
            previous_peak_db: state.current_peak_db,
            current_peak_db: StatsHelper::peak(spectrum).map(|(_, value)| value),
        }
    }
}
