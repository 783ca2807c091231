use serde::{Deserialize, Serialize};

use crate::detect::baseline::BaselineState;
use crate::dsp::spectrum::FrequencyScale;
use crate::dsp::stats::StatsHelper;

/// Decision for one spectrum. Produced fresh per block, never retained
/// beyond reporting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectionVerdict {
    pub is_hit: bool,
    pub peak_power_db: f32,
    pub peak_frequency_hz: f64,
    /// How far the peak cleared (or missed) the active decision rule.
    pub margin_db: f32,
}

/// Interchangeable decision strategies; exactly one is active per run.
///
/// Every rule uses a strict inequality, so a peak exactly at its threshold
/// is a miss. The legacy scripts each hardcoded one of these.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum DetectionPolicy {
    /// Hit iff the peak exceeds a static threshold.
    FixedThreshold { threshold_db: f32 },
    /// Hit iff the peak exceeds the tracked noise floor by a margin.
    AdaptiveFloor { margin_db: f32 },
    /// Hit iff the peak stands out from the current spectrum's mean.
    SnrRatio { snr_threshold_db: f32 },
    /// Hit iff the peak both clears a floor and jumped relative to the
    /// previous block. Never fires on the first block: no peak history.
    BurstDelta {
        burst_floor_db: f32,
        delta_threshold_db: f32,
    },
}

impl DetectionPolicy {
    /// Degenerate spectra (empty, or all bins NaN) yield a non-hit rather
    /// than an error; acquisition failures are surfaced upstream.
    pub fn evaluate(
        &self,
        spectrum: &[f32],
        baseline: &BaselineState,
        scale: &FrequencyScale,
    ) -> DetectionVerdict {
        let (peak_bin, peak_power_db) = match StatsHelper::peak(spectrum) {
            Some(peak) => peak,
            None => {
                return DetectionVerdict {
                    is_hit: false,
                    peak_power_db: f32::MIN,
                    peak_frequency_hz: scale.center_frequency_hz,
                    margin_db: 0.0,
                }
            }
        };
        let peak_frequency_hz = scale.bin_frequency_hz(peak_bin);

        let (is_hit, margin_db) = match *self {
            DetectionPolicy::FixedThreshold { threshold_db } => {
                let margin = peak_power_db - threshold_db;
                (peak_power_db > threshold_db, margin)
            }
            DetectionPolicy::AdaptiveFloor { margin_db } => {
                let clearance = peak_power_db - baseline.noise_floor_db;
                (clearance > margin_db, clearance)
            }
            DetectionPolicy::SnrRatio { snr_threshold_db } => {
                let snr = peak_power_db - StatsHelper::mean(spectrum);
                (snr > snr_threshold_db, snr)
            }
            DetectionPolicy::BurstDelta {
                burst_floor_db,
                delta_threshold_db,
            } => match baseline.previous_peak_db {
                Some(previous) => {
                    let delta = peak_power_db - previous;
                    (
                        peak_power_db > burst_floor_db && delta > delta_threshold_db,
                        delta,
                    )
                }
                None => (false, 0.0),
            },
        };

        DetectionVerdict {
            is_hit,
            peak_power_db,
            peak_frequency_hz,
            margin_db,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::baseline::{BaselineTracker, FloorMethod};

    fn scale() -> FrequencyScale {
        FrequencyScale::new(383_750_000.0, 2_400_000.0, 8)
    }

    fn flat_with_peak(floor: f32, peak: f32, peak_bin: usize) -> Vec<f32> {
        let mut spectrum = vec![floor; 101];
        spectrum[peak_bin] = peak;
        spectrum
    }

    #[test]
    fn fixed_threshold_is_strict_at_the_boundary() {
        let policy = DetectionPolicy::FixedThreshold { threshold_db: -20.0 };
        let state = BaselineState::default();

        let at = policy.evaluate(&flat_with_peak(-80.0, -20.0, 3), &state, &scale());
        assert!(!at.is_hit);

        let above = policy.evaluate(&flat_with_peak(-80.0, -19.9, 3), &state, &scale());
        assert!(above.is_hit);
        assert_eq!(above.peak_power_db, -19.9);
    }

    #[test]
    fn adaptive_floor_hits_one_db_over_margin() {
        let policy = DetectionPolicy::AdaptiveFloor { margin_db: 5.0 };
        let tracker = BaselineTracker::new(FloorMethod::Median);

        let hot = flat_with_peak(-80.0, -74.0, 10);
        let state = tracker.update(&hot, BaselineState::default());
        assert!(policy.evaluate(&hot, &state, &scale()).is_hit);

        let cold = flat_with_peak(-80.0, -76.0, 10);
        let state = tracker.update(&cold, BaselineState::default());
        assert!(!policy.evaluate(&cold, &state, &scale()).is_hit);
    }

    #[test]
    fn snr_policy_uses_current_spectrum_mean() {
        let policy = DetectionPolicy::SnrRatio { snr_threshold_db: 10.0 };
        let state = BaselineState::default();

        let spectrum = flat_with_peak(-80.0, -60.0, 0);
        let mean = crate::dsp::stats::StatsHelper::mean(&spectrum);
        let verdict = policy.evaluate(&spectrum, &state, &scale());
        assert!((verdict.margin_db - (-60.0 - mean)).abs() < 1e-4);
        assert!(verdict.is_hit);
    }

    #[test]
    fn burst_delta_never_fires_without_history() {
        let policy = DetectionPolicy::BurstDelta {
            burst_floor_db: -40.0,
            delta_threshold_db: 10.0,
        };
        let tracker = BaselineTracker::new(FloorMethod::Median);

        let first_block = flat_with_peak(-80.0, -10.0, 5);
        let state = tracker.update(&first_block, BaselineState::default());
        assert!(!policy.evaluate(&first_block, &state, &scale()).is_hit);

        // Second block jumps well past the delta threshold and the floor.
        let quiet = flat_with_peak(-80.0, -60.0, 5);
        let state = tracker.update(&quiet, BaselineState::default());
        let burst = flat_with_peak(-80.0, -30.0, 5);
        let state = tracker.update(&burst, state);
        assert!(policy.evaluate(&burst, &state, &scale()).is_hit);
    }

    #[test]
    fn peak_frequency_uses_lowest_tied_bin() {
        let policy = DetectionPolicy::FixedThreshold { threshold_db: -50.0 };
        let mut spectrum = vec![-80.0; 8];
        spectrum[2] = -10.0;
        spectrum[5] = -10.0;
        let verdict = policy.evaluate(&spectrum, &BaselineState::default(), &scale());
        assert_eq!(verdict.peak_frequency_hz, scale().bin_frequency_hz(2));
    }

    #[test]
    fn empty_spectrum_degrades_to_a_miss() {
        let policy = DetectionPolicy::AdaptiveFloor { margin_db: 5.0 };
        let verdict = policy.evaluate(&[], &BaselineState::default(), &scale());
        assert!(!verdict.is_hit);
    }

    #[test]
    fn policy_deserializes_from_tagged_config() {
        let yaml = "mode: burst_delta\nburst_floor_db: -40.0\ndelta_threshold_db: 12.0\n";
        let policy: DetectionPolicy = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(
            policy,
            DetectionPolicy::BurstDelta {
                burst_floor_db: -40.0,
                delta_threshold_db: 12.0,
            }
        );
    }
}
