use std::sync::atomic::AtomicBool;

use anyhow::Context;
use crossbeam_channel::Sender;
use sweepcore::prelude::*;

use crate::frontend::SynthFrontend;
use crate::workflow::config::ScanConfig;

/// Wires a scan config into a runnable sweeper over the synthetic
/// offline frontend.
#[derive(Clone)]
pub struct Runner {
    config: ScanConfig,
}

impl Runner {
    pub fn new(config: ScanConfig) -> Self {
        Self { config }
    }

    pub fn run(
        &self,
        events: Sender<ScanEvent>,
        stop: &AtomicBool,
    ) -> anyhow::Result<MetricsSnapshot> {
        let frontend = SynthFrontend::new(self.config.synth.clone(), self.config.fft_size);
        self.run_with_frontend(frontend, events, stop)
    }

    /// Split out so tests can wrap the frontend.
    pub fn run_with_frontend<F: RadioFrontend>(
        &self,
        frontend: F,
        events: Sender<ScanEvent>,
        stop: &AtomicBool,
    ) -> anyhow::Result<MetricsSnapshot> {
        let sweeper = Sweeper::new(
            frontend,
            self.config.plan(),
            self.config.sweeper_config(),
            SpectrumEstimator::new(self.config.spectrum_config()),
            self.config.tracker(),
            self.config.policy,
            EventReporter::new(events, self.config.status_interval()),
        )
        .context("building sweeper")?;
        sweeper.run(stop).context("running sweep loop")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::{SynthConfig, ToneSpec};
    use num_complex::Complex32;
    use std::sync::atomic::Ordering;
    use std::sync::Arc;

    /// Delegating wrapper that flips the stop flag after a fixed number
    /// of reads, so sweeps end deterministically.
    struct StopAfterReads<F: RadioFrontend> {
        inner: F,
        stop: Arc<AtomicBool>,
        reads: usize,
        limit: usize,
    }

    impl<F: RadioFrontend> RadioFrontend for StopAfterReads<F> {
        fn set_center_frequency(&mut self, hz: f64) -> SweepResult<()> {
            self.inner.set_center_frequency(hz)
        }
        fn set_sample_rate(&mut self, hz: f64) -> SweepResult<()> {
            self.inner.set_sample_rate(hz)
        }
        fn set_gain(&mut self, gain: Gain) -> SweepResult<()> {
            self.inner.set_gain(gain)
        }
        fn read_samples(&mut self, count: usize) -> SweepResult<Vec<Complex32>> {
            let block = self.inner.read_samples(count)?;
            self.reads += 1;
            if self.reads >= self.limit {
                self.stop.store(true, Ordering::Relaxed);
            }
            Ok(block)
        }
        fn close(&mut self) -> SweepResult<()> {
            self.inner.close()
        }
    }

    fn scenario_config() -> ScanConfig {
        ScanConfig {
            centers_hz: Some(vec![381.25e6, 383.75e6]),
            sample_rate_hz: 2.4e6,
            fft_size: 2048,
            block_size: 2048,
            dwell_secs: 0.05,
            settle_secs: 0.0,
            status_interval_secs: 3600.0,
            remove_dc: false,
            window: None,
            dc_mask_halfwidth: None,
            policy: DetectionPolicy::FixedThreshold { threshold_db: -20.0 },
            synth: SynthConfig {
                tones: vec![ToneSpec {
                    frequency_hz: 384.05e6,
                    power_db: -5.0,
                }],
                noise_amplitude: 0.0,
                seed: 7,
                // Longer than the dwell: exactly one read per window.
                read_delay_secs: 0.06,
            },
            ..Default::default()
        }
    }

    #[test]
    fn tone_in_the_second_window_yields_exactly_one_detection() {
        let config = scenario_config();
        let runner = Runner::new(config.clone());
        let stop = Arc::new(AtomicBool::new(false));
        let frontend = StopAfterReads {
            inner: SynthFrontend::new(config.synth.clone(), config.fft_size),
            stop: stop.clone(),
            reads: 0,
            limit: 2,
        };

        let (events, queue) = event_queue(64);
        let snapshot = runner.run_with_frontend(frontend, events, &stop).unwrap();
        assert_eq!(snapshot.blocks, 2);
        assert_eq!(snapshot.detections, 1);

        let mut detections = Vec::new();
        while let Ok(event) = queue.try_recv() {
            if let ScanEvent::Detection(detection) = event {
                detections.push(detection);
            }
        }
        assert_eq!(detections.len(), 1);
        let detection = &detections[0];
        let bin_width = 2.4e6 / 2048.0;
        assert!((detection.frequency_hz - (383.75e6 + 0.3e6)).abs() <= bin_width);
        assert!((detection.power_db - -5.0).abs() < 0.5);
    }

    #[test]
    fn preset_stop_flag_ends_the_run_without_reads() {
        let runner = Runner::new(scenario_config());
        let stop = AtomicBool::new(true);
        let (events, _queue) = event_queue(4);
        let snapshot = runner.run(events, &stop).unwrap();
        assert_eq!(snapshot.blocks, 0);
        assert_eq!(snapshot.detections, 0);
    }
}
