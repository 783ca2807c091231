use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Instant;

use crate::detect::baseline::{BaselineState, BaselineTracker};
use crate::detect::policy::DetectionPolicy;
use crate::dsp::spectrum::{FrequencyScale, SpectrumEstimator};
use crate::frontend::{Gain, RadioFrontend};
use crate::report::reporter::EventReporter;
use crate::sweep::plan::SweepPlan;
use crate::telemetry::log::LogManager;
use crate::telemetry::metrics::{MetricsRecorder, MetricsSnapshot};
use crate::{SweepError, SweepResult};

/// Consecutive short reads tolerated before the run is declared unhealthy.
const MAX_CONSECUTIVE_SHORT_READS: usize = 8;

/// Acquisition settings that are uniform across windows.
#[derive(Debug, Clone)]
pub struct SweeperConfig {
    pub sample_rate_hz: f64,
    pub gain: Gain,
    pub block_size: usize,
}

/// Single-threaded sweep state machine: tune, settle, dwell, advance, wrap.
///
/// Owns the frontend exclusively. [`Sweeper::run`] consumes the sweeper and
/// closes the frontend exactly once no matter how the loop ends: clean stop,
/// frontend failure, or acquisition escalation.
pub struct Sweeper<F: RadioFrontend> {
    frontend: F,
    plan: SweepPlan,
    config: SweeperConfig,
    estimator: SpectrumEstimator,
    tracker: BaselineTracker,
    policy: DetectionPolicy,
    reporter: EventReporter,
    state: BaselineState,
    metrics: MetricsRecorder,
    logger: LogManager,
}

impl<F: RadioFrontend> Sweeper<F> {
    pub fn new(
        frontend: F,
        plan: SweepPlan,
        config: SweeperConfig,
        estimator: SpectrumEstimator,
        tracker: BaselineTracker,
        policy: DetectionPolicy,
        reporter: EventReporter,
    ) -> SweepResult<Self> {
        if plan.is_empty() {
            return Err(SweepError::Acquisition("sweep plan has no windows".into()));
        }
        if config.block_size < estimator.fft_size() {
            return Err(SweepError::Acquisition(format!(
                "block size {} is smaller than the fft size {}",
                config.block_size,
                estimator.fft_size()
            )));
        }
        Ok(Self {
            frontend,
            plan,
            config,
            estimator,
            tracker,
            policy,
            reporter,
            state: BaselineState::default(),
            metrics: MetricsRecorder::new(),
            logger: LogManager::new(),
        })
    }

    /// Runs until `stop` is observed or a frontend failure occurs. An
    /// operator stop is a clean shutdown; a frontend error is reported to
    /// the indicator best-effort and then propagated.
    pub fn run(mut self, stop: &AtomicBool) -> SweepResult<MetricsSnapshot> {
        let outcome = self.sweep(stop);
        if let Err(error) = &outcome {
            self.metrics.record_error();
            self.reporter.error_notice("SWEEP", &error.to_string());
        }
        let closed = self.frontend.close();
        let snapshot = self.metrics.snapshot();
        outcome.and(closed)?;
        Ok(snapshot)
    }

    fn sweep(&mut self, stop: &AtomicBool) -> SweepResult<()> {
        self.frontend.set_sample_rate(self.config.sample_rate_hz)?;
        self.frontend.set_gain(self.config.gain)?;
        loop {
            for index in 0..self.plan.len() {
                if stop.load(Ordering::Relaxed) {
                    return Ok(());
                }
                self.visit_window(index, stop)?;
            }
        }
    }

    fn visit_window(&mut self, index: usize, stop: &AtomicBool) -> SweepResult<()> {
        let window = self.plan.windows()[index].clone();
        self.frontend
            .set_center_frequency(window.center_frequency_hz)?;
        if !window.settle.is_zero() {
            thread::sleep(window.settle);
        }
        self.logger.record(&format!(
            "monitoring window {:.3} MHz +/-{:.1} MHz",
            window.center_frequency_hz / 1e6,
            self.config.sample_rate_hz / 2e6
        ));

        let scale = FrequencyScale::new(
            window.center_frequency_hz,
            self.config.sample_rate_hz,
            self.estimator.fft_size(),
        );
        let mut consecutive_short_reads = 0usize;
        let dwell_started = Instant::now();

        // The blocking read paces the loop; no extra sleep is needed.
        while dwell_started.elapsed() < window.dwell {
            if stop.load(Ordering::Relaxed) {
                return Ok(());
            }
            let samples = self.frontend.read_samples(self.config.block_size)?;
            self.metrics.record_block();

            let spectrum = match self.estimator.estimate(&samples) {
                Ok(spectrum) => {
                    consecutive_short_reads = 0;
                    spectrum
                }
                Err(SweepError::InsufficientSamples { needed, got }) => {
                    consecutive_short_reads += 1;
                    self.metrics.record_skipped();
                    self.logger.record_warning(&format!(
                        "short read ({} of {} samples), skipping block",
                        got, needed
                    ));
                    if consecutive_short_reads >= MAX_CONSECUTIVE_SHORT_READS {
                        return Err(SweepError::Acquisition(format!(
                            "{} consecutive short reads",
                            consecutive_short_reads
                        )));
                    }
                    continue;
                }
                Err(other) => return Err(other),
            };

            self.state = self.tracker.update(&spectrum, self.state);
            let verdict = self.policy.evaluate(&spectrum, &self.state, &scale);
            if verdict.is_hit {
                self.metrics.record_detection();
                self.logger.record(&format!(
                    "ping {:.3} MHz | {:.1} dB",
                    verdict.peak_frequency_hz / 1e6,
                    verdict.peak_power_db
                ));
                self.reporter.detection(&window, &verdict);
            }
            self.reporter.maybe_status(window.center_frequency_hz, verdict.peak_power_db);
        }
        Ok(())
    }
}
