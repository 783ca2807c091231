use std::f64::consts::TAU;
use std::thread;
use std::time::Duration;

use num_complex::Complex32;
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use sweepcore::frontend::{Gain, RadioFrontend};
use sweepcore::{SweepError, SweepResult};

/// A continuous-wave tone injected into the synthetic stream. `power_db`
/// is the expected reported peak for the configured transform size.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToneSpec {
    pub frequency_hz: f64,
    pub power_db: f32,
}

/// Settings for the offline frontend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthConfig {
    pub tones: Vec<ToneSpec>,
    pub noise_amplitude: f32,
    pub seed: u64,
    /// Models the hardware transfer time of a real read.
    pub read_delay_secs: f64,
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            tones: Vec::new(),
            noise_amplitude: 0.001,
            seed: 0,
            read_delay_secs: 0.05,
        }
    }
}

/// Deterministic stand-in for radio hardware: seeded uniform noise plus
/// the configured tones, visible only while they fall inside the tuned
/// span `center +/- rate/2`.
pub struct SynthFrontend {
    config: SynthConfig,
    fft_size: usize,
    center_frequency_hz: f64,
    sample_rate_hz: f64,
    rng: StdRng,
    closed: bool,
}

impl SynthFrontend {
    pub fn new(config: SynthConfig, fft_size: usize) -> Self {
        let rng = StdRng::seed_from_u64(config.seed);
        Self {
            config,
            fft_size,
            center_frequency_hz: 0.0,
            sample_rate_hz: 0.0,
            rng,
            closed: false,
        }
    }

    fn tone_amplitude(&self, power_db: f32) -> f32 {
        // A tone of amplitude A reports 10*log10(A^2 * fft_size) at its bin.
        (10f32.powf(power_db / 10.0) / self.fft_size as f32).sqrt()
    }
}

impl RadioFrontend for SynthFrontend {
    fn set_center_frequency(&mut self, hz: f64) -> SweepResult<()> {
        self.center_frequency_hz = hz;
        Ok(())
    }

    fn set_sample_rate(&mut self, hz: f64) -> SweepResult<()> {
        self.sample_rate_hz = hz;
        Ok(())
    }

    fn set_gain(&mut self, _gain: Gain) -> SweepResult<()> {
        Ok(())
    }

    fn read_samples(&mut self, count: usize) -> SweepResult<Vec<Complex32>> {
        if self.closed {
            return Err(SweepError::Frontend("device already closed".into()));
        }
        if self.sample_rate_hz <= 0.0 {
            return Err(SweepError::Frontend("sample rate not configured".into()));
        }
        if self.config.read_delay_secs > 0.0 {
            thread::sleep(Duration::from_secs_f64(self.config.read_delay_secs));
        }

        let half_span = self.sample_rate_hz / 2.0;
        let visible: Vec<(f64, f32)> = self
            .config
            .tones
            .iter()
            .filter(|tone| (tone.frequency_hz - self.center_frequency_hz).abs() < half_span)
            .map(|tone| {
                (
                    tone.frequency_hz - self.center_frequency_hz,
                    self.tone_amplitude(tone.power_db),
                )
            })
            .collect();

        let noise = self.config.noise_amplitude;
        let mut block = Vec::with_capacity(count);
        for index in 0..count {
            let mut sample = if noise > 0.0 {
                Complex32::new(
                    self.rng.gen_range(-noise..noise),
                    self.rng.gen_range(-noise..noise),
                )
            } else {
                Complex32::new(0.0, 0.0)
            };
            let time = index as f64 / self.sample_rate_hz;
            for &(offset_hz, amplitude) in &visible {
                let phase = TAU * offset_hz * time;
                sample += Complex32::new(
                    amplitude * phase.cos() as f32,
                    amplitude * phase.sin() as f32,
                );
            }
            block.push(sample);
        }
        Ok(block)
    }

    fn close(&mut self) -> SweepResult<()> {
        if self.closed {
            return Err(SweepError::Frontend("device already closed".into()));
        }
        self.closed = true;
        Ok(())
    }
}
