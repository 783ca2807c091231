//! Core sweep and ping-detection pipeline for the pingsweep band monitor.
//!
//! The modules collapse the legacy scanner-script variants into a single
//! parameterized pipeline: spectrum estimation, baseline tracking, a family
//! of interchangeable detection policies, and a sweep scheduler that drives
//! a [`frontend::RadioFrontend`] across the configured windows.

pub mod detect;
pub mod dsp;
pub mod frontend;
pub mod prelude;
pub mod report;
pub mod sweep;
pub mod telemetry;

/// Common error type for the sweep pipeline.
#[derive(thiserror::Error, Debug)]
pub enum SweepError {
    #[error("insufficient samples: needed {needed}, got {got}")]
    InsufficientSamples { needed: usize, got: usize },
    #[error("frontend failure: {0}")]
    Frontend(String),
    #[error("acquisition failure: {0}")]
    Acquisition(String),
    #[error("indicator sink unavailable: {0}")]
    Sink(String),
}

pub type SweepResult<T> = Result<T, SweepError>;
