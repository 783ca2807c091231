use num_complex::Complex32;

use crate::SweepResult;

/// Gain setting for the radio frontend.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gain {
    Auto,
    Db(f32),
}

/// Capability consumed by the sweep scheduler: a tunable narrowband
/// receiver that hands back blocks of complex baseband samples.
///
/// Implementations are not assumed shareable across threads; the scheduler
/// owns the handle exclusively and calls [`RadioFrontend::close`] exactly
/// once on every exit path.
pub trait RadioFrontend {
    fn set_center_frequency(&mut self, hz: f64) -> SweepResult<()>;
    fn set_sample_rate(&mut self, hz: f64) -> SweepResult<()>;
    fn set_gain(&mut self, gain: Gain) -> SweepResult<()>;
    /// Blocks for the duration of the hardware transfer. May return fewer
    /// samples than requested on a short read.
    fn read_samples(&mut self, count: usize) -> SweepResult<Vec<Complex32>>;
    fn close(&mut self) -> SweepResult<()>;
}
