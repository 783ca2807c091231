//! Convenience re-exports for pipeline consumers.

pub use crate::detect::{
    BaselineState, BaselineTracker, DetectionPolicy, DetectionVerdict, FloorMethod,
};
pub use crate::dsp::{FrequencyScale, SpectrumConfig, SpectrumEstimator, WindowKind};
pub use crate::frontend::{Gain, RadioFrontend};
pub use crate::report::{
    event_queue, run_indicator, DetectionEvent, ErrorNotice, EventReporter, IndicatorSink,
    ScanEvent, StatusEvent, DEFAULT_QUEUE_DEPTH,
};
pub use crate::sweep::{SweepPlan, SweepWindow, Sweeper, SweeperConfig};
pub use crate::telemetry::{MetricsRecorder, MetricsSnapshot};
pub use crate::{SweepError, SweepResult};
