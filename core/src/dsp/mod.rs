pub mod spectrum;
pub mod stats;

pub use spectrum::{
    FrequencyScale, SpectrumConfig, SpectrumEstimator, WindowKind, DC_MASK_SENTINEL_DB,
};
pub use stats::StatsHelper;
