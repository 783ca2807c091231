pub mod baseline;
pub mod policy;

pub use baseline::{BaselineState, BaselineTracker, FloorMethod};
pub use policy::{DetectionPolicy, DetectionVerdict};
