use chrono::{DateTime, Utc};
use serde::Serialize;

/// A positive verdict, resolved to an absolute frequency and forwarded to
/// the indicator sink.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetectionEvent {
    pub timestamp: DateTime<Utc>,
    pub frequency_hz: f64,
    pub power_db: f32,
    pub margin_db: f32,
    pub window_label: Option<String>,
}

/// Periodic liveness report carrying the latest peak, emitted even when
/// nothing is detected.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusEvent {
    pub timestamp: DateTime<Utc>,
    pub frequency_hz: f64,
    pub power_db: f32,
}

/// Best-effort notification of a fatal condition, sent before shutdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorNotice {
    pub code: String,
    pub description: String,
}

/// Everything the reporter can queue for the indicator task.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ScanEvent {
    Detection(DetectionEvent),
    Status(StatusEvent),
    Error(ErrorNotice),
}
