pub mod events;
pub mod reporter;

pub use events::{DetectionEvent, ErrorNotice, ScanEvent, StatusEvent};
pub use reporter::{event_queue, run_indicator, EventReporter, IndicatorSink, DEFAULT_QUEUE_DEPTH};
