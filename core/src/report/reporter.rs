use std::time::{Duration, Instant};

use chrono::Utc;
use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use log::warn;

use crate::detect::policy::DetectionVerdict;
use crate::report::events::{DetectionEvent, ErrorNotice, ScanEvent, StatusEvent};
use crate::sweep::plan::SweepWindow;
use crate::SweepError;

/// Default depth of the indicator queue.
pub const DEFAULT_QUEUE_DEPTH: usize = 64;

/// Capability implemented by display surfaces: text console, OLED bitmap,
/// LED driver. Rendering details are entirely the sink's concern.
pub trait IndicatorSink {
    fn show_detection(&mut self, event: &DetectionEvent) -> Result<(), SweepError>;
    fn show_status(&mut self, event: &StatusEvent) -> Result<(), SweepError>;
    fn show_error(&mut self, notice: &ErrorNotice) -> Result<(), SweepError>;
}

/// Creates the bounded hand-off between the acquisition loop and the
/// indicator task.
pub fn event_queue(depth: usize) -> (Sender<ScanEvent>, Receiver<ScanEvent>) {
    bounded(depth)
}

/// Fire-and-forget forwarding of pipeline events. A slow or absent
/// indicator never blocks acquisition: a full queue drops the event.
pub struct EventReporter {
    events: Sender<ScanEvent>,
    status_interval: Duration,
    last_status: Instant,
}

impl EventReporter {
    pub fn new(events: Sender<ScanEvent>, status_interval: Duration) -> Self {
        Self {
            events,
            status_interval,
            last_status: Instant::now(),
        }
    }

    pub fn detection(&self, window: &SweepWindow, verdict: &DetectionVerdict) {
        self.push(ScanEvent::Detection(DetectionEvent {
            timestamp: Utc::now(),
            frequency_hz: verdict.peak_frequency_hz,
            power_db: verdict.peak_power_db,
            margin_db: verdict.margin_db,
            window_label: window.label.clone(),
        }));
    }

    /// Emits a status event once the wall-clock interval has elapsed; the
    /// cadence is independent of dwell timing.
    pub fn maybe_status(&mut self, frequency_hz: f64, power_db: f32) {
        if self.last_status.elapsed() < self.status_interval {
            return;
        }
        self.last_status = Instant::now();
        self.push(ScanEvent::Status(StatusEvent {
            timestamp: Utc::now(),
            frequency_hz,
            power_db,
        }));
    }

    pub fn error_notice(&self, code: &str, description: &str) {
        self.push(ScanEvent::Error(ErrorNotice {
            code: code.to_string(),
            description: description.to_string(),
        }));
    }

    fn push(&self, event: ScanEvent) {
        match self.events.try_send(event) {
            Ok(()) => {}
            Err(TrySendError::Full(event)) => {
                warn!("indicator queue full, dropping {:?}", event);
            }
            Err(TrySendError::Disconnected(_)) => {
                warn!("indicator queue disconnected");
            }
        }
    }
}

/// Drains the queue into a sink until every sender is gone. Sink failures
/// are logged and never reach the acquisition loop.
pub fn run_indicator<S: IndicatorSink>(events: Receiver<ScanEvent>, sink: &mut S) {
    for event in events.iter() {
        let rendered = match &event {
            ScanEvent::Detection(detection) => sink.show_detection(detection),
            ScanEvent::Status(status) => sink.show_status(status),
            ScanEvent::Error(notice) => sink.show_error(notice),
        };
        if let Err(error) = rendered {
            warn!("{}", error);
        }
    }
}
