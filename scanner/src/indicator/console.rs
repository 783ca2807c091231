use sweepcore::report::{DetectionEvent, ErrorNotice, IndicatorSink, StatusEvent};
use sweepcore::SweepError;

/// Text sink keeping the legacy console output shape.
pub struct ConsoleIndicator;

impl ConsoleIndicator {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ConsoleIndicator {
    fn default() -> Self {
        Self::new()
    }
}

impl IndicatorSink for ConsoleIndicator {
    fn show_detection(&mut self, event: &DetectionEvent) -> Result<(), SweepError> {
        match &event.window_label {
            Some(label) => println!(
                "Ping [{}]: {:.3} MHz | {:.1} dB",
                label,
                event.frequency_hz / 1e6,
                event.power_db
            ),
            None => println!(
                "Ping: {:.3} MHz | {:.1} dB",
                event.frequency_hz / 1e6,
                event.power_db
            ),
        }
        Ok(())
    }

    fn show_status(&mut self, event: &StatusEvent) -> Result<(), SweepError> {
        println!(
            "Listening {:.3} MHz | peak {:.1} dB",
            event.frequency_hz / 1e6,
            event.power_db
        );
        Ok(())
    }

    fn show_error(&mut self, notice: &ErrorNotice) -> Result<(), SweepError> {
        eprintln!("ERROR: {} {}", notice.code, notice.description);
        Ok(())
    }
}
