use std::time::Duration;

/// One tuning point of the sweep and how long to linger there.
#[derive(Debug, Clone)]
pub struct SweepWindow {
    pub center_frequency_hz: f64,
    pub label: Option<String>,
    pub dwell: Duration,
    /// Wait after retuning before the first read, to let the PLL settle.
    pub settle: Duration,
}

/// Ordered, immutable list of sweep windows; the scheduler cycles it
/// forever, wrapping from the last window back to the first.
#[derive(Debug, Clone)]
pub struct SweepPlan {
    windows: Vec<SweepWindow>,
}

impl SweepPlan {
    /// Covers `[start_hz, end_hz)` in windows one sample-rate wide, centers
    /// at `start + rate/2`, `start + 3*rate/2`, ... while below `end_hz`.
    pub fn from_band(
        start_hz: f64,
        end_hz: f64,
        sample_rate_hz: f64,
        dwell: Duration,
        settle: Duration,
    ) -> Self {
        let mut windows = Vec::new();
        let mut center = start_hz + sample_rate_hz / 2.0;
        while center < end_hz {
            windows.push(SweepWindow {
                center_frequency_hz: center,
                label: None,
                dwell,
                settle,
            });
            center += sample_rate_hz;
        }
        Self { windows }
    }

    /// Explicit tuning points, e.g. two overlapping windows covering a band
    /// the derived plan would split differently.
    pub fn from_centers(centers_hz: &[f64], dwell: Duration, settle: Duration) -> Self {
        let windows = centers_hz
            .iter()
            .map(|&center_frequency_hz| SweepWindow {
                center_frequency_hz,
                label: None,
                dwell,
                settle,
            })
            .collect();
        Self { windows }
    }

    pub fn windows(&self) -> &[SweepWindow] {
        &self.windows
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }
}
