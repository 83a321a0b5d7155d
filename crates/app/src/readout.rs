//! Metrics view model — fixed-precision display strings for one snapshot.

use bbdash_domain::fault::Rgb;
use bbdash_domain::status::StatusSnapshot;

/// Training-capture progress shown on the training panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrainingProgress {
    /// Whether a capture is running.
    pub active: bool,
    /// Rows captured so far.
    pub count: u32,
    /// Capture target.
    pub target: u32,
}

/// Display-ready rendering of one [`StatusSnapshot`].
///
/// All fixed-precision formatting lives here so rendering adapters print
/// these strings verbatim and tests never need a terminal.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsReadout {
    /// RMS with 3 decimal places.
    pub rms: String,
    /// Peak with 3 decimal places.
    pub peak: String,
    /// Crest factor with 2 decimal places.
    pub crest: String,
    /// Temperature with 1 decimal place and a °C suffix.
    pub temp: String,
    /// Fault label from the fixed class table.
    pub fault_label: &'static str,
    /// Color matching the fault label.
    pub fault_color: Rgb,
    /// Confidence bar width, 0–100.
    pub confidence_percent: u8,
    /// Confidence text, e.g. `87%`.
    pub confidence_text: String,
    /// Device-local timestamp, when the firmware reports one.
    pub timestamp: Option<String>,
    /// Training-capture progress.
    pub training: TrainingProgress,
}

impl From<&StatusSnapshot> for MetricsReadout {
    fn from(status: &StatusSnapshot) -> Self {
        let fault = status.fault();
        let percent = status.confidence_percent();
        Self {
            rms: format!("{:.3}", status.rms),
            peak: format!("{:.3}", status.peak),
            crest: format!("{:.2}", status.crest),
            temp: format!("{:.1} °C", status.temp),
            fault_label: fault.label(),
            fault_color: fault.color(),
            confidence_percent: percent,
            confidence_text: format!("{percent}%"),
            timestamp: status.timestamp.clone(),
            training: TrainingProgress {
                active: status.train_active,
                count: status.train_count,
                target: status.train_target,
            },
        }
    }
}
