//! Device commands — the `POST /api/v1/command` wire format.

use serde::Serialize;

/// Operating mode of the device's classifier pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceMode {
    /// Normal inference; telemetry carries classifier verdicts.
    Production,
    /// Capture mode; the device appends labelled feature rows on request.
    Training,
}

/// Commands accepted by the device's command endpoint.
///
/// Serializes to the firmware's flat `{"cmd": ...}` shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum DeviceCommand {
    /// Switch between production inference and training capture.
    SetMode {
        /// Target mode.
        mode: DeviceMode,
    },
    /// Begin appending labelled feature rows to the on-device dataset.
    StartCapture {
        /// Class label to record with each row.
        label: i64,
        /// How many rows to capture.
        samples: u32,
        /// Capture rate in Hz (the device clamps high rates).
        freq_hz: f64,
    },
    /// Delete the on-device training dataset.
    ClearDataset,
}
