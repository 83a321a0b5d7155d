//! Status snapshot — one poll's worth of telemetry from the device.

use serde::{Deserialize, Serialize};

use crate::fault::FaultClass;

/// Telemetry returned by `GET /api/v1/status`.
///
/// Produced fresh every poll and superseded entirely by the next one;
/// snapshots are never diffed or merged. The training fields are defaulted
/// so firmware builds without the training endpoints still parse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusSnapshot {
    /// Vibration RMS, in g.
    pub rms: f64,
    /// Vibration peak, in g.
    pub peak: f64,
    /// Crest factor (peak / RMS).
    pub crest: f64,
    /// Board temperature, in °C.
    pub temp: f64,
    /// Raw classifier code; see [`FaultClass::from_code`].
    pub ai_class: i64,
    /// Classifier confidence for the reported class, 0–1.
    pub ai_conf: f64,
    /// Device-local wall-clock time, `%Y-%m-%d %H:%M:%S`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    /// Whether a training capture is currently running.
    #[serde(default)]
    pub train_active: bool,
    /// Samples captured so far in the running capture.
    #[serde(default)]
    pub train_count: u32,
    /// Capture target sample count.
    #[serde(default)]
    pub train_target: u32,
}

impl StatusSnapshot {
    /// The display class for the reported `ai_class` code.
    #[must_use]
    pub fn fault(&self) -> FaultClass {
        FaultClass::from_code(self.ai_class)
    }

    /// Confidence as a whole percentage.
    ///
    /// `round(ai_conf * 100)` for confidences in `[0, 1]`; values outside
    /// that range are clamped to `[0, 100]` so gauge widths stay bounded.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn confidence_percent(&self) -> u8 {
        (self.ai_conf * 100.0).round().clamp(0.0, 100.0) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(ai_conf: f64) -> StatusSnapshot {
        StatusSnapshot {
            rms: 0.512,
            peak: 1.204,
            crest: 2.35,
            temp: 41.2,
            ai_class: 2,
            ai_conf,
            timestamp: None,
            train_active: false,
            train_count: 0,
            train_target: 0,
        }
    }

    #[test]
    fn should_parse_full_firmware_payload() {
        let json = r#"{
            "timestamp": "2026-08-07 10:15:00",
            "rms": 0.512, "peak": 1.204, "crest": 2.35, "temp": 41.2,
            "ai_class": 2, "ai_conf": 0.87,
            "train_active": true, "train_count": 12, "train_target": 100
        }"#;
        let status: StatusSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(status.timestamp.as_deref(), Some("2026-08-07 10:15:00"));
        assert!(status.train_active);
        assert_eq!(status.train_count, 12);
        assert_eq!(status.train_target, 100);
        assert_eq!(status.fault(), FaultClass::BearingFault);
    }

    #[test]
    fn should_parse_minimal_payload_without_training_fields() {
        let json =
            r#"{"rms":0.1,"peak":0.2,"crest":2.0,"temp":25.0,"ai_class":0,"ai_conf":0.99}"#;
        let status: StatusSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(status.timestamp, None);
        assert!(!status.train_active);
        assert_eq!(status.train_target, 0);
        assert_eq!(status.fault(), FaultClass::Healthy);
    }

    #[test]
    fn should_reject_payload_missing_a_metric() {
        let json = r#"{"rms":0.1,"peak":0.2,"crest":2.0,"temp":25.0,"ai_class":0}"#;
        let result: Result<StatusSnapshot, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn should_round_confidence_to_whole_percent() {
        assert_eq!(sample(0.87).confidence_percent(), 87);
        assert_eq!(sample(0.874).confidence_percent(), 87);
        assert_eq!(sample(0.875).confidence_percent(), 88);
        assert_eq!(sample(0.0).confidence_percent(), 0);
        assert_eq!(sample(1.0).confidence_percent(), 100);
    }

    #[test]
    fn should_clamp_out_of_range_confidence() {
        assert_eq!(sample(-0.5).confidence_percent(), 0);
        assert_eq!(sample(1.5).confidence_percent(), 100);
    }
}
