//! Device configuration — the record behind `GET`/`POST /api/v1/config`.

use serde::{Deserialize, Serialize};

/// Configuration stored on the device.
///
/// `wifi_pass` is write-only: the device never returns it on a read, and it
/// is omitted from outgoing payloads when `None` so an unchanged password
/// leaves the stored secret untouched. Defaults mirror the firmware's
/// factory values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceConfig {
    /// WiFi network to join.
    pub wifi_ssid: String,
    /// WiFi password; `None` means "do not change".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wifi_pass: Option<String>,
    /// MQTT broker URI.
    pub mqtt_uri: String,
    /// MQTT broker port.
    pub mqtt_port: u16,
    /// MQTT username (may be empty).
    pub mqtt_user: String,
    /// Telemetry publish topic.
    pub mqtt_topic: String,
    /// Accelerometer sample rate, in Hz.
    pub sample_rate: u32,
    /// Samples per analysis window.
    pub n_samples: u32,
    /// Whether ESP-NOW peer broadcast is enabled.
    pub espnow_en: bool,
    /// RMS warning threshold, in g.
    pub rms_warn: f64,
    /// RMS critical threshold, in g.
    pub rms_crit: f64,
    /// Temperature warning threshold, in °C.
    pub temp_warn: f64,
    /// Temperature critical threshold, in °C.
    pub temp_crit: f64,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            wifi_ssid: String::new(),
            wifi_pass: None,
            mqtt_uri: "mqtt://test.mosquitto.org".to_string(),
            mqtt_port: 1883,
            mqtt_user: String::new(),
            mqtt_topic: "bluebrain/telemetry".to_string(),
            sample_rate: 1000,
            n_samples: 1024,
            espnow_en: false,
            rms_warn: 2.0,
            rms_crit: 4.0,
            temp_warn: 60.0,
            temp_crit: 80.0,
        }
    }
}
