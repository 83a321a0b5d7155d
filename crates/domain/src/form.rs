//! Form buffers for configuration and training-capture editing.
//!
//! Buffers hold raw text exactly as typed; coercion into typed values
//! happens at submit time and reports the offending field on failure.

use std::str::FromStr;

use crate::command::DeviceCommand;
use crate::config::DeviceConfig;
use crate::error::FormError;

/// Sentinel shown in the password buffer instead of the stored secret.
///
/// A submit with the buffer still equal to this placeholder omits the
/// password from the payload entirely, leaving the device's secret
/// untouched. A user literally typing the placeholder is indistinguishable
/// from "unchanged" — kept as-is from the original UI convention.
pub const PASSWORD_PLACEHOLDER: &str = "******";

/// Editable fields of the configuration form, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    /// WiFi network name.
    WifiSsid,
    /// WiFi password (masked).
    WifiPass,
    /// MQTT broker URI.
    MqttUri,
    /// MQTT broker port.
    MqttPort,
    /// MQTT username.
    MqttUser,
    /// Telemetry topic.
    MqttTopic,
    /// Sample rate in Hz.
    SampleRate,
    /// Samples per analysis window.
    NSamples,
    /// ESP-NOW checkbox.
    EspnowEn,
    /// RMS warning threshold.
    RmsWarn,
    /// RMS critical threshold.
    RmsCrit,
    /// Temperature warning threshold.
    TempWarn,
    /// Temperature critical threshold.
    TempCrit,
}

impl FormField {
    /// All fields in display order.
    pub const ALL: [Self; 13] = [
        Self::WifiSsid,
        Self::WifiPass,
        Self::MqttUri,
        Self::MqttPort,
        Self::MqttUser,
        Self::MqttTopic,
        Self::SampleRate,
        Self::NSamples,
        Self::EspnowEn,
        Self::RmsWarn,
        Self::RmsCrit,
        Self::TempWarn,
        Self::TempCrit,
    ];

    /// Label shown next to the field.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::WifiSsid => "WiFi SSID",
            Self::WifiPass => "WiFi password",
            Self::MqttUri => "MQTT URI",
            Self::MqttPort => "MQTT port",
            Self::MqttUser => "MQTT user",
            Self::MqttTopic => "MQTT topic",
            Self::SampleRate => "Sample rate (Hz)",
            Self::NSamples => "Samples per window",
            Self::EspnowEn => "ESP-NOW",
            Self::RmsWarn => "RMS warn (g)",
            Self::RmsCrit => "RMS crit (g)",
            Self::TempWarn => "Temp warn (°C)",
            Self::TempCrit => "Temp crit (°C)",
        }
    }

    /// Whether this field is the ESP-NOW checkbox rather than a text buffer.
    #[must_use]
    pub fn is_checkbox(self) -> bool {
        matches!(self, Self::EspnowEn)
    }

    /// Next field in display order, wrapping at the end.
    #[must_use]
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Previous field in display order, wrapping at the start.
    #[must_use]
    pub fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Text buffers backing the configuration form.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConfigForm {
    /// WiFi network name buffer.
    pub wifi_ssid: String,
    /// WiFi password buffer; starts at [`PASSWORD_PLACEHOLDER`] after a load.
    pub wifi_pass: String,
    /// MQTT broker URI buffer.
    pub mqtt_uri: String,
    /// MQTT port buffer.
    pub mqtt_port: String,
    /// MQTT user buffer.
    pub mqtt_user: String,
    /// MQTT topic buffer.
    pub mqtt_topic: String,
    /// Sample rate buffer.
    pub sample_rate: String,
    /// Window size buffer.
    pub n_samples: String,
    /// ESP-NOW checkbox state.
    pub espnow_en: bool,
    /// RMS warning threshold buffer.
    pub rms_warn: String,
    /// RMS critical threshold buffer.
    pub rms_crit: String,
    /// Temperature warning threshold buffer.
    pub temp_warn: String,
    /// Temperature critical threshold buffer.
    pub temp_crit: String,
}

impl ConfigForm {
    /// Populate buffers from a device read.
    ///
    /// The password buffer is always set to [`PASSWORD_PLACEHOLDER`] — the
    /// stored secret is never displayed, regardless of what the device sent.
    #[must_use]
    pub fn from_device(cfg: &DeviceConfig) -> Self {
        Self {
            wifi_ssid: cfg.wifi_ssid.clone(),
            wifi_pass: PASSWORD_PLACEHOLDER.to_string(),
            mqtt_uri: cfg.mqtt_uri.clone(),
            mqtt_port: cfg.mqtt_port.to_string(),
            mqtt_user: cfg.mqtt_user.clone(),
            mqtt_topic: cfg.mqtt_topic.clone(),
            sample_rate: cfg.sample_rate.to_string(),
            n_samples: cfg.n_samples.to_string(),
            espnow_en: cfg.espnow_en,
            rms_warn: cfg.rms_warn.to_string(),
            rms_crit: cfg.rms_crit.to_string(),
            temp_warn: cfg.temp_warn.to_string(),
            temp_crit: cfg.temp_crit.to_string(),
        }
    }

    /// Coerce the buffers into an outgoing [`DeviceConfig`].
    ///
    /// A password buffer still equal to [`PASSWORD_PLACEHOLDER`] yields
    /// `wifi_pass: None`, which serializes with no password key at all; any
    /// other contents are sent literally.
    ///
    /// # Errors
    ///
    /// Returns [`FormError`] naming the first field that fails coercion.
    pub fn to_update(&self) -> Result<DeviceConfig, FormError> {
        Ok(DeviceConfig {
            wifi_ssid: self.wifi_ssid.clone(),
            wifi_pass: if self.wifi_pass == PASSWORD_PLACEHOLDER {
                None
            } else {
                Some(self.wifi_pass.clone())
            },
            mqtt_uri: self.mqtt_uri.clone(),
            mqtt_port: parse_int(&self.mqtt_port, "mqtt_port")?,
            mqtt_user: self.mqtt_user.clone(),
            mqtt_topic: self.mqtt_topic.clone(),
            sample_rate: parse_int(&self.sample_rate, "sample_rate")?,
            n_samples: parse_int(&self.n_samples, "n_samples")?,
            espnow_en: self.espnow_en,
            rms_warn: parse_float(&self.rms_warn, "rms_warn")?,
            rms_crit: parse_float(&self.rms_crit, "rms_crit")?,
            temp_warn: parse_float(&self.temp_warn, "temp_warn")?,
            temp_crit: parse_float(&self.temp_crit, "temp_crit")?,
        })
    }

    /// Mutable access to the text buffer behind `field`.
    ///
    /// Returns `None` for the checkbox field, which has no text buffer.
    pub fn buffer_mut(&mut self, field: FormField) -> Option<&mut String> {
        match field {
            FormField::WifiSsid => Some(&mut self.wifi_ssid),
            FormField::WifiPass => Some(&mut self.wifi_pass),
            FormField::MqttUri => Some(&mut self.mqtt_uri),
            FormField::MqttPort => Some(&mut self.mqtt_port),
            FormField::MqttUser => Some(&mut self.mqtt_user),
            FormField::MqttTopic => Some(&mut self.mqtt_topic),
            FormField::SampleRate => Some(&mut self.sample_rate),
            FormField::NSamples => Some(&mut self.n_samples),
            FormField::EspnowEn => None,
            FormField::RmsWarn => Some(&mut self.rms_warn),
            FormField::RmsCrit => Some(&mut self.rms_crit),
            FormField::TempWarn => Some(&mut self.temp_warn),
            FormField::TempCrit => Some(&mut self.temp_crit),
        }
    }

    /// Value rendered for `field` (checkbox shows `on`/`off`).
    #[must_use]
    pub fn display_value(&self, field: FormField) -> String {
        match field {
            FormField::WifiSsid => self.wifi_ssid.clone(),
            FormField::WifiPass => self.wifi_pass.clone(),
            FormField::MqttUri => self.mqtt_uri.clone(),
            FormField::MqttPort => self.mqtt_port.clone(),
            FormField::MqttUser => self.mqtt_user.clone(),
            FormField::MqttTopic => self.mqtt_topic.clone(),
            FormField::SampleRate => self.sample_rate.clone(),
            FormField::NSamples => self.n_samples.clone(),
            FormField::EspnowEn => {
                if self.espnow_en { "on" } else { "off" }.to_string()
            }
            FormField::RmsWarn => self.rms_warn.clone(),
            FormField::RmsCrit => self.rms_crit.clone(),
            FormField::TempWarn => self.temp_warn.clone(),
            FormField::TempCrit => self.temp_crit.clone(),
        }
    }
}

/// Editable fields of the training-capture form, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureField {
    /// Class label recorded with each row.
    Label,
    /// Number of rows to capture.
    Samples,
    /// Capture rate in Hz.
    FreqHz,
}

impl CaptureField {
    /// All fields in display order.
    pub const ALL: [Self; 3] = [Self::Label, Self::Samples, Self::FreqHz];

    /// Label shown next to the field.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Label => "Class label",
            Self::Samples => "Samples",
            Self::FreqHz => "Rate (Hz)",
        }
    }

    /// Next field in display order, wrapping at the end.
    #[must_use]
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Previous field in display order, wrapping at the start.
    #[must_use]
    pub fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Text buffers backing the training-capture form.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureForm {
    /// Class label buffer.
    pub label: String,
    /// Sample count buffer.
    pub samples: String,
    /// Capture rate buffer.
    pub freq_hz: String,
}

impl Default for CaptureForm {
    fn default() -> Self {
        Self {
            label: "0".to_string(),
            samples: "100".to_string(),
            freq_hz: "1".to_string(),
        }
    }
}

impl CaptureForm {
    /// Coerce the buffers into a start-capture command.
    ///
    /// # Errors
    ///
    /// Returns [`FormError`] naming the first field that fails coercion.
    pub fn to_command(&self) -> Result<DeviceCommand, FormError> {
        Ok(DeviceCommand::StartCapture {
            label: parse_int(&self.label, "label")?,
            samples: parse_int(&self.samples, "samples")?,
            freq_hz: parse_float(&self.freq_hz, "freq_hz")?,
        })
    }

    /// Mutable access to the text buffer behind `field`.
    pub fn buffer_mut(&mut self, field: CaptureField) -> &mut String {
        match field {
            CaptureField::Label => &mut self.label,
            CaptureField::Samples => &mut self.samples,
            CaptureField::FreqHz => &mut self.freq_hz,
        }
    }

    /// Value rendered for `field`.
    #[must_use]
    pub fn display_value(&self, field: CaptureField) -> &str {
        match field {
            CaptureField::Label => &self.label,
            CaptureField::Samples => &self.samples,
            CaptureField::FreqHz => &self.freq_hz,
        }
    }
}

fn parse_int<T>(value: &str, field: &'static str) -> Result<T, FormError>
where
    T: FromStr<Err = std::num::ParseIntError>,
{
    value.trim().parse().map_err(|_| FormError::InvalidInteger {
        field,
        value: value.to_string(),
    })
}

fn parse_float(value: &str, field: &'static str) -> Result<f64, FormError> {
    value.trim().parse().map_err(|_| FormError::InvalidNumber {
        field,
        value: value.to_string(),
    })
}
