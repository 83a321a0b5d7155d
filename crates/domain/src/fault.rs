//! Fault classification and the display colors attached to it.

/// 24-bit RGB color used by rendering adapters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// Construct from channel values.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Green used for the healthy class and the connected badge.
pub const GREEN: Rgb = Rgb::new(0x00, 0xE6, 0x76);
/// Amber used for the imbalance warning class.
pub const AMBER: Rgb = Rgb::new(0xFF, 0xC1, 0x07);
/// Red used for the bearing fault class and the disconnected badge.
pub const RED: Rgb = Rgb::new(0xFF, 0x52, 0x52);
/// Neutral gray used for unrecognized classifier codes.
pub const GRAY: Rgb = Rgb::new(0x55, 0x55, 0x55);

/// Verdict of the device's onboard fault classifier.
///
/// The mapping from raw `ai_class` codes is total: any code outside the
/// known set renders as [`Unknown`](Self::Unknown) rather than erroring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultClass {
    /// Code 0 — machine running normally.
    Healthy,
    /// Code 1 — rotating imbalance detected.
    Imbalance,
    /// Code 2 — bearing fault signature detected.
    BearingFault,
    /// Any other code.
    Unknown,
}

impl FaultClass {
    /// Map a raw classifier code to its display class.
    #[must_use]
    pub fn from_code(code: i64) -> Self {
        match code {
            0 => Self::Healthy,
            1 => Self::Imbalance,
            2 => Self::BearingFault,
            _ => Self::Unknown,
        }
    }

    /// Fixed label text for this class.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Healthy => "healthy",
            Self::Imbalance => "imbalance warning",
            Self::BearingFault => "bearing fault",
            Self::Unknown => "unknown",
        }
    }

    /// Fixed display color for this class.
    #[must_use]
    pub fn color(self) -> Rgb {
        match self {
            Self::Healthy => GREEN,
            Self::Imbalance => AMBER,
            Self::BearingFault => RED,
            Self::Unknown => GRAY,
        }
    }
}

/// Device reachability as shown by the connection badge.
///
/// Downgraded on any failed poll cycle and restored by the next successful
/// one; carries no further error detail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionStatus {
    /// The last poll cycle succeeded.
    Connected,
    /// The last poll cycle failed, or no poll has completed yet.
    #[default]
    Disconnected,
}

impl ConnectionStatus {
    /// Badge text.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Connected => "connected",
            Self::Disconnected => "disconnected",
        }
    }

    /// Badge color.
    #[must_use]
    pub fn color(self) -> Rgb {
        match self {
            Self::Connected => GREEN,
            Self::Disconnected => RED,
        }
    }
}
