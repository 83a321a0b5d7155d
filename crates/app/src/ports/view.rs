//! Rendering port — the display surface the controller and poller draw into.
//!
//! The original dashboard mutated DOM elements directly; here the same
//! surface is a trait so tests can render into memory and the terminal
//! adapter can render into a real screen.

use bbdash_domain::error::DashError;
use bbdash_domain::fault::ConnectionStatus;
use bbdash_domain::form::{CaptureField, CaptureForm, ConfigForm, FormField};

use crate::readout::MetricsReadout;

/// Selectable panels, mirroring the original UI tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Panel {
    /// Live metrics and the classifier verdict.
    #[default]
    Dashboard,
    /// Device configuration form.
    Config,
    /// Training capture controls.
    Training,
}

impl Panel {
    /// All panels in tab order.
    pub const ALL: [Self; 3] = [Self::Dashboard, Self::Config, Self::Training];

    /// Tab title.
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Config => "Configuration",
            Self::Training => "Training",
        }
    }

    /// Next panel in tab order, wrapping at the end.
    #[must_use]
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|p| *p == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

/// Rendering port implemented by display adapters.
///
/// Exactly one panel is active at a time; activating one deactivates the
/// rest. Mutations only update adapter-held state — the adapter decides
/// when to repaint.
pub trait DashboardView: Send {
    /// Activate `panel` and deactivate the others.
    fn show_panel(&mut self, panel: Panel);

    /// Replace the rendered metric readouts and classifier verdict.
    fn update_metrics(&mut self, readout: &MetricsReadout);

    /// Update the connection badge.
    fn set_connection(&mut self, status: ConnectionStatus);

    /// Replace the rendered configuration form; `focus` is highlighted.
    fn show_config(&mut self, form: &ConfigForm, focus: FormField);

    /// Replace the rendered capture form; `focus` is highlighted.
    fn show_training(&mut self, form: &CaptureForm, focus: CaptureField);

    /// Show an acknowledgment on the message line.
    fn acknowledge(&mut self, message: &str);

    /// Surface an operation failure on the message line.
    fn show_error(&mut self, error: &DashError);
}
