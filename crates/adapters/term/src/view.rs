//! Terminal renderer — draws the dashboard state with queued crossterm
//! commands.
//!
//! [`TermView`] holds the last value pushed through each port method and
//! repaints the whole screen on [`draw`](TermView::draw); the composition
//! root calls it on a redraw tick. Port mutations never paint by
//! themselves.

use std::io::{self, Write};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{ExecutableCommand, QueueableCommand};

use bbdash_app::ports::view::{DashboardView, Panel};
use bbdash_app::readout::MetricsReadout;
use bbdash_domain::error::DashError;
use bbdash_domain::fault::{ConnectionStatus, Rgb};
use bbdash_domain::form::{CaptureField, CaptureForm, ConfigForm, FormField};

/// Cells in the confidence / capture progress gauges.
const GAUGE_WIDTH: u16 = 20;

/// RAII guard for the interactive terminal session.
///
/// Enters raw mode and the alternate screen; restores both on drop so a
/// panic or early return leaves the user's shell intact.
pub struct TerminalGuard;

impl TerminalGuard {
    /// Switch the terminal into dashboard mode.
    ///
    /// # Errors
    ///
    /// Returns the underlying terminal error when raw mode or the alternate
    /// screen cannot be entered.
    pub fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        io::stdout().execute(EnterAlternateScreen)?.execute(Hide)?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = io::stdout().execute(Show);
        let _ = io::stdout().execute(LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

enum Message {
    Ack(String),
    Error(String),
}

/// [`DashboardView`] implementation rendering into any [`Write`] target.
pub struct TermView<W> {
    out: W,
    panel: Panel,
    readout: Option<MetricsReadout>,
    connection: ConnectionStatus,
    config: Option<(ConfigForm, FormField)>,
    training: Option<(CaptureForm, CaptureField)>,
    message: Option<Message>,
}

impl<W: Write> TermView<W> {
    /// Create a view rendering into `out`.
    pub fn new(out: W) -> Self {
        Self {
            out,
            panel: Panel::default(),
            readout: None,
            connection: ConnectionStatus::default(),
            config: None,
            training: None,
            message: None,
        }
    }

    /// Access the underlying write target.
    pub fn writer(&self) -> &W {
        &self.out
    }

    /// Mutable access to the underlying write target.
    pub fn writer_mut(&mut self) -> &mut W {
        &mut self.out
    }

    /// Repaint the whole screen from the current state.
    ///
    /// # Errors
    ///
    /// Returns the underlying IO error when the write target rejects output.
    pub fn draw(&mut self) -> io::Result<()> {
        self.out.queue(MoveTo(0, 0))?.queue(Clear(ClearType::All))?;
        self.draw_header()?;
        match self.panel {
            Panel::Dashboard => self.draw_dashboard()?,
            Panel::Config => self.draw_config()?,
            Panel::Training => self.draw_training()?,
        }
        self.draw_message()?;
        self.out.flush()
    }

    fn draw_header(&mut self) -> io::Result<()> {
        self.out.queue(MoveTo(0, 0))?;
        for panel in Panel::ALL {
            if panel == self.panel {
                self.out
                    .queue(SetAttribute(Attribute::Reverse))?
                    .queue(Print(format!(" {} ", panel.title())))?
                    .queue(SetAttribute(Attribute::Reset))?;
            } else {
                self.out.queue(Print(format!(" {} ", panel.title())))?;
            }
            self.out.queue(Print(" "))?;
        }

        let badge = self.connection;
        self.out
            .queue(MoveTo(46, 0))?
            .queue(SetForegroundColor(color(badge.color())))?
            .queue(Print(format!("● {}", badge.label())))?
            .queue(ResetColor)?;
        Ok(())
    }

    fn draw_dashboard(&mut self) -> io::Result<()> {
        let Some(readout) = self.readout.clone() else {
            self.out
                .queue(MoveTo(0, 2))?
                .queue(Print("waiting for device..."))?;
            return Ok(());
        };

        let metrics = [
            ("RMS", readout.rms.as_str()),
            ("Peak", readout.peak.as_str()),
            ("Crest", readout.crest.as_str()),
            ("Temp", readout.temp.as_str()),
        ];
        for (idx, (label, value)) in metrics.iter().enumerate() {
            self.out
                .queue(MoveTo(0, 2 + row(idx)))?
                .queue(Print(format!("{label:<8}{value}")))?;
        }

        self.out
            .queue(MoveTo(0, 7))?
            .queue(Print("AI: "))?
            .queue(SetForegroundColor(color(readout.fault_color)))?
            .queue(Print(readout.fault_label))?
            .queue(ResetColor)?;

        self.out.queue(MoveTo(0, 8))?.queue(Print("["))?;
        let filled = gauge_cells(readout.confidence_percent);
        self.out
            .queue(SetForegroundColor(color(readout.fault_color)))?
            .queue(Print("█".repeat(usize::from(filled))))?
            .queue(ResetColor)?
            .queue(Print("░".repeat(usize::from(GAUGE_WIDTH - filled))))?
            .queue(Print("] "))?
            .queue(SetForegroundColor(color(readout.fault_color)))?
            .queue(Print(readout.confidence_text.as_str()))?
            .queue(ResetColor)?;

        if let Some(timestamp) = &readout.timestamp {
            self.out
                .queue(MoveTo(0, 10))?
                .queue(Print(format!("Device time: {timestamp}")))?;
        }
        Ok(())
    }

    fn draw_config(&mut self) -> io::Result<()> {
        let Some((form, focus)) = self.config.clone() else {
            self.out
                .queue(MoveTo(0, 2))?
                .queue(Print("loading configuration..."))?;
            return Ok(());
        };

        for (idx, field) in FormField::ALL.iter().enumerate() {
            let marker = if *field == focus { ">" } else { " " };
            let value = if field.is_checkbox() {
                format!("[{}]", if form.espnow_en { "x" } else { " " })
            } else {
                form.display_value(*field)
            };
            self.out
                .queue(MoveTo(0, 2 + row(idx)))?
                .queue(Print(format!("{marker} {:<20}", field.label())))?;
            if *field == focus {
                self.out
                    .queue(SetAttribute(Attribute::Reverse))?
                    .queue(Print(value))?
                    .queue(SetAttribute(Attribute::Reset))?;
            } else {
                self.out.queue(Print(value))?;
            }
        }

        let footer = 3 + row(FormField::ALL.len());
        self.out.queue(MoveTo(0, footer))?.queue(Print(
            "Enter save · Ctrl+R reload · Ctrl+B restart device · Tab next panel",
        ))?;
        Ok(())
    }

    fn draw_training(&mut self) -> io::Result<()> {
        let progress = self.readout.as_ref().map(|r| r.training);
        match progress {
            Some(progress) if progress.active => {
                let percent = if progress.target == 0 {
                    0
                } else {
                    (progress.count * 100 / progress.target).min(100)
                };
                #[allow(clippy::cast_possible_truncation)]
                let filled = gauge_cells(percent as u8);
                self.out
                    .queue(MoveTo(0, 2))?
                    .queue(Print(format!(
                        "Capturing {}/{} [",
                        progress.count, progress.target
                    )))?
                    .queue(Print("█".repeat(usize::from(filled))))?
                    .queue(Print("░".repeat(usize::from(GAUGE_WIDTH - filled))))?
                    .queue(Print("]"))?;
            }
            _ => {
                self.out.queue(MoveTo(0, 2))?.queue(Print("Capture idle"))?;
            }
        }

        if let Some((form, focus)) = self.training.clone() {
            for (idx, field) in CaptureField::ALL.iter().enumerate() {
                let marker = if *field == focus { ">" } else { " " };
                self.out
                    .queue(MoveTo(0, 4 + row(idx)))?
                    .queue(Print(format!("{marker} {:<14}", field.label())))?;
                if *field == focus {
                    self.out
                        .queue(SetAttribute(Attribute::Reverse))?
                        .queue(Print(form.display_value(*field).to_string()))?
                        .queue(SetAttribute(Attribute::Reset))?;
                } else {
                    self.out.queue(Print(form.display_value(*field).to_string()))?;
                }
            }
        }

        self.out.queue(MoveTo(0, 9))?.queue(Print(
            "Enter start capture · Ctrl+T toggle mode · Ctrl+X clear dataset · Ctrl+D download",
        ))?;
        Ok(())
    }

    fn draw_message(&mut self) -> io::Result<()> {
        let Some(message) = &self.message else {
            return Ok(());
        };
        let (text, fg) = match message {
            Message::Ack(text) => (text.clone(), Color::Green),
            Message::Error(text) => (text.clone(), Color::Red),
        };
        self.out
            .queue(MoveTo(0, 18))?
            .queue(SetForegroundColor(fg))?
            .queue(Print(text))?
            .queue(ResetColor)?;
        Ok(())
    }
}

impl<W: Write + Send> DashboardView for TermView<W> {
    fn show_panel(&mut self, panel: Panel) {
        self.panel = panel;
        self.message = None;
    }

    fn update_metrics(&mut self, readout: &MetricsReadout) {
        self.readout = Some(readout.clone());
    }

    fn set_connection(&mut self, status: ConnectionStatus) {
        self.connection = status;
    }

    fn show_config(&mut self, form: &ConfigForm, focus: FormField) {
        self.config = Some((form.clone(), focus));
    }

    fn show_training(&mut self, form: &CaptureForm, focus: CaptureField) {
        self.training = Some((form.clone(), focus));
    }

    fn acknowledge(&mut self, message: &str) {
        self.message = Some(Message::Ack(message.to_string()));
    }

    fn show_error(&mut self, error: &DashError) {
        // Chain the source so "device command failed" still names the HTTP
        // status or transport problem underneath.
        let mut text = error.to_string();
        let mut source = std::error::Error::source(error);
        while let Some(err) = source {
            text.push_str(": ");
            text.push_str(&err.to_string());
            source = std::error::Error::source(err);
        }
        self.message = Some(Message::Error(text));
    }
}

fn color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

fn gauge_cells(percent: u8) -> u16 {
    u16::from(percent).min(100) * GAUGE_WIDTH / 100
}

#[allow(clippy::cast_possible_truncation)]
fn row(idx: usize) -> u16 {
    idx as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    use bbdash_domain::config::DeviceConfig;
    use bbdash_domain::status::StatusSnapshot;

    fn readout() -> MetricsReadout {
        MetricsReadout::from(&StatusSnapshot {
            rms: 0.512,
            peak: 1.204,
            crest: 2.35,
            temp: 41.2,
            ai_class: 2,
            ai_conf: 0.87,
            timestamp: Some("2026-08-07 10:15:00".to_string()),
            train_active: false,
            train_count: 0,
            train_target: 0,
        })
    }

    fn rendered(view: &mut TermView<Vec<u8>>) -> String {
        view.draw().unwrap();
        let text = String::from_utf8_lossy(&view.out).into_owned();
        view.out.clear();
        text
    }

    #[test]
    fn should_render_the_reference_snapshot() {
        let mut view = TermView::new(Vec::new());
        view.update_metrics(&readout());
        view.set_connection(ConnectionStatus::Connected);

        let screen = rendered(&mut view);

        assert!(screen.contains("0.512"));
        assert!(screen.contains("1.204"));
        assert!(screen.contains("2.35"));
        assert!(screen.contains("41.2 °C"));
        assert!(screen.contains("bearing fault"));
        assert!(screen.contains("87%"));
        assert!(screen.contains("connected"));
    }

    #[test]
    fn should_keep_stale_metrics_when_connection_drops() {
        let mut view = TermView::new(Vec::new());
        view.update_metrics(&readout());
        view.set_connection(ConnectionStatus::Connected);
        let _ = rendered(&mut view);

        view.set_connection(ConnectionStatus::Disconnected);
        let screen = rendered(&mut view);

        assert!(screen.contains("0.512"));
        assert!(screen.contains("disconnected"));
    }

    #[test]
    fn should_show_a_waiting_hint_before_the_first_poll() {
        let mut view = TermView::new(Vec::new());
        let screen = rendered(&mut view);
        assert!(screen.contains("waiting for device"));
    }

    #[test]
    fn should_render_config_form_with_masked_password() {
        let mut view = TermView::new(Vec::new());
        view.show_panel(Panel::Config);
        let form = ConfigForm::from_device(&DeviceConfig {
            wifi_ssid: "home".to_string(),
            ..DeviceConfig::default()
        });
        view.show_config(&form, FormField::WifiSsid);

        let screen = rendered(&mut view);

        assert!(screen.contains("home"));
        assert!(screen.contains("******"));
        assert!(screen.contains("1883"));
        assert!(screen.contains("WiFi SSID"));
    }

    #[test]
    fn should_render_checkbox_state() {
        let mut view = TermView::new(Vec::new());
        view.show_panel(Panel::Config);
        let mut form = ConfigForm::from_device(&DeviceConfig::default());
        form.espnow_en = true;
        view.show_config(&form, FormField::EspnowEn);

        let screen = rendered(&mut view);
        assert!(screen.contains("[x]"));
    }

    #[test]
    fn should_render_messages_and_clear_them_on_panel_switch() {
        let mut view = TermView::new(Vec::new());
        view.acknowledge("Configuration saved. Restart the device to apply.");
        let screen = rendered(&mut view);
        assert!(screen.contains("Restart the device"));

        view.show_panel(Panel::Dashboard);
        let screen = rendered(&mut view);
        assert!(!screen.contains("Restart the device"));
    }

    #[test]
    fn should_render_chained_error_text() {
        let mut view = TermView::new(Vec::new());
        view.show_error(&DashError::ConfigSave("HTTP 500".into()));
        let screen = rendered(&mut view);
        assert!(screen.contains("failed to save device configuration"));
        assert!(screen.contains("HTTP 500"));
    }

    #[test]
    fn should_render_capture_progress() {
        let mut view = TermView::new(Vec::new());
        view.show_panel(Panel::Training);
        view.update_metrics(&MetricsReadout::from(&StatusSnapshot {
            train_active: true,
            train_count: 50,
            train_target: 100,
            ..StatusSnapshot {
                rms: 0.0,
                peak: 0.0,
                crest: 0.0,
                temp: 0.0,
                ai_class: 0,
                ai_conf: 0.0,
                timestamp: None,
                train_active: false,
                train_count: 0,
                train_target: 0,
            }
        }));
        view.show_training(&CaptureForm::default(), CaptureField::Label);

        let screen = rendered(&mut view);
        assert!(screen.contains("Capturing 50/100"));
        assert!(screen.contains("Class label"));
    }

    #[test]
    fn should_scale_the_gauge_to_twenty_cells() {
        assert_eq!(gauge_cells(0), 0);
        assert_eq!(gauge_cells(50), 10);
        assert_eq!(gauge_cells(87), 17);
        assert_eq!(gauge_cells(100), 20);
        assert_eq!(gauge_cells(255), 20);
    }
}
