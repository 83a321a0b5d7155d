//! Dashboard controller — single owner of UI state.
//!
//! The original page kept its state implicitly in the DOM; here the active
//! panel, the form buffers, and the field focus all live in one struct. The
//! controller pushes every change through the injected [`DashboardView`]
//! port and maps device API failures to surfaced, operation-scoped errors
//! instead of letting them propagate unhandled.

use std::sync::Arc;

use parking_lot::Mutex;

use bbdash_domain::command::{DeviceCommand, DeviceMode};
use bbdash_domain::error::DashError;
use bbdash_domain::form::{
    CaptureField, CaptureForm, ConfigForm, FormField, PASSWORD_PLACEHOLDER,
};
use bbdash_domain::time::epoch_secs;

use crate::ports::device_api::DeviceApi;
use crate::ports::view::{DashboardView, Panel};

/// Message shown after a successful configuration save.
pub const SAVE_ACK: &str = "Configuration saved. Restart the device to apply.";

/// User-interface events dispatched to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEvent {
    /// Activate the next panel in tab order.
    NextPanel,
    /// Activate a specific panel.
    ShowPanel(Panel),
    /// Move focus to the next form field.
    FocusNext,
    /// Move focus to the previous form field.
    FocusPrev,
    /// Append a character to the focused buffer.
    Input(char),
    /// Remove the last character of the focused buffer.
    Backspace,
    /// Toggle the focused checkbox.
    Toggle,
    /// Submit the active panel's form.
    Submit,
    /// Re-fetch the configuration from the device.
    Reload,
    /// Ask the device to restart.
    Restart,
    /// Push the local clock to the device.
    SyncTime,
    /// Toggle between training and production mode.
    ToggleMode,
    /// Clear the on-device training dataset.
    ClearDataset,
}

/// Controller owning the UI state and orchestrating device operations.
///
/// Generic over the device API and the view to avoid dynamic dispatch; the
/// view sits behind `Arc<Mutex<_>>` because the poller writes to the same
/// surface concurrently (the "shared DOM").
pub struct DashboardController<A, V> {
    api: Arc<A>,
    view: Arc<Mutex<V>>,
    panel: Panel,
    form: ConfigForm,
    capture: CaptureForm,
    focus: FormField,
    capture_focus: CaptureField,
    training_mode: bool,
}

impl<A, V> DashboardController<A, V>
where
    A: DeviceApi,
    V: DashboardView,
{
    /// Create a controller starting on the dashboard panel.
    pub fn new(api: Arc<A>, view: Arc<Mutex<V>>) -> Self {
        Self {
            api,
            view,
            panel: Panel::Dashboard,
            form: ConfigForm::default(),
            capture: CaptureForm::default(),
            focus: FormField::ALL[0],
            capture_focus: CaptureField::ALL[0],
            training_mode: false,
        }
    }

    /// Currently active panel.
    #[must_use]
    pub fn panel(&self) -> Panel {
        self.panel
    }

    /// Current configuration form buffers.
    #[must_use]
    pub fn form(&self) -> &ConfigForm {
        &self.form
    }

    /// Currently focused configuration field.
    #[must_use]
    pub fn focus(&self) -> FormField {
        self.focus
    }

    /// Dispatch a single UI event.
    ///
    /// # Errors
    ///
    /// Returns the operation error when a device call or form coercion
    /// fails. Every error has already been surfaced through the view by the
    /// time it is returned — callers only need it for logging.
    pub async fn handle(&mut self, event: UiEvent) -> Result<(), DashError> {
        match event {
            UiEvent::NextPanel => self.activate_panel(self.panel.next()).await,
            UiEvent::ShowPanel(panel) => self.activate_panel(panel).await,
            UiEvent::FocusNext => {
                self.move_focus(true);
                Ok(())
            }
            UiEvent::FocusPrev => {
                self.move_focus(false);
                Ok(())
            }
            UiEvent::Input(ch) => {
                self.input_char(ch);
                Ok(())
            }
            UiEvent::Backspace => {
                self.backspace();
                Ok(())
            }
            UiEvent::Toggle => {
                self.toggle_checkbox();
                Ok(())
            }
            UiEvent::Submit => self.submit().await,
            UiEvent::Reload => self.load_config().await,
            UiEvent::Restart => self.restart_device().await,
            UiEvent::SyncTime => self.sync_time().await,
            UiEvent::ToggleMode => self.toggle_mode().await,
            UiEvent::ClearDataset => self.clear_dataset().await,
        }
    }

    /// Activate `panel`, deactivating the others.
    ///
    /// Entering the configuration panel re-fetches the device configuration,
    /// matching the original tab behavior.
    ///
    /// # Errors
    ///
    /// Returns the configuration fetch error when entering the config panel
    /// fails; panel activation itself cannot fail.
    pub async fn activate_panel(&mut self, panel: Panel) -> Result<(), DashError> {
        self.panel = panel;
        self.view.lock().show_panel(panel);
        match panel {
            Panel::Config => self.load_config().await,
            Panel::Training => {
                self.refresh_training_view();
                Ok(())
            }
            Panel::Dashboard => Ok(()),
        }
    }

    /// Fetch the device configuration into the form buffers.
    ///
    /// The password buffer is set to the masked placeholder regardless of
    /// the response.
    ///
    /// # Errors
    ///
    /// Returns [`DashError::ConfigFetch`], after surfacing it via the view.
    pub async fn load_config(&mut self) -> Result<(), DashError> {
        match self.api.fetch_config().await {
            Ok(cfg) => {
                self.form = ConfigForm::from_device(&cfg);
                self.focus = FormField::ALL[0];
                self.view.lock().show_config(&self.form, self.focus);
                Ok(())
            }
            Err(err) => {
                let err = DashError::ConfigFetch(Box::new(err));
                self.view.lock().show_error(&err);
                Err(err)
            }
        }
    }

    /// Coerce the form and POST it to the device.
    ///
    /// An unchanged password buffer (still the placeholder) produces a
    /// payload with no password field at all. The acknowledgment is shown
    /// only on success.
    ///
    /// # Errors
    ///
    /// Returns [`DashError::Form`] when coercion fails (the device is not
    /// contacted) or [`DashError::ConfigSave`] when the POST fails; both are
    /// surfaced via the view first.
    pub async fn save_config(&mut self) -> Result<(), DashError> {
        let update = match self.form.to_update() {
            Ok(update) => update,
            Err(err) => {
                let err = DashError::Form(err);
                self.view.lock().show_error(&err);
                return Err(err);
            }
        };
        match self.api.save_config(&update).await {
            Ok(()) => {
                self.view.lock().acknowledge(SAVE_ACK);
                Ok(())
            }
            Err(err) => {
                let err = DashError::ConfigSave(Box::new(err));
                self.view.lock().show_error(&err);
                Err(err)
            }
        }
    }

    /// Ask the device to reboot.
    ///
    /// # Errors
    ///
    /// Returns [`DashError::Command`], after surfacing it via the view.
    pub async fn restart_device(&mut self) -> Result<(), DashError> {
        match self.api.restart().await {
            Ok(()) => {
                self.view.lock().acknowledge("Device restarting.");
                Ok(())
            }
            Err(err) => {
                let err = DashError::Command(Box::new(err));
                self.view.lock().show_error(&err);
                Err(err)
            }
        }
    }

    /// Push the local clock to the device.
    ///
    /// # Errors
    ///
    /// Returns [`DashError::Command`], after surfacing it via the view.
    pub async fn sync_time(&mut self) -> Result<(), DashError> {
        match self.api.sync_time(epoch_secs()).await {
            Ok(()) => {
                self.view.lock().acknowledge("Device clock synchronized.");
                Ok(())
            }
            Err(err) => {
                let err = DashError::Command(Box::new(err));
                self.view.lock().show_error(&err);
                Err(err)
            }
        }
    }

    /// Toggle between training capture and production inference.
    ///
    /// The local mode flag only flips once the device accepts the command.
    ///
    /// # Errors
    ///
    /// Returns [`DashError::Command`], after surfacing it via the view.
    pub async fn toggle_mode(&mut self) -> Result<(), DashError> {
        let target = if self.training_mode {
            DeviceMode::Production
        } else {
            DeviceMode::Training
        };
        let command = DeviceCommand::SetMode { mode: target };
        match self.api.send_command(&command).await {
            Ok(()) => {
                self.training_mode = !self.training_mode;
                let message = if self.training_mode {
                    "Training mode enabled."
                } else {
                    "Production mode restored."
                };
                self.view.lock().acknowledge(message);
                Ok(())
            }
            Err(err) => {
                let err = DashError::Command(Box::new(err));
                self.view.lock().show_error(&err);
                Err(err)
            }
        }
    }

    /// Start a labelled capture from the capture form.
    ///
    /// # Errors
    ///
    /// Returns [`DashError::Form`] when coercion fails or
    /// [`DashError::Command`] when the device rejects the command; both are
    /// surfaced via the view first.
    pub async fn start_capture(&mut self) -> Result<(), DashError> {
        let command = match self.capture.to_command() {
            Ok(command) => command,
            Err(err) => {
                let err = DashError::Form(err);
                self.view.lock().show_error(&err);
                return Err(err);
            }
        };
        match self.api.send_command(&command).await {
            Ok(()) => {
                self.view.lock().acknowledge("Capture started.");
                Ok(())
            }
            Err(err) => {
                let err = DashError::Command(Box::new(err));
                self.view.lock().show_error(&err);
                Err(err)
            }
        }
    }

    /// Delete the on-device training dataset.
    ///
    /// # Errors
    ///
    /// Returns [`DashError::Command`], after surfacing it via the view.
    pub async fn clear_dataset(&mut self) -> Result<(), DashError> {
        match self.api.send_command(&DeviceCommand::ClearDataset).await {
            Ok(()) => {
                self.view.lock().acknowledge("Dataset cleared.");
                Ok(())
            }
            Err(err) => {
                let err = DashError::Command(Box::new(err));
                self.view.lock().show_error(&err);
                Err(err)
            }
        }
    }

    /// Fetch the on-device training dataset as raw CSV bytes.
    ///
    /// Writing the bytes somewhere is the caller's concern — this layer has
    /// no filesystem access.
    ///
    /// # Errors
    ///
    /// Returns [`DashError::Command`], after surfacing it via the view.
    pub async fn download_dataset(&mut self) -> Result<Vec<u8>, DashError> {
        match self.api.download_dataset().await {
            Ok(bytes) => Ok(bytes),
            Err(err) => {
                let err = DashError::Command(Box::new(err));
                self.view.lock().show_error(&err);
                Err(err)
            }
        }
    }

    async fn submit(&mut self) -> Result<(), DashError> {
        match self.panel {
            Panel::Config => self.save_config().await,
            Panel::Training => self.start_capture().await,
            Panel::Dashboard => Ok(()),
        }
    }

    fn move_focus(&mut self, forward: bool) {
        match self.panel {
            Panel::Config => {
                self.focus = if forward {
                    self.focus.next()
                } else {
                    self.focus.prev()
                };
                self.view.lock().show_config(&self.form, self.focus);
            }
            Panel::Training => {
                self.capture_focus = if forward {
                    self.capture_focus.next()
                } else {
                    self.capture_focus.prev()
                };
                self.refresh_training_view();
            }
            Panel::Dashboard => {}
        }
    }

    fn input_char(&mut self, ch: char) {
        match self.panel {
            Panel::Config => {
                // First keystroke into the masked password replaces the
                // placeholder rather than appending to it.
                if self.focus == FormField::WifiPass && self.form.wifi_pass == PASSWORD_PLACEHOLDER
                {
                    self.form.wifi_pass.clear();
                }
                if let Some(buffer) = self.form.buffer_mut(self.focus) {
                    buffer.push(ch);
                }
                self.view.lock().show_config(&self.form, self.focus);
            }
            Panel::Training => {
                self.capture.buffer_mut(self.capture_focus).push(ch);
                self.refresh_training_view();
            }
            Panel::Dashboard => {}
        }
    }

    fn backspace(&mut self) {
        match self.panel {
            Panel::Config => {
                // Deleting from the untouched placeholder clears it whole,
                // so no partial mask is ever submitted.
                if self.focus == FormField::WifiPass && self.form.wifi_pass == PASSWORD_PLACEHOLDER
                {
                    self.form.wifi_pass.clear();
                } else if let Some(buffer) = self.form.buffer_mut(self.focus) {
                    buffer.pop();
                }
                self.view.lock().show_config(&self.form, self.focus);
            }
            Panel::Training => {
                self.capture.buffer_mut(self.capture_focus).pop();
                self.refresh_training_view();
            }
            Panel::Dashboard => {}
        }
    }

    fn toggle_checkbox(&mut self) {
        if self.panel == Panel::Config && self.focus.is_checkbox() {
            self.form.espnow_en = !self.form.espnow_en;
            self.view.lock().show_config(&self.form, self.focus);
        }
    }

    fn refresh_training_view(&mut self) {
        self.view
            .lock()
            .show_training(&self.capture, self.capture_focus);
    }
}
