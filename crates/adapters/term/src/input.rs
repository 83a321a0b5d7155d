//! Keyboard input — raw event reader thread and the key → event mapping.
//!
//! The mapping is a pure function so bindings are testable without a
//! terminal; the reader thread only shovels raw key events into a channel.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tokio::sync::mpsc::UnboundedSender;

use bbdash_app::controller::UiEvent;
use bbdash_app::ports::view::Panel;

/// What a key press asks the composition root to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputSignal {
    /// Forward to the controller.
    Ui(UiEvent),
    /// Download the training dataset to disk.
    DownloadDataset,
    /// Leave the application.
    Quit,
}

/// Map a key press to an input signal.
///
/// The mapping depends on the active panel: on the dashboard plain letters
/// are hotkeys, on the form panels they type into the focused buffer.
/// `checkbox_focused` decides whether space toggles or types.
#[must_use]
pub fn map_key(key: KeyEvent, panel: Panel, checkbox_focused: bool) -> Option<InputSignal> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(InputSignal::Quit),
            KeyCode::Char('r') if panel == Panel::Config => {
                Some(InputSignal::Ui(UiEvent::Reload))
            }
            KeyCode::Char('b') if panel == Panel::Config => {
                Some(InputSignal::Ui(UiEvent::Restart))
            }
            KeyCode::Char('t') if panel == Panel::Training => {
                Some(InputSignal::Ui(UiEvent::ToggleMode))
            }
            KeyCode::Char('x') if panel == Panel::Training => {
                Some(InputSignal::Ui(UiEvent::ClearDataset))
            }
            KeyCode::Char('d') if panel == Panel::Training => {
                Some(InputSignal::DownloadDataset)
            }
            _ => None,
        };
    }

    match key.code {
        KeyCode::Tab => Some(InputSignal::Ui(UiEvent::NextPanel)),
        KeyCode::Esc => Some(InputSignal::Ui(UiEvent::ShowPanel(Panel::Dashboard))),
        KeyCode::Up => Some(InputSignal::Ui(UiEvent::FocusPrev)),
        KeyCode::Down => Some(InputSignal::Ui(UiEvent::FocusNext)),
        KeyCode::Enter => Some(InputSignal::Ui(UiEvent::Submit)),
        KeyCode::Backspace => Some(InputSignal::Ui(UiEvent::Backspace)),
        KeyCode::Char(ch) => map_char(ch, panel, checkbox_focused),
        _ => None,
    }
}

fn map_char(ch: char, panel: Panel, checkbox_focused: bool) -> Option<InputSignal> {
    match panel {
        Panel::Dashboard => match ch {
            'q' => Some(InputSignal::Quit),
            'c' => Some(InputSignal::Ui(UiEvent::ShowPanel(Panel::Config))),
            't' => Some(InputSignal::Ui(UiEvent::ShowPanel(Panel::Training))),
            's' => Some(InputSignal::Ui(UiEvent::SyncTime)),
            _ => None,
        },
        Panel::Config if checkbox_focused && ch == ' ' => Some(InputSignal::Ui(UiEvent::Toggle)),
        Panel::Config | Panel::Training => Some(InputSignal::Ui(UiEvent::Input(ch))),
    }
}

/// Read terminal events on a dedicated thread, forwarding key presses.
///
/// Blocking `crossterm::event::read` must stay off the async runtime. The
/// thread exits when the receiving side is dropped or the event stream
/// fails.
pub fn spawn_input_reader(tx: UnboundedSender<KeyEvent>) -> std::thread::JoinHandle<()> {
    std::thread::spawn(move || {
        loop {
            match crossterm::event::read() {
                Ok(Event::Key(key)) => {
                    if tx.send(key).is_err() {
                        break;
                    }
                }
                Ok(_) => {}
                Err(err) => {
                    tracing::warn!(%err, "terminal input read failed");
                    break;
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(ch: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL)
    }

    #[test]
    fn should_cycle_panels_with_tab_on_any_panel() {
        for panel in Panel::ALL {
            assert_eq!(
                map_key(press(KeyCode::Tab), panel, false),
                Some(InputSignal::Ui(UiEvent::NextPanel))
            );
        }
    }

    #[test]
    fn should_use_letters_as_hotkeys_on_the_dashboard() {
        assert_eq!(
            map_key(press(KeyCode::Char('q')), Panel::Dashboard, false),
            Some(InputSignal::Quit)
        );
        assert_eq!(
            map_key(press(KeyCode::Char('c')), Panel::Dashboard, false),
            Some(InputSignal::Ui(UiEvent::ShowPanel(Panel::Config)))
        );
        assert_eq!(
            map_key(press(KeyCode::Char('t')), Panel::Dashboard, false),
            Some(InputSignal::Ui(UiEvent::ShowPanel(Panel::Training)))
        );
        assert_eq!(
            map_key(press(KeyCode::Char('s')), Panel::Dashboard, false),
            Some(InputSignal::Ui(UiEvent::SyncTime))
        );
        assert_eq!(map_key(press(KeyCode::Char('z')), Panel::Dashboard, false), None);
    }

    #[test]
    fn should_type_letters_into_form_buffers_on_form_panels() {
        assert_eq!(
            map_key(press(KeyCode::Char('q')), Panel::Config, false),
            Some(InputSignal::Ui(UiEvent::Input('q')))
        );
        assert_eq!(
            map_key(press(KeyCode::Char('5')), Panel::Training, false),
            Some(InputSignal::Ui(UiEvent::Input('5')))
        );
        assert_eq!(
            map_key(press(KeyCode::Char(' ')), Panel::Config, false),
            Some(InputSignal::Ui(UiEvent::Input(' ')))
        );
    }

    #[test]
    fn should_toggle_with_space_only_on_the_focused_checkbox() {
        assert_eq!(
            map_key(press(KeyCode::Char(' ')), Panel::Config, true),
            Some(InputSignal::Ui(UiEvent::Toggle))
        );
    }

    #[test]
    fn should_map_control_bindings_per_panel() {
        assert_eq!(map_key(ctrl('c'), Panel::Dashboard, false), Some(InputSignal::Quit));
        assert_eq!(
            map_key(ctrl('r'), Panel::Config, false),
            Some(InputSignal::Ui(UiEvent::Reload))
        );
        assert_eq!(
            map_key(ctrl('b'), Panel::Config, false),
            Some(InputSignal::Ui(UiEvent::Restart))
        );
        assert_eq!(
            map_key(ctrl('t'), Panel::Training, false),
            Some(InputSignal::Ui(UiEvent::ToggleMode))
        );
        assert_eq!(
            map_key(ctrl('x'), Panel::Training, false),
            Some(InputSignal::Ui(UiEvent::ClearDataset))
        );
        assert_eq!(
            map_key(ctrl('d'), Panel::Training, false),
            Some(InputSignal::DownloadDataset)
        );
        // Training bindings are inert elsewhere.
        assert_eq!(map_key(ctrl('t'), Panel::Dashboard, false), None);
    }

    #[test]
    fn should_map_navigation_and_editing_keys() {
        assert_eq!(
            map_key(press(KeyCode::Down), Panel::Config, false),
            Some(InputSignal::Ui(UiEvent::FocusNext))
        );
        assert_eq!(
            map_key(press(KeyCode::Up), Panel::Config, false),
            Some(InputSignal::Ui(UiEvent::FocusPrev))
        );
        assert_eq!(
            map_key(press(KeyCode::Enter), Panel::Config, false),
            Some(InputSignal::Ui(UiEvent::Submit))
        );
        assert_eq!(
            map_key(press(KeyCode::Backspace), Panel::Config, false),
            Some(InputSignal::Ui(UiEvent::Backspace))
        );
        assert_eq!(
            map_key(press(KeyCode::Esc), Panel::Training, false),
            Some(InputSignal::Ui(UiEvent::ShowPanel(Panel::Dashboard)))
        );
    }

    #[test]
    fn should_ignore_key_release_events() {
        let mut release = press(KeyCode::Char('q'));
        release.kind = KeyEventKind::Release;
        assert_eq!(map_key(release, Panel::Dashboard, false), None);
    }
}
