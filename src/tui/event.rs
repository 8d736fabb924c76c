//! Terminal input → `Action` translation.
//!
//! crossterm reads are blocking, so they run on a dedicated thread that
//! feeds the same channel the tick and fetch tasks use.

use std::sync::mpsc;
use std::thread;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEventKind};
use log::{debug, warn};

use crate::core::action::{Action, Key};

/// Translate one crossterm event. Key releases and repeats, focus changes
/// and mouse movement have no meaning here and map to `None`.
pub fn map_event(event: Event) -> Option<Action> {
    match event {
        Event::Key(key) => map_key(key).map(Action::Key),
        Event::Paste(data) => Some(Action::Paste(data)),
        Event::Mouse(mouse) => match mouse.kind {
            MouseEventKind::ScrollUp => Some(Action::ScrollUp),
            MouseEventKind::ScrollDown => Some(Action::ScrollDown),
            _ => None,
        },
        Event::Resize(width, height) => Some(Action::Resize { width, height }),
        _ => None,
    }
}

fn map_key(key: KeyEvent) -> Option<Key> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    match (key.modifiers, key.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(Key::Interrupt),
        (m, KeyCode::Char(_)) if m.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => None,
        (_, KeyCode::Char(c)) => Some(Key::Char(c)),
        (_, KeyCode::Enter) => Some(Key::Enter),
        (_, KeyCode::Esc) => Some(Key::Esc),
        (_, KeyCode::Backspace) => Some(Key::Backspace),
        (_, KeyCode::Delete) => Some(Key::Delete),
        (_, KeyCode::Left) => Some(Key::Left),
        (_, KeyCode::Right) => Some(Key::Right),
        (_, KeyCode::Up) => Some(Key::Up),
        (_, KeyCode::Down) => Some(Key::Down),
        (_, KeyCode::Home) => Some(Key::Home),
        (_, KeyCode::End) => Some(Key::End),
        (_, KeyCode::PageUp) => Some(Key::PageUp),
        (_, KeyCode::PageDown) => Some(Key::PageDown),
        _ => None,
    }
}

/// Read terminal events forever, forwarding the meaningful ones. Stops
/// when the terminal read fails or the receiver is gone.
pub fn spawn_input_reader(tx: mpsc::Sender<Action>) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        loop {
            let event = match event::read() {
                Ok(event) => event,
                Err(e) => {
                    warn!("Terminal read failed, input reader stopping: {e}");
                    return;
                }
            };
            let Some(action) = map_event(event) else {
                continue;
            };
            if tx.send(action).is_err() {
                debug!("Input reader stopping: receiver dropped");
                return;
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventState, MouseEvent};

    fn press(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent::new(code, modifiers))
    }

    #[test]
    fn test_characters_and_special_keys() {
        assert_eq!(
            map_event(press(KeyCode::Char('a'), KeyModifiers::NONE)),
            Some(Action::Key(Key::Char('a')))
        );
        assert_eq!(
            map_event(press(KeyCode::Char('A'), KeyModifiers::SHIFT)),
            Some(Action::Key(Key::Char('A')))
        );
        assert_eq!(
            map_event(press(KeyCode::Enter, KeyModifiers::NONE)),
            Some(Action::Key(Key::Enter))
        );
        assert_eq!(
            map_event(press(KeyCode::Esc, KeyModifiers::NONE)),
            Some(Action::Key(Key::Esc))
        );
        assert_eq!(
            map_event(press(KeyCode::PageDown, KeyModifiers::NONE)),
            Some(Action::Key(Key::PageDown))
        );
    }

    #[test]
    fn test_ctrl_c_interrupts_and_other_chords_are_dropped() {
        assert_eq!(
            map_event(press(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Action::Key(Key::Interrupt))
        );
        assert_eq!(map_event(press(KeyCode::Char('x'), KeyModifiers::CONTROL)), None);
        assert_eq!(map_event(press(KeyCode::Char('q'), KeyModifiers::ALT)), None);
    }

    #[test]
    fn test_key_release_is_ignored() {
        let release = KeyEvent {
            code: KeyCode::Char('a'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(map_event(Event::Key(release)), None);
    }

    #[test]
    fn test_paste_wheel_and_resize() {
        assert_eq!(
            map_event(Event::Paste("hi\nthere".to_string())),
            Some(Action::Paste("hi\nthere".to_string()))
        );

        let wheel = |kind| {
            Event::Mouse(MouseEvent {
                kind,
                column: 0,
                row: 0,
                modifiers: KeyModifiers::NONE,
            })
        };
        assert_eq!(map_event(wheel(MouseEventKind::ScrollUp)), Some(Action::ScrollUp));
        assert_eq!(map_event(wheel(MouseEventKind::ScrollDown)), Some(Action::ScrollDown));
        assert_eq!(map_event(wheel(MouseEventKind::Moved)), None);

        assert_eq!(
            map_event(Event::Resize(100, 40)),
            Some(Action::Resize {
                width: 100,
                height: 40
            })
        );
    }

    #[test]
    fn test_focus_events_are_ignored() {
        assert_eq!(map_event(Event::FocusGained), None);
    }
}
