//! # Actions
//!
//! Everything that can happen in Promptdeck becomes an `Action`.
//! User presses Enter? That's `Action::Key(Key::Enter)`.
//! API responds? That's `Action::FetchCompleted(result)`.
//!
//! The `update()` function takes the current state and an action, mutates
//! the state, and returns the effects to run. No I/O here: effects are
//! plain values and the event loop in `tui` executes them.
//!
//! ```text
//! State + Action  →  update()  →  New State + Vec<Effect>
//! ```
//!
//! Each action is handled in two passes. First the top-level logic
//! (mode switches, submission, tab selection, fetch results), then the
//! same action is forwarded to the input field and viewport so they can
//! do their own bookkeeping (cursor movement, scrolling, resizing).

use std::time::Duration;

use log::{debug, info, warn};
use ratatui::text::Text;

use crate::core::state::{App, Dimensions, Mode};
use crate::tui::component::EventHandler;

/// Terminal-independent key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Enter,
    Esc,
    Backspace,
    Delete,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    PageUp,
    PageDown,
    /// Ctrl+C
    Interrupt,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Key(Key),
    /// Bracketed paste.
    Paste(String),
    /// Mouse wheel.
    ScrollUp,
    ScrollDown,
    /// Terminal resized to this many columns and rows.
    Resize { width: u16, height: u16 },
    /// Busy-indicator tick from ticker generation `id`.
    Tick(u64),
    /// The outstanding fetch finished. `Err` holds the display text.
    FetchCompleted(Result<String, String>),
}

/// Work the event loop runs on behalf of `update`. Every effect except
/// `Quit` eventually delivers exactly one `Action` back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Quit,
    /// Deliver `Action::Tick(id)` after the delay.
    Tick { id: u64, after: Duration },
    /// Ask the completion provider, then deliver `Action::FetchCompleted`.
    Fetch { prompt: String },
}

pub fn update(app: &mut App, action: Action) -> Vec<Effect> {
    let mut effects = Vec::new();

    match &action {
        Action::Key(key) if is_quit(app, *key) => {
            info!("Quit requested ({:?})", key);
            return vec![Effect::Quit];
        }
        Action::Key(Key::Esc) => toggle_mode(app),
        Action::Key(Key::Enter) if app.mode == Mode::Insert => {
            effects.extend(submit(app));
        }
        Action::Key(Key::Left) if app.mode == Mode::Command => app.tabs.select_previous(),
        Action::Key(Key::Right) if app.mode == Mode::Command => app.tabs.select_next(),
        Action::Resize { width, height } => {
            app.dimensions = Dimensions::from_terminal(*width, *height);
        }
        Action::Tick(id) => {
            if app.is_busy {
                effects.extend(app.busy.tick(*id));
            } else {
                debug!("Dropping tick {id}: not busy");
            }
        }
        Action::FetchCompleted(outcome) => complete_fetch(app, outcome),
        _ => {}
    }

    // Children do their own bookkeeping after the top-level update.
    app.input.handle_event(&action);
    app.viewport.handle_event(&action);
    app.refresh_status();

    effects
}

fn is_quit(app: &App, key: Key) -> bool {
    match key {
        Key::Interrupt => true,
        Key::Char(c) => c == app.quit_key,
        _ => false,
    }
}

fn toggle_mode(app: &mut App) {
    app.mode = match app.mode {
        Mode::Insert => {
            app.input.blur();
            Mode::Command
        }
        Mode::Command => {
            app.input.focus();
            Mode::Insert
        }
    };
    debug!("Mode is now {:?}", app.mode);
}

/// Capture the input, start the spinner and request a completion.
fn submit(app: &mut App) -> Vec<Effect> {
    if app.is_busy {
        debug!("Submit ignored: a request is already outstanding");
        return Vec::new();
    }
    let prompt = app.input.value().to_string();
    if prompt.trim().is_empty() {
        return Vec::new();
    }

    app.input.clear();
    app.is_busy = true;
    info!("Submitting prompt ({} bytes)", prompt.len());

    vec![app.busy.start(), Effect::Fetch { prompt }]
}

fn complete_fetch(app: &mut App, outcome: &Result<String, String>) {
    if !app.is_busy {
        warn!("Ignoring fetch completion with no request outstanding");
        return;
    }
    app.is_busy = false;
    app.busy.stop();

    let content = match outcome {
        Ok(text) => (app.renderer)(text, app.viewport.content_width()),
        Err(message) => {
            warn!("Fetch failed: {message}");
            Text::raw(message.clone())
        }
    };
    app.viewport.set_content(content);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{test_app, test_app_with_tabs, type_text};
    use crate::tui::markdown;

    fn key(app: &mut App, key: Key) -> Vec<Effect> {
        update(app, Action::Key(key))
    }

    fn fetches(effects: &[Effect]) -> Vec<&str> {
        effects
            .iter()
            .filter_map(|e| match e {
                Effect::Fetch { prompt } => Some(prompt.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn submit_starts_fetch_and_clears_input() {
        let mut app = test_app();
        type_text(&mut app, "hello");
        assert_eq!(app.input.value(), "hello");

        let effects = key(&mut app, Key::Enter);

        assert!(app.is_busy);
        assert!(app.input.value().is_empty());
        assert_eq!(fetches(&effects), vec!["hello"]);
        assert!(matches!(effects[0], Effect::Tick { .. }));
        assert_eq!(effects.len(), 2);
    }

    #[test]
    fn submit_while_busy_is_ignored() {
        let mut app = test_app();
        type_text(&mut app, "first");
        key(&mut app, Key::Enter);

        type_text(&mut app, "second");
        let effects = key(&mut app, Key::Enter);

        assert!(effects.is_empty());
        assert!(app.is_busy);
        assert_eq!(app.input.value(), "second", "input must not be cleared again");
    }

    #[test]
    fn blank_submit_is_ignored() {
        let mut app = test_app();
        type_text(&mut app, "   ");
        let effects = key(&mut app, Key::Enter);
        assert!(effects.is_empty());
        assert!(!app.is_busy);
        assert_eq!(app.input.value(), "   ");
    }

    #[test]
    fn enter_in_command_mode_does_not_submit() {
        let mut app = test_app();
        type_text(&mut app, "hello");
        key(&mut app, Key::Esc);
        let effects = key(&mut app, Key::Enter);
        assert!(effects.is_empty());
        assert!(!app.is_busy);
        assert_eq!(app.input.value(), "hello");
    }

    #[test]
    fn successful_fetch_renders_markdown() {
        let mut app = test_app();
        type_text(&mut app, "hello");
        key(&mut app, Key::Enter);

        let effects = update(&mut app, Action::FetchCompleted(Ok("**hi**".to_string())));

        assert!(effects.is_empty());
        assert!(!app.is_busy);
        let expected = markdown::render("**hi**", app.viewport.content_width());
        assert_eq!(app.viewport.content(), &expected);
        let span = &app.viewport.content().lines[0].spans[0];
        assert_eq!(span.content, "hi");
        assert!(span.style.add_modifier.contains(ratatui::style::Modifier::BOLD));
    }

    #[test]
    fn failed_fetch_shows_error_text() {
        let mut app = test_app();
        type_text(&mut app, "hello");
        key(&mut app, Key::Enter);

        update(&mut app, Action::FetchCompleted(Err("network down".to_string())));

        assert!(!app.is_busy);
        assert_eq!(app.viewport.content(), &Text::raw("network down"));
    }

    #[test]
    fn failed_fetch_allows_retry() {
        let mut app = test_app();
        type_text(&mut app, "hello");
        key(&mut app, Key::Enter);
        update(&mut app, Action::FetchCompleted(Err("timeout".to_string())));

        type_text(&mut app, "again");
        let effects = key(&mut app, Key::Enter);
        assert_eq!(fetches(&effects), vec!["again"]);
    }

    #[test]
    fn stale_completion_is_ignored() {
        let mut app = test_app();
        app.viewport.set_content(Text::raw("previous answer"));

        update(&mut app, Action::FetchCompleted(Ok("late".to_string())));

        assert!(!app.is_busy);
        assert_eq!(app.viewport.content(), &Text::raw("previous answer"));
    }

    #[test]
    fn completion_replaces_content_and_resets_scroll() {
        let mut app = test_app();
        let long: String = (0..100).map(|i| format!("line {i}\n")).collect();
        app.viewport.set_content(Text::raw(long));
        update(&mut app, Action::Key(Key::PageDown));
        assert!(app.viewport.offset() > 0);

        type_text(&mut app, "hello");
        key(&mut app, Key::Enter);
        update(&mut app, Action::FetchCompleted(Ok("short".to_string())));
        assert_eq!(app.viewport.offset(), 0);
    }

    #[test]
    fn tabs_clamp_in_command_mode() {
        let mut app = test_app_with_tabs(&["One", "Two", "Three"]);
        key(&mut app, Key::Esc);
        assert_eq!(app.mode, Mode::Command);

        key(&mut app, Key::Left);
        assert_eq!(app.selected_tab(), 0);
        key(&mut app, Key::Right);
        key(&mut app, Key::Right);
        assert_eq!(app.selected_tab(), 2);
        key(&mut app, Key::Right);
        assert_eq!(app.selected_tab(), 2);
        assert_eq!(app.status.tab, "Three");
    }

    #[test]
    fn tab_index_stays_in_bounds_for_any_sequence() {
        let mut app = test_app_with_tabs(&["One", "Two", "Three"]);
        key(&mut app, Key::Esc);
        // Deterministic pseudo-random walk of left/right presses.
        let mut seed: u32 = 7;
        for _ in 0..500 {
            seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            let k = if seed & 0x100 == 0 { Key::Left } else { Key::Right };
            key(&mut app, k);
            assert!(app.selected_tab() < 3);
        }
    }

    #[test]
    fn arrows_in_insert_mode_move_cursor_not_tabs() {
        let mut app = test_app();
        type_text(&mut app, "ab");
        key(&mut app, Key::Right);
        key(&mut app, Key::Left);
        assert_eq!(app.selected_tab(), 0);
        type_text(&mut app, "X");
        assert_eq!(app.input.value(), "aXb");
    }

    #[test]
    fn esc_toggles_mode_and_focus() {
        let mut app = test_app();
        key(&mut app, Key::Esc);
        assert_eq!(app.mode, Mode::Command);
        assert!(!app.input.is_focused());

        key(&mut app, Key::Esc);
        assert_eq!(app.mode, Mode::Insert);
        assert!(app.input.is_focused());
    }

    #[test]
    fn typing_in_command_mode_is_not_routed_to_input() {
        let mut app = test_app();
        key(&mut app, Key::Esc);
        type_text(&mut app, "abc");
        assert!(app.input.value().is_empty());
    }

    #[test]
    fn only_esc_changes_mode() {
        let mut app = test_app();
        let keys = [
            Key::Char('a'),
            Key::Enter,
            Key::Backspace,
            Key::Delete,
            Key::Left,
            Key::Right,
            Key::Up,
            Key::Down,
            Key::Home,
            Key::End,
            Key::PageUp,
            Key::PageDown,
        ];
        for start in [Mode::Insert, Mode::Command] {
            if app.mode != start {
                key(&mut app, Key::Esc);
            }
            for k in keys {
                key(&mut app, k);
                assert_eq!(app.mode, start, "{:?} changed the mode", k);
            }
            update(&mut app, Action::Resize { width: 100, height: 30 });
            update(&mut app, Action::Paste("pasted".to_string()));
            update(&mut app, Action::ScrollDown);
            assert_eq!(app.mode, start);
        }
    }

    #[test]
    fn quit_key_quits_in_both_modes_without_mutation() {
        for toggle in [false, true] {
            let mut app = test_app();
            type_text(&mut app, "draft");
            if toggle {
                key(&mut app, Key::Esc);
            }
            let mode = app.mode;

            let effects = key(&mut app, Key::Char('q'));

            assert_eq!(effects, vec![Effect::Quit]);
            assert_eq!(app.mode, mode);
            assert_eq!(app.input.value(), "draft");
        }
    }

    #[test]
    fn interrupt_quits() {
        let mut app = test_app();
        assert_eq!(key(&mut app, Key::Interrupt), vec![Effect::Quit]);
    }

    #[test]
    fn resize_updates_dimensions_and_is_idempotent() {
        let mut app = test_app();
        update(&mut app, Action::Resize { width: 120, height: 40 });
        assert_eq!(app.dimensions, Dimensions { width: 120, height: 37 });
        assert_eq!(app.viewport.height(), 37);
        assert_eq!(app.input.width(), 120);

        let before = (
            app.dimensions,
            app.viewport.height(),
            app.viewport.content_width(),
            app.input.width(),
            app.mode,
        );
        let effects = update(&mut app, Action::Resize { width: 120, height: 40 });
        let after = (
            app.dimensions,
            app.viewport.height(),
            app.viewport.content_width(),
            app.input.width(),
            app.mode,
        );
        assert!(effects.is_empty());
        assert_eq!(before, after);
    }

    #[test]
    fn ticks_advance_only_while_busy() {
        let mut app = test_app();
        type_text(&mut app, "hello");
        let effects = key(&mut app, Key::Enter);
        let Effect::Tick { id, .. } = effects[0] else {
            panic!("expected tick effect first, got {:?}", effects);
        };

        let next = update(&mut app, Action::Tick(id));
        assert!(matches!(next.as_slice(), [Effect::Tick { id: n, .. }] if *n == id));

        update(&mut app, Action::FetchCompleted(Ok("done".to_string())));
        assert!(update(&mut app, Action::Tick(id)).is_empty());
    }

    #[test]
    fn tick_from_previous_request_is_dropped() {
        let mut app = test_app();
        type_text(&mut app, "one");
        let first = key(&mut app, Key::Enter);
        let Effect::Tick { id: old_id, .. } = first[0] else {
            panic!("expected tick effect");
        };
        update(&mut app, Action::FetchCompleted(Ok("ok".to_string())));

        type_text(&mut app, "two");
        key(&mut app, Key::Enter);
        assert!(update(&mut app, Action::Tick(old_id)).is_empty());
    }

    #[test]
    fn status_line_tracks_mode_and_busy() {
        let mut app = test_app();
        type_text(&mut app, "hello");
        key(&mut app, Key::Enter);
        assert!(app.status.is_busy);
        key(&mut app, Key::Esc);
        assert_eq!(app.status.mode, Mode::Command);
        update(&mut app, Action::FetchCompleted(Ok("x".to_string())));
        assert!(!app.status.is_busy);
    }
}
