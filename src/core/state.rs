//! # Application State
//!
//! The single authoritative state for a Promptdeck session. One `App` is
//! built at startup and lives until quit; nothing is persisted.
//!
//! ```text
//! App
//! ├── mode: Mode                  // Insert (typing) or Command (navigation)
//! ├── is_busy: bool               // a fetch is outstanding
//! ├── dimensions: Dimensions      // viewport area from the last resize
//! ├── tabs: TabStrip              // selected tab index + labels
//! ├── input: InputField           // prompt being typed
//! ├── viewport: Viewport          // last response or error, scrollable
//! ├── busy: BusyIndicator         // spinner shown while is_busy
//! ├── status: StatusLine          // derived summary, refreshed after each update
//! └── renderer: MarkdownRenderer  // pure markdown → styled text function
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.
//! Sub-components are owned exclusively by `App`.

use ratatui::text::Text;

use crate::core::config::ResolvedConfig;
use crate::tui::components::{BusyIndicator, InputField, StatusLine, TabStrip, Viewport};
use crate::tui::markdown;

/// Rows taken by the tab strip, input field and status line.
pub const CHROME_HEIGHT: u16 = 3;

/// Converts a markdown answer into display text wrapped at the given width.
pub type MarkdownRenderer = fn(&str, u16) -> Text<'static>;

/// Modal input mode: determines how keystrokes are routed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Keystrokes go to the input field. Esc switches to Command.
    #[default]
    Insert,
    /// Left/Right switch tabs, the input field is blurred. Esc switches to Insert.
    Command,
}

impl Mode {
    pub fn label(self) -> &'static str {
        match self {
            Mode::Insert => "INSERT",
            Mode::Command => "COMMAND",
        }
    }
}

/// Size of the viewport area (terminal size minus chrome rows).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Dimensions {
    pub width: u16,
    pub height: u16,
}

impl Dimensions {
    /// Derive the viewport area from a terminal size.
    pub fn from_terminal(width: u16, height: u16) -> Self {
        Self {
            width,
            height: height.saturating_sub(CHROME_HEIGHT),
        }
    }
}

pub struct App {
    pub mode: Mode,
    pub is_busy: bool,
    pub dimensions: Dimensions,
    pub tabs: TabStrip,
    pub input: InputField,
    pub viewport: Viewport,
    pub busy: BusyIndicator,
    pub status: StatusLine,
    pub quit_key: char,
    pub renderer: MarkdownRenderer,
}

impl App {
    pub fn new(config: &ResolvedConfig) -> Self {
        let mut input = InputField::new(config.placeholder.clone());
        input.focus();

        let mut app = Self {
            mode: Mode::default(),
            is_busy: false,
            dimensions: Dimensions::default(),
            tabs: TabStrip::new(config.tabs.clone()),
            input,
            viewport: Viewport::new(),
            busy: BusyIndicator::new(config.tick_interval),
            status: StatusLine::new(config.model_name.clone()),
            quit_key: config.quit_key,
            renderer: markdown::render,
        };
        app.refresh_status();
        app
    }

    pub fn selected_tab(&self) -> usize {
        self.tabs.selected()
    }

    /// Re-derive the status line from the current state.
    pub(crate) fn refresh_status(&mut self) {
        self.status.mode = self.mode;
        self.status.is_busy = self.is_busy;
        self.status.tab = self.tabs.selected_label().to_string();
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::test_app;

    use super::*;

    #[test]
    fn test_app_new_defaults() {
        let app = test_app();
        assert_eq!(app.mode, Mode::Insert);
        assert!(!app.is_busy);
        assert_eq!(app.selected_tab(), 0);
        assert!(app.input.is_focused());
        assert!(app.input.value().is_empty());
        assert!(app.viewport.content().lines.is_empty());
        assert_eq!(app.status.mode, Mode::Insert);
        assert_eq!(app.status.tab, "AI");
    }

    #[test]
    fn test_dimensions_subtract_chrome() {
        let dims = Dimensions::from_terminal(80, 24);
        assert_eq!(dims, Dimensions { width: 80, height: 21 });
        assert_eq!(Dimensions::from_terminal(80, 2).height, 0);
    }
}
