//! # StatusLine Component
//!
//! Bottom bar summarising the current mode and context.
//!
//! ## Props-in-Struct Pattern
//!
//! StatusLine is purely presentational. Its fields are props that the
//! application re-derives after every update (`App::refresh_status`), and
//! rendering only reads them:
//!
//! ```text
//! ┌─────────┬──────────────────────────────┬─────────┬────────┐
//! │ INSERT  │ AI                           │ ready   │ gpt-4o │
//! └─────────┴──────────────────────────────┴─────────┴────────┘
//!   mode      active tab (fills the rest)    activity  model
//! ```
//!
//! On narrow terminals the tab segment shrinks first; the mode badge is
//! always drawn.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::core::state::Mode;
use crate::tui::component::Component;
use crate::tui::theme::Theme;

pub struct StatusLine {
    pub model_name: String,
    pub mode: Mode,
    pub tab: String,
    pub is_busy: bool,
}

impl StatusLine {
    pub fn new(model_name: String) -> Self {
        Self {
            model_name,
            mode: Mode::default(),
            tab: String::new(),
            is_busy: false,
        }
    }

    fn activity(&self) -> &'static str {
        if self.is_busy { "waiting" } else { "ready" }
    }
}

impl Component for StatusLine {
    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let mode_style = match self.mode {
            Mode::Insert => theme.mode_insert,
            Mode::Command => theme.mode_command,
        };
        let mode = format!(" {} ", self.mode.label());
        let activity = format!(" {} ", self.activity());
        let model = format!(" {} ", self.model_name);

        let fixed = mode.width() + activity.width() + model.width();
        let tab_width = (area.width as usize).saturating_sub(fixed);
        let tab = format!(" {}", self.tab);
        let tab = if tab.width() > tab_width {
            tab.chars()
                .scan(0, |used, c| {
                    *used += unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
                    (*used <= tab_width).then_some(c)
                })
                .collect::<String>()
        } else {
            format!("{tab:<tab_width$}")
        };

        let line = Line::from(vec![
            Span::styled(mode, mode_style),
            Span::styled(tab, theme.status_segment),
            Span::styled(activity, theme.status_activity),
            Span::styled(model, theme.status_model),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn rendered(status: &mut StatusLine, width: u16) -> String {
        let backend = TestBackend::new(width, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::default();
        terminal.draw(|f| status.render(f, f.area(), &theme)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_status_line_shows_all_segments() {
        let mut status = StatusLine::new("gpt-4o".to_string());
        status.tab = "Search".to_string();

        let text = rendered(&mut status, 60);

        assert!(text.starts_with(" INSERT "));
        assert!(text.contains("Search"));
        assert!(text.contains(" ready "));
        assert!(text.trim_end().ends_with("gpt-4o"));
    }

    #[test]
    fn test_status_line_reflects_mode_and_busy() {
        let mut status = StatusLine::new("gpt-4o".to_string());
        status.mode = Mode::Command;
        status.is_busy = true;

        let text = rendered(&mut status, 60);

        assert!(text.starts_with(" COMMAND "));
        assert!(text.contains("waiting"));
    }

    #[test]
    fn test_narrow_terminal_truncates_tab_first() {
        let mut status = StatusLine::new("m".to_string());
        status.tab = "Active Sprint(s)".to_string();

        // mode (8) + activity (7) + model (3) = 18, leaving 4 for the tab
        let text = rendered(&mut status, 22);

        assert!(text.starts_with(" INSERT  Act ready "));
        assert!(text.ends_with(" m "));
    }
}
