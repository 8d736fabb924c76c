//! # TabStrip Component
//!
//! A fixed, ordered row of tab labels with one selected. Selection is
//! clamped at both ends; it never wraps around.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::Span;
use ratatui::widgets::Tabs;

use crate::tui::component::Component;
use crate::tui::theme::Theme;

const DIVIDER: &str = "|";
const FALLBACK_LABEL: &str = "Main";

pub struct TabStrip {
    labels: Vec<String>,
    selected: usize,
}

impl TabStrip {
    /// Create a strip with the first tab selected. An empty label list
    /// gets a single fallback tab so there is always a valid selection.
    pub fn new(labels: Vec<String>) -> Self {
        let labels = if labels.is_empty() {
            vec![FALLBACK_LABEL.to_string()]
        } else {
            labels
        };
        Self {
            labels,
            selected: 0,
        }
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_label(&self) -> &str {
        &self.labels[self.selected]
    }

    pub fn tab_count(&self) -> usize {
        self.labels.len()
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.labels.len() {
            self.selected += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }
}

impl Component for TabStrip {
    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let tabs = Tabs::new(self.labels.iter().map(String::as_str))
            .select(self.selected)
            .style(theme.inactive_tab)
            .highlight_style(theme.active_tab)
            .divider(Span::styled(DIVIDER, theme.tab_divider))
            .padding("  ", "  ");
        frame.render_widget(tabs, area);
    }
}
