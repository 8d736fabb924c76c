//! # Viewport Component
//!
//! Scrollable view of the latest response (or error).
//!
//! The content is an opaque, already-styled `Text`. Replacing it resets the
//! scroll offset to the top. The offset lives in a `ScrollViewState` and is
//! clamped against the wrapped content height after every scroll or resize,
//! so it never runs past the last line.

use ratatui::Frame;
use ratatui::layout::{Position, Rect, Size};
use ratatui::text::Text;
use ratatui::widgets::{Paragraph, Wrap};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::action::{Action, Key};
use crate::core::state::Dimensions;
use crate::tui::component::{Component, EventHandler};
use crate::tui::theme::Theme;

/// Lines moved per mouse-wheel notch.
const WHEEL_STEP: u16 = 3;

pub struct Viewport {
    content: Text<'static>,
    scroll_state: ScrollViewState,
    width: u16,
    height: u16,
    /// Wrapped line count of `content` at the current width
    content_height: u16,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new()
    }
}

impl Viewport {
    pub fn new() -> Self {
        Self {
            content: Text::default(),
            scroll_state: ScrollViewState::default(),
            width: 0,
            height: 0,
            content_height: 0,
        }
    }

    pub fn content(&self) -> &Text<'static> {
        &self.content
    }

    /// Replace the content wholesale and scroll back to the top.
    pub fn set_content(&mut self, content: Text<'static>) {
        self.content = content;
        self.scroll_state.scroll_to_top();
        self.measure();
    }

    pub fn resize(&mut self, dimensions: Dimensions) {
        self.width = dimensions.width;
        self.height = dimensions.height;
        self.measure();
        self.clamp_scroll();
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Width available to text (one column is kept for the scrollbar).
    pub fn content_width(&self) -> u16 {
        self.width.saturating_sub(1)
    }

    pub fn offset(&self) -> u16 {
        self.scroll_state.offset().y
    }

    fn paragraph(&self) -> Paragraph<'static> {
        Paragraph::new(self.content.clone()).wrap(Wrap { trim: false })
    }

    fn measure(&mut self) {
        let width = self.content_width();
        self.content_height = if width == 0 || self.content.lines.is_empty() {
            self.content.lines.len()
        } else {
            self.paragraph().line_count(width)
        }
        .min(u16::MAX as usize) as u16;
    }

    fn max_offset(&self) -> u16 {
        self.content_height.saturating_sub(self.height)
    }

    fn scroll_to(&mut self, y: u16) {
        let y = y.min(self.max_offset());
        self.scroll_state.set_offset(Position { x: 0, y });
    }

    /// Clamp the offset so it never exceeds the content bounds.
    fn clamp_scroll(&mut self) {
        self.scroll_to(self.offset());
    }
}

impl Component for Viewport {
    fn render(&mut self, frame: &mut Frame, area: Rect, _theme: &Theme) {
        let content_width = area.width.saturating_sub(1);
        let canvas_height = self.content_height.max(area.height);

        let mut scroll_view = ScrollView::new(Size::new(content_width, canvas_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);
        scroll_view.render_widget(
            self.paragraph(),
            Rect::new(0, 0, content_width, self.content_height),
        );

        frame.render_stateful_widget(scroll_view, area, &mut self.scroll_state);
    }
}

impl EventHandler for Viewport {
    fn handle_event(&mut self, action: &Action) {
        let offset = self.offset();
        match action {
            Action::Resize { width, height } => {
                self.resize(Dimensions::from_terminal(*width, *height));
            }
            Action::Key(Key::Up) => self.scroll_to(offset.saturating_sub(1)),
            Action::Key(Key::Down) => self.scroll_to(offset.saturating_add(1)),
            Action::Key(Key::PageUp) => self.scroll_to(offset.saturating_sub(self.height)),
            Action::Key(Key::PageDown) => self.scroll_to(offset.saturating_add(self.height)),
            Action::ScrollUp => self.scroll_to(offset.saturating_sub(WHEEL_STEP)),
            Action::ScrollDown => self.scroll_to(offset.saturating_add(WHEEL_STEP)),
            _ => {}
        }
    }
}
