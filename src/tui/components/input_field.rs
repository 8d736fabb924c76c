//! # InputField Component
//!
//! Single-line prompt entry.
//!
//! ## Responsibilities
//!
//! - Capture text input while focused
//! - Handle editing (backspace, delete, cursor movement, paste)
//! - Show a placeholder when empty
//! - Scroll horizontally so the cursor stays visible at the current width
//!
//! Submission is not handled here: the application reads `value()` and
//! calls `clear()` when Enter is pressed in Insert mode.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::core::action::{Action, Key};
use crate::tui::component::{Component, EventHandler};
use crate::tui::theme::Theme;

const PROMPT: &str = "> ";

pub struct InputField {
    buffer: String,
    /// Byte offset into `buffer` (always on a char boundary)
    cursor: usize,
    focused: bool,
    placeholder: String,
    /// Last known terminal width
    width: u16,
}

impl InputField {
    pub fn new(placeholder: String) -> Self {
        Self {
            buffer: String::new(),
            cursor: 0,
            focused: false,
            placeholder,
            width: 0,
        }
    }

    pub fn value(&self) -> &str {
        &self.buffer
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
    }

    pub fn focus(&mut self) {
        self.focused = true;
    }

    pub fn blur(&mut self) {
        self.focused = false;
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn set_width(&mut self, width: u16) {
        self.width = width;
    }

    fn insert_str(&mut self, text: &str) {
        self.buffer.insert_str(self.cursor, text);
        self.cursor += text.len();
    }

    fn prev_boundary(&self) -> usize {
        self.buffer[..self.cursor]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
            .unwrap_or(0)
    }

    fn next_boundary(&self) -> usize {
        self.buffer[self.cursor..]
            .char_indices()
            .nth(1)
            .map(|(i, _)| self.cursor + i)
            .unwrap_or(self.buffer.len())
    }

    /// Byte range of the buffer that fits in `columns`, plus the cursor's
    /// column within that range. Keeps the cursor on screen by dropping
    /// characters from the left.
    fn visible_window(&self, columns: usize) -> (usize, usize, usize) {
        let before = &self.buffer[..self.cursor];
        let mut start = 0;
        let mut cursor_col = before.width();
        // Reserve one column so the cursor can sit after the last char.
        let limit = columns.saturating_sub(1);
        for (i, c) in before.char_indices() {
            if cursor_col <= limit {
                break;
            }
            cursor_col -= c.width().unwrap_or(0);
            start = i + c.len_utf8();
        }

        let mut end = start;
        let mut used = 0;
        for (i, c) in self.buffer[start..].char_indices() {
            let w = c.width().unwrap_or(0);
            if used + w > columns {
                break;
            }
            used += w;
            end = start + i + c.len_utf8();
        }
        (start, end, cursor_col)
    }
}

impl Component for InputField {
    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let prompt_width = PROMPT.width() as u16;
        let columns = area.width.saturating_sub(prompt_width) as usize;

        let mut spans = vec![Span::styled(PROMPT, theme.input_prompt)];
        let mut cursor_col = 0;
        if self.buffer.is_empty() {
            spans.push(Span::styled(self.placeholder.clone(), theme.placeholder));
        } else {
            let (start, end, col) = self.visible_window(columns);
            cursor_col = col as u16;
            let style = if self.focused {
                theme.input_text
            } else {
                theme.input_blurred
            };
            spans.push(Span::styled(self.buffer[start..end].to_string(), style));
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), area);

        if self.focused && area.width > 0 && area.height > 0 {
            let x = (area.x + prompt_width + cursor_col).min(area.right().saturating_sub(1));
            frame.set_cursor_position((x, area.y));
        }
    }
}

impl EventHandler for InputField {
    fn handle_event(&mut self, action: &Action) {
        if let Action::Resize { width, .. } = action {
            self.set_width(*width);
            return;
        }
        if !self.focused {
            return;
        }
        match action {
            Action::Key(Key::Char(c)) => {
                self.buffer.insert(self.cursor, *c);
                self.cursor += c.len_utf8();
            }
            Action::Paste(text) => {
                let single_line: String = text
                    .chars()
                    .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
                    .collect();
                self.insert_str(&single_line);
            }
            Action::Key(Key::Backspace) if self.cursor > 0 => {
                let prev = self.prev_boundary();
                self.buffer.drain(prev..self.cursor);
                self.cursor = prev;
            }
            Action::Key(Key::Delete) if self.cursor < self.buffer.len() => {
                let next = self.next_boundary();
                self.buffer.drain(self.cursor..next);
            }
            Action::Key(Key::Left) => self.cursor = self.prev_boundary(),
            Action::Key(Key::Right) => self.cursor = self.next_boundary(),
            Action::Key(Key::Home) => self.cursor = 0,
            Action::Key(Key::End) => self.cursor = self.buffer.len(),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn focused() -> InputField {
        let mut input = InputField::new("Type here...".to_string());
        input.focus();
        input
    }

    fn press(input: &mut InputField, key: Key) {
        input.handle_event(&Action::Key(key));
    }

    fn rendered(input: &mut InputField, width: u16) -> (String, Option<(u16, u16)>) {
        let backend = TestBackend::new(width, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::default();
        let mut cursor = None;
        terminal
            .draw(|f| {
                input.render(f, f.area(), &theme);
            })
            .unwrap();
        if input.is_focused() {
            let pos = terminal.get_cursor_position().unwrap();
            cursor = Some((pos.x, pos.y));
        }
        let text = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>();
        (text, cursor)
    }

    #[test]
    fn test_handle_input() {
        let mut input = focused();

        press(&mut input, Key::Char('a'));
        press(&mut input, Key::Char('b'));
        assert_eq!(input.value(), "ab");

        press(&mut input, Key::Backspace);
        assert_eq!(input.value(), "a");

        press(&mut input, Key::Home);
        press(&mut input, Key::Backspace);
        press(&mut input, Key::Left);
        assert_eq!(input.value(), "a");
        press(&mut input, Key::End);
        press(&mut input, Key::Delete);
        press(&mut input, Key::Right);
        assert_eq!(input.value(), "a");
    }

    #[test]
    fn test_blurred_field_ignores_keys() {
        let mut input = focused();
        press(&mut input, Key::Char('a'));
        input.blur();
        press(&mut input, Key::Char('b'));
        press(&mut input, Key::Backspace);
        assert_eq!(input.value(), "a");
    }

    #[test]
    fn test_cursor_editing_handles_multibyte() {
        let mut input = focused();
        for c in "héllo".chars() {
            press(&mut input, Key::Char(c));
        }
        press(&mut input, Key::Home);
        press(&mut input, Key::Right);
        press(&mut input, Key::Delete);
        assert_eq!(input.value(), "hllo");
        press(&mut input, Key::End);
        press(&mut input, Key::Backspace);
        assert_eq!(input.value(), "hll");
        assert_eq!(press(&mut input, Key::Right), None, "already at end");
    }

    #[test]
    fn test_paste_flattens_newlines() {
        let mut input = focused();
        input.handle_event(&Action::Paste("one\ntwo\r\n".to_string()));
        assert_eq!(input.value(), "one two  ");
    }

    #[test]
    fn test_clear_resets_cursor() {
        let mut input = focused();
        for c in "abc".chars() {
            press(&mut input, Key::Char(c));
        }
        input.clear();
        press(&mut input, Key::Char('z'));
        assert_eq!(input.value(), "z");
    }

    #[test]
    fn test_resize_tracks_width_even_when_blurred() {
        let mut input = InputField::new(String::new());
        input.handle_event(&Action::Resize {
            width: 132,
            height: 40,
        });
        assert_eq!(input.width(), 132);
    }

    #[test]
    fn test_placeholder_shown_when_empty() {
        let mut input = focused();
        let (text, cursor) = rendered(&mut input, 30);
        assert!(text.starts_with("> Type here..."));
        assert_eq!(cursor, Some((2, 0)));
    }

    #[test]
    fn test_long_input_scrolls_to_keep_cursor_visible() {
        let mut input = focused();
        for c in "abcdefghijklmnopqrstuvwxyz".chars() {
            press(&mut input, Key::Char(c));
        }
        let (text, cursor) = rendered(&mut input, 12);
        // 10 columns after the prompt, one reserved for the cursor.
        assert_eq!(text, "> rstuvwxyz ");
        assert_eq!(cursor, Some((11, 0)));
    }
}
