//! # Theme
//!
//! Every colour and text style the UI uses, gathered into one immutable
//! value. `draw_ui` receives it by reference and hands it down to each
//! component's render call, so no component carries its own styling.

use ratatui::style::{Color, Modifier, Style};

const PINK: Color = Color::Rgb(0xF2, 0x5D, 0x94);
const CHARCOAL: Color = Color::Rgb(0x3C, 0x38, 0x36);
const VIOLET: Color = Color::Rgb(0xA5, 0x50, 0xDF);
const INDIGO: Color = Color::Rgb(0x61, 0x24, 0xDF);
const TEAL: Color = Color::Rgb(0x2A, 0x9D, 0x8F);
const GREY: Color = Color::Rgb(0x88, 0x88, 0x88);

#[derive(Debug, Clone)]
pub struct Theme {
    pub active_tab: Style,
    pub inactive_tab: Style,
    pub tab_divider: Style,
    /// Mode badge while typing.
    pub mode_insert: Style,
    /// Mode badge while navigating.
    pub mode_command: Style,
    pub status_segment: Style,
    pub status_activity: Style,
    pub status_model: Style,
    pub input_prompt: Style,
    pub input_text: Style,
    pub input_blurred: Style,
    pub placeholder: Style,
    pub busy: Style,
}

impl Default for Theme {
    fn default() -> Self {
        let white = Color::White;
        Self {
            active_tab: Style::default()
                .fg(Color::Black)
                .bg(white)
                .add_modifier(Modifier::BOLD),
            inactive_tab: Style::default().fg(GREY),
            tab_divider: Style::default().fg(GREY),
            mode_insert: Style::default()
                .fg(white)
                .bg(PINK)
                .add_modifier(Modifier::BOLD),
            mode_command: Style::default()
                .fg(white)
                .bg(TEAL)
                .add_modifier(Modifier::BOLD),
            status_segment: Style::default().fg(white).bg(CHARCOAL),
            status_activity: Style::default().fg(white).bg(VIOLET),
            status_model: Style::default().fg(white).bg(INDIGO),
            input_prompt: Style::default().fg(PINK).add_modifier(Modifier::BOLD),
            input_text: Style::default().fg(white),
            input_blurred: Style::default().fg(GREY),
            placeholder: Style::default().fg(GREY).add_modifier(Modifier::DIM),
            busy: Style::default().fg(PINK),
        }
    }
}
