use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};

use crate::core::state::App;
use crate::tui::component::Component;
use crate::tui::theme::Theme;

/// Splits the frame into tab strip, viewport, input field and status line.
pub fn layout(area: Rect) -> [Rect; 4] {
    use Constraint::{Length, Min};
    Layout::vertical([Length(1), Min(0), Length(1), Length(1)]).areas(area)
}

/// Compose one frame, top to bottom: tabs, then the spinner overlay while
/// busy or the viewport otherwise, then the input field and status line.
pub fn draw_ui(frame: &mut Frame, app: &mut App, theme: &Theme) {
    let [tabs_area, main_area, input_area, status_area] = layout(frame.area());

    app.tabs.render(frame, tabs_area, theme);

    if app.is_busy {
        app.busy.dimensions = app.dimensions;
        app.busy.render(frame, main_area, theme);
    } else {
        app.viewport.render(frame, main_area, theme);
    }

    app.input.render(frame, input_area, theme);
    app.status.render(frame, status_area, theme);
}
