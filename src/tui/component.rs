use ratatui::Frame;
use ratatui::layout::Rect;

use crate::core::action::Action;
use crate::tui::theme::Theme;

/// A reusable UI component.
///
/// Components in this architecture follow the React pattern:
/// - They receive data via props (struct fields).
/// - They may hold internal state (via `&mut State` fields).
/// - They render to a `Frame` within a given `Rect`.
///
/// Visual styling is never stored in a component. The immutable [`Theme`]
/// is handed to every render call instead.
///
/// # Mutability
///
/// The `render` method takes `&mut self` to allow components to:
/// 1. Update internal caches (e.g. layout calculations).
/// 2. Manage presentation state (e.g. scroll offsets) during rendering.
///
/// This aligns with Ratatui's `StatefulWidget` pattern.
pub trait Component {
    /// Render the component into the given area.
    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme);
}

/// A component that does its own bookkeeping for incoming actions.
///
/// The application forwards each action to its children after the
/// top-level update has run.
pub trait EventHandler {
    /// Update internal state for an action. Actions the component does not
    /// care about are ignored.
    fn handle_event(&mut self, action: &Action);
}
