//! # BusyIndicator Component
//!
//! A spinner shown centered over the viewport while a request is outstanding.
//!
//! The animation is driven by `Effect::Tick` values: `start()` schedules the
//! first tick and every accepted tick schedules the next one. Each busy
//! period gets a fresh generation id, and `stop()` retires the current one,
//! so a tick still in flight from an earlier period is simply dropped and
//! the old chain ends there.

use std::time::Duration;

use log::debug;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::Line;
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::core::action::Effect;
use crate::core::state::Dimensions;
use crate::tui::component::Component;
use crate::tui::theme::Theme;

const FRAMES: [&str; 8] = ["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"];
const LABEL: &str = "Loading...";

pub struct BusyIndicator {
    frame: usize,
    generation: u64,
    interval: Duration,
    /// Viewport size the overlay is centered in (set by the parent before rendering)
    pub dimensions: Dimensions,
}

impl BusyIndicator {
    pub fn new(interval: Duration) -> Self {
        Self {
            frame: 0,
            generation: 0,
            interval,
            dimensions: Dimensions::default(),
        }
    }

    /// Begin a new animation and return its first tick.
    pub fn start(&mut self) -> Effect {
        self.generation += 1;
        self.frame = 0;
        self.next_tick()
    }

    /// Abandon the running animation. Its pending tick becomes stale.
    pub fn stop(&mut self) {
        self.generation += 1;
    }

    /// Advance one frame if `id` belongs to the running animation.
    pub fn tick(&mut self, id: u64) -> Option<Effect> {
        if id != self.generation {
            debug!("Dropping stale tick {id} (current {})", self.generation);
            return None;
        }
        self.frame = (self.frame + 1) % FRAMES.len();
        Some(self.next_tick())
    }

    fn next_tick(&self) -> Effect {
        Effect::Tick {
            id: self.generation,
            after: self.interval,
        }
    }

    /// Glyph plus label, e.g. `⣾ Loading...`.
    pub fn view(&self) -> String {
        format!("{} {}", FRAMES[self.frame], LABEL)
    }
}

/// Left and top padding that centers `message` in a viewport of this size.
pub fn overlay_padding(dimensions: Dimensions, message: &str) -> (u16, u16) {
    let message_width = message.width() as u16;
    let left = dimensions.width.saturating_sub(message_width) / 2;
    let top = dimensions.height / 2;
    (left, top)
}

impl Component for BusyIndicator {
    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let message = self.view();
        let (left, top) = overlay_padding(self.dimensions, &message);

        let mut lines = vec![Line::default(); top as usize];
        lines.push(Line::styled(
            format!("{}{}", " ".repeat(left as usize), message),
            theme.busy,
        ));

        frame.render_widget(Paragraph::new(lines), area);
    }
}
