//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! translates keyboard events into `core::action::Action` values and
//! executes the effects `update()` hands back.
//!
//! ## Event Loop
//!
//! All inbound messages share one ordered queue:
//!
//! ```text
//! input thread ──┐
//! tick tasks ────┼──► mpsc<Action> ──► update() ──► Vec<Effect>
//! fetch tasks ───┘                                      │
//!       ▲                                               │
//!       └──────────────── tokio::spawn ◄────────────────┘
//! ```
//!
//! Each iteration draws once, blocks for the next action, then drains
//! whatever else is queued before drawing again. Bursts such as a large
//! paste or a resize storm therefore cost a single redraw.

pub(crate) mod component;
pub mod components;
mod event;
pub mod markdown;
pub mod theme;
mod ui;

use std::io::stdout;
use std::iter;
use std::sync::{Arc, mpsc};
use std::time::Duration;

use crossterm::cursor::SetCursorStyle;
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use log::{debug, info, warn};
use ratatui::DefaultTerminal;

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::App;
use crate::inference::{ChatCompletionsProvider, CompletionProvider, CompletionRequest};
use crate::tui::theme::Theme;

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Kitty keyboard protocol lets a lone Esc arrive without delay.
        // Terminals that don't support it ignore the sequence.
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            SetCursorStyle::SteadyBlock,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableMouseCapture,
            DisableBracketedPaste,
            SetCursorStyle::DefaultUserShape
        );
    }
}

/// Build the completion provider the resolved config points at.
pub fn build_provider(config: &ResolvedConfig) -> Arc<dyn CompletionProvider> {
    Arc::new(ChatCompletionsProvider::new(
        config.provider,
        config.base_url.clone(),
        config.api_key.clone(),
        config.request_timeout,
    ))
}

/// Attach to the terminal and run until the user quits. The terminal is
/// restored whether the loop ends normally or with an error.
pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let mut terminal = ratatui::try_init()?;
    let result = event_loop(&mut terminal, &config);
    ratatui::restore();
    result
}

fn event_loop(terminal: &mut DefaultTerminal, config: &ResolvedConfig) -> std::io::Result<()> {
    let _terminal_mode_guard = TerminalModeGuard::new()?;

    let provider = build_provider(config);
    let model = config.model_name.clone();
    let mut app = App::new(config);
    let theme = Theme::default();

    let (tx, rx) = mpsc::channel();
    event::spawn_input_reader(tx.clone());

    let size = terminal.size()?;
    update(
        &mut app,
        Action::Resize {
            width: size.width,
            height: size.height,
        },
    );

    info!("Event loop started ({} via {})", model, provider.name());

    loop {
        terminal.draw(|f| ui::draw_ui(f, &mut app, &theme))?;

        let Ok(first) = rx.recv() else {
            warn!("Action channel closed, leaving event loop");
            break;
        };

        for action in iter::once(first).chain(iter::from_fn(|| rx.try_recv().ok())) {
            debug!("Dispatching {:?}", action);
            for effect in update(&mut app, action) {
                match effect {
                    Effect::Quit => {
                        info!("Shutting down");
                        return Ok(());
                    }
                    Effect::Tick { id, after } => spawn_tick(id, after, tx.clone()),
                    Effect::Fetch { prompt } => {
                        spawn_fetch(provider.clone(), model.clone(), prompt, tx.clone())
                    }
                }
            }
        }
    }

    Ok(())
}

fn spawn_tick(id: u64, after: Duration, tx: mpsc::Sender<Action>) {
    tokio::spawn(async move {
        tokio::time::sleep(after).await;
        if tx.send(Action::Tick(id)).is_err() {
            debug!("Tick {id} undelivered: receiver dropped");
        }
    });
}

fn spawn_fetch(
    provider: Arc<dyn CompletionProvider>,
    model: String,
    prompt: String,
    tx: mpsc::Sender<Action>,
) {
    info!("Spawning fetch ({} chars) to {}", prompt.len(), provider.name());
    tokio::spawn(async move {
        let outcome = fetch_outcome(provider.as_ref(), &prompt, &model).await;
        if tx.send(Action::FetchCompleted(outcome)).is_err() {
            warn!("Failed to deliver fetch result: receiver dropped");
        }
    });
}

/// Run one completion and flatten the result into what the viewport shows:
/// the answer text, or the error's display text.
pub async fn fetch_outcome(
    provider: &dyn CompletionProvider,
    prompt: &str,
    model: &str,
) -> Result<String, String> {
    let request = CompletionRequest { prompt, model };
    match provider.complete(request).await {
        Ok(text) => {
            info!("Fetch completed ({} chars)", text.len());
            Ok(text)
        }
        Err(e) => {
            warn!("Fetch failed: {e}");
            Err(e.to_string())
        }
    }
}
