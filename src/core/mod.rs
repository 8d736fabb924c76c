//! # Core Application Logic
//!
//! The state machine behind Promptdeck. It owns the application state and
//! decides what every incoming action does, but performs no I/O itself:
//! network calls and timers leave `update()` as `Effect` values that the
//! `tui` event loop executes.
//!
//! ```text
//!     Action ──► update(&mut App) ──► Vec<Effect>
//!                     │
//!                     └──► forwarded to InputField / Viewport
//! ```
//!
//! ## Modules
//!
//! - [`state`]: `App`, `Mode` and `Dimensions`
//! - [`action`]: `Action`, `Key`, `Effect` and the `update()` reducer
//! - [`config`]: config file, environment and CLI resolution

pub mod action;
pub mod config;
pub mod state;
