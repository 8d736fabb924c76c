//! # TUI Components
//!
//! This module contains all UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Display components whose fields are re-derived by the application:
//! - `StatusLine`: Bottom bar showing mode, active tab, activity and model
//!
//! ### Stateful Components (Event-Driven)
//!
//! Components that own local state and react to forwarded actions:
//! - `InputField`: Single-line prompt entry with cursor and placeholder
//! - `Viewport`: Scrollable response area
//! - `BusyIndicator`: Tick-driven spinner shown while a request is outstanding
//! - `TabStrip`: Clamped tab selection
//!
//! ### Co-location of Concerns
//!
//! Each component file contains everything related to that component:
//! state, event handling, rendering and tests.
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs            (this file)
//! ├── input_field.rs    (Prompt entry)
//! ├── viewport.rs       (Scrollable response view)
//! ├── busy_indicator.rs (Spinner overlay)
//! ├── tab_strip.rs      (Tab bar)
//! └── status_line.rs    (Bottom status bar)
//! ```

pub mod busy_indicator;
pub mod input_field;
pub mod status_line;
pub mod tab_strip;
pub mod viewport;

pub use busy_indicator::BusyIndicator;
pub use input_field::InputField;
pub use status_line::StatusLine;
pub use tab_strip::TabStrip;
pub use viewport::Viewport;
