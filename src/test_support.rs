//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use async_trait::async_trait;

use crate::core::action::{Action, Key, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::App;
use crate::inference::{CompletionProvider, CompletionRequest, ProviderError};

/// A provider that echoes the prompt back, or fails with a fixed message.
pub struct EchoProvider {
    pub fail_with: Option<String>,
}

#[async_trait]
impl CompletionProvider for EchoProvider {
    fn name(&self) -> &str {
        "echo"
    }

    async fn complete(&self, request: CompletionRequest<'_>) -> Result<String, ProviderError> {
        match &self.fail_with {
            Some(msg) => Err(ProviderError::Network(msg.clone())),
            None => Ok(format!("echo: {}", request.prompt)),
        }
    }
}

/// Creates a test App sized to an 80x24 terminal.
pub fn test_app() -> App {
    let mut app = App::new(&ResolvedConfig::default());
    update(&mut app, Action::Resize { width: 80, height: 24 });
    app
}

/// Creates a test App with the given tab labels.
pub fn test_app_with_tabs(labels: &[&str]) -> App {
    let config = ResolvedConfig {
        tabs: labels.iter().map(|s| s.to_string()).collect(),
        ..ResolvedConfig::default()
    };
    let mut app = App::new(&config);
    update(&mut app, Action::Resize { width: 80, height: 24 });
    app
}

/// Sends each character of `text` as a key press.
pub fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        update(app, Action::Key(Key::Char(c)));
    }
}
