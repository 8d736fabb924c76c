use std::fmt;

use async_trait::async_trait;

/// Errors that can occur during provider operations.
/// The `Display` text is what the user sees in the viewport.
#[derive(Debug)]
pub enum ProviderError {
    /// Provider misconfigured (missing API key, bad URL).
    Config(String),
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// API returned an error response.
    Api { status: u16, message: String },
    /// Failed to parse the provider's response.
    Parse(String),
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderError::Config(msg) => write!(f, "config error: {msg}"),
            ProviderError::Network(msg) => write!(f, "network error: {msg}"),
            ProviderError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            ProviderError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for ProviderError {}

/// Everything a provider needs to fulfill a completion request.
pub struct CompletionRequest<'a> {
    pub prompt: &'a str,
    pub model: &'a str,
}

#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Returns the name of the provider.
    fn name(&self) -> &str;

    /// Produces the full completion text for a single prompt.
    async fn complete(&self, request: CompletionRequest<'_>) -> Result<String, ProviderError>;
}
