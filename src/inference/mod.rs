pub mod provider;
pub mod providers;
pub mod types;

pub use provider::{CompletionProvider, CompletionRequest, ProviderError};
pub use providers::ChatCompletionsProvider;
