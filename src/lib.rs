//! Promptdeck library exports for testing

use clap::ValueEnum;

pub mod core;
pub mod inference;
pub mod tui;

#[cfg(test)]
pub mod test_support;

/// Which OpenAI-compatible endpoint answers prompts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Provider {
    #[default]
    #[value(name = "openai")]
    OpenAi,
    #[value(name = "openrouter")]
    OpenRouter,
    #[value(name = "lmstudio")]
    LmStudio,
}

impl Provider {
    pub fn default_base_url(self) -> &'static str {
        match self {
            Provider::OpenAi => "https://api.openai.com/v1",
            Provider::OpenRouter => "https://openrouter.ai/api/v1",
            Provider::LmStudio => "http://localhost:1234/v1",
        }
    }

    pub fn default_model(self) -> &'static str {
        match self {
            Provider::OpenAi => "gpt-4o",
            Provider::OpenRouter => "openai/gpt-4o",
            Provider::LmStudio => "local-model",
        }
    }

    /// Env var holding the API key. `None` for local servers that take no auth.
    pub fn api_key_env(self) -> Option<&'static str> {
        match self {
            Provider::OpenAi => Some("OPENAI_API_KEY"),
            Provider::OpenRouter => Some("OPENROUTER_API_KEY"),
            Provider::LmStudio => None,
        }
    }

    pub fn base_url_env(self) -> &'static str {
        match self {
            Provider::OpenAi => "OPENAI_BASE_URL",
            Provider::OpenRouter => "OPENROUTER_BASE_URL",
            Provider::LmStudio => "LM_STUDIO_BASE_URL",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Provider::OpenAi => "openai",
            Provider::OpenRouter => "openrouter",
            Provider::LmStudio => "lmstudio",
        }
    }
}
