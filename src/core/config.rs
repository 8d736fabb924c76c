//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.promptdeck/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use clap::ValueEnum;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::Provider;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct DeckConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub openai: EndpointConfig,
    #[serde(default)]
    pub openrouter: EndpointConfig,
    #[serde(default)]
    pub lmstudio: EndpointConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub default_provider: Option<String>,
    pub default_model: Option<String>,
    pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct EndpointConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct UiConfig {
    pub tabs: Option<Vec<String>>,
    pub placeholder: Option<String>,
    pub tick_interval_ms: Option<u64>,
    pub quit_key: Option<char>,
}

impl DeckConfig {
    fn endpoint(&self, provider: Provider) -> &EndpointConfig {
        match provider {
            Provider::OpenAi => &self.openai,
            Provider::OpenRouter => &self.openrouter,
            Provider::LmStudio => &self.lmstudio,
        }
    }
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 100;
/// Shortest spinner interval accepted from config (about 60 frames a second).
pub const MIN_TICK_INTERVAL_MS: u64 = 16;
pub const DEFAULT_PLACEHOLDER: &str = "Type here...";
pub const DEFAULT_QUIT_KEY: char = 'q';
pub const DEFAULT_TABS: &[&str] = &[
    "AI",
    "Search",
    "Console",
    "Active Sprint(s)",
    "Backlog(s)",
    "Risks",
    "Dependencies",
];

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub provider: Provider,
    pub model_name: String,
    pub api_key: Option<String>,
    pub base_url: String,
    pub request_timeout: Duration,
    pub tabs: Vec<String>,
    pub placeholder: String,
    pub tick_interval: Duration,
    pub quit_key: char,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        let provider = Provider::default();
        Self {
            provider,
            model_name: provider.default_model().to_string(),
            api_key: None,
            base_url: provider.default_base_url().to_string(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            tabs: default_tabs(),
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            tick_interval: Duration::from_millis(DEFAULT_TICK_INTERVAL_MS),
            quit_key: DEFAULT_QUIT_KEY,
        }
    }
}

fn default_tabs() -> Vec<String> {
    DEFAULT_TABS.iter().map(|s| s.to_string()).collect()
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.promptdeck/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".promptdeck").join("config.toml"))
}

/// Load config from `~/.promptdeck/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `DeckConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<DeckConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(DeckConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(DeckConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config: DeckConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &PathBuf) {
    let default_content = r#"# Promptdeck Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# default_provider = "openai"        # "openai", "openrouter" or "lmstudio"
# default_model = "gpt-4o"
# request_timeout_secs = 120

# [openai]
# api_key = "sk-..."                 # Or set OPENAI_API_KEY env var
# base_url = "https://api.openai.com/v1"

# [openrouter]
# api_key = "sk-or-..."              # Or set OPENROUTER_API_KEY env var
# base_url = "https://openrouter.ai/api/v1"

# [lmstudio]
# base_url = "http://localhost:1234/v1"

# [ui]
# tabs = ["AI", "Search", "Console", "Active Sprint(s)", "Backlog(s)", "Risks", "Dependencies"]
# placeholder = "Type here..."
# tick_interval_ms = 100
# quit_key = "q"
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
///
/// `cli_provider` and `cli_model` are from CLI flags (None = not specified).
pub fn resolve(
    config: &DeckConfig,
    cli_provider: Option<Provider>,
    cli_model: Option<&str>,
) -> ResolvedConfig {
    resolve_with_env(config, cli_provider, cli_model, |var| std::env::var(var).ok())
}

/// [`resolve`] with the environment lookup supplied by the caller.
pub fn resolve_with_env(
    config: &DeckConfig,
    cli_provider: Option<Provider>,
    cli_model: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    // Provider: CLI → env → config → default
    let provider = cli_provider
        .or_else(|| parse_provider(env("PROMPTDECK_PROVIDER")))
        .or_else(|| parse_provider(config.general.default_provider.clone()))
        .unwrap_or_default();

    // Model: CLI → env → config → provider default
    let model_name = cli_model
        .map(|s| s.to_string())
        .or_else(|| env("PROMPTDECK_MODEL"))
        .or_else(|| config.general.default_model.clone())
        .unwrap_or_else(|| provider.default_model().to_string());

    let endpoint = config.endpoint(provider);

    // API key: env → config
    let api_key = provider
        .api_key_env()
        .and_then(&env)
        .or_else(|| endpoint.api_key.clone());

    // Base URL: env → config → default
    let base_url = env(provider.base_url_env())
        .or_else(|| endpoint.base_url.clone())
        .unwrap_or_else(|| provider.default_base_url().to_string());

    let tabs = match config.ui.tabs.as_ref() {
        Some(labels) if !labels.is_empty() => labels.clone(),
        Some(_) => {
            warn!("Config lists no tabs, falling back to defaults");
            default_tabs()
        }
        None => default_tabs(),
    };

    let tick_interval_ms = match config.ui.tick_interval_ms {
        Some(ms) if ms < MIN_TICK_INTERVAL_MS => {
            warn!(
                "tick_interval_ms = {} is below the {} ms floor, using the floor",
                ms, MIN_TICK_INTERVAL_MS
            );
            MIN_TICK_INTERVAL_MS
        }
        Some(ms) => ms,
        None => DEFAULT_TICK_INTERVAL_MS,
    };

    ResolvedConfig {
        provider,
        model_name,
        api_key,
        base_url,
        request_timeout: Duration::from_secs(
            config
                .general
                .request_timeout_secs
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        ),
        tabs,
        placeholder: config
            .ui
            .placeholder
            .clone()
            .unwrap_or_else(|| DEFAULT_PLACEHOLDER.to_string()),
        tick_interval: Duration::from_millis(tick_interval_ms),
        quit_key: config.ui.quit_key.unwrap_or(DEFAULT_QUIT_KEY),
    }
}

fn parse_provider(name: Option<String>) -> Option<Provider> {
    let name = name?;
    match Provider::from_str(&name, true) {
        Ok(provider) => Some(provider),
        Err(_) => {
            warn!("Unknown provider '{}', ignoring", name);
            None
        }
    }
}
