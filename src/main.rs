use std::fs::File;

use clap::Parser;
use log::{info, warn};
use promptdeck::Provider;
use promptdeck::core::config::{self, DeckConfig};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

#[derive(Parser)]
#[command(name = "promptdeck", about = "Terminal prompt deck for OpenAI-compatible models")]
struct Args {
    /// LLM provider to use (overrides config and PROMPTDECK_PROVIDER)
    #[arg(short, long, value_enum)]
    provider: Option<Provider>,

    /// Model name to request (overrides config and PROMPTDECK_MODEL)
    #[arg(short, long)]
    model: Option<String>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // The terminal belongs to the UI, so logs go to promptdeck.log instead
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    if let Ok(log_file) = File::create("promptdeck.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = config::load_config().unwrap_or_else(|e| {
        warn!("Using default config: {e}");
        DeckConfig::default()
    });
    let resolved = config::resolve(&file_config, args.provider, args.model.as_deref());

    info!(
        "Promptdeck starting up with provider {} and model {}",
        resolved.provider.label(),
        resolved.model_name
    );

    promptdeck::tui::run(resolved)
}
