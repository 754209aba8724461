mod config;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use chairspot_channels::{ChannelAdapter, DiscordAdapter};
use chairspot_media::TypefaceRenderer;
use chairspot_pipeline::{HttpFetcher, MessagePipeline, PipelineSettings};
use chairspot_vision::GoogleVision;

use config::Config;

#[derive(Parser)]
#[command(name = "chairspot")]
#[command(about = "Chairspot — Discord bot that crops and captions detected chairs")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Connect to Discord and handle messages until interrupted
    Run,
    /// Validate startup preconditions without connecting anywhere
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run => run(config).await,
        Commands::Check => check(config),
    }
}

async fn run(config: Config) -> Result<()> {
    chairspot_logging::init_logger(&config.log_dir, &config.log_level);

    let token = config.discord_token.context("DISCORD_TOKEN is not set")?;
    let api_key = config.vision_api_key.context("VISION_API_KEY is not set")?;

    // Startup preconditions: a missing or malformed typeface aborts here,
    // before any message is handled.
    let renderer = Arc::new(
        TypefaceRenderer::from_file(Path::new(&config.font_path))
            .context("failed to load caption typeface")?,
    );
    let localizer = Arc::new(GoogleVision::new(api_key));
    let fetcher = Arc::new(HttpFetcher::new());

    let pipeline = Arc::new(MessagePipeline::new(
        localizer,
        fetcher,
        renderer,
        PipelineSettings {
            label: config.label,
            caption: config.caption,
            max_handlers: config.max_handlers,
        },
    ));

    let adapter = DiscordAdapter::new(token, pipeline);
    info!(adapter = adapter.name(), "starting chat adapter");
    adapter.start().await
}

fn check(config: Config) -> Result<()> {
    let mut failed = false;

    match &config.discord_token {
        Some(_) => println!("discord token: set"),
        None => {
            println!("discord token: MISSING (set DISCORD_TOKEN)");
            failed = true;
        }
    }
    match &config.vision_api_key {
        Some(_) => println!("vision API key: set"),
        None => {
            println!("vision API key: MISSING (set VISION_API_KEY)");
            failed = true;
        }
    }
    match TypefaceRenderer::from_file(Path::new(&config.font_path)) {
        Ok(_) => println!("typeface: {} loads", config.font_path),
        Err(err) => {
            println!("typeface: {err:#}");
            failed = true;
        }
    }
    println!(
        "label: {}  caption: {}  max handlers: {}",
        config.label, config.caption, config.max_handlers
    );

    if failed {
        anyhow::bail!("startup preconditions not met");
    }
    Ok(())
}
