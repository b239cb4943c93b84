//! Scripture Bot - Main Entry Point
//!
//! A Telegram bot that replies to `/bible <reference>` with a prayer,
//! the requested verse and an explanation of it.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use scripture_bot::commands::{BotCommand, CommandHandler};
use scripture_bot::config::{BotSettings, GeminiConfig, TelegramConfig};
use scripture_bot::devotional::{ReplyFormatter, build_passage_prompt, build_prayer_prompt};
use scripture_bot::generation::GeminiClient;
use scripture_bot::telegram::TelegramBot;

/// Telegram bot that sends a prayer, a Bible verse and its explanation.
#[derive(Parser, Debug)]
#[command(name = "scripture_bot")]
#[command(about = "Answer scripture references on Telegram with a prayer, the verse and an explanation")]
#[command(version)]
struct Args {
    /// Path to the .env file for environment variables.
    #[arg(long, default_value = ".env")]
    env_file: String,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Print the prompts that would be sent for a reference and exit.
    #[arg(long, value_name = "REFERENCE")]
    print_prompts: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    init_logging(&args.log_level);

    if let Some(reference) = args.print_prompts {
        print_prompts(&reference);
        return Ok(());
    }

    // Load environment variables
    if let Err(e) = dotenvy::from_filename(&args.env_file) {
        debug!("Could not load .env file ({}): {}", args.env_file, e);
    }

    // Load configurations
    let gemini_config =
        GeminiConfig::from_env().context("Failed to load Gemini configuration from environment")?;

    let tg_config = TelegramConfig::from_env()
        .context("Failed to load Telegram configuration from environment")?;

    let bot_settings = BotSettings::from_env_with_defaults();

    info!(
        "Using model {} (timezone: {})",
        gemini_config.model,
        bot_settings.timezone.name()
    );

    let generator =
        Arc::new(GeminiClient::new(&gemini_config).context("Failed to create Gemini client")?);

    // Connect to Telegram
    let bot = TelegramBot::connect(&tg_config)
        .await
        .context("Failed to connect to Telegram")?;

    let handler = Arc::new(
        CommandHandler::new(
            bot_settings.command_prefix.clone(),
            generator,
            ReplyFormatter::new(bot_settings.timezone),
        )
        .with_bot_username(bot.username().map(str::to_owned)),
    );

    // Telegram's command menu only knows slash commands
    if bot_settings.command_prefix == "/"
        && let Err(e) = bot.register_commands(&BotCommand::menu()).await
    {
        warn!("Failed to register bot commands: {}", e);
    }

    info!("Starting scripture bot...");
    info!("Command prefix: {}", bot_settings.command_prefix);
    info!("Bot is running. Use Ctrl+C to stop.");

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl+C, shutting down...");
        }
        result = bot.run(Arc::clone(&handler)) => {
            if let Err(e) = result {
                warn!("Update loop ended with error: {}", e);
            }
        }
    }

    // Cleanup
    info!("Shutting down...");
    bot.disconnect().await;

    Ok(())
}

/// Initializes the logging subsystem.
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Prints both prompts for a reference.
fn print_prompts(reference: &str) {
    println!("--- Prayer prompt ---");
    println!("{}", build_prayer_prompt());
    println!();
    println!("--- Passage prompt ---");
    println!("{}", build_passage_prompt(reference));
}
