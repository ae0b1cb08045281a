//! Telegram bot registering client appointments in the Nuga Best CRM store
//!
//! (c) Softlandia 2025

use nuga_booking_bot::config::{AppConfig, DatabaseLocation};
use nuga_booking_bot::core::traits::ConversationService;
use nuga_booking_bot::infrastructure::database;
use nuga_booking_bot::service_collection;
use nuga_booking_bot::telegram::{self, Command};

use anyhow::{Context, anyhow};
use log::{info, warn};
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;
use tokio::runtime::{Builder, Runtime};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env()?;

    let runtime: Runtime = Builder::new_multi_thread().enable_all().build()?;

    runtime.block_on(bot_task(config))
}

async fn bot_task(config: AppConfig) -> anyhow::Result<()> {
    let pool = database::lazy_pool(&config.database).with_context(|| match &config.database {
        DatabaseLocation::Url(url) => format!("invalid database url `{url}`"),
        DatabaseLocation::Path(path) => format!("invalid database path `{}`", path.display()),
    })?;

    if config.run_migrations {
        database::run_migrations(&pool)
            .await
            .context("failed to apply migrations")?;
        info!("database schema is up to date");
    }

    let provider = service_collection(pool)
        .build_provider()
        .map_err(|e| anyhow!("invalid service registrations: {e:?}"))?;

    let conversation_service = provider.get_required::<dyn ConversationService>();

    let bot = Bot::new(config.telegram_token);

    if let Err(e) = bot.set_my_commands(Command::bot_commands()).await {
        warn!("could not register the command list: {e}");
    }

    info!("starting dispatcher");

    Dispatcher::builder(bot, telegram::schema())
        .dependencies(dptree::deps![conversation_service])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    info!("Shutting down...");
    Ok(())
}
