//! Bot layer - Discord-specific interface and command handlers
//!
//! This module provides the Discord interface for Billed: slash commands for
//! submitting and listing bills, the admin dashboard, and autocomplete handlers.

/// Discord command implementations (bills, dashboard, general)
pub mod commands;
/// Discord interaction handlers (autocomplete, etc.)
pub mod handlers;

use crate::{
    config::settings::AppConfig,
    core::{session::Session, store::DbBillStore},
    errors::{Error, Result},
};
use poise::serenity_prelude as serenity;
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tracing::{error, info, instrument};

/// Shared data available to all bot commands.
pub struct BotData {
    /// Database connection for all database operations
    pub database: DatabaseConnection,
    /// Receipt storage settings and the employee directory
    pub config: Arc<AppConfig>,
}

impl BotData {
    /// Creates a new `BotData` instance.
    #[must_use]
    pub const fn new(database: DatabaseConnection, config: Arc<AppConfig>) -> Self {
        Self { database, config }
    }

    /// A store over the shared connection.
    #[must_use]
    pub fn store(&self) -> DbBillStore {
        DbBillStore::new(self.database.clone(), self.config.receipts.clone())
    }
}

/// Poise context used by every command
pub type Context<'a> = poise::Context<'a, BotData, Error>;

/// Opens the session of the command author, or tells them they are not registered.
pub async fn session_or_reply(ctx: Context<'_>) -> Result<Option<Session>> {
    let author_id = ctx.author().id.to_string();
    let session = ctx.data().config.session_for(&author_id);
    if session.is_none() {
        ctx.say("❌ You are not registered as an employee. Ask an administrator to add you to config.toml.")
            .await?;
    }
    Ok(session)
}

async fn on_error(error: poise::FrameworkError<'_, BotData, Error>) {
    match error {
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!("Error in command `{}`: {:?}", ctx.command().name, error);
            if let Err(e) = ctx.say(format!("An error occurred: {error}")).await {
                error!("Failed to send error message: {}", e);
            }
        }
        error => {
            if let Err(e) = poise::builtins::on_error(error).await {
                error!("Error while handling error: {}", e);
            }
        }
    }
}

/// Every command the bot registers. All of them are slash commands; the bot
/// does not request the message content intent, so it reads no prefixes.
#[must_use]
pub fn all_commands() -> Vec<poise::Command<BotData, Error>> {
    vec![
        commands::newbill(),
        commands::bills(),
        commands::dashboard(),
        commands::review(),
        commands::ping(),
        commands::help(),
    ]
}

/// Registers the commands and runs the Discord client until it stops.
#[instrument(skip(token, data))]
pub async fn run_bot(token: String, data: BotData) -> Result<()> {
    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: all_commands(),
            on_error: |error| Box::pin(on_error(error)),
            ..Default::default()
        })
        .setup(|ctx, ready, framework| {
            Box::pin(async move {
                info!("Logged in as {}", ready.user.name);
                info!("Registering commands globally...");
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                Ok(data)
            })
        })
        .build();

    let intents = serenity::GatewayIntents::non_privileged();

    info!("Setting up Serenity client for Poise framework...");
    let mut client = serenity::Client::builder(&token, intents)
        .framework(framework)
        .await?;

    info!("Starting bot client...");
    client.start().await?;
    Ok(())
}
